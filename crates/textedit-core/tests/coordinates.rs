//! Column/index mapping properties over randomized lines.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use textedit_core::buffer::sequence_len;
use textedit_core::coords::{column_to_index, index_to_column, max_column};
use textedit_core::{Coordinates, Glyph, TextEditor};

const PIECES: &[&str] = &["a", "Z", " ", "\t", "é", "€", "中", "👋", "\\", "/*"];

fn random_line(rng: &mut StdRng) -> Vec<Glyph> {
    let len = rng.gen_range(0..40);
    let mut text = String::new();
    for _ in 0..len {
        text.push_str(PIECES[rng.gen_range(0..PIECES.len())]);
    }
    text.bytes().map(Glyph::new).collect()
}

/// Indices where a character starts, plus the line end.
fn char_starts(line: &[Glyph]) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut i = 0;
    while i < line.len() {
        starts.push(i);
        i += sequence_len(line, i);
    }
    starts.push(line.len());
    starts
}

#[test]
fn test_column_index_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x7e57_c001);
    for _ in 0..500 {
        let line = random_line(&mut rng);
        let tab_size = rng.gen_range(1..=8);
        for index in char_starts(&line) {
            let column = index_to_column(&line, index, tab_size);
            assert_eq!(
                column_to_index(&line, column, tab_size),
                index,
                "line {:?}, tab size {tab_size}",
                line.iter().map(|g| g.ch).collect::<Vec<_>>()
            );
        }
    }
}

#[test]
fn test_columns_are_monotonic() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let line = random_line(&mut rng);
        let starts = char_starts(&line);
        let columns: Vec<usize> = starts.iter().map(|&i| index_to_column(&line, i, 4)).collect();
        assert!(columns.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(columns.last().copied(), Some(max_column(&line, 4)));
    }
}

#[test]
fn test_mid_tab_column_maps_past_the_tab() {
    let line: Vec<Glyph> = b"\tx".iter().copied().map(Glyph::new).collect();
    // Columns 1..=3 fall inside the tab's span.
    for column in 1..=4 {
        assert_eq!(column_to_index(&line, column, 4), 1);
    }
}

#[test]
fn test_stray_bytes_count_as_characters() {
    let mut editor = TextEditor::new();
    editor.set_text_bytes(&[b'a', 0x80, 0xE2, 0x82, b'b']);
    assert_eq!(editor.line_character_count(0), 5);
    assert_eq!(editor.line_max_column(0), 5);
    assert_eq!(
        editor.sanitize_coordinates(Coordinates::new(0, 99)),
        Coordinates::new(0, 5)
    );
}

#[test]
fn test_tab_size_changes_columns() {
    let mut editor = TextEditor::new();
    editor.set_text("\t\tx");
    assert_eq!(editor.line_max_column(0), 9);
    editor.set_tab_size(2);
    assert_eq!(editor.line_max_column(0), 5);
    editor.set_tab_size(0);
    assert_eq!(editor.tab_size(), 1);
}
