//! A scripted editing session: load options, type, comment, undo, and print the colorized
//! result.
//!
//! Run with `RUST_LOG=textedit_core=debug` to see the engine's tracing output.

use textedit_core::{
    Coordinates, EditorOptions, InputSnapshot, Key, MemoryClipboard, Modifiers, MonospaceMetrics,
    SelectionMode, TextEditor, ViewGeometry,
};
use tracing_subscriber::EnvFilter;

const OPTIONS: &str = "\
language: c
tab_size: 4
colorize_batch_lines: 2
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = EditorOptions::from_yaml(OPTIONS)?;
    let mut editor = TextEditor::with_options(&options)?;
    editor.set_text("#include <stdio.h>\n\nint main() {\n\treturn 0;\n}");

    let metrics = MonospaceMetrics::default();
    let geometry = ViewGeometry::default();
    let mut clipboard = MemoryClipboard::default();
    let mut frame = |editor: &mut TextEditor, input: InputSnapshot| {
        editor.handle_input(&input, &metrics, &geometry, &mut clipboard);
        // One bounded colorizer pass per frame, as a host would.
        editor.colorize();
    };

    editor.set_cursor_position(Coordinates::new(3, 14));
    frame(&mut editor, InputSnapshot::key(Key::Enter, Modifiers::NONE));
    frame(&mut editor, InputSnapshot::typed("printf(\"bye\\n\");"));

    editor.set_selection(
        Coordinates::new(3, 0),
        Coordinates::new(4, 1),
        SelectionMode::Line,
    );
    frame(&mut editor, InputSnapshot::key(Key::Char('/'), Modifiers::CTRL));
    println!("--- commented\n{}", editor.get_text());

    frame(&mut editor, InputSnapshot::key(Key::Char('z'), Modifiers::CTRL));
    println!("--- after undo\n{}", editor.get_text());

    editor.colorize_all();
    println!("--- colors");
    for line in 0..editor.line_count() {
        let colors: Vec<String> = editor
            .line(line)
            .iter()
            .take(6)
            .map(|glyph| format!("{:08x}", editor.glyph_color(glyph)))
            .collect();
        println!("{line:>2}: {}", colors.join(" "));
    }
    Ok(())
}
