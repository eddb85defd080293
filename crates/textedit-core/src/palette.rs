//! Color palettes.
//!
//! Colors are packed `0xAABBGGRR` values, the layout immediate-mode renderers usually consume.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use textedit_lang::ColorClass;

/// Palette slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum PaletteIndex {
    Default,
    Keyword,
    Number,
    String,
    CharLiteral,
    Punctuation,
    Preprocessor,
    Identifier,
    KnownIdentifier,
    PreprocIdentifier,
    Comment,
    MultiLineComment,
    Background,
    Cursor,
    Selection,
    ErrorMarker,
    Breakpoint,
    LineNumber,
    CurrentLineFill,
    CurrentLineFillInactive,
    CurrentLineEdge,
}

/// Number of palette slots.
pub const PALETTE_SIZE: usize = 21;

impl From<ColorClass> for PaletteIndex {
    fn from(class: ColorClass) -> Self {
        match class {
            ColorClass::Default => PaletteIndex::Default,
            ColorClass::Keyword => PaletteIndex::Keyword,
            ColorClass::Number => PaletteIndex::Number,
            ColorClass::String => PaletteIndex::String,
            ColorClass::CharLiteral => PaletteIndex::CharLiteral,
            ColorClass::Punctuation => PaletteIndex::Punctuation,
            ColorClass::Preprocessor => PaletteIndex::Preprocessor,
            ColorClass::Identifier => PaletteIndex::Identifier,
            ColorClass::KnownIdentifier => PaletteIndex::KnownIdentifier,
            ColorClass::PreprocIdentifier => PaletteIndex::PreprocIdentifier,
            ColorClass::Comment => PaletteIndex::Comment,
            ColorClass::MultiLineComment => PaletteIndex::MultiLineComment,
        }
    }
}

/// A full set of colors, one per [`PaletteIndex`].
///
/// Serializes as a list of 21 integers in slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette([u32; PALETTE_SIZE]);

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

impl Palette {
    /// Build from raw colors in slot order.
    pub const fn new(colors: [u32; PALETTE_SIZE]) -> Self {
        Self(colors)
    }

    /// Dark theme.
    pub const fn dark() -> Self {
        Self([
            0xffcccccc, // Default
            0xff8375f9, // Keyword
            0xfff8f8f8, // Number
            0xff70abff, // String
            0xff70abff, // Char literal
            0xffcccccc, // Punctuation
            0xff408080, // Preprocessor
            0xffcccccc, // Identifier
            0xfff092b3, // Known identifier
            0xffc040a0, // Preproc identifier
            0xff7c736b, // Comment
            0xff7c736b, // Multi-line comment
            0xff1f1f1f, // Background
            0xffe0e0e0, // Cursor
            0x80a06020, // Selection
            0x800020ff, // Error marker
            0x40f08000, // Breakpoint
            0xff727272, // Line number
            0xff303030, // Current line fill
            0xff303030, // Current line fill (inactive)
            0x40a0a0a0, // Current line edge
        ])
    }

    /// Light theme.
    pub const fn light() -> Self {
        Self([
            0xff7f7f7f, 0xffff0c06, 0xff008000, 0xff2020a0, 0xff304070, 0xff000000, 0xff406060,
            0xff404040, 0xff606010, 0xffc040a0, 0xff205020, 0xff405020, 0xffffffff, 0xff000000,
            0x80600000, 0xa00010ff, 0x80f08000, 0xff505000, 0x40000000, 0x40808080, 0x40000000,
        ])
    }

    /// Blue-background retro theme.
    pub const fn retro_blue() -> Self {
        Self([
            0xff00ffff, 0xffffff00, 0xff00ff00, 0xff808000, 0xff808000, 0xffffffff, 0xff008000,
            0xff00ffff, 0xffffffff, 0xffff00ff, 0xff808080, 0xff404040, 0xff800000, 0xff0080ff,
            0x80ffff00, 0xa00000ff, 0x80ff8000, 0xff808000, 0x40000000, 0x40808080, 0x40000000,
        ])
    }

    /// Look up a built-in palette by name: `dark`, `light` or `retro_blue`.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            "retro_blue" | "retro-blue" => Some(Self::retro_blue()),
            _ => None,
        }
    }

    /// Raw colors in slot order.
    pub fn colors(&self) -> &[u32; PALETTE_SIZE] {
        &self.0
    }
}

impl Index<PaletteIndex> for Palette {
    type Output = u32;

    fn index(&self, index: PaletteIndex) -> &u32 {
        &self.0[index as usize]
    }
}

impl IndexMut<PaletteIndex> for Palette {
    fn index_mut(&mut self, index: PaletteIndex) -> &mut u32 {
        &mut self.0[index as usize]
    }
}

/// Per-channel average of two packed colors.
pub fn blend_half(a: u32, b: u32) -> u32 {
    (0..4u32).fold(0u32, |acc, channel| {
        let shift = channel * 8;
        let mixed = (((a >> shift) & 0xff) + ((b >> shift) & 0xff)) / 2;
        acc | (mixed << shift)
    })
}
