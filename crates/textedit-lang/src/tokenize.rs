//! Hand-written tokenizers.
//!
//! A tokenizer receives the remainder of a line (raw UTF-8 code units, starting at the current
//! scan position) and reports the next token as a byte range relative to that slice. It may skip
//! leading blanks, so `start` is not necessarily `0`.

use crate::ColorClass;

/// A token produced by a tokenizer, as a half-open byte range relative to the scanned slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
    /// Class assigned to the token.
    pub class: ColorClass,
}

impl Token {
    /// Create a token.
    pub fn new(start: usize, end: usize, class: ColorClass) -> Self {
        debug_assert!(start <= end);
        Self { start, end, class }
    }

    /// Token length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` for a zero-length token.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Signature of a custom tokenizer.
///
/// Returns `None` when nothing at the start of `input` is recognized; the caller then advances by
/// one glyph and leaves it default-colored.
pub type TokenizeFn = fn(input: &[u8]) -> Option<Token>;

/// C-family tokenizer: strings, character literals, identifiers, numbers and punctuation.
///
/// Leading blanks are skipped. A slice made only of blanks yields an empty default token at its
/// end, which lets the caller finish the line.
pub fn c_style(input: &[u8]) -> Option<Token> {
    let begin = input
        .iter()
        .position(|&b| b != b' ' && b != b'\t')
        .unwrap_or(input.len());
    if begin == input.len() {
        return Some(Token::new(begin, begin, ColorClass::Default));
    }

    let rest = &input[begin..];
    let (len, class) = if let Some(len) = string_literal(rest) {
        (len, ColorClass::String)
    } else if let Some(len) = char_literal(rest) {
        (len, ColorClass::CharLiteral)
    } else if let Some(len) = identifier(rest) {
        (len, ColorClass::Identifier)
    } else if let Some(len) = number(rest) {
        (len, ColorClass::Number)
    } else if let Some(len) = punctuation(rest) {
        (len, ColorClass::Punctuation)
    } else {
        return None;
    };

    Some(Token::new(begin, begin + len, class))
}

/// `"..."` with `\"` escapes. An unterminated string is not a token.
pub fn string_literal(input: &[u8]) -> Option<usize> {
    if input.first() != Some(&b'"') {
        return None;
    }

    let mut p = 1;
    while p < input.len() {
        match input[p] {
            b'"' => return Some(p + 1),
            b'\\' if input.get(p + 1) == Some(&b'"') => p += 2,
            _ => p += 1,
        }
    }
    None
}

/// `'x'` or `'\x'`.
pub fn char_literal(input: &[u8]) -> Option<usize> {
    if input.first() != Some(&b'\'') {
        return None;
    }

    let mut p = 1;
    if input.get(p) == Some(&b'\\') {
        p += 1;
    }
    if p < input.len() {
        p += 1;
    }
    (input.get(p) == Some(&b'\'')).then_some(p + 1)
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn identifier(input: &[u8]) -> Option<usize> {
    let first = *input.first()?;
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return None;
    }

    let len = 1 + input[1..]
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    Some(len)
}

/// Decimal, hex (`0x`), binary (`0b`) and floating point numbers with C suffixes.
pub fn number(input: &[u8]) -> Option<usize> {
    let first = *input.first()?;
    let starts_with_digit = first.is_ascii_digit();
    if first != b'+' && first != b'-' && !starts_with_digit {
        return None;
    }

    let digits = |from: usize, pred: fn(&u8) -> bool| -> usize {
        from + input[from..].iter().take_while(|b| pred(b)).count()
    };

    let mut p = digits(1, u8::is_ascii_digit);
    if !starts_with_digit && p == 1 {
        return None;
    }

    let mut is_float = false;
    let mut is_hex = false;
    let mut is_binary = false;

    match input.get(p) {
        Some(b'.') => {
            is_float = true;
            p = digits(p + 1, u8::is_ascii_digit);
        }
        Some(b'x' | b'X') => {
            is_hex = true;
            p = digits(p + 1, u8::is_ascii_hexdigit);
        }
        Some(b'b' | b'B') => {
            is_binary = true;
            p = digits(p + 1, |b| *b == b'0' || *b == b'1');
        }
        _ => {}
    }

    if !is_hex && !is_binary {
        if matches!(input.get(p), Some(b'e' | b'E')) {
            is_float = true;
            p += 1;
            if matches!(input.get(p), Some(b'+' | b'-')) {
                p += 1;
            }
            let exponent_end = digits(p, u8::is_ascii_digit);
            if exponent_end == p {
                return None;
            }
            p = exponent_end;
        }

        if input.get(p) == Some(&b'f') {
            p += 1;
        }
    }

    if !is_float {
        p = digits(p, |b| matches!(b, b'u' | b'U' | b'l' | b'L'));
    }

    Some(p)
}

/// Single-character operators and delimiters.
pub fn punctuation(input: &[u8]) -> Option<usize> {
    match input.first()? {
        b'[' | b']' | b'{' | b'}' | b'!' | b'%' | b'^' | b'&' | b'*' | b'(' | b')' | b'-'
        | b'+' | b'=' | b'~' | b'|' | b'<' | b'>' | b'?' | b':' | b'/' | b';' | b',' | b'.' => {
            Some(1)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_style_skips_blanks() {
        let token = c_style(b"  \tfoo").unwrap();
        assert_eq!(token, Token::new(3, 6, ColorClass::Identifier));
    }

    #[test]
    fn test_c_style_blank_tail_is_empty_default_token() {
        let token = c_style(b"   ").unwrap();
        assert!(token.is_empty());
        assert_eq!(token.start, 3);
        assert_eq!(token.class, ColorClass::Default);
    }

    #[test]
    fn test_string_with_escaped_quote() {
        assert_eq!(string_literal(br#""a\"b" rest"#), Some(6));
        assert_eq!(string_literal(br#""unterminated"#), None);
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(char_literal(b"'a'"), Some(3));
        assert_eq!(char_literal(br"'\n'"), Some(4));
        assert_eq!(char_literal(b"'ab'"), None);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(number(b"42;"), Some(2));
        assert_eq!(number(b"0xff80u"), Some(7));
        assert_eq!(number(b"0b0101"), Some(6));
        assert_eq!(number(b"1.5e-3f"), Some(7));
        assert_eq!(number(b"10UL"), Some(4));
        assert_eq!(number(b"1e"), None);
        assert_eq!(number(b"-x"), None);
    }

    #[test]
    fn test_unknown_byte_is_not_a_token() {
        assert_eq!(c_style(b"@x"), None);
        assert_eq!(c_style("é".as_bytes()), None);
    }
}
