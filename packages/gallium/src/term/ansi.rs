use unicode_width::UnicodeWidthChar;

/// SGR reset sequence
pub const RESET: &str = "\x1b[0m";

/// Iterator of (char, width), where chars inside escape sequences have 0 width
pub fn with_width(x: std::str::Chars<'_>) -> AnsiWidthIter<'_> {
    AnsiWidthIter {
        is_escaping: false,
        chars: x,
    }
}

/// Display width of the text in a terminal, ignoring escape sequences
pub fn visible_width(text: &str) -> usize {
    with_width(text.chars()).map(|(_, w)| w).sum()
}

/// Display width of a single char, or 0 for control chars.
///
/// Ambiguous-width chars (which include the block elements) count as 1 column
#[inline]
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

pub struct AnsiWidthIter<'a> {
    is_escaping: bool,
    chars: std::str::Chars<'a>,
}

impl Iterator for AnsiWidthIter<'_> {
    type Item = (char, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.chars.next()?;
        let width = if self.is_escaping {
            if is_esc_end(c) {
                self.is_escaping = false;
            }
            0
        } else if c == '\x1b' {
            self.is_escaping = true;
            0
        } else {
            char_width(c)
        };

        Some((c, width))
    }
}

pub(crate) fn is_esc_end(c: char) -> bool {
    // we only do very basic check right now
    c < u8::MAX as char && b"mAKGJBCDEFHSTfhlin".contains(&(c as u8))
}
