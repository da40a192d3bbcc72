//! Terminal capability
//!
//! Counters never read the process environment on their own. Everything
//! they need from the terminal goes through the [`Terminal`] trait, which
//! is resolved once and handed to the [`Manager`](crate::Manager).
//!
//! [`AnsiTerminal`] is a small implementation for terminals that understand
//! SGR escape sequences.

pub mod ansi;
mod color;
pub use color::Color;
mod term_size;
pub use term_size::*;

/// What glyphs the terminal can display
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphSupport {
    /// All block elements are available
    #[default]
    Full,
    /// Only the half and full blocks render correctly
    Block,
    /// The terminal cannot encode anything outside of ASCII
    Ascii,
}

/// Terminal capability used for rendering
pub trait Terminal: Send + Sync {
    /// Current width of the terminal in columns
    fn width(&self) -> usize;

    /// Display width of the text, ignoring escape sequences
    fn visible_len(&self, text: &str) -> usize {
        ansi::visible_width(text)
    }

    /// Wrap the text in the color. Terminals without color support
    /// should return the text unchanged
    fn colorize(&self, text: &str, color: &Color) -> String;

    /// Glyphs that can be used to draw a bar
    fn glyph_support(&self) -> GlyphSupport {
        GlyphSupport::Full
    }
}

/// Terminal that uses SGR escape sequences for colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnsiTerminal {
    use_color: bool,
    glyphs: GlyphSupport,
    width: Option<usize>,
}

impl AnsiTerminal {
    pub fn new(use_color: bool, glyphs: GlyphSupport) -> Self {
        Self {
            use_color,
            glyphs,
            width: None,
        }
    }

    /// Detect capabilities of the terminal attached to stdout.
    ///
    /// Colors are used if stdout is a terminal and `NO_COLOR` is not set.
    /// Glyph support is guessed from the locale (`LC_ALL`, `LC_CTYPE`, `LANG`),
    /// and on Windows, from whether this is Windows Terminal (`WT_SESSION`).
    pub fn detect() -> Self {
        use std::io::IsTerminal;
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|x| !x.is_empty());
        let use_color = !no_color && std::io::stdout().is_terminal();
        Self::new(use_color, detect_glyph_support())
    }

    /// Use a fixed width instead of querying the terminal size
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }
}

fn detect_glyph_support() -> GlyphSupport {
    if cfg!(windows) {
        return if std::env::var_os("WT_SESSION").is_some() {
            GlyphSupport::Full
        } else {
            GlyphSupport::Block
        };
    }
    let locale = ["LC_ALL", "LC_CTYPE", "LANG"]
        .into_iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.is_empty());
    match locale {
        // nothing is set, assume modern terminal
        None => GlyphSupport::Full,
        Some(mut value) => {
            value.make_ascii_lowercase();
            if value.contains("utf-8") || value.contains("utf8") {
                GlyphSupport::Full
            } else {
                GlyphSupport::Ascii
            }
        }
    }
}

impl Terminal for AnsiTerminal {
    fn width(&self) -> usize {
        match self.width {
            Some(w) => w,
            None => term_width_or_default(),
        }
    }

    fn colorize(&self, text: &str, color: &Color) -> String {
        if !self.use_color || text.is_empty() {
            return text.to_string();
        }
        match color.sgr() {
            Ok(sgr) => format!("\x1b[{sgr}m{text}{}", ansi::RESET),
            // colors are validated when building the counter
            Err(_) => text.to_string(),
        }
    }

    fn glyph_support(&self) -> GlyphSupport {
        self.glyphs
    }
}
