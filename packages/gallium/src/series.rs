use crate::term::{GlyphSupport, Terminal, ansi};
use crate::{Error, Result};

/// Glyphs used to draw a bar.
///
/// The first glyph is the empty (fill) glyph, and the last one is the full glyph.
/// The ones in between are fractional glyphs used for the transition between
/// full and empty, so the bar can move in steps smaller than one cell.
///
/// ```text
/// 45% |████▋     |
///      0123456789
/// ```
/// Cells 0 to 3 are full, 4 is fractional, 5 to 9 are empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Series(Vec<char>);

impl Series {
    /// Eighth blocks
    pub const STD: &'static str = " ▏▎▍▌▋▊▉█";
    /// Half blocks, for consoles that don't render the eighths
    pub const BLOCK: &'static str = " ▌█";
    /// Fallback for terminals that cannot encode non-ASCII
    pub const ASCII: &'static str = " |";

    /// Create a series from the glyphs.
    ///
    /// Each glyph must be a single char that takes exactly one column,
    /// and there must be at least 2 glyphs.
    pub fn new(glyphs: &str) -> Result<Self> {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.len() < 2 {
            return Err(Error::InvalidConfig(format!(
                "series needs at least 2 glyphs, got {}",
                glyphs.len()
            )));
        }
        if let Some(c) = glyphs.iter().find(|c| ansi::char_width(**c) != 1) {
            return Err(Error::InvalidConfig(format!(
                "series glyph {c:?} does not take exactly one column"
            )));
        }
        Ok(Self(glyphs))
    }

    /// Pick the series to use on the terminal.
    ///
    /// If the user did not specify one, the default is picked based on
    /// what the terminal supports. A user series that the terminal cannot encode
    /// falls back to [`Series::ASCII`].
    pub fn resolve(term: &dyn Terminal, user: Option<Series>) -> Self {
        let support = term.glyph_support();
        match user {
            Some(series) => {
                if support == GlyphSupport::Ascii && !series.is_ascii() {
                    log::debug!("terminal cannot encode series {series}, using ascii fallback");
                    Self::ascii()
                } else {
                    series
                }
            }
            None => match support {
                GlyphSupport::Full => Self::from_static(Self::STD),
                GlyphSupport::Block => Self::from_static(Self::BLOCK),
                GlyphSupport::Ascii => Self::ascii(),
            },
        }
    }

    fn ascii() -> Self {
        Self::from_static(Self::ASCII)
    }

    fn from_static(glyphs: &'static str) -> Self {
        Self(glyphs.chars().collect())
    }

    /// Number of glyphs
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// If all glyphs are ASCII
    pub fn is_ascii(&self) -> bool {
        self.0.iter().all(char::is_ascii)
    }

    /// The empty glyph
    pub fn empty(&self) -> char {
        self.0[0]
    }

    /// The full glyph
    pub fn full(&self) -> char {
        self.0[self.0.len() - 1]
    }

    /// Glyph at the index, clamped to the full glyph
    pub fn glyph(&self, index: usize) -> char {
        self.0[index.min(self.0.len() - 1)]
    }
}

impl std::fmt::Display for Series {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.0 {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
