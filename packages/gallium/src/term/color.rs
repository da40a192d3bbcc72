use crate::{Error, Result};

/// Color of a bar or a sub-series segment
///
/// - `Named`: one of the 8 basic colors (`black`, `red`, `green`, `yellow`,
///   `blue`, `magenta`, `cyan`, `white`), optionally prefixed with `bright_`.
///   Attributes (`bold`, `dim`, `italic`, `underline`, `blink`, `reverse`) and a
///   background (`on_<color>`) can be joined with `_`, for example `bold_red`
///   or `white_on_blue`.
/// - `Ansi256`: an index into the 256 color palette
/// - `Rgb`: a 24-bit color
///
/// ```rust
/// # use pistonite_ga as ga;
/// use ga::Color;
/// assert_eq!(Color::from("bold_red").sgr().unwrap(), "1;31");
/// assert_eq!(Color::from("white_on_bright_blue").sgr().unwrap(), "37;104");
/// assert_eq!(Color::from((255, 128, 0)).sgr().unwrap(), "38;2;255;128;0");
/// assert!(Color::from("seagreen").sgr().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(untagged))]
pub enum Color {
    Named(String),
    Ansi256(u8),
    Rgb(u8, u8, u8),
}

const BASE_COLORS: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

impl Color {
    /// Get the SGR parameters for the color (the part between `ESC[` and `m`)
    pub fn sgr(&self) -> Result<String> {
        match self {
            Self::Ansi256(i) => Ok(format!("38;5;{i}")),
            Self::Rgb(r, g, b) => Ok(format!("38;2;{r};{g};{b}")),
            Self::Named(name) => named_sgr(name)
                .ok_or_else(|| Error::InvalidConfig(format!("unknown color: {name:?}"))),
        }
    }

    /// Check the color can be resolved
    pub fn validate(&self) -> Result<()> {
        self.sgr().map(|_| ())
    }
}

fn named_sgr(name: &str) -> Option<String> {
    let mut codes: Vec<u8> = vec![];
    let mut bright = false;
    let mut background = false;
    for token in name.split('_') {
        let attr = match token {
            "bold" => Some(1),
            "dim" => Some(2),
            "italic" => Some(3),
            "underline" => Some(4),
            "blink" => Some(5),
            "reverse" => Some(7),
            _ => None,
        };
        if let Some(attr) = attr {
            if bright || background {
                return None;
            }
            codes.push(attr);
            continue;
        }
        match token {
            "bright" if !bright => bright = true,
            "on" if !background && !bright => background = true,
            _ => {
                let index = BASE_COLORS.iter().position(|c| *c == token)? as u8;
                let base = match (background, bright) {
                    (false, false) => 30,
                    (false, true) => 90,
                    (true, false) => 40,
                    (true, true) => 100,
                };
                codes.push(base + index);
                bright = false;
                background = false;
            }
        }
    }
    if bright || background || codes.is_empty() {
        return None;
    }
    let codes: Vec<String> = codes.iter().map(u8::to_string).collect();
    Some(codes.join(";"))
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::Named(value.to_string())
    }
}
impl From<String> for Color {
    fn from(value: String) -> Self {
        Self::Named(value)
    }
}
impl From<u8> for Color {
    fn from(value: u8) -> Self {
        Self::Ansi256(value)
    }
}
impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::Rgb(r, g, b)
    }
}
