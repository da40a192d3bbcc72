use crate::fields::Value;
use crate::term::ansi;
use crate::{Error, Result};

/// Alignment of a formatted value inside its width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// `<`
    Left,
    /// `>`
    Right,
    /// `^`
    Center,
    /// `=`, padding goes after the sign
    AfterSign,
}

impl Align {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Self::Left),
            '>' => Some(Self::Right),
            '^' => Some(Self::Center),
            '=' => Some(Self::AfterSign),
            _ => None,
        }
    }
}

/// Sign display for numbers
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// `-`: only negative numbers have a sign
    #[default]
    Negative,
    /// `+`: always show the sign
    Always,
    /// ` `: a space for positive numbers
    Space,
}

/// Format spec of a placeholder:
/// `[[fill]align][sign][0][width][,|_][.precision][type]`
///
/// Types:
/// - `d`: integer
/// - `f` / `F`: fixed point, precision defaults to 6
/// - `%`: multiply by 100, fixed point, followed by `%`
/// - `s`: string
/// - none: based on the value
///
/// Numbers are right-aligned and strings are left-aligned by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    pub fill: char,
    pub align: Option<Align>,
    pub sign: Sign,
    pub zero: bool,
    pub width: usize,
    pub grouping: Option<char>,
    pub precision: Option<usize>,
    pub kind: Option<char>,
}

impl FormatSpec {
    pub fn parse(spec: &str) -> Result<Self> {
        let chars: Vec<char> = spec.chars().collect();
        let invalid = || Error::Template(format!("invalid format spec: {spec:?}"));
        let mut out = Self {
            fill: ' ',
            align: None,
            sign: Sign::Negative,
            zero: false,
            width: 0,
            grouping: None,
            precision: None,
            kind: None,
        };
        let mut i = 0;
        match (chars.first().copied(), chars.get(1).copied().and_then(Align::from_char)) {
            (Some(fill), Some(align)) => {
                out.fill = fill;
                out.align = Some(align);
                i = 2;
            }
            (Some(c), None) => {
                if let Some(align) = Align::from_char(c) {
                    out.align = Some(align);
                    i = 1;
                }
            }
            _ => {}
        }
        let sign = match chars.get(i) {
            Some('+') => Some(Sign::Always),
            Some('-') => Some(Sign::Negative),
            Some(' ') => Some(Sign::Space),
            _ => None,
        };
        if let Some(sign) = sign {
            out.sign = sign;
            i += 1;
        }
        if chars.get(i) == Some(&'0') {
            out.zero = true;
            i += 1;
        }
        let (width, next) = parse_number(&chars, i);
        out.width = width.unwrap_or(0);
        i = next;
        if let Some(c @ (',' | '_')) = chars.get(i) {
            out.grouping = Some(*c);
            i += 1;
        }
        if chars.get(i) == Some(&'.') {
            let (precision, next) = parse_number(&chars, i + 1);
            out.precision = Some(precision.ok_or_else(invalid)?);
            i = next;
        }
        if let Some(c) = chars.get(i) {
            if !matches!(c, 'd' | 'f' | 'F' | '%' | 's') {
                return Err(Error::Template(format!(
                    "unsupported format code {c:?} in spec {spec:?}"
                )));
            }
            out.kind = Some(*c);
            i += 1;
        }
        if i != chars.len() {
            return Err(invalid());
        }
        Ok(out)
    }

    /// Format the value of the field with this spec
    pub fn apply(&self, name: &str, value: &Value) -> Result<String> {
        let unsupported = |what: &str| {
            Error::Template(format!(
                "cannot format field {name:?} with {what} (value: {value:?})"
            ))
        };
        let (negative, body, numeric) = match value {
            Value::Int(x) => match self.kind {
                None | Some('d') => {
                    if self.precision.is_some() {
                        return Err(unsupported("precision"));
                    }
                    let digits = self.group(&x.unsigned_abs().to_string());
                    (*x < 0, digits, true)
                }
                Some(kind @ ('f' | 'F' | '%')) => {
                    let (negative, body) = self.format_float(*x as f64, kind);
                    (negative, body, true)
                }
                Some(kind) => return Err(unsupported(&format!("format code {kind:?}"))),
            },
            Value::Float(x) => match self.kind {
                None if self.precision.is_none() => {
                    let body = self.group(&Value::Float(x.abs()).to_string());
                    (x.is_sign_negative() && *x != 0.0, body, true)
                }
                None => {
                    let (negative, body) = self.format_float(*x, 'f');
                    (negative, body, true)
                }
                Some(kind @ ('f' | 'F' | '%')) => {
                    let (negative, body) = self.format_float(*x, kind);
                    (negative, body, true)
                }
                Some(kind) => return Err(unsupported(&format!("format code {kind:?}"))),
            },
            Value::Str(x) => self.string_body(x).ok_or_else(|| unsupported("numeric spec"))?,
            Value::None => self.string_body("").ok_or_else(|| unsupported("numeric spec"))?,
        };
        let sign = match (numeric, negative, self.sign) {
            (false, _, _) => "",
            (true, true, _) => "-",
            (true, false, Sign::Always) => "+",
            (true, false, Sign::Space) => " ",
            (true, false, Sign::Negative) => "",
        };
        let content_width = ansi::visible_width(sign) + ansi::visible_width(&body);
        if content_width >= self.width {
            return Ok(format!("{sign}{body}"));
        }
        let pad = self.width - content_width;
        let (fill, align) = match self.align {
            Some(align) => (self.fill, align),
            None if self.zero && numeric => ('0', Align::AfterSign),
            None if numeric => (self.fill, Align::Right),
            None => (self.fill, Align::Left),
        };
        let padding = |n: usize| std::iter::repeat_n(fill, n).collect::<String>();
        Ok(match align {
            Align::Left => format!("{sign}{body}{}", padding(pad)),
            Align::Right => format!("{}{sign}{body}", padding(pad)),
            Align::Center => {
                let left = pad / 2;
                format!("{}{sign}{body}{}", padding(left), padding(pad - left))
            }
            Align::AfterSign => format!("{sign}{}{body}", padding(pad)),
        })
    }

    /// Body of a string value, `None` if the spec is only valid for numbers
    fn string_body(&self, x: &str) -> Option<(bool, String, bool)> {
        if !matches!(self.kind, None | Some('s'))
            || self.sign != Sign::Negative
            || self.grouping.is_some()
            || self.align == Some(Align::AfterSign)
        {
            return None;
        }
        let body = match self.precision {
            Some(p) => x.chars().take(p).collect(),
            None => x.to_string(),
        };
        Some((false, body, false))
    }

    fn format_float(&self, x: f64, kind: char) -> (bool, String) {
        let precision = self.precision.unwrap_or(6);
        let negative = x.is_sign_negative() && x != 0.0;
        let abs = x.abs();
        let mut body = if kind == '%' {
            format!("{:.*}%", precision, abs * 100.0)
        } else {
            format!("{abs:.precision$}")
        };
        if !abs.is_finite() {
            body.make_ascii_lowercase();
        }
        (negative, self.group(&body))
    }

    /// Insert the grouping separator in the integer part
    fn group(&self, digits: &str) -> String {
        let Some(sep) = self.grouping else {
            return digits.to_string();
        };
        let int_len = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        let (int_part, rest) = digits.split_at(int_len);
        let mut out = String::with_capacity(digits.len() + int_len / 3);
        for (i, c) in int_part.chars().enumerate() {
            if i > 0 && (int_len - i) % 3 == 0 {
                out.push(sep);
            }
            out.push(c);
        }
        out.push_str(rest);
        out
    }
}

fn parse_number(chars: &[char], start: usize) -> (Option<usize>, usize) {
    let mut i = start;
    let mut value: Option<usize> = None;
    while let Some(d) = chars.get(i).and_then(|c| c.to_digit(10)) {
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(d as usize));
        i += 1;
    }
    (value, i)
}
