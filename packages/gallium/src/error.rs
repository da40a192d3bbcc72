/// # Error Handling
/// Errors from this crate are structured, so callers can tell a caller-side
/// logic bug ([`Error::InvalidState`]) apart from a template problem
/// ([`Error::MissingField`], [`Error::Template`]) or an output failure.
///
/// Colliding user field names are not errors. They are dropped and
/// reported with `log::warn!`.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum Error {
    /// A count or allocation would become invalid, for example negative.
    /// The operation that returns this leaves the counter unchanged.
    #[display("invalid state: {_0}")]
    InvalidState(#[error(not(source))] String),
    /// The format references a field that is not provided
    #[display("'{_0}' specified in format, but not provided")]
    MissingField(#[error(not(source))] String),
    /// The format is malformed, or a value cannot be formatted with the spec given
    #[display("invalid format: {_0}")]
    Template(#[error(not(source))] String),
    /// Invalid options, like an unknown color name or a glyph series that is too short
    #[display("invalid config: {_0}")]
    InvalidConfig(#[error(not(source))] String),
    /// Failed to write to the output stream
    #[display("failed to write output: {_0}")]
    Io(#[error(source)] std::io::Error),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Result type of this crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Error::InvalidState` if the condition is not met
macro_rules! ensure_state {
    ($cond:expr, $($args:tt)*) => {
        if !bool::from($cond) {
            return Err($crate::Error::InvalidState(format!($($args)*)));
        }
    };
}
