/// Width used when the terminal size cannot be determined
pub const DEFAULT_WIDTH: usize = 80;
const MAX_SIZE: usize = 400;

/// Get the terminal width, or [`DEFAULT_WIDTH`] if cannot get
pub fn term_width_or_default() -> usize {
    term_width().unwrap_or(DEFAULT_WIDTH)
}

/// Get the terminal width, capped as some internal amount
pub fn term_width() -> Option<usize> {
    use terminal_size::*;
    terminal_size().map(|(Width(w), _)| (w as usize).min(MAX_SIZE))
}
