//! Rate and time calculations
//!
//! These are pure functions of the counter state, so they can be
//! checked without a clock.

use std::time::{Duration, Instant};

/// ETA displayed when the total is 0 (nothing to do)
pub const ETA_DONE: &str = "00:00";
/// ETA displayed when the rate is not known yet
pub const ETA_UNKNOWN: &str = "?";

/// Time elapsed since `start`.
///
/// `completed_at` is when the count reached the total. The clock stops there,
/// so the rate stays what it was at completion even if the bar keeps getting redrawn.
pub fn elapsed(start: Instant, completed_at: Option<Instant>, now: Instant) -> Duration {
    completed_at.unwrap_or(now).saturating_duration_since(start)
}

/// Iterations per second.
///
/// Iterations should be the absolute change in count, so a counter
/// running backwards still has a positive rate
pub fn rate(iterations: f64, elapsed_secs: f64) -> f64 {
    if elapsed_secs > 0.0 {
        iterations / elapsed_secs
    } else {
        0.0
    }
}

/// Seconds per iteration (inverse of rate), or 0 if rate is 0
pub fn interval(rate: f64) -> f64 {
    if rate != 0.0 { 1.0 / rate } else { 0.0 }
}

/// Estimated time remaining, formatted with [`format_time`]
pub fn eta(total: i64, iterations: f64, rate: f64) -> String {
    if total == 0 {
        return ETA_DONE.to_string();
    }
    if rate == 0.0 {
        return ETA_UNKNOWN.to_string();
    }
    format_time((total as f64 - iterations) / rate)
}

/// Fraction done (`0.0` to `1.0` in normal conditions).
///
/// A total of 0 is considered complete
pub fn percentage(count: i64, total: i64) -> f64 {
    if total == 0 {
        1.0
    } else {
        count as f64 / total as f64
    }
}

/// Format seconds as `MM:SS`, or `H:MM:SS` if longer than an hour.
///
/// Partial seconds are dropped. Negative values are displayed as 0.
///
/// ```rust
/// # use pistonite_ga as ga;
/// assert_eq!(ga::time::format_time(27.4), "00:27");
/// assert_eq!(ga::time::format_time(92.9), "01:32");
/// assert_eq!(ga::time::format_time(3723.0), "1:02:03");
/// ```
pub fn format_time(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        // as: saturating
        seconds.floor() as u64
    } else {
        0
    };
    let hours = seconds / 3600;
    let minutes = seconds % 3600 / 60;
    let seconds = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}
