use std::time::Duration;

use crate::Color;

/// Shared options for counters, applied with [`CounterBuilder::config`](crate::CounterBuilder::config).
///
/// All options are optional. With the `serde` feature, this can be deserialized,
/// and with the `toml` feature, parsed from TOML directly:
///
/// ```rust
/// # #[cfg(feature = "toml")]
/// # fn main() -> pistonite_ga::Result<()> {
/// # use pistonite_ga as ga;
/// let config = ga::CounterConfig::from_toml(r#"
/// series = " =#"
/// color = "cyan"
/// min_delta = 0.25
/// "#)?;
/// assert_eq!(config.series.as_deref(), Some(" =#"));
/// assert_eq!(config.min_delta(), Some(std::time::Duration::from_millis(250)));
/// # Ok(()) }
/// # #[cfg(not(feature = "toml"))]
/// # fn main() {}
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct CounterConfig {
    pub bar_format: Option<String>,
    pub counter_format: Option<String>,
    /// Glyphs to draw the bar with, empty first and full last
    pub series: Option<String>,
    pub fill: Option<char>,
    pub unit: Option<String>,
    pub color: Option<Color>,
    /// Seconds
    pub min_delta: Option<f64>,
    pub leave: Option<bool>,
}

impl CounterConfig {
    /// Minimum time between refreshes. Negative or invalid values are ignored
    pub fn min_delta(&self) -> Option<Duration> {
        self.min_delta
            .and_then(|x| Duration::try_from_secs_f64(x).ok())
    }

    /// Parse the config from TOML
    #[cfg(feature = "toml")]
    pub fn from_toml(input: &str) -> crate::Result<Self> {
        toml::from_str(input)
            .map_err(|e| crate::Error::InvalidConfig(format!("failed to parse counter config: {e}")))
    }
}
