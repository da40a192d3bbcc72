use std::sync::Arc;
use std::time::Duration;

use crate::fields::{UserFields, Value};
use crate::template::Template;
use crate::term::ansi;
use crate::{Color, Counter, CounterConfig, Error, Manager, Result, Series};

/// Default format in bar mode
pub const BAR_FORMAT: &str = "{desc}{desc_pad}{percentage:3.0f}%|{bar}| {count:{len_total}d}/{total:d} [{elapsed}<{eta}, {rate:.2f}{unit_pad}{unit}/s]";
/// Default format in counter mode
pub const COUNTER_FORMAT: &str =
    "{desc}{desc_pad}{count:d} {unit}{unit_pad}[{elapsed}, {rate:.2f}{unit_pad}{unit}/s]{fill}";

/// Builder for a counter. Note [`ga::counter`](fn@crate::counter) is the canonical shorthand
#[derive(Debug, Clone)]
pub struct CounterBuilder {
    desc: String,
    /// None = counter mode
    total: Option<i64>,
    count: i64,
    unit: String,
    color: Option<Color>,
    /// None = pick based on the terminal
    series: Option<String>,
    fill: char,
    bar_format: Option<String>,
    counter_format: Option<String>,
    fields: UserFields,
    offset: Option<usize>,
    /// None = use the default from the manager
    min_delta: Option<Duration>,
    enabled: bool,
    leave: bool,
}

impl CounterBuilder {
    pub fn new(desc: String) -> Self {
        Self {
            desc,
            total: None,
            count: 0,
            unit: String::new(),
            color: None,
            series: None,
            fill: ' ',
            bar_format: None,
            counter_format: None,
            fields: UserFields::new(),
            offset: None,
            min_delta: None,
            enabled: true,
            leave: true,
        }
    }

    /// Set the total. Without a total, the counter is displayed
    /// as a plain counter instead of a bar
    ///
    /// ```rust
    /// # use pistonite_ga as ga;
    /// ga::counter("Processing").total(101);
    /// ```
    #[inline(always)]
    pub fn total(mut self, total: i64) -> Self {
        self.total = Some(total);
        self
    }

    /// Set the initial count. Default is `0`.
    ///
    /// Rate is calculated from the change since the initial count
    #[inline(always)]
    pub fn count(mut self, count: i64) -> Self {
        self.count = count;
        self
    }

    /// Set the unit label, like `files`
    #[inline(always)]
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Set the color of the bar
    ///
    /// ```rust
    /// # use pistonite_ga as ga;
    /// ga::counter("Processing").total(10).color("bright_blue");
    /// ga::counter("Processing").total(10).color((255, 128, 0));
    /// ```
    #[inline(always)]
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the glyphs used to draw the bar. See [`Series`]
    #[inline(always)]
    pub fn series(mut self, series: impl Into<String>) -> Self {
        self.series = Some(series.into());
        self
    }

    /// Set the character to pad the `{fill}` field with. Default is space
    #[inline(always)]
    pub fn fill(mut self, fill: char) -> Self {
        self.fill = fill;
        self
    }

    /// Set the format used in bar mode. Default is [`BAR_FORMAT`]
    #[inline(always)]
    pub fn bar_format(mut self, format: impl Into<String>) -> Self {
        self.bar_format = Some(format.into());
        self
    }

    /// Set the format used in counter mode. Default is [`COUNTER_FORMAT`]
    #[inline(always)]
    pub fn counter_format(mut self, format: impl Into<String>) -> Self {
        self.counter_format = Some(format.into());
        self
    }

    /// Add a user-defined field. Reserved names are ignored with a warning
    ///
    /// ```rust
    /// # use pistonite_ga as ga;
    /// ga::counter("Processing")
    ///     .counter_format("{desc} {count} ({stage}){fill}")
    ///     .field("stage", "scan");
    /// ```
    #[inline(always)]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name, value);
        self
    }

    /// Add user-defined fields. Reserved names are ignored with a warning
    pub fn fields<K, V, I>(mut self, fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.fields.extend(fields);
        self
    }

    /// Number of characters in the output that are not displayed, for
    /// example escape sequences in the format. When set, the width of the
    /// text is its number of characters minus the offset, instead of being
    /// measured by the terminal
    #[inline(always)]
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the minimum time between refreshes. Default is from the manager
    #[inline(always)]
    pub fn min_delta(mut self, min_delta: Duration) -> Self {
        self.min_delta = Some(min_delta);
        self
    }

    /// Set if the counter writes output. Default is `true`.
    ///
    /// A disabled counter still counts
    #[inline(always)]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set if the line is kept after the counter is closed. Default is `true`
    #[inline(always)]
    pub fn leave(mut self, leave: bool) -> Self {
        self.leave = leave;
        self
    }

    /// Apply options from a config. Options not set in the config are not changed
    pub fn config(mut self, config: &CounterConfig) -> Self {
        if let Some(x) = &config.bar_format {
            self.bar_format = Some(x.clone());
        }
        if let Some(x) = &config.counter_format {
            self.counter_format = Some(x.clone());
        }
        if let Some(x) = &config.series {
            self.series = Some(x.clone());
        }
        if let Some(x) = config.fill {
            self.fill = x;
        }
        if let Some(x) = &config.unit {
            self.unit = x.clone();
        }
        if let Some(x) = &config.color {
            self.color = Some(x.clone());
        }
        if let Some(x) = config.min_delta() {
            self.min_delta = Some(x);
        }
        if let Some(x) = config.leave {
            self.leave = x;
        }
        self
    }

    /// Validate the options and create the counter
    pub fn spawn(self, manager: Arc<dyn Manager>) -> Result<Counter> {
        let bar_format = Template::parse(self.bar_format.as_deref().unwrap_or(BAR_FORMAT))?;
        let counter_format =
            Template::parse(self.counter_format.as_deref().unwrap_or(COUNTER_FORMAT))?;
        let series = match self.series {
            Some(x) => Some(Series::new(&x)?),
            None => None,
        };
        let series = Series::resolve(manager.term(), series);
        if let Some(color) = &self.color {
            color.validate()?;
        }
        if ansi::char_width(self.fill) != 1 {
            return Err(Error::InvalidConfig(format!(
                "fill {:?} does not take exactly one column",
                self.fill
            )));
        }
        let id = next_id();
        let now = manager.now();
        let min_delta = self.min_delta.unwrap_or_else(|| manager.min_delta());
        log::debug!(
            "spawning counter {id}: desc={:?}, total={:?}, series={series}",
            self.desc,
            self.total
        );
        Ok(Counter {
            id,
            manager,
            desc: self.desc,
            unit: self.unit,
            count: self.count,
            start_count: self.count,
            total: self.total,
            start: now,
            last_update: now,
            completed_at: (Some(self.count) == self.total).then_some(now),
            min_delta,
            series,
            color: self.color,
            fill: self.fill,
            bar_format,
            counter_format,
            offset: self.offset,
            enabled: self.enabled,
            leave: self.leave,
            fields: self.fields,
            update_fields: Default::default(),
            subcounters: vec![],
        })
    }
}

fn next_id() -> usize {
    use std::sync::atomic::{AtomicUsize, Ordering};
    static ID: AtomicUsize = AtomicUsize::new(1);
    ID.fetch_add(1, Ordering::SeqCst)
}
