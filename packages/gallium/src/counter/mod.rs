//! # Counters
//!
//! A [`Counter`] tracks a count and renders it as one line of text,
//! either as a progress bar (when the total is known and not exceeded),
//! or as a plain counter.
//!
//! ```text
//! Processing  23%|██████▏                    |  23/101 [00:27<01:32, 0.84 Files/s]
//! Scanned 5021 files [00:12, 418.42 files/s]
//! ```
//!
//! ## Updating
//! Updating the count does not always redraw the line. A refresh happens when:
//! - the update is forced, or
//! - the count reached the total, or
//! - at least `min_delta` passed since the last refresh
//!
//! so calling [`update`](Counter::update) in a tight loop is cheap.
//!
//! ## Subcounters
//! Part of the count can be allocated to [subcounters](Counter::add_subcounter).
//! Each subcounter is drawn as its own colored segment in the bar, and the
//! unallocated part is drawn after them. The unallocated part can never be negative:
//! operations that would violate that fail with [`Error::InvalidState`](crate::Error::InvalidState)
//! and leave the counter unchanged.
//!
//! ## Formats
//! The line is rendered from a [`Template`]. The bar format is used in bar mode,
//! and the counter format otherwise. Built-in fields:
//!
//! | Field | Value |
//! |-|-|
//! | `count` | current count |
//! | `desc` / `desc_pad` | description, and a space if the description is not empty |
//! | `unit` / `unit_pad` | unit, and a space if the unit is not empty |
//! | `elapsed` | elapsed time, `MM:SS` or `H:MM:SS` |
//! | `rate` / `interval` | iterations per second, and seconds per iteration |
//! | `total` | total, empty if there is no total |
//! | `percentage` | percentage done, 0-100 (bar mode) |
//! | `eta` | estimated time remaining (bar mode) |
//! | `len_total` | number of digits of the total (bar mode) |
//! | `bar` | the bar (bar mode) |
//! | `fill` | padding to fill the line (counter mode) |
//!
//! With subcounters, these are added (`n` is 1-based in creation order):
//! - `count_n`, `count_0` (unallocated), `count_00` (allocated)
//! - `percentage_n`, `percentage_0`, `percentage_00` (bar mode)
//! - `rate_n`, `interval_n`, and `eta_n` (bar mode), if the subcounter was created with `all_fields`

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::bar::BarLayout;
use crate::fields::{self, FieldMap, UserFields, Value};
use crate::template::Template;
use crate::{Color, Manager, Result, Series, time};

mod builder;
pub use builder::{BAR_FORMAT, COUNTER_FORMAT, CounterBuilder};
mod sub;
pub use sub::{Source, SubCounter, SubCounterId};
mod track;
pub use track::Track;
mod macros;
#[doc(hidden)]
pub use macros::__incr;

/// Start building a counter
///
/// ```rust,no_run
/// # use pistonite_ga as ga;
/// let manager = ga::StreamManager::stdout().into_arc();
/// let mut counter = ga::counter("Downloading")
///     .total(3)
///     .unit("files")
///     .spawn(manager)?;
/// for _ in 0..3 {
///     ga::update!(counter += 1)?;
/// }
/// counter.close(false)?;
/// # Ok::<(), ga::Error>(())
/// ```
#[inline(always)]
pub fn counter(desc: impl Into<String>) -> CounterBuilder {
    CounterBuilder::new(desc.into())
}

/// A counter or progress bar. See [module level documentation](self)
pub struct Counter {
    id: usize,
    manager: Arc<dyn Manager>,
    desc: String,
    unit: String,
    count: i64,
    /// Count when the counter was created, used as the baseline for rate
    start_count: i64,
    total: Option<i64>,
    start: Instant,
    /// Time of the last refresh, for throttling
    last_update: Instant,
    /// When the count reached the total. Cleared if it leaves the total
    completed_at: Option<Instant>,
    min_delta: Duration,
    series: Series,
    color: Option<Color>,
    fill: char,
    bar_format: Template,
    counter_format: Template,
    /// Length of non-visible characters in the output, instead of asking the terminal
    offset: Option<usize>,
    enabled: bool,
    leave: bool,
    fields: UserFields,
    update_fields: UserFields,
    subcounters: Vec<SubCounter>,
}

impl Counter {
    /// Current count
    #[inline(always)]
    pub fn count(&self) -> i64 {
        self.count
    }

    /// The total, `None` means this is a counter instead of a bar
    #[inline(always)]
    pub fn total(&self) -> Option<i64> {
        self.total
    }

    pub fn set_total(&mut self, total: Option<i64>) {
        self.total = total;
        let now = self.manager.now();
        self.mark_completion(now);
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    pub fn set_desc(&mut self, desc: impl Into<String>) {
        self.desc = desc.into();
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// If output is enabled
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Time since the counter started.
    ///
    /// The clock stops when the count reaches the total
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(self.manager.now())
    }

    fn elapsed_at(&self, now: Instant) -> Duration {
        time::elapsed(self.start, self.completed_at, now)
    }

    /// Record the completion time when the count first reaches the total
    fn mark_completion(&mut self, now: Instant) {
        if Some(self.count) != self.total {
            self.completed_at = None;
        } else if self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
    }

    /// Set a user-defined field. Returns `false` if the name is reserved,
    /// in which case the field is ignored
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) -> bool {
        self.fields.insert(name, value)
    }

    /// Remove a user-defined field, including the value set by updates
    pub fn remove_field(&mut self, name: &str) -> Option<Value> {
        let from_update = self.update_fields.remove(name);
        let from_build = self.fields.remove(name);
        from_update.or(from_build)
    }

    /// Increment the count and refresh if needed
    #[inline(always)]
    pub fn update(&mut self, incr: i64) -> Result<()> {
        self.update_with(incr, false, NO_FIELDS)
    }

    /// Increment the count and always refresh
    #[inline(always)]
    pub fn update_forced(&mut self, incr: i64) -> Result<()> {
        self.update_with(incr, true, NO_FIELDS)
    }

    /// Increment the count and set fields for formatting, then refresh if
    /// `force` is true or if needed.
    ///
    /// The fields are kept for later renders. Reserved names are ignored with a warning.
    ///
    /// With subcounters, fails if the unallocated count would become negative.
    /// See also the [`update!`](crate::update) macro
    pub fn update_with<K, V, I>(&mut self, incr: i64, force: bool, fields: I) -> Result<()>
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let count = self.checked_count(incr)?;
        if !self.subcounters.is_empty() {
            let subcount = self.subcount();
            ensure_state!(
                count - subcount >= 0,
                "count {count} would be less than the subcount {subcount}"
            );
        }
        self.update_fields.extend(fields);
        self.count = count;
        self.maybe_refresh(force)
    }

    fn checked_count(&self, incr: i64) -> Result<i64> {
        match self.count.checked_add(incr) {
            Some(x) => Ok(x),
            None => Err(crate::Error::InvalidState(format!(
                "count overflow: {} + {incr}",
                self.count
            ))),
        }
    }

    /// Refresh if forced, done, or enough time passed since the last refresh
    fn maybe_refresh(&mut self, force: bool) -> Result<()> {
        let now = self.manager.now();
        self.mark_completion(now);
        let done = self.completed_at.is_some();
        if !self.enabled {
            return Ok(());
        }
        if force || done || now.saturating_duration_since(self.last_update) >= self.min_delta {
            return self.refresh_at(now);
        }
        log::trace!("counter {}: refresh throttled", self.id);
        Ok(())
    }

    /// Redraw the counter now
    pub fn refresh(&mut self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let now = self.manager.now();
        self.refresh_at(now)
    }

    fn refresh_at(&mut self, now: Instant) -> Result<()> {
        let output = self.render(None, Some(self.elapsed_at(now)))?;
        self.manager.write(&output)?;
        self.last_update = now;
        Ok(())
    }

    /// Clear the line
    pub fn clear(&mut self) -> Result<()> {
        if self.enabled {
            self.manager.clear()?;
        }
        Ok(())
    }

    /// Stop the counter.
    ///
    /// If `clear` is true, or the counter was created with `leave(false)`,
    /// the line is cleared. Otherwise, it is redrawn one last time and kept
    pub fn close(mut self, clear: bool) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if clear || !self.leave {
            self.manager.clear()?;
            return Ok(());
        }
        self.refresh()?;
        self.manager.finish()?;
        log::debug!("counter {} closed at {}", self.id, self.count);
        Ok(())
    }

    /// Render the line.
    ///
    /// Width defaults to the width from the manager, and elapsed time
    /// defaults to [`elapsed`](Self::elapsed). Rendering does not change
    /// the counter, so the same arguments always give the same output.
    ///
    /// Fails if the format references a field that is not provided, or
    /// cannot format a value.
    pub fn render(&self, width: Option<usize>, elapsed: Option<Duration>) -> Result<String> {
        let width = width.unwrap_or_else(|| self.manager.width());
        let elapsed = elapsed.unwrap_or_else(|| self.elapsed()).as_secs_f64();
        let iterations = (self.count - self.start_count).unsigned_abs() as f64;
        let rate = time::rate(iterations, elapsed);

        let mut builtins = FieldMap::new();
        let pad = |x: &str| if x.is_empty() { "" } else { " " };
        builtins.insert("count".to_string(), self.count.into());
        builtins.insert("desc".to_string(), self.desc.as_str().into());
        builtins.insert("desc_pad".to_string(), pad(&self.desc).into());
        builtins.insert("unit".to_string(), self.unit.as_str().into());
        builtins.insert("unit_pad".to_string(), pad(&self.unit).into());
        builtins.insert("total".to_string(), self.total.into());
        builtins.insert("elapsed".to_string(), time::format_time(elapsed).into());
        builtins.insert("rate".to_string(), rate.into());
        builtins.insert("interval".to_string(), time::interval(rate).into());

        match self.total {
            Some(total) if self.count <= total => {
                self.render_bar(builtins, total, iterations, rate, elapsed, width)
            }
            _ => self.render_counter(builtins, elapsed, width),
        }
    }

    fn render_bar(
        &self,
        mut builtins: FieldMap,
        total: i64,
        iterations: f64,
        rate: f64,
        elapsed: f64,
        width: usize,
    ) -> Result<String> {
        let percentage = time::percentage(self.count, total);
        builtins.insert("len_total".to_string(), total.to_string().len().into());
        builtins.insert("percentage".to_string(), (percentage * 100.0).into());
        builtins.insert("eta".to_string(), time::eta(total, iterations, rate).into());

        let sub_percentages = self.sub_fields(&mut builtins, elapsed, Some(total));
        let mut count_0 = self.count;
        let mut percentage_0 = percentage;
        if !sub_percentages.is_empty() {
            let subcount = self.subcount();
            count_0 -= subcount;
            let sub_percentage: f64 = sub_percentages.iter().sum();
            percentage_0 -= sub_percentage;
            builtins.insert("count_00".to_string(), subcount.into());
            builtins.insert("count_0".to_string(), count_0.into());
            builtins.insert("percentage_00".to_string(), (sub_percentage * 100.0).into());
            builtins.insert("percentage_0".to_string(), (percentage_0 * 100.0).into());
        }

        let fields = fields::resolve(&self.fields, &self.update_fields, builtins);
        let rendered = self.bar_format.render_split(&fields, "bar")?;
        let placeholders = rendered.split_points();
        if placeholders == 0 {
            return Ok(rendered.text());
        }
        let bar_width = width.saturating_sub(self.measure(&rendered.text())) / placeholders;

        let term = self.manager.term();
        let layout = BarLayout::compute(
            bar_width,
            percentage_0,
            &sub_percentages,
            self.series.len(),
            count_0 != 0,
        );
        let bar = layout.draw(&self.series, |i, run| {
            let color = match i {
                0 => None,
                i => self.subcounters[i - 1].color(),
            };
            match color {
                Some(color) => term.colorize(run, color),
                None => run.to_string(),
            }
        });
        let bar = match &self.color {
            Some(color) => term.colorize(&bar, color),
            None => bar,
        };
        Ok(rendered.join_with(|_| bar.clone()))
    }

    fn render_counter(&self, mut builtins: FieldMap, elapsed: f64, width: usize) -> Result<String> {
        let sub_percentages = self.sub_fields(&mut builtins, elapsed, None);
        if !sub_percentages.is_empty() {
            let subcount = self.subcount();
            builtins.insert("count_00".to_string(), subcount.into());
            builtins.insert("count_0".to_string(), (self.count - subcount).into());
        }

        let fields = fields::resolve(&self.fields, &self.update_fields, builtins);
        let rendered = self.counter_format.render_split(&fields, "fill")?;
        let placeholders = rendered.split_points();
        if placeholders == 0 {
            return Ok(rendered.text());
        }
        let remaining = width.saturating_sub(self.measure(&rendered.text()));
        let size = remaining / placeholders;
        let extra = remaining % placeholders;
        let fill = self.fill;
        Ok(rendered.join_with(|i| {
            let len = (size + usize::from(i < extra)).max(MIN_FILL);
            std::iter::repeat_n(fill, len).collect()
        }))
    }

    /// Add fields of the subcounters, and return the fraction of each subcounter.
    ///
    /// `total` is `Some` in bar mode. Fractions are all 0 in counter mode or if the total is 0
    fn sub_fields(&self, builtins: &mut FieldMap, elapsed: f64, total: Option<i64>) -> Vec<f64> {
        let mut percentages = Vec::with_capacity(self.subcounters.len());
        for (i, sub) in self.subcounters.iter().enumerate() {
            let n = i + 1;
            builtins.insert(format!("count_{n}"), sub.count().into());
            let percentage = match total {
                Some(total) if total != 0 => sub.count() as f64 / total as f64,
                _ => 0.0,
            };
            if total.is_some() {
                builtins.insert(format!("percentage_{n}"), (percentage * 100.0).into());
            }
            percentages.push(percentage);
            if !sub.all_fields() {
                continue;
            }
            let iterations = sub.iterations();
            let rate = time::rate(iterations, elapsed);
            builtins.insert(format!("rate_{n}"), rate.into());
            builtins.insert(format!("interval_{n}"), time::interval(rate).into());
            if let Some(total) = total {
                builtins.insert(format!("eta_{n}"), time::eta(total, iterations, rate).into());
            }
        }
        percentages
    }

    /// Display width of the text without the bar or fill
    fn measure(&self, text: &str) -> usize {
        match self.offset {
            Some(offset) => text.chars().count().saturating_sub(offset),
            None => self.manager.term().visible_len(text),
        }
    }
}

/// Minimum width of each fill placeholder
const MIN_FILL: usize = 3;

const NO_FIELDS: [(&str, Value); 0] = [];

impl std::fmt::Debug for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Counter")
            .field("id", &self.id)
            .field("desc", &self.desc)
            .field("total", &self.total)
            .field("count", &self.count)
            .field("unit", &self.unit)
            .field("color", &self.color)
            .field("subcounters", &self.subcounters)
            .finish_non_exhaustive()
    }
}
