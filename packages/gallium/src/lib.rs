//! Terminal progress bars and counters
//!
//! `ga` renders a counter as one line of text that is redrawn in place.
//! When the total is known, the line is a progress bar:
//! ```text
//! Processing  23%|██████▏                    |  23/101 [00:27<01:32, 0.84 Files/s]
//! ```
//! Otherwise, it is a counter:
//! ```text
//! Scanned 5021 files [00:12, 418.42 files/s]
//! ```
//!
//! Use this crate as `ga` for the shortest imports:
//! ```toml
//! [dependencies]
//! ga = { package = "pistonite-ga", version = "..." }
//! ```
//!
//! # Counters
//! [`counter`](fn@counter) starts building a [`Counter`]. The counter is spawned
//! with a [`Manager`], which owns the output stream and the
//! [`Terminal`] capability. [`StreamManager`] is a manager that redraws
//! the line in a stream with carriage returns.
//!
//! ```rust,no_run
//! # use pistonite_ga as ga;
//! let manager = ga::StreamManager::stdout().into_arc();
//! let mut counter = ga::counter("Processing").total(101).unit("Files").spawn(manager)?;
//! for _ in 0..101 {
//!     ga::update!(counter += 1)?;
//! }
//! counter.close(false)?;
//! # Ok::<(), ga::Error>(())
//! ```
//!
//! Updates are throttled: the line is only redrawn at most once per `min_delta`
//! (100ms by default), unless forced or done. See [`update!`] for the update shorthands.
//!
//! # Multicolored bars
//! Part of the count can be allocated to [subcounters](Counter::add_subcounter),
//! which are drawn as their own colored segments. See [`bar`] for
//! how the cells are split.
//!
//! # Formats
//! The line is rendered from a [`Template`] with `{field}` placeholders. See
//! [`counter`](module@counter) for the built-in fields, and [`template`] for the syntax.
//! User-defined fields can be added when building and when updating.
//!
//! # Logging
//! The crate logs through [`log`]. Reserved names used as user-defined fields
//! are ignored and reported with `warn`. No logger is installed by this crate.
//!
//! Quick Feature Reference:
//! - `serde`: Deserialize [`CounterConfig`] and [`Color`]
//! - `toml`: [`CounterConfig::from_toml`]

#![cfg_attr(any(docsrs, feature = "nightly"), feature(doc_auto_cfg))]

#[macro_use]
mod error;
pub use error::{Error, Result};

pub mod bar;
mod config;
pub use config::CounterConfig;
pub mod counter;
pub use counter::{
    BAR_FORMAT, COUNTER_FORMAT, Counter, CounterBuilder, Source, SubCounter, SubCounterId, Track,
    counter,
};
pub mod fields;
pub use fields::{FieldMap, UserFields, Value};
mod manager;
pub use manager::{DEFAULT_MIN_DELTA, Manager, StreamManager};
mod series;
pub use series::Series;
pub mod template;
pub use template::Template;
pub mod term;
pub use term::{AnsiTerminal, Color, GlyphSupport, Terminal};
pub mod time;
