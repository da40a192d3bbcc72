use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::term::{AnsiTerminal, Terminal};

/// Default minimum time between two refreshes of a counter
pub const DEFAULT_MIN_DELTA: Duration = Duration::from_millis(100);

/// Output side of counters.
///
/// A manager owns the terminal capability and the output stream,
/// and supplies the defaults a counter needs (width and refresh interval).
/// Counters hold it as `Arc<dyn Manager>`, so one manager can be shared by
/// many counters, including counters on other threads.
///
/// The clock is also read through the manager, so the refresh
/// policy can be tested without sleeping.
pub trait Manager: Send + Sync {
    /// The terminal capability
    fn term(&self) -> &dyn Terminal;

    /// Default width for rendering
    fn width(&self) -> usize {
        self.term().width()
    }

    /// Default minimum time between refreshes
    fn min_delta(&self) -> Duration {
        DEFAULT_MIN_DELTA
    }

    /// Current time
    fn now(&self) -> Instant {
        Instant::now()
    }

    /// Replace the current line with the output
    fn write(&self, output: &str) -> io::Result<()>;

    /// Clear the current line
    fn clear(&self) -> io::Result<()>;

    /// Move past the current line, keeping it on the screen
    fn finish(&self) -> io::Result<()>;
}

/// Manager that writes to a stream, redrawing the line with carriage returns
///
/// ```rust,no_run
/// # use pistonite_ga as ga;
/// let manager = ga::StreamManager::stdout().into_arc();
/// let mut counter = ga::counter("Processing").total(100).unit("files").spawn(manager)?;
/// for _ in 0..100 {
///     counter.update(1)?;
/// }
/// counter.close(false)?;
/// # Ok::<(), ga::Error>(())
/// ```
pub struct StreamManager<W: Write + Send> {
    term: Box<dyn Terminal>,
    stream: Mutex<W>,
    width: Option<usize>,
    min_delta: Duration,
}

impl StreamManager<io::Stdout> {
    /// Manager for stdout, with capabilities detected from the environment
    pub fn stdout() -> Self {
        Self::new(AnsiTerminal::detect(), io::stdout())
    }
}

impl<W: Write + Send> StreamManager<W> {
    pub fn new(term: impl Terminal + 'static, stream: W) -> Self {
        Self {
            term: Box::new(term),
            stream: Mutex::new(stream),
            width: None,
            min_delta: DEFAULT_MIN_DELTA,
        }
    }

    /// Use a fixed width instead of the terminal width
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the default minimum time between refreshes
    pub fn with_min_delta(mut self, min_delta: Duration) -> Self {
        self.min_delta = min_delta;
        self
    }

    /// Take back the stream
    pub fn into_inner(self) -> W {
        match self.stream.into_inner() {
            Ok(x) => x,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_raw(&self, data: &str) -> io::Result<()> {
        let mut stream = match self.stream.lock() {
            Ok(x) => x,
            // a panic while writing leaves at most a partial line
            Err(poisoned) => poisoned.into_inner(),
        };
        stream.write_all(data.as_bytes())?;
        stream.flush()
    }
}

impl<W: Write + Send + 'static> StreamManager<W> {
    pub fn into_arc(self) -> Arc<dyn Manager> {
        Arc::new(self)
    }
}

impl<W: Write + Send> Manager for StreamManager<W> {
    fn term(&self) -> &dyn Terminal {
        self.term.as_ref()
    }

    fn width(&self) -> usize {
        match self.width {
            Some(w) => w,
            None => self.term.width(),
        }
    }

    fn min_delta(&self) -> Duration {
        self.min_delta
    }

    fn write(&self, output: &str) -> io::Result<()> {
        self.write_raw(&format!("\r{output}"))
    }

    fn clear(&self) -> io::Result<()> {
        self.write_raw("\r\x1b[2K")
    }

    fn finish(&self) -> io::Result<()> {
        self.write_raw("\n")
    }
}

impl<W: Write + Send> std::fmt::Debug for StreamManager<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamManager")
            .field("width", &self.width)
            .field("min_delta", &self.min_delta)
            .finish_non_exhaustive()
    }
}
