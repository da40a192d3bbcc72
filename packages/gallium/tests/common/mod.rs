#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use pistonite_ga as ga;

/// Terminal with a fixed width. With color, text is wrapped as `<name>text</>`
pub struct FixedTerm {
    pub width: usize,
    pub color: bool,
    pub glyphs: ga::GlyphSupport,
}

impl ga::Terminal for FixedTerm {
    fn width(&self) -> usize {
        self.width
    }

    fn colorize(&self, text: &str, color: &ga::Color) -> String {
        if !self.color {
            return text.to_string();
        }
        let name = match color {
            ga::Color::Named(x) => x.clone(),
            ga::Color::Ansi256(x) => x.to_string(),
            ga::Color::Rgb(r, g, b) => format!("{r},{g},{b}"),
        };
        format!("<{name}>{text}</>")
    }

    fn glyph_support(&self) -> ga::GlyphSupport {
        self.glyphs
    }
}

/// Manager with a manual clock that records the output
pub struct FakeManager {
    term: FixedTerm,
    start: Instant,
    clock: Mutex<Duration>,
    output: Mutex<Vec<String>>,
}

impl FakeManager {
    pub fn new(width: usize) -> Arc<Self> {
        Self::with_term(FixedTerm {
            width,
            color: false,
            glyphs: ga::GlyphSupport::Full,
        })
    }

    pub fn colored(width: usize) -> Arc<Self> {
        Self::with_term(FixedTerm {
            width,
            color: true,
            glyphs: ga::GlyphSupport::Full,
        })
    }

    pub fn with_term(term: FixedTerm) -> Arc<Self> {
        Arc::new(Self {
            term,
            start: Instant::now(),
            clock: Mutex::new(Duration::ZERO),
            output: Mutex::new(vec![]),
        })
    }

    pub fn advance(&self, d: Duration) {
        *self.clock.lock().unwrap() += d;
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Everything written so far. Clear is recorded as `<clear>` and finish as `<finish>`
    pub fn output(&self) -> Vec<String> {
        self.output.lock().unwrap().clone()
    }

    /// Number of lines written
    pub fn writes(&self) -> usize {
        self.output()
            .iter()
            .filter(|x| *x != "<clear>" && *x != "<finish>")
            .count()
    }
}

impl ga::Manager for FakeManager {
    fn term(&self) -> &dyn ga::Terminal {
        &self.term
    }

    fn now(&self) -> Instant {
        self.start + *self.clock.lock().unwrap()
    }

    fn write(&self, output: &str) -> io::Result<()> {
        self.output.lock().unwrap().push(output.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        self.output.lock().unwrap().push("<clear>".to_string());
        Ok(())
    }

    fn finish(&self) -> io::Result<()> {
        self.output.lock().unwrap().push("<finish>".to_string());
        Ok(())
    }
}

pub fn secs(x: f64) -> Option<Duration> {
    Some(Duration::from_secs_f64(x))
}

pub fn ms(x: u64) -> Option<Duration> {
    Some(Duration::from_millis(x))
}
