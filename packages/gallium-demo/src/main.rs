use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use env_filter::{Builder as LogEnvBuilder, Filter as LogEnvFilter};

/// Demo of counters and progress bars
#[derive(Debug, Parser)]
struct Cli {
    /// Verbose. More -v makes it more verbose (opposite of --quiet)
    #[clap(short = 'v', long, action(clap::ArgAction::Count))]
    verbose: u8,
    /// Quiet. More -q makes it more quiet (opposite of --verbose)
    #[clap(short = 'q', long, action(clap::ArgAction::Count))]
    quiet: u8,
    /// TOML file with options applied to every counter
    #[clap(long)]
    config: Option<PathBuf>,
    /// Use a fixed width instead of the terminal width
    #[clap(long)]
    width: Option<usize>,
    /// Milliseconds to sleep between updates
    #[clap(long, default_value_t = 20)]
    delay: u64,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// A bar with a known total
    Bar {
        #[clap(default_value_t = 200)]
        total: i64,
    },
    /// A counter without a total
    Counter {
        #[clap(default_value_t = 150)]
        count: i64,
    },
    /// Test results drawn as multicolored sub-series
    Tests {
        #[clap(default_value_t = 120)]
        total: i64,
    },
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_log(cli.verbose.min(2) as i8 - cli.quiet.min(2) as i8);
    let start = std::time::Instant::now();
    let result = run(cli);
    log::debug!("finished in {:.2}s", start.elapsed().as_secs_f32());
    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("fatal: {e:?}");
            std::process::ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => {
            let input = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            ga::CounterConfig::from_toml(&input)?
        }
        None => ga::CounterConfig::default(),
    };
    let mut manager = ga::StreamManager::stdout();
    if let Some(width) = cli.width {
        manager = manager.with_width(width);
    }
    let demo = Demo {
        manager: manager.into_arc(),
        config,
        delay: Duration::from_millis(cli.delay),
    };
    match cli.command {
        Command::Bar { total } => demo.bar(total),
        Command::Counter { count } => demo.counter(count),
        Command::Tests { total } => demo.tests(total),
    }
}

struct Demo {
    manager: Arc<dyn ga::Manager>,
    config: ga::CounterConfig,
    delay: Duration,
}

impl Demo {
    fn bar(&self, total: i64) -> anyhow::Result<()> {
        let mut counter = ga::counter("Processing")
            .unit("files")
            .config(&self.config)
            .total(total)
            .spawn(self.manager.clone())?;
        for _ in 0..total {
            std::thread::sleep(self.delay);
            counter.update(1)?;
        }
        counter.close(false)?;
        Ok(())
    }

    fn counter(&self, count: i64) -> anyhow::Result<()> {
        let mut counter = ga::counter("Scanning")
            .unit("files")
            .counter_format("{desc}{desc_pad}{count:d} {unit} [{elapsed}, {rate:.2f}{unit_pad}{unit}/s] {file}{fill}")
            .config(&self.config)
            .field("file", "")
            .spawn(self.manager.clone())?;
        for i in 0..count {
            std::thread::sleep(self.delay);
            let file = format!("file_{i:04}.rs");
            ga::update!(counter += 1, file = file)?;
        }
        ga::update!(counter, file = "done")?;
        counter.close(false)?;
        Ok(())
    }

    fn tests(&self, total: i64) -> anyhow::Result<()> {
        let mut counter = ga::counter("Testing")
            .unit("tests")
            .bar_format(
                "{desc}{desc_pad}{percentage:3.0f}%|{bar}| \
                 {count_1:d} passed, {count_2:d} failed, {count_0:d} running",
            )
            .config(&self.config)
            .total(total)
            .spawn(self.manager.clone())?;
        let passed = counter.add_subcounter(Some("green".into()), 0, false)?;
        let failed = counter.add_subcounter(Some("red".into()), 0, false)?;

        for i in 0..total {
            std::thread::sleep(self.delay);
            // start the test, then finish it on the next iteration
            counter.update(1)?;
            if i > 0 {
                let id = if i % 7 == 0 { failed } else { passed };
                counter.update_sub_from(id, ga::Source::Parent, 1, false)?;
            }
        }
        if total > 0 {
            counter.update_sub_from(passed, ga::Source::Parent, 1, true)?;
        }
        let failures = counter.subcounter(failed).map(|x| x.count()).unwrap_or_default();
        counter.close(false)?;
        if failures > 0 {
            log::warn!("{failures} tests failed");
        }
        Ok(())
    }
}

static LOG_FILTER: OnceLock<LogEnvFilter> = OnceLock::new();

/// Set up logging to stderr. `RUST_LOG` overrides the level from the flags
fn init_log(level: i8) {
    let level = match level {
        ..=-2 => log::LevelFilter::Error,
        -1 => log::LevelFilter::Warn,
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let log_level = match std::env::var("RUST_LOG") {
        Ok(value) if !value.is_empty() => {
            let filter = LogEnvBuilder::new().parse(&value).build();
            let log_level = filter.filter();
            let _ = LOG_FILTER.set(filter);
            log_level.max(level)
        }
        _ => level,
    };
    log::set_max_level(log_level);
    let _ = log::set_logger(&LogImpl);
}

struct LogImpl;
impl log::Log for LogImpl {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        match LOG_FILTER.get() {
            Some(filter) => filter.enabled(metadata),
            None => metadata.level() <= log::max_level(),
        }
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = match record.level() {
            log::Level::Trace => match (record.file(), record.line()) {
                (Some(f), Some(l)) => {
                    let name = match f.rfind(['/', '\\']) {
                        None => f,
                        Some(i) => &f[i + 1..],
                    };
                    format!("[{name}:{l}] {}", record.args())
                }
                _ => record.args().to_string(),
            },
            _ => record.args().to_string(),
        };
        // start on a new line so the message does not mix with a bar
        eprintln!("\r\x1b[2K{:<5} {message}", record.level());
    }

    fn flush(&self) {}
}
