//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for the binary
//! - Hold the process-wide diagnostic sink used by the scrape core
//! - Provide crate-internal log macros over that sink
//!
//! # Design Decisions
//! - The sink is a trait object behind an `ArcSwap`, set once at startup
//! - Default sink forwards to `tracing`, so library users get structured events
//! - Tests swap in `MemoryLogger` or `NoopLogger`

use std::fmt;
use std::sync::{Arc, LazyLock, Mutex};

use arc_swap::ArcSwap;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Target used for all events emitted by the default sink.
pub const LOG_TARGET: &str = "phpfpm_status";

/// Capability set of a diagnostic sink: info, debug and error, each with a
/// plain and a formatted variant.
pub trait Logger: Send + Sync {
    fn info_fmt(&self, args: fmt::Arguments<'_>);
    fn debug_fmt(&self, args: fmt::Arguments<'_>);
    fn error_fmt(&self, args: fmt::Arguments<'_>);

    fn info(&self, msg: &str) {
        self.info_fmt(format_args!("{msg}"));
    }

    fn debug(&self, msg: &str) {
        self.debug_fmt(format_args!("{msg}"));
    }

    fn error(&self, msg: &str) {
        self.error_fmt(format_args!("{msg}"));
    }
}

/// Forwards diagnostics to `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info_fmt(&self, args: fmt::Arguments<'_>) {
        tracing::info!(target: LOG_TARGET, "{}", args);
    }

    fn debug_fmt(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(target: LOG_TARGET, "{}", args);
    }

    fn error_fmt(&self, args: fmt::Arguments<'_>) {
        tracing::error!(target: LOG_TARGET, "{}", args);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn info_fmt(&self, _args: fmt::Arguments<'_>) {}
    fn debug_fmt(&self, _args: fmt::Arguments<'_>) {}
    fn error_fmt(&self, _args: fmt::Arguments<'_>) {}
}

/// Severity of a captured line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Debug,
    Error,
}

/// Keeps every message in memory. Useful for asserting on diagnostics.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<(Level, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: Level, args: fmt::Arguments<'_>) {
        let mut lines = match self.lines.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.push((level, args.to_string()));
    }

    /// Snapshot of the captured lines.
    pub fn lines(&self) -> Vec<(Level, String)> {
        match self.lines.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Captured messages at the given level.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg)
            .collect()
    }
}

impl Logger for MemoryLogger {
    fn info_fmt(&self, args: fmt::Arguments<'_>) {
        self.push(Level::Info, args);
    }

    fn debug_fmt(&self, args: fmt::Arguments<'_>) {
        self.push(Level::Debug, args);
    }

    fn error_fmt(&self, args: fmt::Arguments<'_>) {
        self.push(Level::Error, args);
    }
}

static LOGGER: LazyLock<ArcSwap<Arc<dyn Logger>>> =
    LazyLock::new(|| ArcSwap::from_pointee(Arc::new(TracingLogger) as Arc<dyn Logger>));

/// Install the process-wide diagnostic sink.
pub fn set_logger(logger: Arc<dyn Logger>) {
    LOGGER.store(Arc::new(logger));
}

/// Current process-wide diagnostic sink.
pub fn logger() -> Arc<dyn Logger> {
    (**LOGGER.load()).clone()
}

macro_rules! log_debug {
    ($($arg:tt)+) => {
        $crate::observability::logging::Logger::debug_fmt(
            &*$crate::observability::logging::logger(),
            format_args!($($arg)+),
        )
    };
}

macro_rules! log_error {
    ($($arg:tt)+) => {
        $crate::observability::logging::Logger::error_fmt(
            &*$crate::observability::logging::logger(),
            format_args!($($arg)+),
        )
    };
}

pub(crate) use {log_debug, log_error};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins over `default_level` when set.
pub fn init_tracing(default_level: &str) {
    let fallback = format!("{LOG_TARGET}={default_level}");
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
