//! Binary log setup: one stderr layer whose level follows the `-d` count.

use tracing::level_filters::LevelFilter;
use tracing::Subscriber;
use tracing_subscriber::filter::{filter_fn, FilterExt};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

/// Dependencies that stay quiet unless tracing at full verbosity.
const NOISY_MODULES: [&str; 2] = ["config", "toml"];

/// Level for a `-d` count: none is WARN, then INFO, DEBUG, TRACE.
pub fn verbosity_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Formatting layer with the level and module filters combined into a single
/// per-layer filter.
pub fn log_layer<S, W>(verbosity: u8, writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let module_filter = filter_fn(move |metadata| {
        verbosity >= 3
            || !NOISY_MODULES
                .iter()
                .any(|name| metadata.target().starts_with(name))
    });

    fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(verbosity_level(verbosity).and(module_filter))
}

/// Install the global subscriber writing to stderr.
pub fn setup_logging(verbosity: u8) {
    if verbosity > 3 {
        eprintln!("Don't be crazy, max is -d -d -d");
    }

    tracing_subscriber::registry()
        .with(log_layer(verbosity, std::io::stderr))
        .init();

    match verbosity_level(verbosity) {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
