//! Subscriber setup. Only the binary installs one; the library crates just
//! emit events.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "TYPEGRAM_LOG";

/// `verbosity`: 0 = WARN, 1 = DEBUG, 2+ = TRACE.
/// `json`: one JSON object per event on stderr.
pub fn init(verbosity: u8, json: bool) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let env_var = if std::env::var_os(LOG_ENV).is_some() { LOG_ENV } else { EnvFilter::DEFAULT_ENV };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .with_env_var(env_var)
        .from_env_lossy();

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(fmt::layer().json().with_current_span(true).with_span_list(false).with_writer(std::io::stderr))
            .init();
    } else {
        subscriber.with(fmt::layer().with_target(false).with_writer(std::io::stderr)).init();
    }
}
