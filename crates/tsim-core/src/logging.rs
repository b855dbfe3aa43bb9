//! Logging initialization using the `tracing` ecosystem.
//!
//! Console output is always enabled. When a log directory is supplied, a
//! second layer writes plain-text, daily-rotated files via `tracing-appender`.
//! The `RUST_LOG` env var takes precedence over the level passed in.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber. Call once, at program start.
///
/// - `log_level`: fallback filter when `RUST_LOG` is unset (e.g. `"info"`)
/// - `log_dir`: optional directory for daily-rotating log files
/// - `module_name`: log file prefix (e.g. `"tsim-runner"`)
///
/// Returns `false` if a global subscriber was already installed, which
/// happens when the runner is embedded in a host that set up its own.
pub fn init_logging(log_level: &str, log_dir: Option<&str>, module_name: &str) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_ansi(true);

    match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, module_name);
            let file_layer = fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer)
                .with(file_layer)
                .try_init()
                .is_ok()
        }
        None => tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .try_init()
            .is_ok(),
    }
}
