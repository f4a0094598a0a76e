//! Diagnostic logging setup.
//!
//! Operator-facing progress goes to stdout with `println!`; diagnostics
//! (swallowed failures, rejected archive entries, step detail) go through
//! `tracing` to stderr.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor `--log-level` says otherwise.
pub const DEFAULT_LEVEL: &str = "warn";

const LEVEL_FLAG: &str = "--log-level";

/// Pull `--log-level <LEVEL>` / `--log-level=<LEVEL>` out of routed args.
///
/// Command arguments are passed through raw, so the flag may trail the
/// command name (`kirok init --log-level debug`). The last occurrence wins;
/// a bare trailing `--log-level` is dropped.
pub fn split_level_flag(args: &[String]) -> (Option<String>, Vec<String>) {
    let mut level = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if arg == LEVEL_FLAG {
            if let Some(value) = iter.next() {
                level = Some(value.clone());
            }
        } else if let Some(value) = arg.strip_prefix("--log-level=") {
            level = Some(value.to_string());
        } else {
            rest.push(arg.clone());
        }
    }

    (level, rest)
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false),
        )
        .try_init();
}
