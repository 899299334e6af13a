//! Diagnostics for entity creation, written to stderr.
//!
//! The creation report and plan listings go to stdout and are never
//! filtered. Tracing only covers how the tool got there: profile
//! normalization, planning, and each sink operation.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset, chosen by the `-v` count.
///
/// Only the `entity` crate is raised; dependencies stay at `warn`.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,entity=info",
        _ => "warn,entity=debug",
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `verbosity` when set.
///
/// ```bash
/// entity -vv plan --name "Scout" --description "triage"
/// RUST_LOG=entity::io=debug entity create --name "Scout" --description "triage"
/// ```
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbosity > 1)
                .without_time()
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_only_the_crate_level() {
        assert_eq!(default_directive(0), "warn");
        assert_eq!(default_directive(1), "warn,entity=info");
        assert_eq!(default_directive(2), "warn,entity=debug");
        assert_eq!(default_directive(9), "warn,entity=debug");
    }

    #[test]
    fn every_default_directive_parses() {
        for verbosity in 0..3 {
            assert!(EnvFilter::try_new(default_directive(verbosity)).is_ok());
        }
    }
}
