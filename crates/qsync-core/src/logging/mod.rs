use tracing_subscriber::filter::Directive;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log targets owned by this workspace.
const TARGETS: [&str; 2] = ["qsync_core", "qsync"];

fn directives(quiet: bool) -> Vec<Directive> {
    let level = if quiet { "error" } else { "info" };
    TARGETS
        .iter()
        .filter_map(|target| format!("{}={}", target, level).parse().ok())
        .collect()
}

/// Initialize JSON logging on stderr.
///
/// When `quiet` is true, only error-level events from the qsync crates are
/// emitted; otherwise info-level and above. These levels override `RUST_LOG`
/// for the qsync targets; `RUST_LOG` still controls every other target.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(quiet: bool) -> Result<(), TryInitError> {
    let filter = directives(quiet)
        .into_iter()
        .fold(EnvFilter::from_default_env(), EnvFilter::add_directive);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_cover_both_crates() {
        let quiet: Vec<String> = directives(true).iter().map(ToString::to_string).collect();
        assert!(quiet[0].starts_with("qsync_core"));
        assert!(quiet.iter().all(|d| d.ends_with("error")));
        assert_eq!(directives(false).len(), 2);
    }

    #[test]
    fn test_init_logging_twice_reports_error() {
        let _ = init_logging(true);
        assert!(init_logging(false).is_err());
    }
}
