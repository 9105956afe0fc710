use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_LOG_FILTER: &str = "info,bevy_app=warn,bevy_ecs=warn,bevy_time=warn";

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize a process-wide tracing subscriber for demos and tests.
///
/// If `RUST_LOG` is set, it takes precedence. Otherwise a default filter is
/// applied that keeps widget transitions visible while suppressing noisy
/// schedule-level output.
///
/// This function is idempotent and safe to call multiple times.
pub fn init_logging() {
    LOGGING_INITIALIZED.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let _ = fmt().with_env_filter(env_filter).try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_suppresses_noisy_targets() {
        assert!(DEFAULT_LOG_FILTER.contains("bevy_app=warn"));
        assert!(DEFAULT_LOG_FILTER.contains("bevy_ecs=warn"));
        assert!(DEFAULT_LOG_FILTER.contains("bevy_time=warn"));
    }

    #[test]
    fn init_logging_can_be_called_multiple_times() {
        init_logging();
        init_logging();
    }
}
