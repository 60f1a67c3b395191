use incentive_engine::config::PolicySourceConfig;
use incentive_engine::payouts::{load_config, FallbackPolicy, PolicyConfiguration, PolicyError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the payout policy once for the process.
///
/// An explicit override must exist on disk; the configured default path may fall
/// back to the built-in policy when the environment allows it.
pub(crate) fn load_policy(
    override_path: Option<PathBuf>,
    source: &PolicySourceConfig,
) -> Result<Arc<PolicyConfiguration>, PolicyError> {
    let policy = match override_path {
        Some(path) => load_config(path, FallbackPolicy::Deny)?,
        None => load_config(&source.path, FallbackPolicy::from(source.allow_default))?,
    };
    Ok(Arc::new(policy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_override_never_falls_back() {
        let source = PolicySourceConfig {
            path: PathBuf::from("./missing/settings.yaml"),
            allow_default: true,
        };

        let error = load_policy(Some(PathBuf::from("./missing/override.yaml")), &source)
            .expect_err("override must exist");
        assert!(matches!(error, PolicyError::ConfigNotFound { .. }));
    }

    #[test]
    fn configured_path_falls_back_when_allowed() {
        let source = PolicySourceConfig {
            path: PathBuf::from("./missing/settings.yaml"),
            allow_default: true,
        };

        let policy = load_policy(None, &source).expect("default policy");
        assert_eq!(*policy, PolicyConfiguration::default());
    }
}
