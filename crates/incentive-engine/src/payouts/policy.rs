use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const REVENUE_WEIGHT: &str = "revenue_weight";
pub const QUALITY_WEIGHT: &str = "quality_weight";
pub const CSAT_WEIGHT: &str = "csat_weight";

const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Payout policy: KPI weights plus the named scenario multipliers.
///
/// Weights are taken verbatim. They are expected to sum to 1.0 but are never
/// normalized, since that would silently change payouts for existing deployments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfiguration {
    #[serde(default)]
    pub payout_logic: BTreeMap<String, f64>,
    pub scenarios: BTreeMap<String, Scenario>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub multiplier: f64,
}

/// Whether a missing policy document may be replaced by the built-in policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    UseDefault,
    Deny,
}

impl From<bool> for FallbackPolicy {
    fn from(allow_default: bool) -> Self {
        if allow_default {
            Self::UseDefault
        } else {
            Self::Deny
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("payout policy not found at {}", .path.display())]
    ConfigNotFound { path: PathBuf },
    #[error("failed to read payout policy {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid payout policy document: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("payout policy must define at least one scenario")]
    NoScenarios,
}

impl Default for PolicyConfiguration {
    fn default() -> Self {
        let payout_logic = BTreeMap::from([
            (REVENUE_WEIGHT.to_string(), 0.5),
            (QUALITY_WEIGHT.to_string(), 0.3),
            (CSAT_WEIGHT.to_string(), 0.2),
        ]);
        let scenarios = BTreeMap::from([
            ("Balanced".to_string(), Scenario { multiplier: 1.0 }),
            ("Aggressive".to_string(), Scenario { multiplier: 1.2 }),
            ("Conservative".to_string(), Scenario { multiplier: 0.8 }),
        ]);

        Self {
            payout_logic,
            scenarios,
        }
    }
}

impl PolicyConfiguration {
    pub fn from_yaml_str(raw: &str) -> Result<Self, PolicyError> {
        let policy: PolicyConfiguration = serde_yaml::from_str(raw)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn scenario(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.get(name)
    }

    pub fn weight(&self, key: &str) -> Option<f64> {
        self.payout_logic.get(key).copied()
    }

    fn validate(&self) -> Result<(), PolicyError> {
        if self.scenarios.is_empty() {
            return Err(PolicyError::NoScenarios);
        }

        match self.weight_check() {
            WeightCheck::Normalized => {}
            WeightCheck::Missing(keys) => warn!(
                missing = ?keys,
                "payout policy is missing weights; scoring will fail until they are defined"
            ),
            WeightCheck::Unnormalized(total) => warn!(
                weight_sum = total,
                "payout weights do not sum to 1.0; applying them unnormalized"
            ),
        }

        Ok(())
    }

    fn weight_check(&self) -> WeightCheck {
        let keys = [REVENUE_WEIGHT, QUALITY_WEIGHT, CSAT_WEIGHT];
        let missing: Vec<&'static str> = keys
            .into_iter()
            .filter(|key| self.weight(key).is_none())
            .collect();
        if !missing.is_empty() {
            return WeightCheck::Missing(missing);
        }

        let total: f64 = keys.into_iter().filter_map(|key| self.weight(key)).sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            WeightCheck::Unnormalized(total)
        } else {
            WeightCheck::Normalized
        }
    }
}

#[derive(Debug, PartialEq)]
enum WeightCheck {
    Normalized,
    Missing(Vec<&'static str>),
    Unnormalized(f64),
}

/// Loads the payout policy from a YAML document on disk.
pub fn load_config(
    source: impl AsRef<Path>,
    fallback: FallbackPolicy,
) -> Result<PolicyConfiguration, PolicyError> {
    let path = source.as_ref();

    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return match fallback {
                FallbackPolicy::UseDefault => {
                    warn!(
                        path = %path.display(),
                        "payout policy not found; using built-in default policy"
                    );
                    Ok(PolicyConfiguration::default())
                }
                FallbackPolicy::Deny => Err(PolicyError::ConfigNotFound {
                    path: path.to_path_buf(),
                }),
            };
        }
        Err(source) => {
            return Err(PolicyError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let policy = PolicyConfiguration::from_yaml_str(&raw)?;
    info!(
        path = %path.display(),
        scenarios = policy.scenarios.len(),
        "loaded payout policy"
    );
    Ok(policy)
}
