//! Configuration for intel staleness and engagement gating.
//!
//! Loaded from `intel_config.json` with support for an environment variable
//! override; a builtin copy is compiled in.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use astrum_core::enums::IntelCoverage;
use astrum_core::types::{DatedCoverage, SimTime};

pub const BUILTIN_INTEL_CONFIG: &str = include_str!("data/intel_config.json");

/// Environment variable naming an alternative config file.
pub const INTEL_CONFIG_ENV: &str = "ASTRUM_INTEL_CONFIG";

/// Root configuration for the intel subsystem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntelConfig {
    pub decay: DecayPolicy,
    pub engagement: EngagementPolicy,
}

impl IntelConfig {
    pub fn builtin() -> Arc<Self> {
        Arc::new(
            serde_json::from_str(BUILTIN_INTEL_CONFIG).expect("builtin intel config should parse"),
        )
    }

    pub fn from_json_str(json: &str) -> Result<Self, IntelConfigError> {
        let config: IntelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, IntelConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| IntelConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        IntelConfig::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), IntelConfigError> {
        if self.decay.step_ticks == 0 {
            return Err(IntelConfigError::Invalid(
                "decay.step_ticks must be at least 1".into(),
            ));
        }
        if self.engagement.min_coverage == IntelCoverage::Unknown {
            return Err(IntelConfigError::Invalid(
                "engagement.min_coverage must be above Unknown".into(),
            ));
        }
        Ok(())
    }
}

/// How current coverage degrades without a fresh observation.
///
/// Nothing changes for `grace_ticks` after the dated stamp. Then current
/// drops one level, and one more every further `step_ticks`, never below
/// `floor` (nor above the dated level).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayPolicy {
    pub enabled: bool,
    pub grace_ticks: u64,
    pub step_ticks: u64,
    pub floor: IntelCoverage,
}

impl Default for DecayPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            grace_ticks: 50,
            step_ticks: 100,
            floor: IntelCoverage::Basic,
        }
    }
}

impl DecayPolicy {
    /// A policy under which coverage never goes stale.
    pub fn frozen() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Level `dated` has decayed to by `now`.
    pub fn decayed(&self, dated: &DatedCoverage, now: SimTime) -> IntelCoverage {
        if !self.enabled {
            return dated.level;
        }
        let age = now.ticks_since(&dated.as_of);
        if age < self.grace_ticks {
            return dated.level;
        }
        let steps = 1 + (age - self.grace_ticks) / self.step_ticks.max(1);
        let floor = self.floor.min(dated.level);
        dated.level.lowered_by(steps).max(floor)
    }
}

/// Intel required before a target may be engaged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementPolicy {
    pub min_coverage: IntelCoverage,
}

impl Default for EngagementPolicy {
    fn default() -> Self {
        Self {
            min_coverage: IntelCoverage::Basic,
        }
    }
}

#[derive(Debug, Error)]
pub enum IntelConfigError {
    #[error("failed to parse intel config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read intel config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid intel config: {0}")]
    Invalid(String),
}

/// Load intel configuration from `ASTRUM_INTEL_CONFIG`, then the crate's
/// data file, then the builtin copy. Returns the path actually used.
pub fn load_intel_config_from_env() -> (Arc<IntelConfig>, Option<PathBuf>) {
    let override_path = env::var(INTEL_CONFIG_ENV).ok().map(PathBuf::from);
    let default_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src/data/intel_config.json");

    let path = override_path.unwrap_or(default_path);
    match IntelConfig::from_file(&path) {
        Ok(config) => {
            tracing::info!(
                target: "astrum::config",
                path = %path.display(),
                "intel_config.loaded=file"
            );
            return (Arc::new(config), Some(path));
        }
        Err(err) => {
            tracing::warn!(
                target: "astrum::config",
                path = %path.display(),
                error = %err,
                "intel_config.load_failed"
            );
        }
    }

    tracing::info!(target: "astrum::config", "intel_config.loaded=builtin");
    (IntelConfig::builtin(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dated(level: IntelCoverage, tick: u64) -> DatedCoverage {
        DatedCoverage {
            level,
            as_of: SimTime::at(tick),
        }
    }

    #[test]
    fn default_config_values() {
        let config = IntelConfig::default();
        assert!(config.decay.enabled);
        assert_eq!(config.decay.grace_ticks, 50);
        assert_eq!(config.decay.step_ticks, 100);
        assert_eq!(config.decay.floor, IntelCoverage::Basic);
        assert_eq!(config.engagement.min_coverage, IntelCoverage::Basic);
    }

    #[test]
    fn builtin_config_parses_and_validates() {
        let config = IntelConfig::builtin();
        config.validate().unwrap();
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = IntelConfig::from_json_str(r#"{ "decay": { "grace_ticks": 5 } }"#).unwrap();
        assert_eq!(config.decay.grace_ticks, 5);
        assert_eq!(config.decay.step_ticks, 100);
        assert_eq!(config.engagement, EngagementPolicy::default());
    }

    #[test]
    fn zero_step_is_rejected() {
        let err = IntelConfig::from_json_str(r#"{ "decay": { "step_ticks": 0 } }"#).unwrap_err();
        assert!(matches!(err, IntelConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_engagement_threshold_is_rejected() {
        let err =
            IntelConfig::from_json_str(r#"{ "engagement": { "min_coverage": "Unknown" } }"#)
                .unwrap_err();
        assert!(matches!(err, IntelConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = IntelConfig::from_file(Path::new("/nonexistent/intel.json")).unwrap_err();
        assert!(matches!(err, IntelConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/intel.json"));
    }

    #[test]
    fn decay_schedule_steps_down_to_floor() {
        let policy = DecayPolicy {
            enabled: true,
            grace_ticks: 10,
            step_ticks: 5,
            floor: IntelCoverage::Basic,
        };
        let d = dated(IntelCoverage::Comprehensive, 100);
        assert_eq!(policy.decayed(&d, SimTime::at(100)), IntelCoverage::Comprehensive);
        assert_eq!(policy.decayed(&d, SimTime::at(109)), IntelCoverage::Comprehensive);
        assert_eq!(policy.decayed(&d, SimTime::at(110)), IntelCoverage::Broad);
        assert_eq!(policy.decayed(&d, SimTime::at(114)), IntelCoverage::Broad);
        assert_eq!(policy.decayed(&d, SimTime::at(115)), IntelCoverage::Basic);
        assert_eq!(policy.decayed(&d, SimTime::at(10_000)), IntelCoverage::Basic);
    }

    #[test]
    fn floor_never_lifts_above_dated() {
        let policy = DecayPolicy {
            enabled: true,
            grace_ticks: 0,
            step_ticks: 1,
            floor: IntelCoverage::Broad,
        };
        let d = dated(IntelCoverage::Basic, 0);
        assert_eq!(policy.decayed(&d, SimTime::at(50)), IntelCoverage::Basic);
    }

    #[test]
    fn disabled_policy_keeps_dated_level() {
        let d = dated(IntelCoverage::Broad, 0);
        assert_eq!(
            DecayPolicy::frozen().decayed(&d, SimTime::at(1_000_000)),
            IntelCoverage::Broad
        );
    }
}
