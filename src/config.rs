use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::filter::EmptySelection;
use crate::data::loader::DEFAULT_SOURCE;

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV: &str = "SALARY_DASHBOARD_CONFIG";
/// Settings file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "salary-dashboard.json";

const SOURCE_ENV: &str = "SALARY_DASHBOARD_SOURCE";
const MAP_ROLE_ENV: &str = "SALARY_DASHBOARD_MAP_ROLE";
const EMPTY_SELECTION_ENV: &str = "SALARY_DASHBOARD_EMPTY_SELECTION";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Resolved dashboard settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// URL or local path of the dataset.
    pub source: String,
    /// Role whose salaries are shown on the country map.
    pub map_role: String,
    /// Initial interpretation of an empty filter selection.
    pub empty_selection: EmptySelection,
    pub histogram_bins: usize,
    pub top_roles: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            map_role: "Data Scientist".to_string(),
            empty_selection: EmptySelection::ExcludeAll,
            histogram_bins: 30,
            top_roles: 10,
        }
    }
}

/// On-disk settings; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SettingsFile {
    source: Option<String>,
    map_role: Option<String>,
    empty_selection: Option<EmptySelection>,
    histogram_bins: Option<usize>,
    top_roles: Option<usize>,
}

impl DashboardConfig {
    /// Resolve settings from the settings file (if any) and the process
    /// environment.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let path = explicit.or_else(|| {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.exists().then_some(local)
        });
        Self::from_sources(path.as_deref(), |key| std::env::var(key).ok())
    }

    /// Defaults, then `file`, then environment overrides read through `env`.
    pub fn from_sources(
        file: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = DashboardConfig::default();

        if let Some(path) = file {
            let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let settings: SettingsFile =
                serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
            config.apply_file(settings);
            log::debug!("Read settings from {}", path.display());
        }

        if let Some(source) = env(SOURCE_ENV) {
            config.source = source;
        }
        if let Some(role) = env(MAP_ROLE_ENV) {
            config.map_role = role;
        }
        if let Some(raw) = env(EMPTY_SELECTION_ENV) {
            config.empty_selection =
                EmptySelection::parse(&raw).ok_or(ConfigError::InvalidValue {
                    key: EMPTY_SELECTION_ENV,
                    value: raw,
                    reason: "expected \"exclude-all\" or \"match-all\"",
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, settings: SettingsFile) {
        if let Some(source) = settings.source {
            self.source = source;
        }
        if let Some(role) = settings.map_role {
            self.map_role = role;
        }
        if let Some(policy) = settings.empty_selection {
            self.empty_selection = policy;
        }
        if let Some(bins) = settings.histogram_bins {
            self.histogram_bins = bins;
        }
        if let Some(n) = settings.top_roles {
            self.top_roles = n;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.source.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "source",
                value: self.source.clone(),
                reason: "must not be empty",
            });
        }
        if !(1..=200).contains(&self.histogram_bins) {
            return Err(ConfigError::InvalidValue {
                key: "histogramBins",
                value: self.histogram_bins.to_string(),
                reason: "must be between 1 and 200",
            });
        }
        if !(1..=50).contains(&self.top_roles) {
            return Err(ConfigError::InvalidValue {
                key: "topRoles",
                value: self.top_roles.to_string(),
                reason: "must be between 1 and 50",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_file_or_env() {
        let config = DashboardConfig::from_sources(None, env_of(&[])).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.histogram_bins, 30);
        assert_eq!(config.top_roles, 10);
        assert_eq!(config.empty_selection, EmptySelection::ExcludeAll);
    }

    #[test]
    fn file_then_env_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{ "source": "data/local.csv", "mapRole": "Data Engineer",
                 "emptySelection": "match-all", "histogramBins": 12 }"#,
        )
        .unwrap();

        let config = DashboardConfig::from_sources(
            Some(path.as_path()),
            env_of(&[(SOURCE_ENV, "https://example.org/s.csv")]),
        )
        .unwrap();

        assert_eq!(config.source, "https://example.org/s.csv");
        assert_eq!(config.map_role, "Data Engineer");
        assert_eq!(config.empty_selection, EmptySelection::MatchAll);
        assert_eq!(config.histogram_bins, 12);
        assert_eq!(config.top_roles, 10);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "colour": "blue" }"#).unwrap();

        let err = DashboardConfig::from_sources(Some(path.as_path()), env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = DashboardConfig::from_sources(Some(path.as_path()), env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn bad_env_policy_is_rejected() {
        let err = DashboardConfig::from_sources(None, env_of(&[(EMPTY_SELECTION_ENV, "sometimes")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: EMPTY_SELECTION_ENV, .. }
        ));
    }

    #[test]
    fn out_of_range_bins_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "histogramBins": 0 }"#).unwrap();

        let err = DashboardConfig::from_sources(Some(path.as_path()), env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "histogramBins", .. }));
    }
}
