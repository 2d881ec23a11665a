//! Dashboard configuration.
//!
//! # Responsibility
//! - Deserialize optional TOML configuration with per-field defaults.
//! - Validate values before they reach the dashboard.
//!
//! # Invariants
//! - A missing file yields `DashboardConfig::default()`.
//! - `validate` runs on every load path.

use crate::chart::DEFAULT_CHART_DURATION_MS;
use crate::model::theme::Theme;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use time::UtcOffset;

const MAX_OFFSET_MINUTES: i32 = 18 * 60;
const DEFAULT_DB_FILE_NAME: &str = "studydash.sqlite3";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Toml(toml::de::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Toml(err) => write!(f, "invalid config file: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Toml(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Toml(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub db_path: PathBuf,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
    pub pomodoro_minutes: u32,
    /// Fixed offset from UTC; `None` follows the system's local offset.
    pub utc_offset_minutes: Option<i32>,
    pub default_theme: Theme,
    pub chart_duration_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: None,
            log_dir: None,
            pomodoro_minutes: 25,
            utc_offset_minutes: None,
            default_theme: Theme::Light,
            chart_duration_ms: DEFAULT_CHART_DURATION_MS,
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given and present; otherwise returns defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pomodoro_minutes == 0 {
            return Err(ConfigError::Invalid(
                "pomodoro_minutes must be greater than zero".to_string(),
            ));
        }
        if self.pomodoro_minutes > 24 * 60 {
            return Err(ConfigError::Invalid(format!(
                "pomodoro_minutes {} exceeds one day",
                self.pomodoro_minutes
            )));
        }
        let out_of_range = |offset: &i32| offset.abs() > MAX_OFFSET_MINUTES;
        if let Some(offset) = self.utc_offset_minutes.filter(out_of_range) {
            return Err(ConfigError::Invalid(format!(
                "utc_offset_minutes {offset} is outside -1080..=1080"
            )));
        }
        Ok(())
    }

    pub fn pomodoro_secs(&self) -> u32 {
        self.pomodoro_minutes.saturating_mul(60)
    }

    /// Local offset for weekday bucketing of task timestamps.
    ///
    /// Without a configured value the system offset is used, falling back to
    /// UTC when it cannot be determined. Resolve it before spawning threads:
    /// on some platforms the local offset is unavailable once a process is
    /// multi-threaded.
    pub fn utc_offset(&self) -> Result<UtcOffset, ConfigError> {
        let Some(total) = self.utc_offset_minutes else {
            return Ok(UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC));
        };
        let hours = total / 60;
        let minutes = total % 60;
        let hours = i8::try_from(hours)
            .map_err(|_| ConfigError::Invalid(format!("utc offset hours {hours} out of range")))?;
        let minutes = i8::try_from(minutes)
            .map_err(|_| ConfigError::Invalid(format!("utc offset minutes {minutes} out of range")))?;
        UtcOffset::from_hms(hours, minutes, 0)
            .map_err(|err| ConfigError::Invalid(format!("utc offset: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DashboardConfig};
    use crate::model::theme::Theme;
    use std::path::Path;
    use time::UtcOffset;

    #[test]
    fn empty_toml_uses_defaults() {
        let config = DashboardConfig::from_toml_str("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.pomodoro_secs(), 1500);
    }

    #[test]
    fn parses_overrides() {
        let config = DashboardConfig::from_toml_str(
            r#"
pomodoro_minutes = 50
utc_offset_minutes = -330
default_theme = "dark"
db_path = "/tmp/dash.sqlite3"
"#,
        )
        .unwrap();
        assert_eq!(config.pomodoro_minutes, 50);
        assert_eq!(config.default_theme, Theme::Dark);
        assert_eq!(config.utc_offset().unwrap().whole_minutes(), -330);
    }

    #[test]
    fn rejects_invalid_values_and_unknown_keys() {
        assert!(matches!(
            DashboardConfig::from_toml_str("pomodoro_minutes = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            DashboardConfig::from_toml_str("utc_offset_minutes = 2000"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            DashboardConfig::from_toml_str("colour = \"red\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn explicit_zero_offset_pins_utc() {
        let config = DashboardConfig::from_toml_str("utc_offset_minutes = 0").unwrap();
        assert_eq!(config.utc_offset_minutes, Some(0));
        assert_eq!(config.utc_offset().unwrap(), UtcOffset::UTC);
    }

    #[test]
    fn unset_offset_follows_local_time() {
        let config = DashboardConfig::default();
        assert_eq!(config.utc_offset_minutes, None);
        let expected = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
        assert_eq!(config.utc_offset().unwrap(), expected);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = DashboardConfig::load(Some(Path::new("/nonexistent/studydash.toml"))).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }
}
