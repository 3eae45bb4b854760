use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Terminal front-end settings. Stage durations are fixed and not part of
/// the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KayaConfig {
    pub high_contrast: bool,
    /// Event poll interval of the UI loop
    pub tick_rate_ms: u64,
    /// How long a notice stays on screen
    pub notice_ttl_ms: u64,
}

impl Default for KayaConfig {
    fn default() -> Self {
        Self {
            high_contrast: false,
            tick_rate_ms: 100,
            notice_ttl_ms: 4000,
        }
    }
}

impl KayaConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let config: KayaConfig = serde_yaml::from_reader(reader)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Never zero, so the UI loop cannot spin
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }

    /// `--config` path if given, else the per-user file when it exists,
    /// else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => Self::load(path),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// `<config_dir>/kaya/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("kaya").join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "high_contrast: true").unwrap();

        let config = KayaConfig::load(file.path()).unwrap();
        assert!(config.high_contrast);
        assert_eq!(config.tick_rate_ms, 100);
        assert_eq!(config.notice_ttl_ms, 4000);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "tick_rate_ms: [not, a, number]").unwrap();

        assert!(matches!(
            KayaConfig::load(file.path()),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_zero_tick_rate_is_clamped() {
        let config = KayaConfig {
            tick_rate_ms: 0,
            ..KayaConfig::default()
        };
        assert_eq!(config.tick_rate(), Duration::from_millis(1));
        assert_eq!(config.notice_ttl(), Duration::from_secs(4));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = KayaConfig::resolve(Some(Path::new("/nonexistent/kaya.yaml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
