use crate::app_dirs::AppDirs;
use crate::error::ConfigError;
use crate::round_timer::{TimerConfig, DEFAULT_INTERVAL_MS, DEFAULT_ROUND_MS};
use crate::session::SessionConfig;
use crate::word_supply::ExhaustionPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted game settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// `None` plays untimed rounds
    pub round_secs: Option<u64>,
    pub interval_ms: u64,
    pub exhaustion: ExhaustionPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            round_secs: Some(DEFAULT_ROUND_MS / 1000),
            interval_ms: DEFAULT_INTERVAL_MS,
            exhaustion: ExhaustionPolicy::Finish,
        }
    }
}

impl Config {
    pub fn session_config(&self) -> Result<SessionConfig, ConfigError> {
        // the runner polls input at this cadence even when no clock runs
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        let config = SessionConfig {
            timer: self.round_secs.map(|secs| TimerConfig {
                total_ms: secs.saturating_mul(1000),
                interval_ms: self.interval_ms,
            }),
            exhaustion: self.exhaustion,
        };
        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<&Config> for SessionConfig {
    type Error = ConfigError;

    fn try_from(cfg: &Config) -> Result<Self, Self::Error> {
        cfg.session_config()
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("guessword_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), %err, "no config file, using defaults");
                return Config::default();
            }
        };

        serde_json::from_slice::<Config>(&bytes).unwrap_or_else(|err| {
            tracing::warn!(path = %self.path.display(), %err, "ignoring unreadable config");
            Config::default()
        })
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            round_secs: None,
            interval_ms: 250,
            exhaustion: ExhaustionPolicy::Reshuffle,
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn missing_or_corrupt_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        assert_eq!(store.load(), Config::default());

        fs::write(&path, b"{ this is not json").unwrap();
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "exhaustion": "reshuffle" }"#).unwrap();

        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.exhaustion, ExhaustionPolicy::Reshuffle);
        assert_eq!(cfg.round_secs, Some(60));
        assert_eq!(cfg.interval_ms, 1000);
    }

    #[test]
    fn default_config_maps_to_one_minute_round() {
        let session = Config::default().session_config().unwrap();
        assert_eq!(
            session.timer,
            Some(TimerConfig {
                total_ms: 60_000,
                interval_ms: 1_000
            })
        );
        assert_eq!(session.exhaustion, ExhaustionPolicy::Finish);
    }

    #[test]
    fn untimed_config_has_no_timer() {
        let cfg = Config {
            round_secs: None,
            ..Config::default()
        };
        assert_eq!(SessionConfig::try_from(&cfg).unwrap().timer, None);
    }

    #[test]
    fn untimed_config_with_zero_interval_rejected() {
        let cfg = Config {
            round_secs: None,
            interval_ms: 0,
            ..Config::default()
        };
        assert_eq!(cfg.session_config(), Err(ConfigError::ZeroInterval));
        assert_eq!(SessionConfig::try_from(&cfg), Err(ConfigError::ZeroInterval));
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = Config {
            round_secs: Some(0),
            ..Config::default()
        };
        assert_eq!(cfg.session_config(), Err(ConfigError::ZeroDuration));

        let cfg = Config {
            round_secs: Some(1),
            interval_ms: 5_000,
            ..Config::default()
        };
        assert_eq!(
            cfg.session_config(),
            Err(ConfigError::IntervalExceedsDuration {
                interval_ms: 5_000,
                total_ms: 1_000
            })
        );
    }
}
