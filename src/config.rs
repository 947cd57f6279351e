use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::round::SessionSettings;

const CONFIG_FILE: &str = "quizcade.toml";
const LEDGER_FILE: &str = "quizcade-progress.jsonl";
const LOG_FILE: &str = "quizcade.log";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub player: Player,
    pub quiz: QuizConfig,
    pub timed: TimedConfig,
    pub progress: ProgressConfig,
    pub log: LogConfig,
}

/// Identity sent with progress reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Player {
    pub parent_id: String,
    pub child_id: String,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            parent_id: "local".into(),
            child_id: "player-1".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub total_rounds: u32,
    pub option_count: usize,
    pub feedback_delay_ms: u64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            total_rounds: 10,
            option_count: 4,
            feedback_delay_ms: 1500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimedConfig {
    pub countdown_secs: u64,
}

impl Default for TimedConfig {
    fn default() -> Self {
        Self { countdown_secs: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    pub enabled: bool,
    pub ledger_path: Option<PathBuf>,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self { enabled: true, ledger_path: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub path: Option<PathBuf>,
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { path: None, level: "info".into() }
    }
}

impl Config {
    /// Load from `path`, or from `quizcade.toml` next to the executable when
    /// no path is given. A missing default file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_toml_str(&fs::read_to_string(path)?)?,
            None => {
                let default = beside_exe(CONFIG_FILE);
                if default.is_file() {
                    Self::from_toml_str(&fs::read_to_string(default)?)?
                } else {
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.quiz.total_rounds == 0 {
            return Err(Error::InvalidConfig("quiz.total_rounds must be at least 1".into()));
        }
        if self.quiz.option_count < 2 {
            return Err(Error::InvalidConfig("quiz.option_count must be at least 2".into()));
        }
        if self.timed.countdown_secs == 0 {
            return Err(Error::InvalidConfig("timed.countdown_secs must be at least 1".into()));
        }
        Ok(())
    }

    pub fn session_settings(&self, timed: bool) -> SessionSettings {
        SessionSettings {
            total_rounds: self.quiz.total_rounds,
            option_count: self.quiz.option_count,
            feedback_delay: Duration::from_millis(self.quiz.feedback_delay_ms),
            countdown: timed.then(|| Duration::from_secs(self.timed.countdown_secs)),
        }
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.progress.ledger_path.clone().unwrap_or_else(|| beside_exe(LEDGER_FILE))
    }

    pub fn log_path(&self) -> PathBuf {
        self.log.path.clone().unwrap_or_else(|| beside_exe(LOG_FILE))
    }
}

// Data files live next to the executable.
fn beside_exe(name: &str) -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            return dir.join(name);
        }
    }
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.quiz.total_rounds, 10);
        assert_eq!(config.quiz.option_count, 4);
        assert!(config.progress.enabled);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [player]
            child_id = "mia"

            [quiz]
            total_rounds = 5

            [timed]
            countdown_secs = 15
            "#,
        )
        .unwrap();
        assert_eq!(config.player.child_id, "mia");
        assert_eq!(config.player.parent_id, "local");
        assert_eq!(config.quiz.total_rounds, 5);
        assert_eq!(config.quiz.feedback_delay_ms, 1500);

        let timed = config.session_settings(true);
        assert_eq!(timed.countdown, Some(Duration::from_secs(15)));
        assert_eq!(config.session_settings(false).countdown, None);
    }

    #[test]
    fn validation_rejects_degenerate_settings() {
        let mut config = Config::default();
        config.quiz.option_count = 1;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let mut config = Config::default();
        config.quiz.total_rounds = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.timed.countdown_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        assert!(matches!(Config::from_toml_str("quiz = 3"), Err(Error::Config(_))));
    }

    #[test]
    fn load_reads_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[quiz]\noption_count = 3\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.quiz.option_count, 3);

        assert!(matches!(Config::load(Some(&dir.path().join("missing.toml"))), Err(Error::Io(_))));
    }
}
