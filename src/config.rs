use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::dictionary::{MIN_WORD_LEN, WordSource};
use crate::session::round::Mode;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_target_word_len")]
    pub target_word_len: usize,
    #[serde(default = "default_max_tier")]
    pub max_tier: u8,
    #[serde(default = "default_column_capacity")]
    pub column_capacity: usize,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_difficulty_ceiling")]
    pub difficulty_ceiling: u8,
    #[serde(default)]
    pub dictionary_path: Option<String>,
}

fn default_target_word_len() -> usize {
    6
}
fn default_max_tier() -> u8 {
    5
}
fn default_column_capacity() -> usize {
    8
}
fn default_mode() -> String {
    "classic".to_string()
}
fn default_difficulty_ceiling() -> u8 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_word_len: default_target_word_len(),
            max_tier: default_max_tier(),
            column_capacity: default_column_capacity(),
            mode: default_mode(),
            difficulty_ceiling: default_difficulty_ceiling(),
            dictionary_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordmix")
            .join("config.toml")
    }

    /// Repair invalid values after deserialization: hand-edited files and
    /// stale keys from old versions must not poison the engine.
    pub fn normalize(&mut self) {
        if self.target_word_len <= MIN_WORD_LEN {
            self.target_word_len = default_target_word_len();
        }
        if self.column_capacity == 0 {
            self.column_capacity = default_column_capacity();
        }
        if Mode::from_key(&self.mode).is_none() {
            self.mode = default_mode();
        }
        if self.difficulty_ceiling > self.max_tier {
            self.difficulty_ceiling = self.max_tier;
        }
    }

    pub fn mode(&self) -> Mode {
        Mode::from_key(&self.mode).unwrap_or(Mode::Classic)
    }

    /// The dictionary source this config points at: a file path when set,
    /// the built-in word list otherwise.
    pub fn word_source(&self) -> WordSource {
        match &self.dictionary_path {
            Some(path) => WordSource::File(PathBuf::from(path)),
            None => WordSource::Builtin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.target_word_len, 6);
        assert_eq!(config.max_tier, 5);
        assert_eq!(config.column_capacity, 8);
        assert_eq!(config.mode, "classic");
        assert_eq!(config.difficulty_ceiling, 5);
        assert!(config.dictionary_path.is_none());
    }

    #[test]
    fn test_config_serde_partial_fields() {
        let toml_str = r#"
mode = "arcade"
difficulty_ceiling = 2
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.mode, "arcade");
        assert_eq!(config.difficulty_ceiling, 2);
        assert_eq!(config.target_word_len, 6);
        assert_eq!(config.column_capacity, 8);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.dictionary_path = Some("/tmp/words.txt".to_string());
        config.mode = "speed-target".to_string();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.dictionary_path, config.dictionary_path);
        assert_eq!(deserialized.mode, config.mode);
        assert_eq!(deserialized.target_word_len, config.target_word_len);
    }

    #[test]
    fn test_normalize_resets_invalid_mode() {
        let mut config = Config::default();
        config.mode = "turbo".to_string();
        config.normalize();
        assert_eq!(config.mode, "classic");
    }

    #[test]
    fn test_normalize_repairs_degenerate_values() {
        let mut config = Config::default();
        config.target_word_len = 2;
        config.column_capacity = 0;
        config.normalize();
        assert_eq!(config.target_word_len, 6);
        assert_eq!(config.column_capacity, 8);
    }

    #[test]
    fn test_normalize_clamps_ceiling_to_max_tier() {
        let mut config = Config::default();
        config.max_tier = 3;
        config.difficulty_ceiling = 5;
        config.normalize();
        assert_eq!(config.difficulty_ceiling, 3);
    }

    #[test]
    fn test_mode_accessor_falls_back_to_classic() {
        let mut config = Config::default();
        config.mode = "speed-target".to_string();
        assert_eq!(config.mode(), Mode::SpeedTarget);
        config.mode = "junk".to_string();
        assert_eq!(config.mode(), Mode::Classic);
    }
}
