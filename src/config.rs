use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::keyboard::ime::ImeMode;
use crate::session::game::GameSettings;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_course")]
    pub default_course: String,
    #[serde(default)]
    pub ime: ImeMode,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_bonus_flash_ms")]
    pub bonus_flash_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_theme() -> String {
    "sushi-bar".to_string()
}
fn default_course() -> String {
    "NORMAL".to_string()
}
fn default_tick_rate_ms() -> u64 {
    50
}
fn default_bonus_flash_ms() -> u64 {
    1000
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            default_course: default_course(),
            ime: ImeMode::default(),
            tick_rate_ms: default_tick_rate_ms(),
            bonus_flash_ms: default_bonus_flash_ms(),
            seed: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sushida")
            .join("config.toml")
    }

    pub fn default_log_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sushida")
            .join("sushida.log")
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn game_settings(&self) -> GameSettings {
        GameSettings {
            bonus_flash: Duration::from_millis(self.bonus_flash_ms),
            seed: self.seed,
        }
    }

    /// Clamp values a hand-edited file may have broken.
    pub fn normalize(&mut self) {
        if self.tick_rate_ms == 0 {
            self.tick_rate_ms = default_tick_rate_ms();
        }
        if self.default_course.trim().is_empty() {
            self.default_course = default_course();
        }
        if self.theme.trim().is_empty() {
            self.theme = default_theme();
        }
    }
}
