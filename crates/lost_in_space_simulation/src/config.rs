//! Конфигурация игры (game.toml)
//!
//! Все секции опциональны, отсутствующие поля берутся из Default.
//! `levels` заменяет встроенные уровни целиком, если задан.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::flight::{Rocket, SoundClips};
use crate::level::{default_levels, LevelCatalog, LevelLayout};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rocket: Rocket,
    pub sound: SoundClips,
    pub levels: Vec<LevelLayout>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rocket: Rocket::default(),
            sound: SoundClips::default(),
            levels: default_levels(),
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    pub fn level_catalog(&self) -> LevelCatalog {
        LevelCatalog::new(self.levels.clone(), self.rocket)
    }
}

pub fn try_load_config(path: &Path) -> Result<GameConfig, ConfigError> {
    let display = path.to_string_lossy().to_string();

    let toml_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: display.clone(),
        source,
    })?;

    GameConfig::from_toml_str(&toml_str).map_err(|source| ConfigError::Parse {
        path: display,
        source,
    })
}

/// Загрузить конфиг, при ошибке — лог + GameConfig::default()
pub fn load_config(path: &Path) -> GameConfig {
    match try_load_config(path) {
        Ok(config) => {
            crate::logger::log_info(&format!(
                "Read configuration from {}",
                path.to_string_lossy()
            ));
            config
        }
        Err(error) => {
            crate::logger::log_warning(&format!("{}, using defaults", error));
            GameConfig::default()
        }
    }
}
