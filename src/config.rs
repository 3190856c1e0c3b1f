use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::deck::{self, DeckError};

const SETTINGS_FILE_NAME: &str = "settings.json";
pub const DEFAULT_DIMENSION: u32 = 4;

/// User-tunable settings. Today that is just the board side length, which
/// must be even and small enough to pair up from the symbol pool.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub dimension: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            dimension: DEFAULT_DIMENSION,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidDimension(#[from] DeckError),
}

fn settings_path() -> PathBuf {
    glib::user_config_dir().join("pairs").join(SETTINGS_FILE_NAME)
}

impl Settings {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(raw)?;
        deck::validate_dimension(settings.dimension)?;
        Ok(settings)
    }

    /// Loads settings from the user config directory. A missing file means
    /// defaults; a present but malformed or unpairable one is an error the
    /// caller surfaces before any board is dealt.
    pub fn load() -> Result<Self, ConfigError> {
        match fs::read_to_string(settings_path()) {
            Ok(raw) => Self::parse(&raw),
            Err(_) => Ok(Settings::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dimension_is_pairable() {
        let settings = Settings::default();
        assert_eq!(settings.dimension, 4);
        assert!(deck::validate_dimension(settings.dimension).is_ok());
    }

    #[test]
    fn parses_an_explicit_dimension() {
        let settings = Settings::parse("{\"dimension\": 2}").unwrap();
        assert_eq!(settings.dimension, 2);
    }

    #[test]
    fn missing_key_falls_back_to_default() {
        let settings = Settings::parse("{}").unwrap();
        assert_eq!(settings.dimension, DEFAULT_DIMENSION);
    }

    #[test]
    fn rejects_dimension_zero() {
        let err = Settings::parse("{\"dimension\": 0}").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidDimension(DeckError::TooSmall(0))
        ));
    }

    #[test]
    fn rejects_odd_dimension() {
        let err = Settings::parse("{\"dimension\": 5}").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidDimension(DeckError::OddDimension(5))
        ));
    }

    #[test]
    fn rejects_dimension_beyond_the_symbol_pool() {
        let err = Settings::parse("{\"dimension\": 8}").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidDimension(DeckError::PoolExhausted { .. })
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            Settings::parse("{dimension: four}").unwrap_err(),
            ConfigError::Malformed(_)
        ));
    }
}
