//! Application configuration management.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Settlement planner configuration.
    pub settlement: SettlementConfig,
    /// Expense-splitting session configuration.
    pub session: SessionConfig,
    /// Name-suggestion cache configuration.
    pub names: NamesConfig,
}

/// Settlement planner configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    /// Balances and transfers at or below this magnitude are treated as settled.
    pub tolerance: Decimal,
    /// Decimal places kept on emitted transfer amounts.
    pub decimal_places: u32,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            tolerance: Decimal::new(5, 1), // 0.5
            decimal_places: 0,
        }
    }
}

/// Expense-splitting session configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum participant name length, in characters.
    pub max_name_len: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { max_name_len: 15 }
    }
}

/// Name-suggestion cache configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NamesConfig {
    /// JSON file holding previously used participant names.
    pub cache_path: PathBuf,
    /// Maximum suggestions returned for a prefix.
    pub max_suggestions: usize,
}

impl Default for NamesConfig {
    fn default() -> Self {
        Self {
            cache_path: PathBuf::from(".yoanoto/names.json"),
            max_suggestions: 4,
        }
    }
}

/// Largest supported number of decimals on transfer amounts.
const MAX_DECIMAL_PLACES: u32 = 4;

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones: `config/default`,
    /// `config/{RUN_MODE}`, then `YOANOTO__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is out of range.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("YOANOTO").separator("__"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` describing the first invalid value.
    pub fn validate(&self) -> AppResult<()> {
        if self.settlement.tolerance.is_sign_negative() {
            return Err(AppError::Config(format!(
                "settlement.tolerance must not be negative, got {}",
                self.settlement.tolerance
            )));
        }
        if self.settlement.decimal_places > MAX_DECIMAL_PLACES {
            return Err(AppError::Config(format!(
                "settlement.decimal_places must be at most {MAX_DECIMAL_PLACES}, got {}",
                self.settlement.decimal_places
            )));
        }
        if self.session.max_name_len == 0 {
            return Err(AppError::Config(
                "session.max_name_len must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const NO_RUN_MODE: (&str, Option<&str>) = ("RUN_MODE", Some("yoanoto-config-test"));

    #[test]
    fn test_defaults_when_nothing_is_configured() {
        temp_env::with_vars(
            [
                NO_RUN_MODE,
                ("YOANOTO__SETTLEMENT__TOLERANCE", None),
                ("YOANOTO__SETTLEMENT__DECIMAL_PLACES", None),
                ("YOANOTO__SESSION__MAX_NAME_LEN", None),
                ("YOANOTO__NAMES__CACHE_PATH", None),
                ("YOANOTO__NAMES__MAX_SUGGESTIONS", None),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.settlement.tolerance, dec!(0.5));
                assert_eq!(config.settlement.decimal_places, 0);
                assert_eq!(config.session.max_name_len, 15);
                assert_eq!(config.names.max_suggestions, 4);
                assert_eq!(config.names.cache_path, PathBuf::from(".yoanoto/names.json"));
            },
        );
    }

    #[test]
    fn test_environment_overrides() {
        temp_env::with_vars(
            [
                NO_RUN_MODE,
                ("YOANOTO__SETTLEMENT__TOLERANCE", Some("0.01")),
                ("YOANOTO__SETTLEMENT__DECIMAL_PLACES", Some("2")),
                ("YOANOTO__SESSION__MAX_NAME_LEN", Some("20")),
                ("YOANOTO__NAMES__CACHE_PATH", Some("/tmp/names.json")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.settlement.tolerance, dec!(0.01));
                assert_eq!(config.settlement.decimal_places, 2);
                assert_eq!(config.session.max_name_len, 20);
                assert_eq!(config.names.cache_path, PathBuf::from("/tmp/names.json"));
            },
        );
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        temp_env::with_vars(
            [
                NO_RUN_MODE,
                ("YOANOTO__SETTLEMENT__DECIMAL_PLACES", Some("9")),
            ],
            || {
                let err = AppConfig::load().unwrap_err();
                assert!(matches!(err, AppError::Config(_)));
            },
        );
    }

    #[test]
    fn test_validate_negative_tolerance() {
        let mut config = AppConfig::default();
        config.settlement.tolerance = dec!(-1);
        assert!(config.validate().is_err());

        config.settlement.tolerance = Decimal::ZERO;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_name_length() {
        let mut config = AppConfig::default();
        config.session.max_name_len = 0;
        assert!(config.validate().is_err());
    }
}
