use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::error::ConfigError;

/// Returns the default marker selector.
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_selector() -> String {
    ".relative-time".to_string()
}

/// Returns the default timestamp attribute name.
pub fn default_timestamp_attribute() -> String {
    "data-timestamp".to_string()
}

/// Returns the default refresh period (60000ms).
pub fn default_interval_ms() -> u32 {
    60_000
}

pub fn default_log_level() -> String {
    "info".to_string()
}

/// Options for [`crate::RelativeTimeUpdater`].
///
/// Keys are camelCase on the JavaScript side (`intervalMs`,
/// `timestampAttribute`, `logLevel`, `selector`). Every field has a default,
/// so a caller may pass any subset; unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdaterConfig {
    #[serde(default = "default_selector")]
    pub selector: String,
    #[serde(default = "default_timestamp_attribute")]
    pub timestamp_attribute: String,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u32,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            selector: default_selector(),
            timestamp_attribute: default_timestamp_attribute(),
            interval_ms: default_interval_ms(),
            log_level: default_log_level(),
        }
    }
}

impl UpdaterConfig {
    /// Reads an options object handed over from JavaScript.
    ///
    /// `undefined` and `null` yield the defaults.
    pub fn from_js(options: JsValue) -> Result<Self, ConfigError> {
        if options.is_undefined() || options.is_null() {
            return Ok(Self::default());
        }
        let config: Self = serde_wasm_bindgen::from_value(options).map_err(|e| {
            ConfigError::Deserialize {
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms == 0 {
            return Err(ConfigError::InvalidConfiguration {
                message: "intervalMs must be greater than zero".to_string(),
            });
        }
        if self.selector.trim().is_empty() {
            return Err(ConfigError::InvalidConfiguration {
                message: "selector must not be empty".to_string(),
            });
        }
        if self.timestamp_attribute.trim().is_empty() {
            return Err(ConfigError::InvalidConfiguration {
                message: "timestampAttribute must not be empty".to_string(),
            });
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.interval_ms))
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        parse_level(&self.log_level)
    }
}

/// Parses a console verbosity name such as `"warn"` or `"debug"`.
pub fn parse_level(level: &str) -> Result<LevelFilter, ConfigError> {
    LevelFilter::from_str(level).map_err(|_| ConfigError::InvalidConfiguration {
        message: format!(
            "Invalid logLevel '{}'. Expected one of: off, error, warn, info, debug, trace",
            level
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = UpdaterConfig::default();
        assert_eq!(config.selector, ".relative-time");
        assert_eq!(config.timestamp_attribute, "data-timestamp");
        assert_eq!(config.interval_ms, 60_000);
        assert_eq!(config.interval(), Duration::from_secs(60));
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_options_fill_defaults() {
        let config: UpdaterConfig =
            serde_json::from_str(r#"{"intervalMs": 5000, "logLevel": "debug"}"#).unwrap();
        assert_eq!(config.interval_ms, 5_000);
        assert_eq!(config.selector, ".relative-time");
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn test_camel_case_keys() {
        let config: UpdaterConfig = serde_json::from_str(
            r#"{"selector": ".ago", "timestampAttribute": "data-created", "intervalMs": 1000}"#,
        )
        .unwrap();
        assert_eq!(config.selector, ".ago");
        assert_eq!(config.timestamp_attribute, "data-created");
        assert_eq!(config.interval_ms, 1_000);
    }

    #[test]
    fn test_unknown_or_snake_case_keys_rejected() {
        assert!(serde_json::from_str::<UpdaterConfig>(r#"{"intervalMS": 1000}"#).is_err());
        assert!(serde_json::from_str::<UpdaterConfig>(r#"{"interval_ms": 1000}"#).is_err());
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("warn").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("DEBUG").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::Off);
        let err = parse_level("chatty").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIGURATION");
        assert!(err.to_string().contains("'chatty'"));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = UpdaterConfig {
            interval_ms: 0,
            ..UpdaterConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIGURATION");
        assert!(err.to_string().contains("intervalMs"));
    }

    #[test]
    fn test_blank_selector_rejected() {
        let config = UpdaterConfig {
            selector: "  ".to_string(),
            ..UpdaterConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let config = UpdaterConfig {
            log_level: "loud".to_string(),
            ..UpdaterConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'loud'"));
    }
}
