//! Storefront configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use glow_commerce::cart::{DEFAULT_CART_KEY, DEFAULT_VAT_RATE};
use glow_commerce::checkout::SimulatedGateway;
use glow_commerce::money::CURRENCY_SYMBOL;
use glow_observability::{LogFormat, LogLevel};
use serde::{Deserialize, Serialize};

/// Storefront configuration file.
///
/// Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Shop name used in confirmations.
    pub store_name: String,

    /// Key the cart is persisted under.
    pub storage_key: String,

    /// Symbol prefixed to displayed prices.
    pub currency_symbol: String,

    /// How long a notification stays before fading.
    pub notification_ttl_ms: u64,

    /// Fade-out duration before a notification is removed.
    pub notification_fade_ms: u64,

    /// How long an add-to-cart button shows its "Added!" state.
    pub add_feedback_ms: u64,

    /// Simulated payment settlement delay.
    pub settlement_delay_ms: u64,

    /// VAT rate applied to price quotes.
    pub vat_rate: f64,

    /// Log output format.
    pub log_format: LogFormat,

    /// Log level when `RUST_LOG` is unset.
    pub log_level: LogLevel,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            store_name: "GlowLab".to_string(),
            storage_key: DEFAULT_CART_KEY.to_string(),
            currency_symbol: CURRENCY_SYMBOL.to_string(),
            notification_ttl_ms: 3000,
            notification_fade_ms: 300,
            add_feedback_ms: 1500,
            settlement_delay_ms: 2000,
            vat_rate: DEFAULT_VAT_RATE,
            log_format: LogFormat::Json,
            log_level: LogLevel::Info,
        }
    }
}

impl StorefrontConfig {
    /// Load config from a TOML or JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the page.
    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            anyhow::bail!("storage_key must not be empty");
        }
        if !(0.0..1.0).contains(&self.vat_rate) {
            anyhow::bail!("vat_rate must be in [0, 1), got {}", self.vat_rate);
        }
        Ok(())
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    pub fn notification_fade(&self) -> Duration {
        Duration::from_millis(self.notification_fade_ms)
    }

    pub fn add_feedback(&self) -> Duration {
        Duration::from_millis(self.add_feedback_ms)
    }

    /// Gateway that settles after the configured delay.
    pub fn simulated_gateway(&self) -> SimulatedGateway {
        SimulatedGateway::new(Duration::from_millis(self.settlement_delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.storage_key, "glowlab-cart");
        assert_eq!(config.currency_symbol, "R");
        assert_eq!(config.add_feedback(), Duration::from_millis(1500));
        assert_eq!(
            config.simulated_gateway().delay(),
            Duration::from_millis(2000)
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(
            &path,
            "store_name = \"GlowLab Cape Town\"\nsettlement_delay_ms = 10\nlog_format = \"human\"\n",
        )
        .unwrap();

        let config = StorefrontConfig::load(&path).unwrap();
        assert_eq!(config.store_name, "GlowLab Cape Town");
        assert_eq!(config.settlement_delay_ms, 10);
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.notification_ttl_ms, 3000);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.json");
        std::fs::write(&path, r#"{"storage_key": "test-cart", "vat_rate": 0.0}"#).unwrap();

        let config = StorefrontConfig::load(&path).unwrap();
        assert_eq!(config.storage_key, "test-cart");
        assert_eq!(config.vat_rate, 0.0);
    }

    #[test]
    fn test_load_rejects_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "vat_rate = 15.0\n").unwrap();

        let err = StorefrontConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("vat_rate"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = StorefrontConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
