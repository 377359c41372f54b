use anyhow::{bail, Context, Result};
use report_renderer::OutputFormat;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    pub format: OutputFormat,       // text
    pub currency: String,           // $
    pub json_logging: bool,         // RUST_LOG_FORMAT=json
}

impl CliConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Self {
            format: lookup("QUANTAMENTAL_FORMAT")
                .unwrap_or_else(|| "text".to_string())
                .parse()
                .context("QUANTAMENTAL_FORMAT")?,
            currency: lookup("QUANTAMENTAL_CURRENCY").unwrap_or_else(|| "$".to_string()),
            json_logging: lookup("RUST_LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.currency.trim().is_empty() {
            bail!("QUANTAMENTAL_CURRENCY must not be blank");
        }
        if self.currency.chars().count() > 4 {
            bail!(
                "QUANTAMENTAL_CURRENCY must be a short symbol (at most 4 characters), got {:?}",
                self.currency
            );
        }
        Ok(())
    }
}
