//! # CLI Settings
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--output`, applied by the caller)
//! 2. Environment variables (`BILLSPLIT_*`)
//! 3. Config file (`--config FILE`, or `billsplit.toml` if present)
//! 4. Defaults (this file)
//!
//! ## Configuration File Format
//! ```toml
//! # billsplit.toml
//! log_level = "debug"
//! output = "text"          # json | text
//! pretty = true            # JSON output only
//! discount_basis = "after_tax"   # after_tax | subtotal
//! currency_symbol = "€"    # text output only
//! ```

use std::path::Path;

use billsplit_core::DiscountBasis;
use clap::ValueEnum;
use config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "billsplit";

/// Prefix for environment overrides, e.g. `BILLSPLIT_OUTPUT=text`.
pub const ENV_PREFIX: &str = "BILLSPLIT";

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The response document, as JSON
    #[default]
    Json,
    /// A human-readable bill summary
    Text,
}

/// Runtime settings for the `billsplit` binary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default log filter, used when `RUST_LOG` is not set.
    pub log_level: String,

    pub output: OutputFormat,

    /// Pretty-print JSON output.
    pub pretty: bool,

    /// Which amount the discount percentage applies to.
    pub discount_basis: DiscountBasis,

    /// Currency symbol for text output.
    pub currency_symbol: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            log_level: "info".to_string(),
            output: OutputFormat::Json,
            pretty: true,
            discount_basis: DiscountBasis::AfterTax,
            currency_symbol: "$".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from the config file and the environment.
    ///
    /// An explicit `path` must exist. Without one, `billsplit.toml` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        Self::from_sources(file, Environment::with_prefix(ENV_PREFIX))
    }

    /// Layers `env` over `file` over the defaults.
    fn from_sources<S>(file: S, env: Environment) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}
