use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use recurdo_core::period::Period;
use recurdo_core::repository::rest::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::cli::Cli;

const CONFIG_FILE: &str = "recurdo.toml";

/// Credential variables, lowest precedence first.
const API_KEY_VARS: [&str; 2] = ["RECURDO_API_KEY", "API_KEY"];

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// How far past today a labeled task's due date must be to be left alone
    #[serde_as(as = "DisplayFromStr")]
    pub cutoff_period: Period,
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            cutoff_period: Period::months(4),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Values given on the command line; absent flags leave lower layers alone.
#[derive(Serialize, Default)]
struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cutoff_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
}

impl Config {
    /// Defaults, then the TOML file, then `RECURDO_*` and `API_KEY`
    /// environment variables, then command-line flags.
    pub fn load(cli: &Cli) -> Result<Self, figment::Error> {
        let file = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        Self::figment(file)
            .merge(Serialized::defaults(Overrides {
                api_key: cli.api_key.clone(),
                cutoff_period: cli.cutoff_period.clone(),
                base_url: cli.base_url.clone(),
            }))
            .extract()
    }

    fn figment(file: PathBuf) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed("RECURDO_").ignore(&["api_key"]));

        // Keys are opaque strings; figment's env parsing would turn "0123" into 123.
        for var in API_KEY_VARS {
            if let Ok(key) = std::env::var(var) {
                figment = figment.merge(Serialized::default("api_key", key));
            }
        }
        figment
    }
}
