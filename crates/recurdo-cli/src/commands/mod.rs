use anyhow::{anyhow, Result};
use chrono::Local;
use recurdo_core::recurrence::{cutoff_from, RecurrenceEngine};
use recurdo_core::repository::{RestConfig, RestRepository};

use crate::config::Config;

pub mod check;
pub mod run;

/// Builds the engine against the configured service, with the cutoff counted
/// from today's local date.
pub fn build_engine(config: &Config) -> Result<RecurrenceEngine<RestRepository>> {
    let api_key = config
        .api_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            anyhow!("No API key configured. Pass --api-key or set API_KEY / RECURDO_API_KEY.")
        })?;

    let cutoff = cutoff_from(Local::now().date_naive(), config.cutoff_period)?;
    let repo = RestRepository::new(RestConfig::new(api_key).with_base_url(&config.base_url));
    Ok(RecurrenceEngine::new(repo, cutoff))
}
