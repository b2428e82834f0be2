//! Service configuration
//!
//! Defaults, overlaid by an optional JSON file, overlaid by flags and
//! `OFICIOS_*` environment variables.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::ServiceArgs;
use crate::search::FuzzyConfig;
use crate::suggest::LlmSettings;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub bind: String,
    /// Professional records file; the built-in seed set when unset
    pub professionals: Option<PathBuf>,
    pub failed_searches: PathBuf,
    pub threshold: f64,
    pub llm: Option<LlmConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmConfig {
    pub endpoint: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_model() -> String {
    DEFAULT_LLM_MODEL.to_string()
}

fn default_llm_timeout() -> u64 {
    DEFAULT_LLM_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            professionals: None,
            failed_searches: default_failed_searches_path(),
            threshold: FuzzyConfig::default().threshold,
            llm: None,
        }
    }
}

fn default_failed_searches_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("oficios")
        .join("failed_searches.jsonl")
}

/// Get the path to the default configuration file
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Cannot determine config directory")?;
    Ok(config_dir.join("oficios").join("config.json"))
}

impl Config {
    /// Load from an explicit path (which must exist) or the default location (which may not)
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match config_path() {
                Ok(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };

        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Flags and environment variables win over the file
    pub fn apply(&mut self, args: &ServiceArgs) {
        if let Some(bind) = &args.bind {
            self.bind = bind.clone();
        }
        if let Some(path) = &args.professionals {
            self.professionals = Some(path.clone());
        }
        if let Some(path) = &args.failed_searches {
            self.failed_searches = path.clone();
        }
        if let Some(threshold) = args.threshold {
            self.threshold = threshold;
        }

        if let Some(endpoint) = &args.llm_endpoint {
            let llm = self.llm.get_or_insert_with(|| LlmConfig {
                endpoint: endpoint.clone(),
                model: default_llm_model(),
                api_key: None,
                timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
            });
            llm.endpoint = endpoint.clone();
        }
        if let Some(llm) = self.llm.as_mut() {
            if let Some(model) = &args.llm_model {
                llm.model = model.clone();
            }
            if args.llm_api_key.is_some() {
                llm.api_key = args.llm_api_key.clone();
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            bail!("Invalid threshold {}: must be in [0, 1]", self.threshold);
        }
        if let Some(llm) = &self.llm {
            let url = url::Url::parse(&llm.endpoint)
                .with_context(|| format!("Invalid LLM endpoint {:?}", llm.endpoint))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                bail!("Invalid LLM endpoint {:?}: expected http or https", llm.endpoint);
            }
            if llm.timeout_secs == 0 {
                bail!("Invalid LLM timeout: must be at least one second");
            }
        }
        Ok(())
    }

    pub fn fuzzy(&self) -> FuzzyConfig {
        FuzzyConfig {
            threshold: self.threshold,
            ..FuzzyConfig::default()
        }
    }

    pub fn llm_settings(&self) -> Option<LlmSettings> {
        self.llm.as_ref().map(|llm| LlmSettings {
            endpoint: llm.endpoint.clone(),
            model: llm.model.clone(),
            api_key: llm.api_key.clone(),
            timeout: Duration::from_secs(llm.timeout_secs),
        })
    }
}
