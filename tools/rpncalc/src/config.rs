//! Calculator configuration
//!
//! Loaded with figment, priority (highest to lowest):
//! 1. Environment variables prefixed `RPNCALC_`
//! 2. Explicit `--config` file (toml, yaml/yml or json by extension)
//! 3. `rpncalc.toml` / `rpncalc.yaml` in the working directory
//! 4. Default values

use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const ENV_PREFIX: &str = "RPNCALC_";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcConfig {
    /// REPL prompt
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Fixed number of decimals for display (None = shortest form)
    #[serde(default)]
    pub precision: Option<usize>,

    /// Stack levels rendered after each line
    #[serde(default = "default_stack_rows")]
    pub stack_rows: usize,

    /// REPL history file
    #[serde(default)]
    pub history_file: Option<PathBuf>,

    /// Log level when --verbose is not given
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Colored output
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_prompt() -> String {
    "rpn> ".to_string()
}

fn default_stack_rows() -> usize {
    4
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            precision: None,
            stack_rows: default_stack_rows(),
            history_file: None,
            log_level: default_log_level(),
            color: true,
        }
    }
}

impl CalcConfig {
    /// Load configuration from all sources
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(CalcConfig::default()))
            .merge(Toml::file("rpncalc.toml"))
            .merge(Yaml::file("rpncalc.yaml"));

        let figment = match explicit {
            Some(path) => merge_file(figment, path)?,
            None => figment,
        };

        Self::extract(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config: CalcConfig = figment
            .extract()
            .context("Failed to load configuration")?;
        config.validate()?;
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Reject values the calculator cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.stack_rows == 0 {
            bail!("stack_rows must be at least 1");
        }
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            bail!(
                "Invalid log_level '{}', expected one of: {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            );
        }
        if let Some(precision) = self.precision {
            if precision > 17 {
                bail!("precision must be between 0 and 17, got {}", precision);
            }
        }
        Ok(())
    }
}

/// Merge a config file, choosing the provider by extension
fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    if !path.exists() {
        bail!("Config file not found: {}", path.display());
    }
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .context("Config file must have an extension")?;

    let figment = match extension {
        "toml" => figment.merge(Toml::file(path)),
        "yaml" | "yml" => figment.merge(Yaml::file(path)),
        "json" => figment.merge(Json::file(path)),
        _ => bail!("Unsupported config file format: {}", extension),
    };
    Ok(figment)
}
