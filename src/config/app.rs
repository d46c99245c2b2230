//! Main application configuration
//!
//! This module defines the configuration structures for the team balancer,
//! including environment variable loading, TOML file loading and validation.

use crate::report::ExpectationParams;
use crate::skill::GradientBoostingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub model: ModelSettings,
    pub balance: BalanceSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Skill model training settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Number of boosting stages
    pub n_estimators: usize,
    /// Shrinkage applied per stage
    pub learning_rate: f64,
    /// Maximum depth of each regression tree
    pub max_depth: usize,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples in each leaf
    pub min_samples_leaf: usize,
    /// Seed for reproducible fitting
    pub seed: u64,
}

/// Team balancing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceSettings {
    /// Largest roster split by exhaustive search
    pub max_exhaustive_players: usize,
    /// Swap pass limit for the local search fallback
    pub max_swap_passes: usize,
    /// Weng-Lin beta used for the reported win expectation
    pub rating_beta: f64,
    /// Uncertainty assigned to every skill score in the win expectation
    pub rating_uncertainty: f64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "team-balancer".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        let defaults = GradientBoostingConfig::default();
        Self {
            n_estimators: defaults.n_estimators,
            learning_rate: defaults.learning_rate,
            max_depth: defaults.max_depth,
            min_samples_split: defaults.min_samples_split,
            min_samples_leaf: defaults.min_samples_leaf,
            seed: defaults.seed,
        }
    }
}

impl Default for BalanceSettings {
    fn default() -> Self {
        Self {
            max_exhaustive_players: 14,
            max_swap_passes: 100,
            rating_beta: 200.0,
            rating_uncertainty: 200.0,
        }
    }
}

impl From<&ModelSettings> for GradientBoostingConfig {
    fn from(settings: &ModelSettings) -> Self {
        Self {
            n_estimators: settings.n_estimators,
            learning_rate: settings.learning_rate,
            max_depth: settings.max_depth,
            min_samples_split: settings.min_samples_split,
            min_samples_leaf: settings.min_samples_leaf,
            seed: settings.seed,
        }
    }
}

/// Parse an environment variable into `target` if it is set
fn override_from_env<T: FromStr>(key: &str, target: &mut T) -> Result<()> {
    if let Ok(value) = env::var(key) {
        *target = value
            .parse()
            .map_err(|_| anyhow!("Invalid {} value: {}", key, value))?;
    }
    Ok(())
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        override_from_env("SERVICE_NAME", &mut self.service.name)?;
        override_from_env("LOG_LEVEL", &mut self.service.log_level)?;

        // Model settings
        override_from_env("MODEL_N_ESTIMATORS", &mut self.model.n_estimators)?;
        override_from_env("MODEL_LEARNING_RATE", &mut self.model.learning_rate)?;
        override_from_env("MODEL_MAX_DEPTH", &mut self.model.max_depth)?;
        override_from_env("MODEL_MIN_SAMPLES_SPLIT", &mut self.model.min_samples_split)?;
        override_from_env("MODEL_MIN_SAMPLES_LEAF", &mut self.model.min_samples_leaf)?;
        override_from_env("MODEL_SEED", &mut self.model.seed)?;

        // Balance settings
        override_from_env(
            "MAX_EXHAUSTIVE_PLAYERS",
            &mut self.balance.max_exhaustive_players,
        )?;
        override_from_env("MAX_SWAP_PASSES", &mut self.balance.max_swap_passes)?;
        override_from_env("RATING_BETA", &mut self.balance.rating_beta)?;
        override_from_env("RATING_UNCERTAINTY", &mut self.balance.rating_uncertainty)?;

        Ok(())
    }

    /// Boosting configuration for training
    pub fn boosting(&self) -> GradientBoostingConfig {
        GradientBoostingConfig::from(&self.model)
    }

    /// Parameters for the reported win expectation
    pub fn expectation(&self) -> ExpectationParams {
        ExpectationParams {
            beta: self.balance.rating_beta,
            uncertainty: self.balance.rating_uncertainty,
        }
    }
}

/// Largest roster the exact search may be configured for (C(20, 10) splits)
pub const MAX_EXHAUSTIVE_LIMIT: usize = 20;

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    // Validate model settings
    config.boosting().validate()?;

    // Validate balance settings
    if config.balance.max_exhaustive_players == 0
        || config.balance.max_exhaustive_players > MAX_EXHAUSTIVE_LIMIT
    {
        return Err(anyhow!(
            "Max exhaustive players must be between 1 and {}",
            MAX_EXHAUSTIVE_LIMIT
        ));
    }
    if !config.balance.rating_beta.is_finite() || config.balance.rating_beta <= 0.0 {
        return Err(anyhow!("Rating beta must be positive"));
    }
    if !config.balance.rating_uncertainty.is_finite() || config.balance.rating_uncertainty <= 0.0 {
        return Err(anyhow!("Rating uncertainty must be positive"));
    }

    Ok(())
}
