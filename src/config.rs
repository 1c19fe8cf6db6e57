use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::plans::services::PlanStrategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceMode {
    Static,
    Generative,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    pub url: String,
    pub token: Option<String>,
    pub max_length: usize,
    pub timeout_secs: u64,
}

impl GeneratorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub plan_strategy: PlanStrategy,
    pub advice_mode: AdviceMode,
    pub generator: Option<GeneratorConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());

        let plan_strategy = match std::env::var("PLAN_STRATEGY") {
            Ok(v) => v
                .parse::<PlanStrategy>()
                .map_err(|e| anyhow::anyhow!(e))
                .context("PLAN_STRATEGY")?,
            Err(_) => PlanStrategy::Nearest,
        };

        let advice_mode = match std::env::var("ADVICE_MODE").as_deref() {
            Ok("generative") => AdviceMode::Generative,
            Ok("static") | Err(_) => AdviceMode::Static,
            Ok(other) => anyhow::bail!("ADVICE_MODE must be static or generative, got {other}"),
        };

        let generator = match advice_mode {
            AdviceMode::Static => None,
            AdviceMode::Generative => Some(GeneratorConfig {
                url: std::env::var("GENERATOR_URL")
                    .context("GENERATOR_URL is required when ADVICE_MODE=generative")?,
                token: std::env::var("GENERATOR_TOKEN").ok().filter(|v| !v.is_empty()),
                max_length: std::env::var("GENERATOR_MAX_LENGTH")
                    .ok()
                    .and_then(|v| v.parse::<usize>().ok())
                    .unwrap_or(40),
                timeout_secs: std::env::var("GENERATOR_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(10),
            }),
        };

        Ok(Self {
            database_url,
            plan_strategy,
            advice_mode,
            generator,
        })
    }
}
