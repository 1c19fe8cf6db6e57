use std::sync::Arc;

use anyhow::Context;

use crate::advice::{generator::HttpTextGenerator, services::AdviceProvider};
use crate::config::{AdviceMode, AppConfig};
use crate::plans::services::PlanGenerator;
use crate::profiles::repo::{InMemoryProfileStore, PgProfileStore, ProfileStore};
use crate::progress::repo::{InMemoryProgressStore, PgProgressStore, ProgressStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub profiles: Arc<dyn ProfileStore>,
    pub progress: Arc<dyn ProgressStore>,
    pub plans: PlanGenerator,
    pub advice: Arc<AdviceProvider>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let (profiles, progress) = match &config.database_url {
            Some(url) => {
                let db = sqlx::postgres::PgPoolOptions::new()
                    .max_connections(10)
                    .connect(url)
                    .await
                    .context("connect to database")?;

                if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
                    tracing::warn!(error = %e, "migration failed; continuing");
                }

                tracing::info!("using postgres stores");
                (
                    Arc::new(PgProfileStore::new(db.clone())) as Arc<dyn ProfileStore>,
                    Arc::new(PgProgressStore::new(db)) as Arc<dyn ProgressStore>,
                )
            }
            None => {
                tracing::info!("DATABASE_URL not set; using in-memory stores");
                (
                    Arc::new(InMemoryProfileStore::new()) as Arc<dyn ProfileStore>,
                    Arc::new(InMemoryProgressStore::new()) as Arc<dyn ProgressStore>,
                )
            }
        };

        let advice = match (config.advice_mode, &config.generator) {
            (AdviceMode::Generative, Some(gen)) => {
                tracing::info!(url = %gen.url, timeout_secs = gen.timeout_secs, "generative advice enabled");
                let client = HttpTextGenerator::new(gen).context("build generator client")?;
                AdviceProvider::generative(Arc::new(client), gen.max_length, gen.timeout())
            }
            _ => AdviceProvider::static_only(),
        };

        Ok(Self {
            plans: PlanGenerator::new(config.plan_strategy),
            config,
            profiles,
            progress,
            advice: Arc::new(advice),
        })
    }

    /// In-memory state with static advice and nearest-neighbor plans.
    #[cfg(test)]
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            database_url: None,
            plan_strategy: crate::plans::services::PlanStrategy::Nearest,
            advice_mode: AdviceMode::Static,
            generator: None,
        });

        Self {
            plans: PlanGenerator::new(config.plan_strategy),
            config,
            profiles: Arc::new(InMemoryProfileStore::new()),
            progress: Arc::new(InMemoryProgressStore::new()),
            advice: Arc::new(AdviceProvider::static_only()),
        }
    }

    #[cfg(test)]
    pub fn with_advice(mut self, advice: AdviceProvider) -> Self {
        self.advice = Arc::new(advice);
        self
    }
}
