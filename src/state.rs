use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::auth::repo::{PgUserRepo, UserRepo};
use crate::chat::relay::ChatRelay;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepo>,
    pub chat: Arc<ChatRelay>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let config = Arc::new(config);

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
            tracing::warn!(error = %e, "migration failed; continuing");
        }

        let chat = Arc::new(ChatRelay::from_config(&config.gemini)?);
        let users = Arc::new(PgUserRepo::new(db)) as Arc<dyn UserRepo>;

        Ok(Self::from_parts(config, users, chat))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserRepo>,
        chat: Arc<ChatRelay>,
    ) -> Self {
        Self {
            config,
            users,
            chat,
        }
    }

    /// Swaps the chat relay, keeping everything else.
    #[cfg(test)]
    pub fn with_chat(mut self, chat: ChatRelay) -> Self {
        self.chat = Arc::new(chat);
        self
    }

    /// In-memory users and an offline chat relay; no database or network.
    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::auth::repo::memory::MemoryUserRepo;

        Self::from_parts(
            Arc::new(crate::config::test_config()),
            Arc::new(MemoryUserRepo::default()),
            Arc::new(ChatRelay::new(None)),
        )
    }
}
