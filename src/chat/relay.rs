use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    chat::{
        errors::ChatError,
        gemini::{GeminiClient, TextGenerator, UpstreamError},
        triggers::{match_trigger, TRIGGERS},
    },
    config::GeminiConfig,
};

pub const OFFLINE_REPLY: &str =
    "Sorry, my AI brain is currently offline as the API key is missing.";
pub const FALLBACK_REPLY: &str =
    "Sorry, I am having trouble connecting to my brain right now. Please try again later.";

/// Answers chat messages: canned triggers first, then the generator, never
/// an upstream error.
pub struct ChatRelay {
    triggers: &'static [(&'static str, &'static str)],
    generator: Option<Arc<dyn TextGenerator>>,
}

impl ChatRelay {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            triggers: TRIGGERS,
            generator,
        }
    }

    pub fn from_config(cfg: &GeminiConfig) -> anyhow::Result<Self> {
        let generator = match &cfg.api_key {
            Some(key) => {
                info!(model = %cfg.model, "chat relay using gemini");
                Some(Arc::new(GeminiClient::new(cfg, key.clone())?) as Arc<dyn TextGenerator>)
            }
            None => {
                warn!("GOOGLE_API_KEY not set; chat relay runs offline");
                None
            }
        };
        Ok(Self::new(generator))
    }

    #[cfg(test)]
    pub fn is_online(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn respond(&self, message: Option<&str>) -> Result<String, ChatError> {
        let message = match message {
            Some(m) if !m.trim().is_empty() => m,
            _ => return Err(ChatError::MissingMessage),
        };

        if let Some(reply) = match_trigger(self.triggers, message) {
            debug!("trigger matched");
            return Ok(reply.to_string());
        }

        let Some(generator) = &self.generator else {
            return Ok(OFFLINE_REPLY.to_string());
        };

        Ok(fail_soft(generator.generate(message).await))
    }
}

/// Callers always get text; upstream failures collapse to one apology.
fn fail_soft(result: Result<String, UpstreamError>) -> String {
    match result {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "upstream generation failed");
            FALLBACK_REPLY.to_string()
        }
    }
}
