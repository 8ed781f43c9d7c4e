pub mod telegram;

use async_trait::async_trait;
use serde_json::json;

use crate::submission::image::ProofImage;

/// Uniform outcome of a provider call. Faults never escape as errors;
/// they arrive here with `ok == false` and a diagnostic `response`.
#[derive(Debug, Clone, PartialEq)]
pub struct NotifyResult {
    pub ok: bool,
    pub response: serde_json::Value,
}

impl NotifyResult {
    pub fn delivered(response: serde_json::Value) -> Self {
        Self { ok: true, response }
    }

    pub fn failed(response: serde_json::Value) -> Self {
        Self { ok: false, response }
    }

    pub fn fault(message: impl Into<String>) -> Self {
        Self::failed(json!({ "error": message.into() }))
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `image` with an HTML `caption` to `chat_id`.
    async fn send_photo(
        &self,
        bot_token: &str,
        chat_id: &str,
        image: &ProofImage,
        caption: &str,
    ) -> NotifyResult;

    /// Send an HTML text message to `chat_id`.
    async fn send_message(&self, bot_token: &str, chat_id: &str, text: &str) -> NotifyResult;
}
