use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::json;

use super::{Notifier, NotifyResult};
use crate::submission::image::ProofImage;

const MAX_DIAGNOSTIC_BODY: usize = 1024;

/// Bot API client. The token is supplied per call and never logged.
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_url: String,
}

impl TelegramNotifier {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn method_url(&self, bot_token: &str, method: &str) -> String {
        format!("{}/bot{bot_token}/{method}", self.api_url)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_photo(
        &self,
        bot_token: &str,
        chat_id: &str,
        image: &ProofImage,
        caption: &str,
    ) -> NotifyResult {
        let photo = Part::bytes(image.bytes.to_vec()).file_name(image.file_name());
        let photo = match photo.mime_str(&image.mime) {
            Ok(part) => part,
            Err(e) => return NotifyResult::fault(format!("Invalid image type: {}", e.without_url())),
        };

        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", caption.to_string())
            .text("parse_mode", "HTML")
            .part("photo", photo);

        let result = self
            .client
            .post(self.method_url(bot_token, "sendPhoto"))
            .multipart(form)
            .send()
            .await;

        interpret("sendPhoto", result).await
    }

    async fn send_message(&self, bot_token: &str, chat_id: &str, text: &str) -> NotifyResult {
        let body = json!({
            "chat_id": chat_id_value(chat_id),
            "text": text,
            "parse_mode": "HTML",
        });

        let result = self
            .client
            .post(self.method_url(bot_token, "sendMessage"))
            .json(&body)
            .send()
            .await;

        interpret("sendMessage", result).await
    }
}

/// Numeric ids go out as integers; anything else (e.g. `@channel`) as a string.
pub fn chat_id_value(chat_id: &str) -> serde_json::Value {
    match chat_id.parse::<i64>() {
        Ok(id) => json!(id),
        Err(_) => json!(chat_id),
    }
}

/// A call succeeded only on a 2xx status with a JSON body carrying `"ok": true`.
async fn interpret(
    method: &str,
    result: Result<reqwest::Response, reqwest::Error>,
) -> NotifyResult {
    let resp = match result {
        Ok(resp) => resp,
        Err(e) => {
            // without_url keeps the bot token out of the diagnostic
            let e = e.without_url();
            tracing::warn!("Telegram {method} request failed: {e}");
            return NotifyResult::fault(format!("{method} request failed: {e}"));
        }
    };

    let status_code = resp.status();
    let body = match resp.text().await {
        Ok(body) => body,
        Err(e) => {
            let e = e.without_url();
            tracing::warn!("Telegram {method} response unreadable: {e}");
            return NotifyResult::fault(format!("{method} response unreadable: {e}"));
        }
    };

    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(value) => {
            let ok = status_code.is_success() && value["ok"].as_bool() == Some(true);
            if ok {
                NotifyResult::delivered(value)
            } else {
                tracing::warn!(
                    "Telegram {method} rejected with status {}: {}",
                    status_code.as_u16(),
                    value["description"].as_str().unwrap_or("no description")
                );
                NotifyResult::failed(value)
            }
        }
        Err(_) => {
            tracing::warn!(
                "Telegram {method} returned non-JSON body with status {}",
                status_code.as_u16()
            );
            NotifyResult::failed(json!({
                "status_code": status_code.as_u16(),
                "body": body.chars().take(MAX_DIAGNOSTIC_BODY).collect::<String>(),
            }))
        }
    }
}
