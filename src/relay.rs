use crate::config::Config;
use crate::error::AppError;
use crate::notify::Notifier;
use crate::submission::{PromoRequest, Submission, caption, image};

/// Result of a relayed submission. The admin photo is mandatory; the user
/// acknowledgment is best-effort.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayOutcome {
    /// Admin photo and user acknowledgment both delivered.
    Delivered,
    /// Admin photo delivered, acknowledgment rejected.
    AdminOnly { ack_error: serde_json::Value },
}

impl RelayOutcome {
    pub fn is_fully_delivered(&self) -> bool {
        matches!(self, RelayOutcome::Delivered)
    }
}

pub async fn handle_submission(
    config: &Config,
    notifier: &dyn Notifier,
    request: PromoRequest,
) -> Result<RelayOutcome, AppError> {
    let submission = Submission::try_from(request)?;

    let proof = image::decode(&submission.image)
        .map_err(|e| AppError::BadRequest(format!("Invalid image encoding: {e}")))?;

    let target = config.telegram()?;

    tracing::info!(
        telegram_id = %submission.telegram_id,
        kind = submission.kind.as_str(),
        image_bytes = proof.bytes.len(),
        "Relaying promo submission"
    );

    let text = caption::render(&submission);
    let photo = notifier
        .send_photo(target.bot_token, target.admin_id, &proof, &text)
        .await;

    if !photo.ok {
        return Err(AppError::Provider {
            message: "Failed to send submission".to_string(),
            details: photo.response,
        });
    }

    let ack = notifier
        .send_message(
            target.bot_token,
            &submission.telegram_id,
            &caption::acknowledgment(submission.kind),
        )
        .await;

    if ack.ok {
        Ok(RelayOutcome::Delivered)
    } else {
        tracing::warn!(
            telegram_id = %submission.telegram_id,
            "User acknowledgment not delivered: {}",
            ack.response
        );
        Ok(RelayOutcome::AdminOnly {
            ack_error: ack.response,
        })
    }
}
