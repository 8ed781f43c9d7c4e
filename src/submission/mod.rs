pub mod caption;
pub mod image;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::AppError;

/// Placeholder rendered for optional fields that were not submitted.
pub const PLACEHOLDER: &str = "N/A";

/// Raw `/unlock-promo` body. Unrecognized fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoRequest {
    #[serde(default, deserialize_with = "text_field")]
    pub telegram_id: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub method: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub whatsapp: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub call: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub image: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "text_field")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Task,
    Payment,
}

impl SubmissionKind {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(kind) if kind.eq_ignore_ascii_case("task") => SubmissionKind::Task,
            _ => SubmissionKind::Payment,
        }
    }

    /// Upper-case label used in the admin caption header.
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionKind::Task => "TASK",
            SubmissionKind::Payment => "PAYMENT",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionKind::Task => "task",
            SubmissionKind::Payment => "payment",
        }
    }
}

/// A submission that passed the presence checks.
#[derive(Debug, Clone)]
pub struct Submission {
    pub telegram_id: String,
    pub image: String,
    pub name: Option<String>,
    pub username: Option<String>,
    pub method: Option<String>,
    pub whatsapp: Option<String>,
    pub call: Option<String>,
    pub kind: SubmissionKind,
}

impl TryFrom<PromoRequest> for Submission {
    type Error = AppError;

    fn try_from(req: PromoRequest) -> Result<Self, Self::Error> {
        let (Some(telegram_id), Some(image)) = (req.telegram_id, req.image) else {
            return Err(AppError::BadRequest("Missing telegramId or image".to_string()));
        };

        Ok(Submission {
            telegram_id,
            image,
            name: req.name,
            username: req.username,
            method: req.method,
            whatsapp: req.whatsapp,
            call: req.call,
            kind: SubmissionKind::parse(req.kind.as_deref()),
        })
    }
}

/// Accepts strings and numbers; `null`, empty and whitespace-only strings become `None`.
fn text_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(serde::de::Error::custom("expected a string or number")),
    }
}
