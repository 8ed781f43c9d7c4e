use super::{PLACEHOLDER, Submission, SubmissionKind};

/// Per-field cap, counted before escaping. Seven capped fields plus the fixed
/// lines stay under the Bot API's 1024-character caption limit.
pub const MAX_FIELD_CHARS: usize = 100;

/// Render the HTML caption attached to the admin's proof photo.
/// All user-provided values are escaped for Telegram's HTML parse mode.
pub fn render(submission: &Submission) -> String {
    format!(
        "<b>🟢 PROMO {kind} SUBMISSION</b>\n\
         Name: {name}\n\
         Username: {username}\n\
         ID: {id}\n\
         Method: {method}\n\
         WhatsApp: {whatsapp}\n\
         Call: {call}\n\
         Status: Pending review by admin",
        kind = submission.kind.label(),
        name = field(submission.name.as_deref()),
        username = field(submission.username.as_deref()),
        id = field(Some(submission.telegram_id.as_str())),
        method = field(submission.method.as_deref()),
        whatsapp = field(submission.whatsapp.as_deref()),
        call = field(submission.call.as_deref()),
    )
}

/// Message sent back to the submitting user once the admin has the proof.
pub fn acknowledgment(kind: SubmissionKind) -> String {
    format!(
        "✅ Your {} submission has been received. Admin will review it shortly.",
        kind.as_str()
    )
}

fn field(value: Option<&str>) -> String {
    value
        .map(|v| html_escape::encode_text(&truncate(v)).into_owned())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_FIELD_CHARS {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(MAX_FIELD_CHARS - 1).collect();
    cut.push('…');
    cut
}
