use std::sync::LazyLock;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use bytes::Bytes;
use regex::Regex;

const DEFAULT_MIME: &str = "image/jpeg";

static DATA_URI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^data:([^;,]*)((?:;[^;,]*)*),").unwrap());

static MIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9.+-]+/[a-z0-9.+-]+$").unwrap());

static LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone, PartialEq)]
pub struct ProofImage {
    pub bytes: Bytes,
    pub mime: String,
}

impl ProofImage {
    /// Upload file name derived from the MIME subtype, e.g. `proof.png`.
    pub fn file_name(&self) -> String {
        let ext = match self.mime.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            other => other
                .strip_prefix("image/")
                .filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric()))
                .unwrap_or("jpg"),
        };
        format!("proof.{ext}")
    }
}

#[derive(Debug, PartialEq)]
pub enum ImageError {
    NotBase64,
    UnsupportedType(String),
    Empty,
    Invalid(String),
}

impl std::fmt::Display for ImageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageError::NotBase64 => write!(f, "data URI is not base64-encoded"),
            ImageError::UnsupportedType(mime) => write!(f, "unsupported media type {mime:?}"),
            ImageError::Empty => write!(f, "image payload is empty"),
            ImageError::Invalid(msg) => write!(f, "{msg}"),
        }
    }
}

/// Decode a proof image given either as bare base64 or as a
/// `data:<mime>;base64,<payload>` URI. Whitespace inside the payload is ignored.
pub fn decode(input: &str) -> Result<ProofImage, ImageError> {
    let input = input.trim();

    let (mime, payload) = match DATA_URI_RE.captures(input) {
        Some(caps) => {
            let params = caps.get(2).map_or("", |m| m.as_str());
            if !params.split(';').any(|p| p.trim().eq_ignore_ascii_case("base64")) {
                return Err(ImageError::NotBase64);
            }
            let mime = caps.get(1).map_or("", |m| m.as_str()).trim();
            let mime = if mime.is_empty() {
                DEFAULT_MIME.to_string()
            } else {
                mime.to_ascii_lowercase()
            };
            if !MIME_RE.is_match(&mime) {
                return Err(ImageError::UnsupportedType(mime));
            }
            let payload_start = caps.get(0).map_or(0, |m| m.end());
            (mime, &input[payload_start..])
        }
        None => (DEFAULT_MIME.to_string(), input),
    };

    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Err(ImageError::Empty);
    }

    let bytes = LENIENT_BASE64
        .decode(compact.as_bytes())
        .map_err(|e| ImageError::Invalid(e.to_string()))?;

    if bytes.is_empty() {
        return Err(ImageError::Empty);
    }

    Ok(ProofImage {
        bytes: Bytes::from(bytes),
        mime,
    })
}
