//! `data:` URL encoding and parsing for inline images.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::CoreError;

/// MIME type of every normalized image.
pub const PNG_MIME: &str = "image/png";

/// Binary payload recovered from a data URL or bare base64 string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlinePayload {
    /// Media type declared in the data URL header, if there was one.
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Wrap bytes as `data:<mime>;base64,<payload>`.
pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

/// Parse either a full base64 data URL or a bare base64 payload.
///
/// Surrounding whitespace is ignored. Only base64-encoded data URLs are
/// accepted; percent-encoded ones are rejected.
pub fn parse_data_url(input: &str) -> Result<InlinePayload, CoreError> {
    let input = input.trim();

    let (mime_type, payload) = match input.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest.split_once(',').ok_or_else(|| {
                CoreError::Validation("image: data URL is missing the ',' separator".into())
            })?;
            let mime = header.strip_suffix(";base64").ok_or_else(|| {
                CoreError::Validation("image: only base64 data URLs are supported".into())
            })?;
            let mime = (!mime.is_empty()).then(|| mime.to_string());
            (mime, payload)
        }
        None => (None, input),
    };

    if payload.is_empty() {
        return Err(CoreError::Validation("image: payload must not be empty".into()));
    }

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| CoreError::Validation(format!("image: invalid base64 payload: {e}")))?;

    Ok(InlinePayload { mime_type, bytes })
}
