//! Attestation Payload Decoder
//!
//! Extracts the article URL embedded in an attestation's calldata.
//! The URL is read from a fixed-size trailing window of the hex payload, so no
//! ABI length prefix has to be trusted.

use thiserror::Error;
use tracing::debug;

/// Placeholder returned whenever no article URL can be recovered
pub const UNKNOWN_PAGE: &str = "Unknown Page";

/// Number of trailing hex characters holding the URL (128 bytes)
pub const URL_WINDOW_HEX_LEN: usize = 256;

/// Hex offset of the feedback flag word (right after the 4-byte selector)
pub const FEEDBACK_FLAG_OFFSET: usize = 8;

/// Length of the zero run that marks negative feedback (one 32-byte word)
pub const FEEDBACK_ZERO_RUN_LEN: usize = 64;

/// Positional layout of an attestation payload.
///
/// These values are a contract with the attesting contract's calldata
/// encoding. A new encoding gets a new constant, not an edit of `V1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadLayout {
    /// Trailing hex characters decoded as the article URL
    pub url_window_hex_len: usize,
    /// Hex offset (after any `0x` prefix) of the feedback flag
    pub feedback_offset: usize,
    /// Number of `'0'` hex digits that mark negative feedback
    pub feedback_zero_run_len: usize,
}

impl PayloadLayout {
    pub const V1: PayloadLayout = PayloadLayout {
        url_window_hex_len: URL_WINDOW_HEX_LEN,
        feedback_offset: FEEDBACK_FLAG_OFFSET,
        feedback_zero_run_len: FEEDBACK_ZERO_RUN_LEN,
    };
}

impl Default for PayloadLayout {
    fn default() -> Self {
        Self::V1
    }
}

/// Errors that can occur while decoding a payload window.
///
/// These never leave the module's public `decode_article_url`; they are
/// folded into [`UNKNOWN_PAGE`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Payload shorter than the {0}-character URL window")]
    InputTooShort(usize),

    #[error("URL window is zero-filled")]
    ZeroFilled,

    #[error("Invalid hex data: {0}")]
    InvalidHex(String),

    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("Decoded text is not a URL: {0:?}")]
    NotAUrl(String),
}

/// Strip an optional `0x` / `0X` prefix
pub fn strip_hex_prefix(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}

/// Parse a hex string to bytes (with or without 0x prefix)
pub fn hex_to_bytes(hex_str: &str) -> Result<Vec<u8>, DecodeError> {
    hex::decode(strip_hex_prefix(hex_str)).map_err(|e| DecodeError::InvalidHex(e.to_string()))
}

/// Return the trailing URL window of a payload
///
/// # Returns
/// The last `layout.url_window_hex_len` characters, or an error if the
/// payload is shorter than the window or the window is zero-filled
pub fn url_window<'a>(input: &'a str, layout: &PayloadLayout) -> Result<&'a str, DecodeError> {
    let hex_data = strip_hex_prefix(input);
    let window_len = layout.url_window_hex_len;

    if window_len == 0 || hex_data.len() < window_len {
        return Err(DecodeError::InputTooShort(window_len));
    }
    let start = hex_data.len() - window_len;
    let window = hex_data
        .get(start..)
        .ok_or_else(|| DecodeError::InvalidHex("window splits a character".to_string()))?;

    if window.bytes().all(|b| b == b'0') {
        return Err(DecodeError::ZeroFilled);
    }
    Ok(window)
}

/// Decode the article URL, surfacing the reason when it fails
pub fn try_decode_article_url(input: &str, layout: &PayloadLayout) -> Result<String, DecodeError> {
    let window = url_window(input, layout)?;
    let bytes = hex_to_bytes(window)?;
    let text = String::from_utf8(bytes).map_err(|e| DecodeError::InvalidUtf8(e.to_string()))?;

    let cleaned: String = text.chars().filter(|c| *c != '\0').collect();
    let cleaned = cleaned.trim_matches(|c: char| c.is_whitespace() || c.is_control());

    // ABI head words (offset, length) can leave printable residue before the URL
    if let Some(pos) = cleaned.find("http") {
        return Ok(cleaned[pos..].to_string());
    }
    if cleaned.contains('/') {
        return Ok(cleaned.to_string());
    }
    Err(DecodeError::NotAUrl(cleaned.to_string()))
}

/// Decode the article URL from an attestation payload
///
/// # Arguments
/// * `input` - Transaction input data as a hex string
/// * `layout` - Payload layout giving the URL window size
///
/// # Returns
/// The decoded URL, or [`UNKNOWN_PAGE`] if the payload carries none
pub fn decode_article_url(input: &str, layout: &PayloadLayout) -> String {
    match try_decode_article_url(input, layout) {
        Ok(url) => url,
        Err(e) => {
            debug!("No article URL in payload: {}", e);
            UNKNOWN_PAGE.to_string()
        }
    }
}
