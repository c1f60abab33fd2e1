//! Shared token helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Header names and token masking live here so the HTTP pipeline, session
//! logging and the CLI agree on them.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use reqwest::header::HeaderMap;

/// Request header carrying the current session token.
pub const ACCESS_TOKEN_HEADER: &str = "access_token";

/// Response header through which the backend rotates the session token.
pub const NEW_ACCESS_TOKEN_HEADER: &str = "new_access_token";

const MASK_VISIBLE_CHARS: usize = 20;

/// Return the rotated token carried by `headers`, if usable.
///
/// The header must be valid text and non-blank after trimming; the value is
/// returned as sent.
#[must_use]
pub fn rotated_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(NEW_ACCESS_TOKEN_HEADER)?;
    match value.to_str() {
        Ok(token) if !token.trim().is_empty() => Some(token),
        _ => None,
    }
}

/// Shorten a token for logs: the first 20 characters followed by `...`.
#[must_use]
pub fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(MASK_VISIBLE_CHARS).collect();
    format!("{visible}...")
}
