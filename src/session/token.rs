//! JWT access token payload decoding.
//!
//! Decoding is a pure function from token text to claims, invoked only
//! at session transition points (initialize, login, register, refresh
//! success). Signature verification is the server's job; the client
//! only needs the subject and the expiry.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Deserializer};

use crate::session::error::ApiError;

/// Claims carried by an access token payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Claims {
    /// Subject identity. The backend issues numeric user ids; older
    /// token formats carry them as JSON numbers, newer ones as strings.
    #[serde(deserialize_with = "subject_as_i64")]
    pub sub: i64,
    /// Expiry as epoch seconds.
    pub exp: i64,
    /// Optional display claims, present on some token formats.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Claims {
    /// Whether the token has expired relative to the supplied wall clock.
    pub fn is_expired(&self, now_epoch_secs: i64) -> bool {
        self.exp <= now_epoch_secs
    }
}

fn subject_as_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Subject {
        Num(i64),
        Text(String),
    }

    match Subject::deserialize(deserializer)? {
        Subject::Num(n) => Ok(n),
        Subject::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// Decode the payload segment of a JWT without verifying its signature.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the token is not three dot-separated
/// segments, the payload is not base64url, or the claims do not parse.
pub fn decode_claims(token: &str) -> Result<Claims, ApiError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_)) if segments.next().is_none() => payload,
        _ => return Err(ApiError::Decode("token is not a three-part JWT".to_owned())),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| ApiError::Decode(format!("token payload is not base64url: {e}")))?;

    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(format!("bad token claims: {e}")))
}

/// Current wall-clock time as epoch seconds.
pub fn now_epoch_secs() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let secs = (js_sys::Date::now() / 1000.0) as i64;
        secs
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}
