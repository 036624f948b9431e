//! Session token

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SessionError;

/// Opaque identifier issued by the detection service.
///
/// Kept exactly as the server sent it. Never blank, and never holds a byte
/// an HTTP header value cannot carry, so it can be sent verbatim as
/// `X-Session-ID`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        if raw.trim().is_empty() || !raw.bytes().all(is_header_value_byte) {
            return Err(SessionError::InvalidToken(raw.to_string()));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Same byte rule as `http::HeaderValue::from_str`
fn is_header_value_byte(b: u8) -> bool {
    b == b'\t' || (b >= 0x20 && b != 0x7f)
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SessionToken {
    type Error = SessionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SessionToken> for String {
    fn from(token: SessionToken) -> Self {
        token.0
    }
}

impl std::str::FromStr for SessionToken {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
