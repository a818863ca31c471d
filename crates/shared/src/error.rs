use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level result codes carried inside every response envelope.
///
/// These are not HTTP statuses: the backend answers `200 OK` at the
/// transport level and reports the outcome here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ResponseCode {
    Success,
    Error,
    ConnectionFailed,
    AuthFailed,
    DuplicateKey,
    JdkDeserializeFailed,
    Other(i64),
}

impl ResponseCode {
    /// Code reported by the backend when the envelope carried none.
    pub const MISSING: i64 = -1;

    pub fn code(self) -> i64 {
        match self {
            Self::Success => 200,
            Self::Error => 500,
            Self::ConnectionFailed => 501,
            Self::AuthFailed => 502,
            Self::DuplicateKey => 503,
            Self::JdkDeserializeFailed => 504,
            Self::Other(code) => code,
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Success => "ok",
            Self::Error => "unknown server error",
            Self::ConnectionFailed => "redis connection failed",
            Self::AuthFailed => "redis authentication failed",
            Self::DuplicateKey => "duplicate key",
            Self::JdkDeserializeFailed => "jdk deserialization failed",
            Self::Other(_) => "unrecognized response code",
        }
    }
}

impl From<i64> for ResponseCode {
    fn from(value: i64) -> Self {
        match value {
            200 => Self::Success,
            500 => Self::Error,
            501 => Self::ConnectionFailed,
            502 => Self::AuthFailed,
            503 => Self::DuplicateKey,
            504 => Self::JdkDeserializeFailed,
            other => Self::Other(other),
        }
    }
}

impl From<ResponseCode> for i64 {
    fn from(value: ResponseCode) -> Self {
        value.code()
    }
}

impl Default for ResponseCode {
    fn default() -> Self {
        Self::Other(Self::MISSING)
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A non-success envelope, rendered the way the console shows it to users.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("({code}) {message}")]
pub struct ApiFailure {
    pub code: ResponseCode,
    pub message: String,
}

impl ApiFailure {
    /// Falls back to the code's description when the server sent no message.
    pub fn new(code: ResponseCode, message: Option<&str>) -> Self {
        let message = match message.map(str::trim) {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => code.description().to_string(),
        };
        Self { code, message }
    }
}
