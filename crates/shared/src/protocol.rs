use serde::{Deserialize, Serialize};

use crate::{
    domain::{ConnectionSetting, ConnectionSummary},
    error::{ApiFailure, ResponseCode},
};

/// Envelope wrapping every backend response: `{code, msg?, content?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResult<T> {
    #[serde(default)]
    pub code: ResponseCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<T>,
}

impl<T> ApiResult<T> {
    pub fn success(content: Option<T>) -> Self {
        Self {
            code: ResponseCode::Success,
            msg: None,
            content,
        }
    }

    pub fn failure(code: ResponseCode, msg: Option<String>) -> Self {
        Self {
            code,
            msg,
            content: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }

    pub fn failure_detail(&self) -> ApiFailure {
        ApiFailure::new(self.code, self.msg.as_deref())
    }
}

/// Responses whose `content` the console ignores.
pub type Ack = ApiResult<serde_json::Value>;
pub type ConnectionListResponse = ApiResult<Vec<ConnectionSummary>>;
pub type ConnectionResponse = ApiResult<ConnectionSetting>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_envelope_decodes_numeric_ids() {
        let response: ConnectionListResponse =
            serde_json::from_str(r#"{"code":200,"content":[{"id":1,"name":"x"}]}"#)
                .expect("decode");
        assert!(response.is_success());
        assert_eq!(
            response.content,
            Some(vec![ConnectionSummary {
                id: "1".into(),
                name: "x".into()
            }])
        );
    }

    #[test]
    fn bare_code_envelope_decodes() {
        let response: Ack = serde_json::from_str(r#"{"code":503}"#).expect("decode");
        assert_eq!(response.code, ResponseCode::DuplicateKey);
        assert_eq!(response.msg, None);
        assert_eq!(response.content, None);
    }

    #[test]
    fn missing_code_reads_as_minus_one() {
        let response: Ack = serde_json::from_str(r#"{"msg":"boom"}"#).expect("decode");
        assert_eq!(response.code.code(), ResponseCode::MISSING);
        assert_eq!(response.failure_detail().to_string(), "(-1) boom");
    }
}
