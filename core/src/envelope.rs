//! Classification of the API's JSON response envelope.
//!
//! # Design
//! Every POST answers with `{"status":"ok","result":{...}}` or
//! `{"status":"error","code":"<kind>:<detail>","message":"..."}`. The order
//! of checks matters: a recognized argument code wins over a message, and
//! the raw-dump `Unknown` fallback only applies once both structured paths
//! have come up empty.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{ApiError, ArgumentErrorKind, Result};
use crate::http::HttpResponse;

/// The `code` field of an error envelope, split once on the first `:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCode {
    pub kind: String,
    pub detail: Option<String>,
}

impl ErrorCode {
    pub fn parse(code: &str) -> Self {
        match code.split_once(':') {
            Some((kind, detail)) => Self {
                kind: kind.to_string(),
                detail: Some(detail.to_string()),
            },
            None => Self {
                kind: code.to_string(),
                detail: None,
            },
        }
    }

    /// The argument-error class this code denotes, if any.
    pub fn argument_kind(&self) -> Option<ArgumentErrorKind> {
        match self.kind.as_str() {
            "missingArgument" => Some(ArgumentErrorKind::Missing),
            "invalidArgument" => Some(ArgumentErrorKind::Invalid),
            _ => None,
        }
    }
}

/// A response whose envelope reported `status: "ok"`.
#[derive(Debug, Clone)]
pub struct Envelope {
    fields: Map<String, Value>,
    response: HttpResponse,
}

impl Envelope {
    /// All top-level fields of the envelope.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The raw `result` mapping, if the server sent one.
    pub fn result_value(&self) -> Option<&Value> {
        self.fields.get("result")
    }

    /// Decode `result` into `T`.
    ///
    /// A missing or mistyped result means the envelope only looked like a
    /// success, so it fails as `Unknown` with the raw response attached.
    pub fn result<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self
            .result_value()
            .ok_or_else(|| ApiError::unknown(&self.response))?;
        serde_json::from_value(value.clone()).map_err(|err| {
            trace!(error = %err, "result field did not match the expected shape");
            ApiError::unknown(&self.response)
        })
    }

    pub fn response(&self) -> &HttpResponse {
        &self.response
    }
}

/// Interpret a POST response body according to the envelope convention.
pub fn classify(response: HttpResponse) -> Result<Envelope> {
    let fields = match serde_json::from_slice::<Value>(&response.body) {
        Ok(Value::Object(fields)) => fields,
        _ => return Err(ApiError::unknown(&response)),
    };

    match fields.get("status").and_then(Value::as_str) {
        Some("ok") => Ok(Envelope { fields, response }),
        Some("error") => Err(classify_error(&fields, &response)),
        _ => Err(ApiError::unknown(&response)),
    }
}

fn classify_error(fields: &Map<String, Value>, response: &HttpResponse) -> ApiError {
    let code = fields.get("code").and_then(Value::as_str).map(ErrorCode::parse);

    if let Some(code) = code {
        if let Some(kind) = code.argument_kind() {
            return ApiError::Argument {
                kind,
                name: code.detail.unwrap_or_default(),
            };
        }
    }

    if let Some(message) = fields.get("message").and_then(Value::as_str) {
        return ApiError::Remote {
            message: message.to_string(),
        };
    }

    ApiError::unknown(response)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::error::ErrorKind;

    fn response(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: body.as_bytes().to_vec(),
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Text {
        text: String,
    }

    #[test]
    fn error_code_splits_on_first_colon_only() {
        let code = ErrorCode::parse("invalidArgument:format:png");
        assert_eq!(code.kind, "invalidArgument");
        assert_eq!(code.detail.as_deref(), Some("format:png"));
        assert_eq!(code.argument_kind(), Some(ArgumentErrorKind::Invalid));
    }

    #[test]
    fn error_code_without_detail() {
        let code = ErrorCode::parse("rateLimited");
        assert_eq!(code.kind, "rateLimited");
        assert_eq!(code.detail, None);
        assert_eq!(code.argument_kind(), None);
    }

    #[test]
    fn ok_envelope_exposes_result() {
        let envelope = classify(response(r#"{"status":"ok","result":{"text":"ABC"}}"#)).unwrap();
        let text: Text = envelope.result().unwrap();
        assert_eq!(text.text, "ABC");
    }

    #[test]
    fn ok_envelope_without_result_is_unknown() {
        let envelope = classify(response(r#"{"status":"ok"}"#)).unwrap();
        let err = envelope.result::<Text>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }

    #[test]
    fn ok_envelope_with_wrong_result_shape_is_unknown() {
        let envelope = classify(response(r#"{"status":"ok","result":{"text":42}}"#)).unwrap();
        let err = envelope.result::<Text>().unwrap_err();
        assert!(matches!(err, ApiError::Unknown { body, .. } if body.contains("42")));
    }

    #[test]
    fn missing_argument_code() {
        let err = classify(response(
            r#"{"status":"error","code":"missingArgument:text","message":"ignored"}"#,
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Argument { kind: ArgumentErrorKind::Missing, ref name } if name == "text"
        ));
    }

    #[test]
    fn invalid_argument_code() {
        let err = classify(response(r#"{"status":"error","code":"invalidArgument:quality"}"#))
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Argument { kind: ArgumentErrorKind::Invalid, ref name } if name == "quality"
        ));
    }

    #[test]
    fn unrecognized_code_falls_back_to_message() {
        let err = classify(response(
            r#"{"status":"error","code":"quotaExceeded:daily","message":"Daily limit reached"}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, ApiError::Remote { ref message } if message == "Daily limit reached"));
    }

    #[test]
    fn error_without_code_or_message_is_unknown() {
        let err = classify(response(r#"{"status":"error","code":"boom"}"#)).unwrap_err();
        match err {
            ApiError::Unknown { body, headers } => {
                assert_eq!(body, r#"{"status":"error","code":"boom"}"#);
                assert!(headers.contains("content-type: application/json"));
            }
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[test]
    fn non_json_body_is_unknown() {
        let err = classify(response("<html>502 Bad Gateway</html>")).unwrap_err();
        assert!(matches!(err, ApiError::Unknown { ref body, .. } if body == "<html>502 Bad Gateway</html>"));
    }

    #[test]
    fn json_array_is_unknown() {
        let err = classify(response(r#"["ok"]"#)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }

    #[test]
    fn unexpected_status_value_is_unknown() {
        let err = classify(response(r#"{"status":"pending"}"#)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }
}
