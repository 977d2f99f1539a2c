// src/extract/api.rs
//! Upstream API access: the transport seam and response classification.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Every way a single API call can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network failure or non-2xx status.
    #[error("HTTP request failed: {0}")]
    Transport(String),
    #[error("Response contains invalid JSON: {0}")]
    MalformedBody(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    /// Invalid, disabled, missing or exhausted key.
    #[error("invalid API key: {0}")]
    InvalidApiKey(String),
    /// Invalid or missing request parameters.
    #[error("invalid request parameters: {0}")]
    InvalidParameters(String),
    #[error("too many sources requested: {0}")]
    TooManySources(String),
    #[error("source does not exist: {0}")]
    SourceDoesNotExist(String),
    /// Fallback for unrecognized error codes.
    #[error("unexpected API error ({code}): {message}")]
    Unexpected { code: String, message: String },
}

impl ApiError {
    /// Map an API `code` to its error kind.
    pub fn from_code(code: &str, message: String) -> Self {
        match code {
            "rateLimited" => Self::RateLimited(message),
            "apiKeyDisabled" | "apiKeyInvalid" | "apiKeyMissing" | "apiKeyExhausted" => {
                Self::InvalidApiKey(message)
            }
            "parameterInvalid" | "parametersMissing" => Self::InvalidParameters(message),
            "sourcesTooMany" => Self::TooManySources(message),
            "sourceDoesNotExist" => Self::SourceDoesNotExist(message),
            other => Self::Unexpected {
                code: other.to_string(),
                message,
            },
        }
    }
}

/// Classify a completed response.
///
/// Success requires a 2xx status, a JSON body, and `status == "ok"` in that
/// body. Non-2xx statuses are reported as transport failures regardless of
/// the body; otherwise the body's `code` selects the error kind.
pub fn handle_api_response(status: StatusCode, body: &str) -> Result<Value, ApiError> {
    if !status.is_success() {
        return Err(ApiError::Transport(format!("status {status}")));
    }

    let data: Value =
        serde_json::from_str(body).map_err(|e| ApiError::MalformedBody(e.to_string()))?;

    if data.get("status").and_then(Value::as_str) != Some("ok") {
        let code = data
            .get("code")
            .and_then(Value::as_str)
            .unwrap_or("unexpectedError");
        let message = data
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown API error")
            .to_string();
        return Err(ApiError::from_code(code, message));
    }

    Ok(data)
}

/// Narrow seam over the upstream API: request params in, classified JSON out.
#[async_trait]
pub trait NewsApi: Send + Sync {
    async fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<Value, ApiError>;
}

/// `reqwest`-backed implementation.
pub struct HttpNewsApi {
    http: reqwest::Client,
}

impl HttpNewsApi {
    pub fn new(timeout_secs: u64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("news-sentiment-etl/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(timeout_secs.clamp(1, 4)))
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl NewsApi for HttpNewsApi {
    async fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        // never log apiKey
        let visible: Vec<_> = params.iter().filter(|(k, _)| *k != "apiKey").collect();
        tracing::debug!(url, params = ?visible, "GET");

        let resp = self
            .http
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        handle_api_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_body_is_returned() {
        let v = handle_api_response(StatusCode::OK, r#"{"status":"ok","sources":[]}"#).unwrap();
        assert!(v["sources"].as_array().unwrap().is_empty());
    }

    #[test]
    fn error_codes_map_to_kinds() {
        let cases = [
            ("rateLimited", "RateLimited"),
            ("apiKeyDisabled", "InvalidApiKey"),
            ("apiKeyInvalid", "InvalidApiKey"),
            ("apiKeyMissing", "InvalidApiKey"),
            ("apiKeyExhausted", "InvalidApiKey"),
            ("parameterInvalid", "InvalidParameters"),
            ("parametersMissing", "InvalidParameters"),
            ("sourcesTooMany", "TooManySources"),
            ("sourceDoesNotExist", "SourceDoesNotExist"),
            ("somethingNew", "Unexpected"),
        ];
        for (code, kind) in cases {
            let body = format!(r#"{{"status":"error","code":"{code}","message":"m"}}"#);
            let err = handle_api_response(StatusCode::OK, &body).unwrap_err();
            assert!(format!("{err:?}").starts_with(kind), "{code} -> {err:?}");
        }
    }

    #[test]
    fn missing_code_and_message_fall_back() {
        let err = handle_api_response(StatusCode::OK, r#"{"status":"error"}"#).unwrap_err();
        assert_eq!(
            err,
            ApiError::Unexpected {
                code: "unexpectedError".into(),
                message: "Unknown API error".into()
            }
        );
    }

    #[test]
    fn non_2xx_is_transport_even_with_error_body() {
        let body = r#"{"status":"error","code":"rateLimited","message":"slow down"}"#;
        let err = handle_api_response(StatusCode::TOO_MANY_REQUESTS, body).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = handle_api_response(StatusCode::OK, "<html>").unwrap_err();
        assert!(matches!(err, ApiError::MalformedBody(_)));
    }
}
