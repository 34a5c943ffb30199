//! Outbound HTTP to the backend.
//!
//! Every request carries a JSON content type, an explicit timeout, and the
//! bearer token when one is stored. Non-success responses become
//! [`FinboardError::Api`] with the server's message; transport failures become
//! [`FinboardError::Network`]; unparseable success bodies become
//! [`FinboardError::Parse`].

use finboard_core::storage::TokenStore;
use finboard_core::{FinboardError, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// JSON client bound to one backend base URL.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    tokens: TokenStore,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a client for `base_url` (e.g. `https://api.example.com`).
    pub fn new(base_url: impl Into<String>, tokens: TokenStore, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FinboardError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
            timeout,
        })
    }

    /// Sends `method endpoint` with an optional JSON body and returns the parsed
    /// JSON response. An empty success body yields `Value::Null`.
    pub async fn request(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Value> {
        self.send(endpoint, method, &[], body).await
    }

    /// `GET endpoint?key=value...` with URL-encoded query pairs.
    pub async fn get_with_query(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Value> {
        self.send(endpoint, Method::GET, query, None).await
    }

    async fn send(
        &self,
        endpoint: &str,
        method: Method,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value> {
        tracing::debug!("[HttpClient] {} {}", method, endpoint);

        let request = self.build(endpoint, method.clone(), query, body)?;
        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;

        if !status.is_success() {
            let message = extract_error_message(status, &text);
            tracing::debug!(
                "[HttpClient] {} {} failed with {}: {}",
                method,
                endpoint,
                status.as_u16(),
                message
            );
            return Err(FinboardError::api(status.as_u16(), message, text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            FinboardError::parse(format!("Invalid JSON from {}: {}", endpoint, e))
        })
    }

    fn build(
        &self,
        endpoint: &str,
        method: Method,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<RequestBuilder> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .timeout(self.timeout);

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(token) = self.tokens.get()? {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        Ok(request)
    }

    fn transport_error(&self, endpoint: &str, err: reqwest::Error) -> FinboardError {
        if err.is_timeout() {
            FinboardError::network(format!(
                "Request to {} timed out after {}s",
                endpoint,
                self.timeout.as_secs_f32()
            ))
        } else {
            FinboardError::network(format!("Request to {} failed: {}", endpoint, err))
        }
    }
}

/// Picks the most specific human-readable message out of an error body.
///
/// Tries the Strapi envelope `{"error": {"message": ...}}`, then a top-level
/// `message`, then the status reason phrase.
pub(crate) fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let message = value
            .pointer("/error/message")
            .and_then(Value::as_str)
            .or_else(|| value.get("message").and_then(Value::as_str))
            .filter(|m| !m.trim().is_empty());
        if let Some(message) = message {
            return message.to_string();
        }
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_strapi_envelope() {
        let body = r#"{"data":null,"error":{"status":400,"name":"ValidationError","message":"Invalid identifier or password","details":{}}}"#;
        assert_eq!(
            extract_error_message(StatusCode::BAD_REQUEST, body),
            "Invalid identifier or password"
        );
    }

    #[test]
    fn test_message_from_top_level_field() {
        assert_eq!(
            extract_error_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":"boom"}"#),
            "boom"
        );
    }

    #[test]
    fn test_message_falls_back_to_reason() {
        assert_eq!(
            extract_error_message(StatusCode::BAD_GATEWAY, "<html>upstream</html>"),
            "Bad Gateway"
        );
    }
}
