//! [`FinanceApi`] over [`HttpClient`].

use crate::http_client::HttpClient;
use async_trait::async_trait;
use finboard_core::analysis::{AnalysisRecord, AnalysisRequest};
use finboard_core::api::{
    ANALYSIS_ENDPOINT, AUTH_ENDPOINT, FinanceApi, ME_ENDPOINT, SEARCH_ENDPOINT,
};
use finboard_core::auth::{AuthResponse, Credentials, User};
use finboard_core::search::SearchResult;
use finboard_core::{FinboardError, Result};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// REST implementation of the backend port.
#[derive(Clone)]
pub struct HttpFinanceApi {
    http: HttpClient,
}

impl HttpFinanceApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl FinanceApi for HttpFinanceApi {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        let body = serde_json::to_value(credentials)?;
        let value = self
            .http
            .request(AUTH_ENDPOINT, Method::POST, Some(&body))
            .await?;
        decode(AUTH_ENDPOINT, value)
    }

    async fn current_user(&self) -> Result<User> {
        let value = self.http.request(ME_ENDPOINT, Method::GET, None).await?;
        decode(ME_ENDPOINT, value)
    }

    async fn search_assets(&self, query: &str) -> Result<Vec<SearchResult>> {
        let value = self
            .http
            .get_with_query(SEARCH_ENDPOINT, &[("query", query)])
            .await?;
        decode(SEARCH_ENDPOINT, value)
    }

    async fn create_analysis(&self, request: &AnalysisRequest) -> Result<AnalysisRecord> {
        let body = serde_json::to_value(request)?;
        let value = self
            .http
            .request(ANALYSIS_ENDPOINT, Method::POST, Some(&body))
            .await?;
        decode(ANALYSIS_ENDPOINT, unwrap_data(value))
    }

    async fn list_analyses(&self) -> Result<Vec<AnalysisRecord>> {
        let value = self
            .http
            .request(ANALYSIS_ENDPOINT, Method::GET, None)
            .await?;
        decode(ANALYSIS_ENDPOINT, unwrap_data(value))
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        FinboardError::parse(format!("Unexpected response shape from {}: {}", endpoint, e))
    })
}

/// Strips a Strapi `{"data": ..., "meta": ...}` envelope if present.
///
/// A bare record also has no `data` key, so only objects without an `id` are
/// treated as envelopes.
fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if !map.contains_key("id") && map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}
