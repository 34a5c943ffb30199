//! Backend API port.
//!
//! Defines the typed operations the client needs from the remote content/API
//! service. The analysis itself is computed remotely; this crate only models
//! the request and response shapes.

use async_trait::async_trait;

use crate::analysis::{AnalysisRecord, AnalysisRequest};
use crate::auth::{AuthResponse, Credentials, User};
use crate::error::Result;
use crate::search::SearchResult;

pub const AUTH_ENDPOINT: &str = "/api/auth/local";
pub const ME_ENDPOINT: &str = "/api/users/me";
pub const SEARCH_ENDPOINT: &str = "/api/search";
pub const ANALYSIS_ENDPOINT: &str = "/api/analisis";

/// Typed access to the backend.
///
/// Implementations attach credentials themselves; callers never pass tokens.
#[async_trait]
pub trait FinanceApi: Send + Sync {
    /// `POST /api/auth/local`
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse>;

    /// `GET /api/users/me`, bearer-authenticated
    async fn current_user(&self) -> Result<User>;

    /// `GET /api/search?query=...`
    async fn search_assets(&self, query: &str) -> Result<Vec<SearchResult>>;

    /// `POST /api/analisis`
    async fn create_analysis(&self, request: &AnalysisRequest) -> Result<AnalysisRecord>;

    /// `GET /api/analisis`
    async fn list_analyses(&self) -> Result<Vec<AnalysisRecord>>;
}
