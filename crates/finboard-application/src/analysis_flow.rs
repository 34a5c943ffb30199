//! New-analysis submission.
//!
//! validate -> (reject locally | call backend) -> cache -> select.
//! Validation failures are an outcome, not an error: they never leave the
//! form boundary and never touch the network.

use crate::record_cache::RecordCache;
use crate::selection::Selection;
use crate::session_store::SessionStore;
use finboard_core::analysis::{AnalysisForm, AnalysisRecord, AnalysisRequest};
use finboard_core::api::FinanceApi;
use finboard_core::validation::FieldErrors;
use finboard_core::{FinboardError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Outcome of one form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Backend created the record; it is cached and selected.
    Created(AnalysisRecord),
    /// Local validation failed; nothing was sent.
    Rejected(FieldErrors),
    /// Another submission from this form is still pending; nothing was sent.
    InFlight,
}

pub struct AnalysisRequestFlow {
    api: Arc<dyn FinanceApi>,
    session: Arc<SessionStore>,
    cache: Arc<RecordCache>,
    selection: Arc<Selection>,
    in_flight: AtomicBool,
}

impl AnalysisRequestFlow {
    pub fn new(
        api: Arc<dyn FinanceApi>,
        session: Arc<SessionStore>,
        cache: Arc<RecordCache>,
        selection: Arc<Selection>,
    ) -> Self {
        Self {
            api,
            session,
            cache,
            selection,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Submits the form, validating against the current year.
    pub async fn submit(&self, form: &AnalysisForm) -> Result<Submission> {
        match form.validate() {
            Ok(request) => self.create(request).await,
            Err(errors) => Ok(Submission::Rejected(errors)),
        }
    }

    /// Same as [`AnalysisRequestFlow::submit`] with an explicit current year.
    pub async fn submit_for_year(
        &self,
        form: &AnalysisForm,
        current_year: i32,
    ) -> Result<Submission> {
        match form.validate_for_year(current_year) {
            Ok(request) => self.create(request).await,
            Err(errors) => Ok(Submission::Rejected(errors)),
        }
    }

    /// True while a creation request is on the wire.
    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Analyses stored on the backend. Does not touch the local cache.
    pub async fn fetch_remote(&self) -> Result<Vec<AnalysisRecord>> {
        self.session.require_user().await?;
        match self.api.list_analyses().await {
            Ok(records) => Ok(records),
            Err(e) => Err(self.expire_on_unauthorized(e).await),
        }
    }

    async fn create(&self, request: AnalysisRequest) -> Result<Submission> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::debug!("[AnalysisRequestFlow] Submission ignored, request already pending");
            return Ok(Submission::InFlight);
        };

        self.session.require_user().await?;

        tracing::info!(
            "[AnalysisRequestFlow] Requesting analysis for {} ({}-{})",
            request.symbol,
            request.year1,
            request.year2
        );

        let record = match self.api.create_analysis(&request).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("[AnalysisRequestFlow] Analysis request failed: {}", e);
                return Err(self.expire_on_unauthorized(e).await);
            }
        };

        self.cache.add(record.clone()).await?;
        self.selection.set(record.id).await;

        tracing::info!(
            "[AnalysisRequestFlow] Created analysis {} for {}",
            record.id,
            record.activo
        );
        Ok(Submission::Created(record))
    }

    /// A 401 means the stored token is no longer accepted: drop the session
    /// and report it as an auth problem.
    async fn expire_on_unauthorized(&self, err: FinboardError) -> FinboardError {
        if err.status_code() == Some(401) {
            self.session.invalidate().await;
            return FinboardError::auth("session expired, please log in again");
        }
        err
    }
}

/// Clears the in-flight flag when the submission finishes, however it ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
