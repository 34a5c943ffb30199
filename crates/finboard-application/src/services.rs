use crate::analysis_flow::AnalysisRequestFlow;
use crate::record_cache::RecordCache;
use crate::search_debouncer::SearchDebouncer;
use crate::selection::Selection;
use crate::session_store::SessionStore;
use finboard_core::api::FinanceApi;
use finboard_core::auth::AuthState;
use finboard_core::storage::{KeyValueStore, TokenStore};
use std::sync::Arc;
use std::time::Duration;

/// All client services, wired once and passed to whatever drives them.
pub struct FinboardServices {
    pub session: Arc<SessionStore>,
    pub records: Arc<RecordCache>,
    pub selection: Arc<Selection>,
    pub search: SearchDebouncer,
    pub analysis: AnalysisRequestFlow,
}

/// What startup found.
#[derive(Debug, Clone, PartialEq)]
pub struct StartupReport {
    pub auth: AuthState,
    pub cached_records: usize,
}

impl FinboardServices {
    /// Wires the services around one backend and one local store.
    ///
    /// `tokens` must wrap the same store the API's HTTP client reads from.
    pub fn new(
        api: Arc<dyn FinanceApi>,
        store: Arc<dyn KeyValueStore>,
        tokens: TokenStore,
        search_debounce: Duration,
    ) -> Self {
        let session = Arc::new(SessionStore::new(api.clone(), tokens));
        let records = Arc::new(RecordCache::new(store));
        let selection = Arc::new(Selection::new(records.clone()));
        let search = SearchDebouncer::new(api.clone(), search_debounce);
        let analysis =
            AnalysisRequestFlow::new(api, session.clone(), records.clone(), selection.clone());

        Self {
            session,
            records,
            selection,
            search,
            analysis,
        }
    }

    /// Rehydrates persisted state: validates the stored token, loads cached
    /// records and selects the newest one. Never fails.
    pub async fn start(&self) -> StartupReport {
        let auth = self.session.restore_session().await;
        let cached_records = self.records.load_from_storage().await;
        self.selection.select_newest().await;

        tracing::info!(
            "[FinboardServices] Started: logged_in={}, cached_records={}",
            auth.is_logged_in(),
            cached_records
        );
        StartupReport {
            auth,
            cached_records,
        }
    }
}
