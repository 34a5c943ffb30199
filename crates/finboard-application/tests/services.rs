mod common;

use common::{MockFinanceApi, api_error, record, user};
use finboard_application::{FinboardServices, StartupReport};
use finboard_core::auth::AuthState;
use finboard_core::storage::{KeyValueStore, RECORDS_KEY, TOKEN_KEY, TokenStore};
use finboard_infrastructure::MemoryKeyValueStore;
use std::sync::Arc;
use std::time::Duration;

fn services(api: MockFinanceApi, store: MemoryKeyValueStore) -> FinboardServices {
    let store: Arc<dyn KeyValueStore> = Arc::new(store);
    let tokens = TokenStore::new(store.clone());
    FinboardServices::new(Arc::new(api), store, tokens, Duration::from_millis(500))
}

#[tokio::test]
async fn test_start_rehydrates_session_and_records() {
    let snapshot = serde_json::to_string(&vec![record(9, "NVDA"), record(3, "AAPL")]).unwrap();
    let store = MemoryKeyValueStore::with_entries([
        (TOKEN_KEY, "persisted-jwt".to_string()),
        (RECORDS_KEY, snapshot),
    ]);
    let services = services(MockFinanceApi::new(), store);

    let report = services.start().await;

    assert_eq!(
        report,
        StartupReport {
            auth: AuthState::LoggedIn(user()),
            cached_records: 2,
        }
    );
    assert_eq!(services.selection.selected_id().await, Some(9));
}

#[tokio::test]
async fn test_start_with_expired_token_keeps_cached_records() {
    let snapshot = serde_json::to_string(&vec![record(3, "AAPL")]).unwrap();
    let store = MemoryKeyValueStore::with_entries([
        (TOKEN_KEY, "expired-jwt".to_string()),
        (RECORDS_KEY, snapshot),
    ]);
    let services = services(
        MockFinanceApi::new().with_me(Err(api_error(401, "Unauthorized"))),
        store,
    );

    let report = services.start().await;

    assert_eq!(report.auth, AuthState::LoggedOut);
    assert_eq!(report.cached_records, 1);
    assert_eq!(services.records.list().await, vec![record(3, "AAPL")]);
}

#[tokio::test]
async fn test_start_on_empty_store() {
    let services = services(MockFinanceApi::new(), MemoryKeyValueStore::new());

    let report = services.start().await;

    assert_eq!(report.auth, AuthState::LoggedOut);
    assert_eq!(report.cached_records, 0);
    assert_eq!(services.selection.selected().await, None);
}
