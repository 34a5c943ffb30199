#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use finboard_core::analysis::{AnalysisRecord, AnalysisRequest, Resultado};
use finboard_core::api::FinanceApi;
use finboard_core::auth::{AuthResponse, Credentials, User};
use finboard_core::search::SearchResult;
use finboard_core::storage::{KeyValueStore, TokenStore};
use finboard_core::{FinboardError, Result};
use finboard_infrastructure::MemoryKeyValueStore;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Scriptable backend that records every call.
pub struct MockFinanceApi {
    pub calls: Mutex<Vec<String>>,
    pub created_requests: Mutex<Vec<AnalysisRequest>>,
    login: Mutex<Result<AuthResponse>>,
    me: Mutex<Result<User>>,
    create: Mutex<Result<AnalysisRecord>>,
    list: Mutex<Result<Vec<AnalysisRecord>>>,
    search_results: Mutex<HashMap<String, Result<Vec<SearchResult>>>>,
    search_gates: Mutex<HashMap<String, Arc<Notify>>>,
    create_gate: Mutex<Option<Arc<Notify>>>,
}

impl MockFinanceApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            created_requests: Mutex::new(Vec::new()),
            login: Mutex::new(Ok(AuthResponse {
                user: Some(user()),
                jwt: Some("jwt-token".to_string()),
            })),
            me: Mutex::new(Ok(user())),
            create: Mutex::new(Ok(record(1, "AAPL"))),
            list: Mutex::new(Ok(Vec::new())),
            search_results: Mutex::new(HashMap::new()),
            search_gates: Mutex::new(HashMap::new()),
            create_gate: Mutex::new(None),
        }
    }

    pub fn with_login(self, result: Result<AuthResponse>) -> Self {
        *self.login.lock().unwrap() = result;
        self
    }

    pub fn with_me(self, result: Result<User>) -> Self {
        *self.me.lock().unwrap() = result;
        self
    }

    pub fn with_create(self, result: Result<AnalysisRecord>) -> Self {
        *self.create.lock().unwrap() = result;
        self
    }

    pub fn with_list(self, result: Result<Vec<AnalysisRecord>>) -> Self {
        *self.list.lock().unwrap() = result;
        self
    }

    pub fn with_search(self, query: &str, result: Result<Vec<SearchResult>>) -> Self {
        self.search_results
            .lock()
            .unwrap()
            .insert(query.to_string(), result);
        self
    }

    /// Makes lookups for `query` block until [`MockFinanceApi::release_search`].
    pub fn hold_search(self, query: &str) -> Self {
        self.search_gates
            .lock()
            .unwrap()
            .insert(query.to_string(), Arc::new(Notify::new()));
        self
    }

    pub fn release_search(&self, query: &str) {
        if let Some(gate) = self.search_gates.lock().unwrap().get(query) {
            gate.notify_one();
        }
    }

    /// Makes analysis creation block until [`MockFinanceApi::release_create`].
    pub fn hold_create(self) -> Self {
        *self.create_gate.lock().unwrap() = Some(Arc::new(Notify::new()));
        self
    }

    pub fn release_create(&self) {
        if let Some(gate) = self.create_gate.lock().unwrap().as_ref() {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record_call(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl FinanceApi for MockFinanceApi {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        self.record_call(format!("login:{}", credentials.identifier));
        self.login.lock().unwrap().clone()
    }

    async fn current_user(&self) -> Result<User> {
        self.record_call("me");
        self.me.lock().unwrap().clone()
    }

    async fn search_assets(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.record_call(format!("search:{query}"));
        let gate = self.search_gates.lock().unwrap().get(query).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.search_results
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn create_analysis(&self, request: &AnalysisRequest) -> Result<AnalysisRecord> {
        self.record_call(format!("create:{}", request.symbol));
        self.created_requests.lock().unwrap().push(request.clone());
        let gate = self.create_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.create.lock().unwrap().clone()
    }

    async fn list_analyses(&self) -> Result<Vec<AnalysisRecord>> {
        self.record_call("list");
        self.list.lock().unwrap().clone()
    }
}

pub fn user() -> User {
    User {
        id: "1".to_string(),
        username: "ana".to_string(),
        identifier: "ana@example.com".to_string(),
    }
}

pub fn asset(symbol: &str) -> SearchResult {
    SearchResult {
        symbol: symbol.to_string(),
        name: format!("{symbol} Corp"),
        exchange: "NASDAQ".to_string(),
        kind: "Equity".to_string(),
    }
}

pub fn api_error(status: u16, message: &str) -> FinboardError {
    FinboardError::api(status, message, json!({"error": {"message": message}}).to_string())
}

pub fn record(id: i64, symbol: &str) -> AnalysisRecord {
    let created = Utc.with_ymd_and_hms(2024, 10, 1, 12, 0, 0).unwrap();
    let resultado: Resultado = serde_json::from_value(json!({
        "income_status": {"annual_revenue": "383.29B", "net_income_growth": "-2.81%"},
        "margins": {"gross_margin": "44.13%", "net_margin": "25.31%"},
        "balance_sheet": {"cash": "29.97B"},
        "financial_ratios": {"ROE": "156.08%"},
        "stock_information": {"P/E": "29.4"}
    }))
    .unwrap();
    AnalysisRecord {
        id,
        document_id: format!("doc-{id}"),
        activo: symbol.to_string(),
        inicio: "2020".to_string(),
        fin: "2023".to_string(),
        resultado,
        created_at: created,
        updated_at: created,
        published_at: Some(created),
        locale: None,
    }
}

/// A memory store plus a token store over it.
pub fn stores() -> (Arc<MemoryKeyValueStore>, TokenStore) {
    let store = Arc::new(MemoryKeyValueStore::new());
    let tokens = TokenStore::new(store.clone() as Arc<dyn KeyValueStore>);
    (store, tokens)
}
