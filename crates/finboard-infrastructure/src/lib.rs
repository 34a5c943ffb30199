//! Infrastructure layer for Finboard: HTTP transport, the REST backend
//! adapter, local key/value storage, paths and configuration loading.

pub mod config_service;
pub mod finance_api;
pub mod http_client;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::finance_api::HttpFinanceApi;
pub use crate::http_client::HttpClient;
pub use crate::storage::{FileKeyValueStore, MemoryKeyValueStore};
