//! Composition root: config, storage, transport and services.

use anyhow::{Context, Result, anyhow};
use finboard_application::FinboardServices;
use finboard_core::config::ClientConfig;
use finboard_core::storage::{KeyValueStore, TokenStore};
use finboard_infrastructure::paths::FinboardPaths;
use finboard_infrastructure::{
    ConfigService, FileKeyValueStore, HttpClient, HttpFinanceApi, MemoryKeyValueStore,
};
use std::path::Path;
use std::sync::Arc;

/// Loads config.toml plus environment overrides, then applies `--api-url`.
pub fn load_config(path: Option<&Path>, api_url: Option<&str>) -> Result<ClientConfig> {
    let mut config = ConfigService::load(path).context("Failed to load configuration")?;
    if let Some(url) = api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    Ok(config)
}

pub async fn bootstrap(config: &ClientConfig, ephemeral: bool) -> Result<FinboardServices> {
    let store: Arc<dyn KeyValueStore> = if ephemeral {
        tracing::info!("[Bootstrap] Using in-memory storage");
        Arc::new(MemoryKeyValueStore::new())
    } else {
        let dir = match &config.storage_dir {
            Some(dir) => dir.clone(),
            None => FinboardPaths::store_dir()
                .map_err(|e| anyhow!("Failed to resolve storage directory: {}", e))?,
        };
        tracing::info!("[Bootstrap] Using storage at {:?}", dir);
        Arc::new(FileKeyValueStore::new(dir))
    };

    // The HTTP client reads the token the session writes: same store.
    let tokens = TokenStore::new(store.clone());
    let http = HttpClient::new(&config.api_url, tokens.clone(), config.request_timeout())
        .context("Failed to build HTTP client")?;
    let api = Arc::new(HttpFinanceApi::new(http));

    let services = FinboardServices::new(api, store, tokens, config.search_debounce());
    let report = services.start().await;
    tracing::debug!(
        "[Bootstrap] Ready against {} ({} cached records)",
        config.api_url,
        report.cached_records
    );

    Ok(services)
}
