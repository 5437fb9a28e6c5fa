//! Catalog services

pub mod catalog;

use std::sync::Arc;

use crate::{
    api::{BookApi, HealthStatus, HttpBookApi},
    config::ApiConfig,
    error::AppResult,
    store::BookStore,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub api: Arc<dyn BookApi>,
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services over an HTTP client for the configured backend
    pub fn new(config: &ApiConfig, store: BookStore) -> AppResult<Self> {
        let api: Arc<dyn BookApi> = Arc::new(HttpBookApi::new(config)?);
        Ok(Self::with_api(api, store))
    }

    /// Create all services over any book service implementation
    pub fn with_api(api: Arc<dyn BookApi>, store: BookStore) -> Self {
        Self {
            catalog: catalog::CatalogService::new(api.clone(), store),
            api,
        }
    }

    /// Probe the backend without touching the store
    pub async fn health(&self) -> AppResult<HealthStatus> {
        self.api.health().await
    }
}
