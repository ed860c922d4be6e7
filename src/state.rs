//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. No hay estado mutable: cada consulta es
//! independiente.

use std::sync::Arc;

use anyhow::Result;

use crate::clients::{ExternalSourceClient, HttpPlateSourceClient};
use crate::config::environment::EnvironmentConfig;
use crate::models::catalog::CATALOG;
use crate::services::plate_lookup_service::PlateLookupService;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub lookup_service: Arc<PlateLookupService>,
}

impl AppState {
    /// Estado con el cliente HTTP real hacia el sitio externo
    pub fn new(config: EnvironmentConfig) -> Result<Self> {
        let client = HttpPlateSourceClient::from_config(&config)?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Estado con cualquier fuente externa (usado también en tests)
    pub fn with_client(config: EnvironmentConfig, client: Arc<dyn ExternalSourceClient>) -> Self {
        Self {
            config,
            lookup_service: Arc::new(PlateLookupService::new(client, &CATALOG)),
        }
    }
}
