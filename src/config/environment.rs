//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::{Context, Result};
use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    // Sitio externo de consulta de placas
    pub lookup_source_url: String,
    pub lookup_partner_ref: String,
    pub lookup_timeout_secs: u64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            log_level: "info".to_string(),
            lookup_source_url: "https://buscaplacas.com.br".to_string(),
            lookup_partner_ref: "nwgpa12".to_string(),
            lookup_timeout_secs: 10,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar configuración desde variables de entorno, con valores por defecto
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: match env::var("PORT") {
                Ok(value) => value.parse().context("PORT must be a valid number")?,
                Err(_) => defaults.port,
            },
            host: env::var("HOST").unwrap_or(defaults.host),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or(defaults.cors_origins),
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
            lookup_source_url: env::var("LOOKUP_SOURCE_URL").unwrap_or(defaults.lookup_source_url),
            lookup_partner_ref: env::var("LOOKUP_PARTNER_REF").unwrap_or(defaults.lookup_partner_ref),
            lookup_timeout_secs: match env::var("LOOKUP_TIMEOUT_SECS") {
                Ok(value) => value
                    .parse()
                    .context("LOOKUP_TIMEOUT_SECS must be a valid number")?,
                Err(_) => defaults.lookup_timeout_secs,
            },
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
