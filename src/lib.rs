//! Consulta veicular
//!
//! Backend de consulta de placas: scraping de un sitio público con
//! fallback a datos determinísticos generados a partir de la placa.

pub mod analysis;
pub mod clients;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
