//! Services module
//!
//! Este módulo contiene la lógica de negocio: el servicio de consulta de
//! placas, el generador determinístico y las fuentes de valores que ambos
//! comparten.

pub mod mock_generator;
pub mod plate_lookup_service;
pub mod value_source;

pub use mock_generator::DeterministicMockGenerator;
pub use plate_lookup_service::*;
pub use value_source::{RandomFiller, SeededFiller, ValueSource};
