//! Modelos del sistema
//!
//! Este módulo contiene el registro de vehículo que se devuelve al cliente
//! y el catálogo estático compartido.

pub mod catalog;
pub mod vehicle;

pub use catalog::{Catalog, CATALOG};
pub use vehicle::*;
