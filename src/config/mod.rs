//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno y la configuración del
//! sitio externo de consulta.

pub mod environment;

pub use environment::*;
