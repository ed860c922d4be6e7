//! Clients - HTTP Clients for External APIs
//!
//! This module contains the HTTP client for the public plate lookup site.

pub mod plate_source_client;

pub use plate_source_client::{ExternalSourceClient, HttpPlateSourceClient};
