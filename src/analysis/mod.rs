//! Análisis del HTML devuelto por el sitio externo

pub mod html_extractor;

pub use html_extractor::{extract_fields, ExtractedFields, MIN_EXTRACTED_FIELDS};
