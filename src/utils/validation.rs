//! Utilidades de validación de placas
//!
//! Normalización y validación de placas brasileñas. Solo se aceptan dos
//! gramáticas: el formato antiguo (ABC1234) y el formato Mercosul (ABC1D23).

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    static ref LEGACY_PLATE: Regex = Regex::new(r"^[A-Z]{3}[0-9]{4}$").unwrap();
    static ref MERCOSUL_PLATE: Regex = Regex::new(r"^[A-Z]{3}[0-9][A-Z][0-9]{2}$").unwrap();
}

/// Formato de placa reconocido
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateFormat {
    Legacy,
    Mercosul,
}

/// Normalizar placa: primero mayúsculas (Unicode), luego solo alfanuméricos ASCII
pub fn normalize_plate(raw: &str) -> String {
    raw.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Validar una placa ya normalizada contra las dos gramáticas aceptadas
pub fn validate_plate(normalized: &str) -> Result<PlateFormat, ValidationError> {
    if LEGACY_PLATE.is_match(normalized) {
        return Ok(PlateFormat::Legacy);
    }
    if MERCOSUL_PLATE.is_match(normalized) {
        return Ok(PlateFormat::Mercosul);
    }

    let mut error = ValidationError::new("plate");
    error.add_param("value".into(), &normalized.to_string());
    error.add_param("format".into(), &"ABC1234 or ABC1D23".to_string());
    Err(error)
}

/// Formatear una placa normalizada como XXX-XXXX
pub fn format_plate(normalized: &str) -> String {
    match normalized.char_indices().nth(3) {
        Some((idx, _)) => format!("{}-{}", &normalized[..idx], &normalized[idx..]),
        None => normalized.to_string(),
    }
}

/// Quitar el guion de una placa formateada
pub fn strip_plate_format(formatted: &str) -> String {
    formatted.replace('-', "")
}
