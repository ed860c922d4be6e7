//! Extractor de campos del HTML de consulta de placas
//!
//! El sitio externo no tiene un contrato estable: se aplican expresiones
//! regulares sobre el HTML con espacios normalizados, una por campo. Cada
//! patrón busca una celda de etiqueta (solo el prefijo, sin distinguir
//! mayúsculas) seguida de la celda con el valor.

use lazy_static::lazy_static;
use regex::Regex;

/// Mínimo de campos extraídos para considerar válido el resultado
pub const MIN_EXTRACTED_FIELDS: usize = 3;

/// Campos que se intentan extraer del HTML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrapedField {
    Brand,
    Model,
    Year,
    Color,
    FuelType,
    Chassis,
    RegistrationId,
    Status,
    Municipality,
    State,
}

impl ScrapedField {
    pub const ALL: [ScrapedField; 10] = [
        ScrapedField::Brand,
        ScrapedField::Model,
        ScrapedField::Year,
        ScrapedField::Color,
        ScrapedField::FuelType,
        ScrapedField::Chassis,
        ScrapedField::RegistrationId,
        ScrapedField::Status,
        ScrapedField::Municipality,
        ScrapedField::State,
    ];

    /// Prefijo de la etiqueta en la tabla del sitio
    pub fn label_prefix(&self) -> &'static str {
        match self {
            ScrapedField::Brand => "Marca",
            ScrapedField::Model => "Modelo",
            ScrapedField::Year => "Ano",
            ScrapedField::Color => "Cor",
            ScrapedField::FuelType => "Combust",
            ScrapedField::Chassis => "Chassi",
            ScrapedField::RegistrationId => "Renavam",
            ScrapedField::Status => "Situa",
            ScrapedField::Municipality => "Munic",
            ScrapedField::State => "UF",
        }
    }
}

fn label_value_pattern(label: &str) -> Regex {
    let pattern = format!(
        r"(?i)<td[^>]*>{}[^<]*</td>\s*<td[^>]*>([^<]+)</td>",
        regex::escape(label)
    );
    Regex::new(&pattern).unwrap()
}

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref FIELD_PATTERNS: Vec<(ScrapedField, Regex)> = ScrapedField::ALL
        .iter()
        .map(|field| (*field, label_value_pattern(field.label_prefix())))
        .collect();
}

/// Campos extraídos; `None` cuando el patrón no encontró nada
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
    pub color: Option<String>,
    pub fuel_type: Option<String>,
    pub chassis: Option<String>,
    pub registration_id: Option<String>,
    pub status: Option<String>,
    pub municipality: Option<String>,
    pub state: Option<String>,
}

impl ExtractedFields {
    fn slot(&mut self, field: ScrapedField) -> &mut Option<String> {
        match field {
            ScrapedField::Brand => &mut self.brand,
            ScrapedField::Model => &mut self.model,
            ScrapedField::Year => &mut self.year,
            ScrapedField::Color => &mut self.color,
            ScrapedField::FuelType => &mut self.fuel_type,
            ScrapedField::Chassis => &mut self.chassis,
            ScrapedField::RegistrationId => &mut self.registration_id,
            ScrapedField::Status => &mut self.status,
            ScrapedField::Municipality => &mut self.municipality,
            ScrapedField::State => &mut self.state,
        }
    }

    /// Número de campos encontrados
    pub fn found(&self) -> usize {
        [
            &self.brand,
            &self.model,
            &self.year,
            &self.color,
            &self.fuel_type,
            &self.chassis,
            &self.registration_id,
            &self.status,
            &self.municipality,
            &self.state,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
    }

    pub fn is_sufficient(&self) -> bool {
        self.found() >= MIN_EXTRACTED_FIELDS
    }
}

/// Colapsar saltos de línea y espacios repetidos
pub fn normalize_whitespace(html: &str) -> String {
    WHITESPACE.replace_all(html, " ").into_owned()
}

/// Aplicar todos los patrones sobre el HTML
pub fn extract_fields(html: &str) -> ExtractedFields {
    let cleaned = normalize_whitespace(html);
    let mut extracted = ExtractedFields::default();

    for (field, pattern) in FIELD_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(&cleaned) {
            if let Some(value) = captures.get(1) {
                let value = value.as_str().trim();
                if !value.is_empty() {
                    *extracted.slot(*field) = Some(value.to_string());
                }
            }
        }
    }

    extracted
}

/// Año como el parseo entero indulgente: dígitos iniciales, si los hay
pub fn parse_year(value: &str) -> Option<i32> {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
