//! Modelo de VehicleRecord
//!
//! Registro completo de un vehículo tal como lo consume el front-end.
//! Es un DTO plano, recalculado en cada consulta; los nombres de los campos
//! en JSON siguen el contrato del front-end (placa, marca, modelo...).

use serde::{Deserialize, Serialize};

/// Situación del vehículo
///
/// Los valores extraídos del sitio externo se conservan tal cual en `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RegistrationStatus {
    InCirculation,
    Deregistered,
    Other(String),
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RegistrationStatus::InCirculation => "CIRCULAÇÃO",
            RegistrationStatus::Deregistered => "BAIXADO",
            RegistrationStatus::Other(value) => value.as_str(),
        }
    }
}

impl From<String> for RegistrationStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "CIRCULAÇÃO" => RegistrationStatus::InCirculation,
            "BAIXADO" => RegistrationStatus::Deregistered,
            _ => RegistrationStatus::Other(value),
        }
    }
}

impl From<RegistrationStatus> for String {
    fn from(status: RegistrationStatus) -> Self {
        match status {
            RegistrationStatus::Other(value) => value,
            other => other.as_str().to_string(),
        }
    }
}

/// Restricciones registradas sobre el vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lien {
    #[serde(rename = "ALIENAÇÃO FIDUCIÁRIA")]
    FiduciaryLien,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxStatus {
    #[serde(rename = "PAGO")]
    Paid,
    #[serde(rename = "PENDENTE")]
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenewalStatus {
    #[serde(rename = "EM DIA")]
    Current,
    #[serde(rename = "VENCIDO")]
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsuranceStatus {
    #[serde(rename = "ATIVO")]
    Active,
    #[serde(rename = "INATIVO")]
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentPolarity {
    #[serde(rename = "positivo")]
    Positive,
    #[serde(rename = "negativo")]
    Negative,
}

/// IPVA (impuesto anual)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxInfo {
    pub status: TaxStatus,
    #[serde(rename = "valor")]
    pub amount: u32,
}

/// Licenciamiento anual
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalInfo {
    pub status: RenewalStatus,
    #[serde(rename = "vencimento")]
    pub due_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceInfo {
    pub status: InsuranceStatus,
    #[serde(rename = "vigencia")]
    pub valid_until: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingComment {
    #[serde(rename = "tipo")]
    pub polarity: CommentPolarity,
    #[serde(rename = "comentario")]
    pub text: String,
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "proprietario")]
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratings {
    #[serde(rename = "positivas")]
    pub positive: u32,
    #[serde(rename = "negativas")]
    pub negative: u32,
    #[serde(rename = "comentarios")]
    pub comments: Vec<RatingComment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEvent {
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "evento")]
    pub event: String,
    #[serde(rename = "local")]
    pub location: String,
}

/// Valor de mercado (tabla FIPE)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketValue {
    #[serde(rename = "valor")]
    pub amount: u32,
    #[serde(rename = "mes")]
    pub reference_month: String,
}

/// VehicleRecord principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    #[serde(rename = "placa")]
    pub plate: String,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "cor")]
    pub color: String,
    #[serde(rename = "combustivel")]
    pub fuel_type: String,
    #[serde(rename = "chassi")]
    pub chassis: String,
    #[serde(rename = "renavam")]
    pub registration_id: String,
    #[serde(rename = "situacao")]
    pub status: RegistrationStatus,
    #[serde(rename = "municipio")]
    pub municipality: String,
    #[serde(rename = "uf")]
    pub state: String,
    #[serde(rename = "proprietarios")]
    pub owner_count: u32,
    #[serde(rename = "restricoes")]
    pub liens: Vec<Lien>,
    #[serde(rename = "multas")]
    pub fine_points: u32,
    #[serde(rename = "ipva")]
    pub tax: TaxInfo,
    #[serde(rename = "licenciamento")]
    pub registration_renewal: RenewalInfo,
    #[serde(rename = "seguro")]
    pub insurance: InsuranceInfo,
    #[serde(rename = "avaliacoes")]
    pub ratings: Ratings,
    #[serde(rename = "historico")]
    pub event_history: Vec<HistoryEvent>,
    #[serde(rename = "fipe")]
    pub market_value: MarketValue,
}
