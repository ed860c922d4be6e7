use serde::{Deserialize, Serialize};

// Query de GET /consulta-veiculo
#[derive(Debug, Deserialize)]
pub struct PlateQuery {
    pub placa: Option<String>,
}

// Response de GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
    pub status: &'static str,
    pub timestamp: String,
}
