use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{HealthResponse, PlateQuery};
use crate::models::vehicle::VehicleRecord;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/consulta-veiculo", get(lookup_vehicle))
        .route("/consulta-veiculo/simulado", get(simulate_vehicle))
        .route("/health", get(health))
}

async fn lookup_vehicle(
    State(state): State<AppState>,
    Query(query): Query<PlateQuery>,
) -> Result<Json<VehicleRecord>, AppError> {
    log::info!("Consultando placa {:?}", query.placa);
    let controller = VehicleController::new(state.lookup_service.clone());
    let record = controller.lookup(query).await?;
    Ok(Json(record))
}

async fn simulate_vehicle(
    State(state): State<AppState>,
    Query(query): Query<PlateQuery>,
) -> Result<Json<VehicleRecord>, AppError> {
    let controller = VehicleController::new(state.lookup_service.clone());
    let record = controller.simulate(query)?;
    Ok(Json(record))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "consulta-veicular",
        status: "healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
