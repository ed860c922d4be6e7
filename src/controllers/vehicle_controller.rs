use std::sync::Arc;

use crate::dto::vehicle_dto::PlateQuery;
use crate::models::vehicle::VehicleRecord;
use crate::services::plate_lookup_service::{LookupSource, PlateLookupService};
use crate::utils::errors::{bad_request_error, AppError};

pub struct VehicleController {
    service: Arc<PlateLookupService>,
}

impl VehicleController {
    pub fn new(service: Arc<PlateLookupService>) -> Self {
        Self { service }
    }

    /// Consulta completa: scraping con fallback al generador
    pub async fn lookup(&self, query: PlateQuery) -> Result<VehicleRecord, AppError> {
        let placa = required_plate(query)?;
        let lookup = self.service.lookup(&placa).await?;

        match &lookup.source {
            LookupSource::Scraped { fields } => {
                log::info!("Dados encontrados para placa {} ({} campos)", lookup.record.plate, fields)
            }
            LookupSource::Fallback(reason) => {
                log::info!("Dados consistentes para placa {} ({})", lookup.record.plate, reason)
            }
        }

        Ok(lookup.record)
    }

    /// Registro determinístico, el mismo que usaría el fallback
    pub fn simulate(&self, query: PlateQuery) -> Result<VehicleRecord, AppError> {
        let placa = required_plate(query)?;
        Ok(self.service.simulate(&placa)?)
    }
}

fn required_plate(query: PlateQuery) -> Result<String, AppError> {
    match query.placa {
        Some(placa) if !placa.is_empty() => Ok(placa),
        _ => Err(bad_request_error("Query parameter 'placa' is required")),
    }
}
