//! Servicio de consulta de placas
//!
//! Flujo: normalizar → validar formato → scraping del sitio externo →
//! extracción de campos → registro normalizado. Si el sitio falla o se
//! extraen menos de 3 campos, se usa el generador determinístico con la
//! placa normalizada como semilla. Para el cliente ambos caminos son
//! indistinguibles.

use std::fmt;
use std::sync::Arc;

use validator::ValidationError;

use crate::analysis::html_extractor::{extract_fields, parse_year, ExtractedFields};
use crate::clients::ExternalSourceClient;
use crate::models::catalog::Catalog;
use crate::models::vehicle::{RegistrationStatus, VehicleRecord};
use crate::services::mock_generator::{
    draw_chassis, draw_registration_id, draw_supplementary, DeterministicMockGenerator,
};
use crate::services::value_source::{RandomFiller, ValueSource};
use crate::utils::validation::{format_plate, normalize_plate, validate_plate};

/// Valores por defecto para campos no extraídos
pub const DEFAULT_BRAND: &str = "VOLKSWAGEN";
pub const DEFAULT_MODEL: &str = "GOL 1.0 FLEX";
pub const DEFAULT_YEAR: i32 = 2018;
pub const DEFAULT_COLOR: &str = "BRANCA";
pub const DEFAULT_FUEL: &str = "FLEX";
pub const DEFAULT_MUNICIPALITY: &str = "SÃO PAULO";
pub const DEFAULT_STATE: &str = "SP";

/// Motivo por el que se usó el generador
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// Error de red, timeout o respuesta no 2xx
    UpstreamUnavailable(String),
    /// Respuesta 2xx con menos campos de los necesarios
    ExtractionInsufficient { found: usize },
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::UpstreamUnavailable(e) => write!(f, "upstream unavailable: {}", e),
            FallbackReason::ExtractionInsufficient { found } => {
                write!(f, "only {} fields extracted", found)
            }
        }
    }
}

/// Origen del registro; solo para logs, nunca se expone al cliente
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupSource {
    Scraped { fields: usize },
    Fallback(FallbackReason),
}

/// Resultado de una consulta válida
#[derive(Debug, Clone)]
pub struct PlateLookup {
    pub record: VehicleRecord,
    pub source: LookupSource,
}

pub struct PlateLookupService {
    client: Arc<dyn ExternalSourceClient>,
    catalog: &'static Catalog,
    generator: DeterministicMockGenerator,
}

impl PlateLookupService {
    pub fn new(client: Arc<dyn ExternalSourceClient>, catalog: &'static Catalog) -> Self {
        Self {
            client,
            catalog,
            generator: DeterministicMockGenerator::new(catalog),
        }
    }

    /// Consultar una placa. `Err` significa placa no encontrada (formato inválido)
    pub async fn lookup(&self, raw_plate: &str) -> Result<PlateLookup, ValidationError> {
        let plate = normalize_plate(raw_plate);
        let format = validate_plate(&plate)?;
        log::info!("🔍 Consultando placa {} ({:?})", plate, format);

        let reason = match self.client.fetch_raw_markup(&plate).await {
            Ok(html) => {
                let fields = extract_fields(&html);
                let found = fields.found();
                if fields.is_sufficient() {
                    log::info!("✅ Extraídos {} campos del HTML para {}", found, plate);
                    let record = self.build_from_extracted(&plate, fields);
                    return Ok(PlateLookup {
                        record,
                        source: LookupSource::Scraped { fields: found },
                    });
                }
                FallbackReason::ExtractionInsufficient { found }
            }
            Err(e) => FallbackReason::UpstreamUnavailable(e.to_string()),
        };

        log::warn!("⚠️ Usando datos consistentes para {}: {}", plate, reason);
        Ok(PlateLookup {
            record: self.generator.generate(&plate),
            source: LookupSource::Fallback(reason),
        })
    }

    /// Registro determinístico para una placa, sin consultar el sitio externo
    pub fn simulate(&self, raw_plate: &str) -> Result<VehicleRecord, ValidationError> {
        let plate = normalize_plate(raw_plate);
        validate_plate(&plate)?;
        Ok(self.generator.generate(&plate))
    }

    /// Construir el registro a partir de los campos extraídos
    fn build_from_extracted(&self, plate: &str, fields: ExtractedFields) -> VehicleRecord {
        let mut filler = RandomFiller::thread_local();
        self.build_with(&mut filler, plate, fields)
    }

    /// Lo extraído se conserva tal cual. Si falta uno de los dos, se completa
    /// con el par del catálogo cuando existe, o con su propio valor por defecto
    fn resolve_location(
        &self,
        municipality: Option<String>,
        state: Option<String>,
    ) -> (String, String) {
        match (municipality, state) {
            (Some(m), Some(s)) => (m, s),
            (Some(m), None) => {
                let s = self
                    .catalog
                    .state_of(&m.to_uppercase())
                    .unwrap_or(DEFAULT_STATE)
                    .to_string();
                (m, s)
            }
            (None, Some(s)) => {
                let m = self
                    .catalog
                    .municipalities
                    .iter()
                    .find(|e| e.state.eq_ignore_ascii_case(&s))
                    .map(|e| e.municipality)
                    .unwrap_or(DEFAULT_MUNICIPALITY)
                    .to_string();
                (m, s)
            }
            (None, None) => (DEFAULT_MUNICIPALITY.to_string(), DEFAULT_STATE.to_string()),
        }
    }

    fn build_with<S: ValueSource>(
        &self,
        source: &mut S,
        plate: &str,
        fields: ExtractedFields,
    ) -> VehicleRecord {
        let extra = draw_supplementary(source, self.catalog);
        let (municipality, state) = self.resolve_location(fields.municipality, fields.state);

        VehicleRecord {
            plate: format_plate(plate),
            brand: fields.brand.unwrap_or_else(|| DEFAULT_BRAND.to_string()),
            model: fields.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            year: fields
                .year
                .as_deref()
                .and_then(parse_year)
                .unwrap_or(DEFAULT_YEAR),
            color: fields.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            fuel_type: fields.fuel_type.unwrap_or_else(|| DEFAULT_FUEL.to_string()),
            chassis: fields
                .chassis
                .unwrap_or_else(|| draw_chassis(source, self.catalog)),
            registration_id: fields
                .registration_id
                .unwrap_or_else(|| draw_registration_id(source)),
            status: fields
                .status
                .map(RegistrationStatus::from)
                .unwrap_or(RegistrationStatus::InCirculation),
            municipality,
            state,
            owner_count: extra.owner_count,
            liens: extra.liens,
            fine_points: extra.fine_points,
            tax: extra.tax,
            registration_renewal: extra.registration_renewal,
            insurance: extra.insurance,
            ratings: extra.ratings,
            event_history: extra.event_history,
            market_value: extra.market_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::CATALOG;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fuente simulada que cuenta las llamadas
    struct StubSource {
        body: Option<String>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn failing() -> Arc<Self> {
            Arc::new(Self { body: None, calls: AtomicUsize::new(0) })
        }

        fn serving(html: &str) -> Arc<Self> {
            Arc::new(Self { body: Some(html.to_string()), calls: AtomicUsize::new(0) })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ExternalSourceClient for StubSource {
        async fn fetch_raw_markup(&self, _plate: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.body.clone().ok_or_else(|| anyhow!("connection refused"))
        }
    }

    fn row(label: &str, value: &str) -> String {
        format!("<tr><td>{}</td>\n<td>{}</td></tr>", label, value)
    }

    #[tokio::test]
    async fn test_invalid_plates_never_reach_the_network() {
        let stub = StubSource::failing();
        let service = PlateLookupService::new(stub.clone(), &CATALOG);

        for plate in ["AB1234", "", "ABCD123", "1234ABC", "ABC12345", "ABC1DD3", "---"] {
            assert!(service.lookup(plate).await.is_err(), "{} debería ser inválida", plate);
        }
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_falls_back_deterministically() {
        let stub = StubSource::failing();
        let service = PlateLookupService::new(stub.clone(), &CATALOG);
        let generator = DeterministicMockGenerator::new(&CATALOG);

        let first = service.lookup("abc1234").await.unwrap();
        let second = service.lookup("ABC-1234").await.unwrap();

        assert_eq!(stub.calls(), 2);
        assert!(matches!(
            first.source,
            LookupSource::Fallback(FallbackReason::UpstreamUnavailable(_))
        ));
        assert_eq!(first.record, second.record);
        assert_eq!(first.record, generator.generate("ABC1234"));
        assert_eq!(first.record.plate, "ABC-1234");
    }

    #[tokio::test]
    async fn test_mercosul_plate_is_accepted() {
        let service = PlateLookupService::new(StubSource::failing(), &CATALOG);
        let lookup = service.lookup("abc1d23").await.unwrap();
        assert_eq!(lookup.record.plate, "ABC-1D23");
    }

    #[tokio::test]
    async fn test_three_rows_build_a_record_with_defaults() {
        let html = format!(
            "<html><table>{}{}{}</table></html>",
            row("Marca", "CHEVROLET"),
            row("Modelo", "CELTA 1.0"),
            row("Cor", "PRETA")
        );
        let service = PlateLookupService::new(StubSource::serving(&html), &CATALOG);
        let lookup = service.lookup("ABC1234").await.unwrap();

        assert_eq!(lookup.source, LookupSource::Scraped { fields: 3 });
        let r = lookup.record;
        assert_eq!(r.brand, "CHEVROLET");
        assert_eq!(r.model, "CELTA 1.0");
        assert_eq!(r.color, "PRETA");
        assert_eq!(r.year, DEFAULT_YEAR);
        assert_eq!(r.fuel_type, DEFAULT_FUEL);
        assert_eq!(r.status, RegistrationStatus::InCirculation);
        assert_eq!(r.municipality, DEFAULT_MUNICIPALITY);
        assert_eq!(r.state, DEFAULT_STATE);
        assert_eq!(r.chassis.len(), 17);
        assert!(r.chassis.starts_with("9BW"));
        assert_eq!(r.registration_id.len(), 9);
        assert!((1..=4).contains(&r.owner_count));
    }

    #[tokio::test]
    async fn test_two_rows_fall_back_to_generator() {
        let html = row("Marca", "CHEVROLET") + &row("Modelo", "CELTA 1.0");
        let service = PlateLookupService::new(StubSource::serving(&html), &CATALOG);
        let lookup = service.lookup("ABC1234").await.unwrap();

        assert_eq!(
            lookup.source,
            LookupSource::Fallback(FallbackReason::ExtractionInsufficient { found: 2 })
        );
        assert_eq!(lookup.record, DeterministicMockGenerator::new(&CATALOG).generate("ABC1234"));
        assert_ne!(lookup.record.model, "CELTA 1.0");
    }

    #[tokio::test]
    async fn test_scraped_values_are_used_verbatim() {
        let html = [
            row("Ano Modelo", "2019/2020"),
            row("Situação", "EM CIRCULAÇÃO"),
            row("Município", "RECIFE"),
            row("UF", "PE"),
        ]
        .concat();
        let service = PlateLookupService::new(StubSource::serving(&html), &CATALOG);
        let r = service.lookup("ABC1234").await.unwrap().record;

        assert_eq!(r.year, 2019);
        assert_eq!(r.status, RegistrationStatus::Other("EM CIRCULAÇÃO".to_string()));
        assert_eq!(r.municipality, "RECIFE");
        assert_eq!(r.state, "PE");
        assert_eq!(r.brand, DEFAULT_BRAND);
        assert_eq!(r.model, DEFAULT_MODEL);
    }

    async fn location_for(extra_rows: &str) -> (String, String) {
        let html = row("Marca", "FIAT") + &row("Modelo", "UNO 1.0") + &row("Cor", "AZUL") + extra_rows;
        let service = PlateLookupService::new(StubSource::serving(&html), &CATALOG);
        let r = service.lookup("ABC1234").await.unwrap().record;
        (r.municipality, r.state)
    }

    fn pair(m: &str, s: &str) -> (String, String) {
        (m.to_string(), s.to_string())
    }

    #[tokio::test]
    async fn test_partial_location_keeps_scraped_values() {
        // Municipio del catálogo: la UF se completa con su par
        assert_eq!(location_for(&row("Município", "CURITIBA")).await, pair("CURITIBA", "PR"));
        assert_eq!(location_for(&row("Município", "Curitiba")).await, pair("Curitiba", "PR"));

        // Municipio fuera del catálogo: se conserva, UF por defecto
        assert_eq!(location_for(&row("Município", "RECIFE")).await, pair("RECIFE", DEFAULT_STATE));

        // Solo UF: se conserva, municipio del catálogo o por defecto
        assert_eq!(location_for(&row("UF", "BA")).await, pair("SALVADOR", "BA"));
        assert_eq!(location_for(&row("UF", "PE")).await, pair(DEFAULT_MUNICIPALITY, "PE"));

        assert_eq!(
            location_for(&(row("Município", "RECIFE") + &row("UF", "PE"))).await,
            pair("RECIFE", "PE")
        );
    }

    #[test]
    fn test_simulate_validates_and_generates() {
        let service = PlateLookupService::new(StubSource::failing(), &CATALOG);
        assert!(service.simulate("AB1234").is_err());
        assert_eq!(
            service.simulate("abc 1234").unwrap(),
            DeterministicMockGenerator::new(&CATALOG).generate("ABC1234")
        );
    }
}
