//! Generador determinístico de registros
//!
//! Dada una placa (la semilla), sintetiza un registro completo y coherente.
//! La misma placa produce siempre el mismo registro. Las reglas de cada
//! campo se comparten con el servicio de consulta, que las usa con una
//! fuente aleatoria para completar lo que el scraping no extrae.

use crate::models::catalog::Catalog;
use crate::models::vehicle::{
    CommentPolarity, HistoryEvent, InsuranceInfo, InsuranceStatus, Lien, MarketValue,
    RatingComment, Ratings, RegistrationStatus, RenewalInfo, RenewalStatus, TaxInfo, TaxStatus,
    VehicleRecord,
};
use crate::services::value_source::{SeededFiller, ValueSource};
use crate::utils::validation::format_plate;

/// Offsets de sorteo, uno por campo
mod offsets {
    pub const BRAND: u64 = 0;
    pub const MODEL: u64 = 1;
    pub const YEAR: u64 = 2;
    pub const COLOR: u64 = 3;
    pub const FUEL: u64 = 4;
    /// Primer carácter del chasis; los 14 siguientes usan 5..=18
    pub const CHASSIS: u64 = 5;
    pub const REGISTRATION_ID: u64 = 19;
    pub const STATUS: u64 = 20;
    pub const MUNICIPALITY: u64 = 21;
    pub const OWNERS: u64 = 22;
    pub const LIENS: u64 = 23;
    pub const FINES: u64 = 24;
    pub const TAX_STATUS: u64 = 25;
    pub const TAX_AMOUNT: u64 = 26;
    pub const RENEWAL: u64 = 27;
    pub const INSURANCE: u64 = 28;
    pub const RATINGS_POSITIVE: u64 = 29;
    pub const RATINGS_NEGATIVE: u64 = 30;
    pub const MARKET_VALUE: u64 = 31;
}

pub const YEAR_BASE: i32 = 2015;
pub const YEAR_SPAN: u64 = 8;
pub const CHASSIS_GENERATED_LEN: u64 = 14;

/// Campos que el scraping nunca intenta extraer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplementaryFields {
    pub owner_count: u32,
    pub liens: Vec<Lien>,
    pub fine_points: u32,
    pub tax: TaxInfo,
    pub registration_renewal: RenewalInfo,
    pub insurance: InsuranceInfo,
    pub ratings: Ratings,
    pub event_history: Vec<HistoryEvent>,
    pub market_value: MarketValue,
}

/// Chasis: prefijo fijo + 14 caracteres, cada uno con su propio offset
pub fn draw_chassis<S: ValueSource>(source: &mut S, catalog: &Catalog) -> String {
    let mut chassis = String::with_capacity(17);
    chassis.push_str(catalog.chassis_prefix);
    for i in 0..CHASSIS_GENERATED_LEN {
        let idx = source.pick(offsets::CHASSIS + i, catalog.chassis_alphabet.len());
        chassis.push(catalog.chassis_alphabet[idx] as char);
    }
    chassis
}

/// RENAVAM de 9 dígitos
pub fn draw_registration_id<S: ValueSource>(source: &mut S) -> String {
    (100_000_000 + source.draw(offsets::REGISTRATION_ID, 0, 899_999_999)).to_string()
}

/// Propietarios, restricciones, multas, IPVA, licenciamiento, seguro,
/// avaliações, historial y valor FIPE
pub fn draw_supplementary<S: ValueSource>(source: &mut S, catalog: &Catalog) -> SupplementaryFields {
    let owner_count = source.draw(offsets::OWNERS, 1, 4) as u32;

    let liens = if source.draw(offsets::LIENS, 0, 9) >= 8 {
        vec![Lien::FiduciaryLien]
    } else {
        Vec::new()
    };

    let fine_points = source.draw(offsets::FINES, 0, 4) as u32;

    let tax = TaxInfo {
        status: if source.draw(offsets::TAX_STATUS, 0, 9) >= 4 {
            TaxStatus::Paid
        } else {
            TaxStatus::Pending
        },
        amount: 800 + source.draw(offsets::TAX_AMOUNT, 0, 2000) as u32,
    };

    let registration_renewal = RenewalInfo {
        status: if source.draw(offsets::RENEWAL, 0, 9) >= 3 {
            RenewalStatus::Current
        } else {
            RenewalStatus::Expired
        },
        due_date: catalog.renewal_due_date.to_string(),
    };

    let insurance = InsuranceInfo {
        status: if source.draw(offsets::INSURANCE, 0, 9) >= 4 {
            InsuranceStatus::Active
        } else {
            InsuranceStatus::Inactive
        },
        valid_until: catalog.insurance_valid_until.to_string(),
    };

    let ratings = Ratings {
        positive: source.draw(offsets::RATINGS_POSITIVE, 5, 19) as u32,
        negative: source.draw(offsets::RATINGS_NEGATIVE, 0, 4) as u32,
        comments: catalog
            .comments
            .iter()
            .map(|c| RatingComment {
                polarity: if c.positive {
                    CommentPolarity::Positive
                } else {
                    CommentPolarity::Negative
                },
                text: c.text.to_string(),
                date: c.date.to_string(),
                author: c.author.to_string(),
            })
            .collect(),
    };

    let conditional = if fine_points > 0 {
        catalog.fine_event
    } else {
        catalog.inspection_event
    };
    let event_history = catalog
        .history
        .iter()
        .chain(std::iter::once(&conditional))
        .map(|e| HistoryEvent {
            date: e.date.to_string(),
            event: e.event.to_string(),
            location: e.location.to_string(),
        })
        .collect();

    let market_value = MarketValue {
        amount: 15_000 + source.draw(offsets::MARKET_VALUE, 0, 50_000) as u32,
        reference_month: catalog.market_reference_month.to_string(),
    };

    SupplementaryFields {
        owner_count,
        liens,
        fine_points,
        tax,
        registration_renewal,
        insurance,
        ratings,
        event_history,
        market_value,
    }
}

/// Generador determinístico basado en la placa
#[derive(Debug, Clone, Copy)]
pub struct DeterministicMockGenerator {
    catalog: &'static Catalog,
}

impl DeterministicMockGenerator {
    pub fn new(catalog: &'static Catalog) -> Self {
        Self { catalog }
    }

    /// Generar el registro completo para una placa normalizada
    pub fn generate(&self, seed_plate: &str) -> VehicleRecord {
        let mut source = SeededFiller::from_plate(seed_plate);
        self.generate_with(&mut source, seed_plate)
    }

    /// Generar con cualquier fuente de valores
    pub fn generate_with<S: ValueSource>(&self, source: &mut S, plate: &str) -> VehicleRecord {
        let catalog = self.catalog;

        let brand = &catalog.brands[source.pick(offsets::BRAND, catalog.brands.len())];
        let model = brand.models[source.pick(offsets::MODEL, brand.models.len())];
        let year = YEAR_BASE + source.draw(offsets::YEAR, 0, YEAR_SPAN) as i32;
        let color = catalog.colors[source.pick(offsets::COLOR, catalog.colors.len())];
        let fuel_type = catalog.fuels[source.pick(offsets::FUEL, catalog.fuels.len())];
        let chassis = draw_chassis(source, catalog);
        let registration_id = draw_registration_id(source);

        let status = if source.draw(offsets::STATUS, 0, 9) == 0 {
            RegistrationStatus::Deregistered
        } else {
            RegistrationStatus::InCirculation
        };

        // Un solo índice para municipio y UF
        let place = catalog.municipalities[source.pick(offsets::MUNICIPALITY, catalog.municipalities.len())];

        let extra = draw_supplementary(source, catalog);

        VehicleRecord {
            plate: format_plate(plate),
            brand: brand.name.to_string(),
            model: model.to_string(),
            year,
            color: color.to_string(),
            fuel_type: fuel_type.to_string(),
            chassis,
            registration_id,
            status,
            municipality: place.municipality.to_string(),
            state: place.state.to_string(),
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
    use crate::services::value_source::RandomFiller;

    fn sample_plates() -> Vec<String> {
        let mut plates = vec!["ABC1234".to_string(), "ABC1D23".to_string(), "ZZZ9Z99".to_string()];
        for a in b'A'..=b'Z' {
            for n in 0..10u8 {
                plates.push(format!("{}QX{}0{}7", a as char, n, (b'A' + n) as char));
                plates.push(format!("{}{}K{:04}", a as char, a as char, n as u32 * 997));
            }
        }
        plates
    }

    #[test]
    fn test_generate_is_deterministic() {
        let generator = DeterministicMockGenerator::new(&CATALOG);
        for plate in sample_plates() {
            let first = serde_json::to_vec(&generator.generate(&plate)).unwrap();
            let second = serde_json::to_vec(&generator.generate(&plate)).unwrap();
            assert_eq!(first, second, "registro distinto para {}", plate);
        }
    }

    #[test]
    fn test_catalog_pairings_hold() {
        let generator = DeterministicMockGenerator::new(&CATALOG);
        for plate in sample_plates() {
            let record = generator.generate(&plate);
            let brand = CATALOG.brand(&record.brand).expect("marca del catálogo");
            assert!(brand.models.contains(&record.model.as_str()));
            assert_eq!(CATALOG.state_of(&record.municipality), Some(record.state.as_str()));
        }
    }

    #[test]
    fn test_numeric_bounds_hold() {
        let generator = DeterministicMockGenerator::new(&CATALOG);
        for plate in sample_plates() {
            let r = generator.generate(&plate);
            assert!((2015..=2023).contains(&r.year));
            assert!((1..=4).contains(&r.owner_count));
            assert!(r.fine_points <= 4);
            assert!((5..=19).contains(&r.ratings.positive));
            assert!(r.ratings.negative <= 4);
            assert!((800..=2800).contains(&r.tax.amount));
            assert!((15_000..=65_000).contains(&r.market_value.amount));
            assert_eq!(r.chassis.len(), 17);
            assert!(r.chassis.starts_with("9BW"));
            assert!(r.chassis.chars().all(|c| c.is_ascii_alphanumeric()));
            assert_eq!(r.registration_id.len(), 9);
            assert!(r.registration_id.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_history_depends_on_fines() {
        let generator = DeterministicMockGenerator::new(&CATALOG);
        for plate in sample_plates() {
            let r = generator.generate(&plate);
            assert_eq!(r.event_history.len(), 3);
            let last = &r.event_history[2].event;
            if r.fine_points > 0 {
                assert_eq!(last, "MULTA POR VELOCIDADE");
            } else {
                assert_eq!(last, "VISTORIA APROVADA");
            }
            assert_eq!(r.ratings.comments.len(), 3);
        }
    }

    #[test]
    fn test_plate_is_formatted() {
        let generator = DeterministicMockGenerator::new(&CATALOG);
        assert_eq!(generator.generate("ABC1234").plate, "ABC-1234");
        assert_eq!(generator.generate("ABC1D23").plate, "ABC-1D23");
    }

    #[test]
    fn test_random_source_respects_same_rules() {
        let mut source = RandomFiller::thread_local();
        for _ in 0..200 {
            let extra = draw_supplementary(&mut source, &CATALOG);
            assert!((1..=4).contains(&extra.owner_count));
            assert!(extra.fine_points <= 4);
            assert!(extra.liens.len() <= 1);
            assert_eq!(draw_chassis(&mut source, &CATALOG).len(), 17);
            assert_eq!(draw_registration_id(&mut source).len(), 9);
        }
    }
}
