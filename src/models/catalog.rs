//! Catálogo estático de vehículos
//!
//! Datos de referencia compartidos por el generador determinístico y por el
//! servicio de consulta: marcas con sus modelos, colores, combustibles,
//! municipios con su UF y el contenido fijo (comentarios, historial).
//! Es la única copia de estos datos en todo el sistema.

/// Marca con el subconjunto de modelos que le pertenece
#[derive(Debug, Clone, Copy)]
pub struct BrandEntry {
    pub name: &'static str,
    pub models: &'static [&'static str],
}

/// Municipio y la UF a la que pertenece (siempre se proyectan juntos)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MunicipalityEntry {
    pub municipality: &'static str,
    pub state: &'static str,
}

/// Comentario fijo mostrado en la pestaña de avaliações
#[derive(Debug, Clone, Copy)]
pub struct CannedComment {
    pub positive: bool,
    pub text: &'static str,
    pub date: &'static str,
    pub author: &'static str,
}

/// Evento fijo del historial
#[derive(Debug, Clone, Copy)]
pub struct CannedEvent {
    pub date: &'static str,
    pub event: &'static str,
    pub location: &'static str,
}

/// Catálogo inmutable inyectado en los componentes
#[derive(Debug)]
pub struct Catalog {
    pub brands: &'static [BrandEntry],
    pub colors: &'static [&'static str],
    pub fuels: &'static [&'static str],
    pub municipalities: &'static [MunicipalityEntry],
    pub chassis_prefix: &'static str,
    pub chassis_alphabet: &'static [u8],
    pub comments: &'static [CannedComment],
    pub history: &'static [CannedEvent],
    /// Evento condicional: multa si hay multas, vistoria si no
    pub fine_event: CannedEvent,
    pub inspection_event: CannedEvent,
    pub renewal_due_date: &'static str,
    pub insurance_valid_until: &'static str,
    pub market_reference_month: &'static str,
}

impl Catalog {
    /// Busca una marca por nombre
    pub fn brand(&self, name: &str) -> Option<&BrandEntry> {
        self.brands.iter().find(|b| b.name == name)
    }

    /// UF emparejada con un municipio del catálogo
    pub fn state_of(&self, municipality: &str) -> Option<&'static str> {
        self.municipalities
            .iter()
            .find(|m| m.municipality == municipality)
            .map(|m| m.state)
    }
}

const BRANDS: &[BrandEntry] = &[
    BrandEntry { name: "VOLKSWAGEN", models: &["GOL 1.0 FLEX", "POLO 1.6", "JETTA 2.0", "TIGUAN 2.0"] },
    BrandEntry { name: "CHEVROLET", models: &["ONIX 1.0", "CRUZE 1.4", "TRACKER 1.0", "S10 2.8"] },
    BrandEntry { name: "FIAT", models: &["UNO 1.0", "PALIO 1.0", "STRADA 1.4", "TORO 1.8"] },
    BrandEntry { name: "FORD", models: &["KA 1.0", "FOCUS 2.0", "RANGER 3.2", "ECOSPORT 1.6"] },
    BrandEntry { name: "TOYOTA", models: &["COROLLA 2.0", "HILUX 2.8", "RAV4 2.5", "ETIOS 1.5"] },
    BrandEntry { name: "HONDA", models: &["CIVIC 2.0", "FIT 1.5", "HR-V 1.8", "CR-V 1.5"] },
    BrandEntry { name: "HYUNDAI", models: &["HB20 1.0", "CRETA 1.6", "TUCSON 2.0", "ELANTRA 2.0"] },
];

const MUNICIPALITIES: &[MunicipalityEntry] = &[
    MunicipalityEntry { municipality: "SÃO PAULO", state: "SP" },
    MunicipalityEntry { municipality: "RIO DE JANEIRO", state: "RJ" },
    MunicipalityEntry { municipality: "BELO HORIZONTE", state: "MG" },
    MunicipalityEntry { municipality: "SALVADOR", state: "BA" },
    MunicipalityEntry { municipality: "BRASÍLIA", state: "DF" },
    MunicipalityEntry { municipality: "CURITIBA", state: "PR" },
];

const COMMENTS: &[CannedComment] = &[
    CannedComment {
        positive: true,
        text: "Veículo muito confiável e econômico. Recomendo!",
        date: "15/03/2024",
        author: "João S.",
    },
    CannedComment {
        positive: true,
        text: "Excelente custo-benefício, nunca me deu problemas.",
        date: "22/01/2024",
        author: "Maria L.",
    },
    CannedComment {
        positive: false,
        text: "Apresentou alguns problemas elétricos.",
        date: "10/12/2023",
        author: "Carlos M.",
    },
];

const HISTORY: &[CannedEvent] = &[
    CannedEvent { date: "15/03/2024", event: "TRANSFERÊNCIA DE PROPRIEDADE", location: "DETRAN-SP" },
    CannedEvent { date: "22/08/2023", event: "LICENCIAMENTO ANUAL", location: "DETRAN-SP" },
];

/// Catálogo por defecto del sistema
pub static CATALOG: Catalog = Catalog {
    brands: BRANDS,
    colors: &["BRANCA", "PRATA", "PRETA", "VERMELHA", "AZUL", "CINZA"],
    fuels: &["FLEX", "GASOLINA", "DIESEL", "ETANOL"],
    municipalities: MUNICIPALITIES,
    chassis_prefix: "9BW",
    chassis_alphabet: b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789",
    comments: COMMENTS,
    history: HISTORY,
    fine_event: CannedEvent {
        date: "10/05/2023",
        event: "MULTA POR VELOCIDADE",
        location: "MARGINAL TIETÊ - SP",
    },
    inspection_event: CannedEvent {
        date: "10/05/2023",
        event: "VISTORIA APROVADA",
        location: "MARGINAL TIETÊ - SP",
    },
    renewal_due_date: "31/12/2024",
    insurance_valid_until: "15/08/2025",
    market_reference_month: "DEZEMBRO/2024",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_brand_has_models() {
        for brand in CATALOG.brands {
            assert!(!brand.models.is_empty(), "{} sin modelos", brand.name);
        }
    }

    #[test]
    fn test_state_lookup_follows_pairing() {
        assert_eq!(CATALOG.state_of("SÃO PAULO"), Some("SP"));
        assert_eq!(CATALOG.state_of("CURITIBA"), Some("PR"));
        assert_eq!(CATALOG.state_of("RECIFE"), None);
    }

    #[test]
    fn test_chassis_prefix_leaves_room_for_fourteen_chars() {
        assert_eq!(CATALOG.chassis_prefix.len() + 14, 17);
        assert_eq!(CATALOG.chassis_alphabet.len(), 36);
    }
}
