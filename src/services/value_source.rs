//! Fuentes de valores para rellenar registros
//!
//! Dos estrategias detrás de la misma interfaz:
//! - `SeededFiller`: determinística, sembrada con la placa (fallback completo)
//! - `RandomFiller`: entropía real, para completar campos tras un scraping
//!
//! Cada campo consume un offset distinto, así los campos quedan
//! decorrelacionados aunque compartan la misma semilla.

use rand::Rng;

/// Interfaz común de sorteo de valores
pub trait ValueSource {
    /// Entero en el rango inclusivo `[min, max]` para el offset `offset`
    fn draw(&mut self, offset: u64, min: u64, max: u64) -> u64;

    /// Índice válido para una colección de `len` elementos (`len > 0`)
    fn pick(&mut self, offset: u64, len: usize) -> usize {
        self.draw(offset, 0, len.saturating_sub(1) as u64) as usize
    }
}

/// Hash rodante de la placa: `seed * 31 + char` en aritmética i32, valor absoluto
pub fn plate_seed(plate: &str) -> u32 {
    let hash = plate
        .chars()
        .fold(0i32, |acc, c| acc.wrapping_mul(31).wrapping_add(c as i32));
    hash.unsigned_abs()
}

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Finalizador de SplitMix64
fn splitmix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Reducir un valor de 64 bits al rango inclusivo `[min, max]`
fn bounded(value: u64, min: u64, max: u64) -> u64 {
    if max <= min {
        return min;
    }
    let span = max - min + 1;
    min + value % span
}

/// Fuente determinística derivada de una semilla base
#[derive(Debug, Clone, Copy)]
pub struct SeededFiller {
    seed: u64,
}

impl SeededFiller {
    pub fn new(seed: u32) -> Self {
        Self { seed: seed as u64 }
    }

    /// Semilla a partir de una placa normalizada
    pub fn from_plate(plate: &str) -> Self {
        Self::new(plate_seed(plate))
    }
}

impl ValueSource for SeededFiller {
    fn draw(&mut self, offset: u64, min: u64, max: u64) -> u64 {
        let mixed = splitmix64(self.seed.wrapping_add(offset.wrapping_mul(GOLDEN_GAMMA)));
        bounded(mixed, min, max)
    }
}

/// Fuente con entropía real; el offset se ignora
pub struct RandomFiller<R: Rng> {
    rng: R,
}

impl RandomFiller<rand::rngs::ThreadRng> {
    pub fn thread_local() -> Self {
        Self { rng: rand::thread_rng() }
    }
}

impl<R: Rng> RandomFiller<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> ValueSource for RandomFiller<R> {
    fn draw(&mut self, _offset: u64, min: u64, max: u64) -> u64 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}
