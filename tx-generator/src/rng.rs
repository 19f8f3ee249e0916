use rand::{Error, Rng, RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;
use rust_decimal::Decimal;

use crate::transaction::NUM_DECIMAL_PLACES;

/// The single seeded stream every generation step draws from
#[derive(Debug, Clone)]
pub struct DatasetRng {
    inner: Pcg64Mcg,
}

impl DatasetRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        DatasetRng {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Uniform integer in `[low, high]`, both ends included.
    pub fn int_between(&mut self, low: u32, high: u32) -> u32 {
        self.gen_range(low..=high)
    }

    /// Uniform float in `[low, high]` rounded half away from zero to cents.
    #[allow(clippy::cast_possible_truncation)]
    pub fn uniform_2dp(&mut self, low: f64, high: f64) -> Decimal {
        let value: f64 = self.gen_range(low..=high);
        let cents = (value * 100.0).round() as i64;
        Decimal::new(cents, NUM_DECIMAL_PLACES)
    }

    /// # Panics
    /// If `items` is empty
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.gen_range(0..items.len())]
    }
}

impl RngCore for DatasetRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.inner.try_fill_bytes(dest)
    }
}
