use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Seeded random source for generating operation sequences.
///
/// Uses the xoshiro256** PRNG, so a run is reproducible from its seed.
///
/// # Examples
///
/// ```
/// use rb_trace::fuzzer::Fuzzer;
///
/// let mut a = Fuzzer::from_u64(7);
/// let mut b = Fuzzer::from_u64(7);
/// assert_eq!(a.random_int(0, 200), b.random_int(0, 200));
///
/// let n = a.random_int(1, 10);
/// assert!((1..=10).contains(&n));
/// ```
pub struct Fuzzer {
    /// The seed used to initialize the PRNG.
    pub seed: [u8; 32],
    rng: Xoshiro256StarStar,
}

impl Fuzzer {
    /// Create a new fuzzer with an optional seed.
    ///
    /// If no seed is provided, a random seed will be generated using `OsRng`.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });

        Self {
            seed,
            rng: Xoshiro256StarStar::from_seed(seed),
        }
    }

    /// Create a fuzzer from a short numeric seed, as taken on the command line.
    pub fn from_u64(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        for chunk in bytes.chunks_mut(8) {
            chunk.copy_from_slice(&seed.to_le_bytes());
        }
        Self::new(Some(bytes))
    }

    /// Random integer in `[min, max]` (inclusive).
    pub fn random_int(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }

    /// `true` with the given probability.
    pub fn random_bool(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }

    /// Random index into a collection of `len` elements.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_int_stays_in_range() {
        let mut fuzzer = Fuzzer::new(None);
        for _ in 0..100 {
            let n = fuzzer.random_int(5, 15);
            assert!((5..=15).contains(&n));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Fuzzer::new(Some([1u8; 32]));
        let mut b = Fuzzer::new(Some([1u8; 32]));
        for _ in 0..10 {
            assert_eq!(a.random_int(0, 1000), b.random_int(0, 1000));
        }
    }

    #[test]
    fn index_stays_below_len() {
        let mut fuzzer = Fuzzer::from_u64(3);
        for len in 1..20 {
            assert!(fuzzer.index(len) < len);
        }
    }

    #[test]
    fn random_bool_produces_both_values() {
        let mut fuzzer = Fuzzer::from_u64(11);
        let draws: Vec<bool> = (0..100).map(|_| fuzzer.random_bool(0.5)).collect();
        assert!(draws.contains(&true) && draws.contains(&false));
    }
}
