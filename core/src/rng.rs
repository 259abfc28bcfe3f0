//! Deterministic random number generation.
//!
//! RULE: Nothing in the staffing core may call any platform RNG.
//! All randomness flows through a LineRng handed in by the caller,
//! so every randomized assignment pass is reproducible from a seed.
//! Tests always construct seeded instances; the runner seeds from
//! entropy once at startup.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// The single random source for one automation pass.
pub struct LineRng {
    inner: Pcg64Mcg,
}

impl LineRng {
    /// Fully reproducible stream from an explicit seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Entropy-seeded stream for interactive use.
    pub fn from_entropy() -> Self {
        Self {
            inner: Pcg64Mcg::from_entropy(),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a usize in [0, n).
    pub fn next_usize_below(&mut self, n: usize) -> usize {
        assert!(n > 0, "n must be > 0");
        (self.inner.next_u64() % n as u64) as usize
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform in-place Fisher–Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_usize_below(i + 1);
            items.swap(i, j);
        }
    }
}
