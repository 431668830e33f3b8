//! Thread-safe random number generation adapter.
//!
//! Implements `RandomPort` using `rand::thread_rng()`.

use rand::Rng;

use chorequest_engine_ports::outbound::RandomPort;

/// Production random number generator using thread-local RNG.
///
/// The domain layer takes randomness as injected closures; services build
/// those closures over this adapter, so `rand` stays out of everything
/// below here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngAdapter;

impl ThreadRngAdapter {
    /// Create a new ThreadRngAdapter.
    pub fn new() -> Self {
        Self
    }
}

impl RandomPort for ThreadRngAdapter {
    fn random_f64(&self) -> f64 {
        rand::thread_rng().gen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_f64_bounds() {
        let rng = ThreadRngAdapter::new();
        for _ in 0..100 {
            let value = rng.random_f64();
            assert!((0.0..1.0).contains(&value), "Value {} out of range", value);
        }
    }

    #[test]
    fn test_random_index_bounds() {
        let rng = ThreadRngAdapter::new();
        for _ in 0..100 {
            let index = rng.random_index(3);
            assert!(index < 3, "Index {} out of range", index);
        }
    }
}
