//! Random number generation port for engine-side services.
//!
//! The domain's game systems take randomness as an injected closure; this
//! port is where that closure comes from at the service layer, enabling:
//! - Deterministic testing with scripted draw sequences
//! - Reproducible reward scenarios
//! - Clean hexagonal architecture (no `rand` below the adapters)

/// Random number generation abstraction for engine-side services.
///
/// # Implementations
///
/// - `ThreadRngAdapter` in engine-adapters (production, uses `rand::thread_rng()`)
/// - `MockRandomPort` via mockall (testing)
/// - [`FixedRandomPort`] for deterministic testing (scripted draw sequences)
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Generate a uniform f64 in `[0.0, 1.0)`
    fn random_f64(&self) -> f64;

    /// Generate a uniform index in `[0, len)`; `len` must be non-zero
    fn random_index(&self, len: usize) -> usize {
        ((self.random_f64() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

/// Fixed random port for deterministic testing.
///
/// Returns draws from a provided sequence, cycling when exhausted.
/// Thread-safe via an atomic cursor.
#[derive(Debug)]
pub struct FixedRandomPort {
    draws: Vec<f64>,
    cursor: std::sync::atomic::AtomicUsize,
}

impl Clone for FixedRandomPort {
    fn clone(&self) -> Self {
        Self {
            draws: self.draws.clone(),
            cursor: std::sync::atomic::AtomicUsize::new(
                self.cursor.load(std::sync::atomic::Ordering::SeqCst),
            ),
        }
    }
}

impl FixedRandomPort {
    /// Create a port that replays the given draw sequence.
    pub fn new(draws: Vec<f64>) -> Self {
        Self {
            draws,
            cursor: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Create a port that always returns the same draw.
    pub fn constant(draw: f64) -> Self {
        Self::new(vec![draw])
    }
}

impl RandomPort for FixedRandomPort {
    fn random_f64(&self) -> f64 {
        let index = self
            .cursor
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.draws[index % self.draws.len()].clamp(0.0, 0.999_999)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_random_port_constant() {
        let rng = FixedRandomPort::constant(0.25);
        assert_eq!(rng.random_f64(), 0.25);
        assert_eq!(rng.random_f64(), 0.25);
    }

    #[test]
    fn test_fixed_random_port_cycles() {
        let rng = FixedRandomPort::new(vec![0.1, 0.5, 0.9]);
        assert_eq!(rng.random_f64(), 0.1);
        assert_eq!(rng.random_f64(), 0.5);
        assert_eq!(rng.random_f64(), 0.9);
        // Cycles back
        assert_eq!(rng.random_f64(), 0.1);
    }

    #[test]
    fn test_random_index_covers_range() {
        let rng = FixedRandomPort::new(vec![0.0, 0.34, 0.99]);
        assert_eq!(rng.random_index(3), 0);
        assert_eq!(rng.random_index(3), 1);
        assert_eq!(rng.random_index(3), 2);
    }

    #[test]
    fn test_draws_are_clamped_below_one() {
        let rng = FixedRandomPort::constant(1.0);
        assert!(rng.random_f64() < 1.0);
    }
}
