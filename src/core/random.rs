use crate::utils::error::{RecommendationError, Result};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Mutex;

/// Where selection draws its randomness from.
///
/// `Thread` uses the calling thread's generator and shares nothing between
/// calls. `Seeded` replays a fixed sequence; concurrent callers take turns on
/// the lock.
#[derive(Debug)]
pub enum RandomSource {
    Thread,
    Seeded(Mutex<StdRng>),
}

impl RandomSource {
    pub fn thread() -> Self {
        Self::Thread
    }

    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(Mutex::new(StdRng::seed_from_u64(seed)))
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::thread, Self::seeded)
    }

    pub fn is_seeded(&self) -> bool {
        matches!(self, Self::Seeded(_))
    }

    /// Runs `f` with exclusive access to a generator.
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut dyn RngCore) -> T) -> Result<T> {
        match self {
            Self::Thread => {
                let mut rng = rand::rng();
                Ok(f(&mut rng))
            }
            Self::Seeded(rng) => {
                let mut guard = rng.lock().map_err(|_| RecommendationError::StateError {
                    message: "seeded random source lock poisoned".to_string(),
                })?;
                Ok(f(&mut *guard))
            }
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::thread()
    }
}
