use crate::error::{Error, Result};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const DEFAULT_MAX_HEIGHT: usize = 32;

/// Construction-time configuration of a `SkipList`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub max_height: usize,
    /// Fixed seed for reproducible heights, entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_height: DEFAULT_MAX_HEIGHT,
            seed: None,
        }
    }
}

impl Options {
    pub fn max_height(mut self, max_height: usize) -> Self {
        self.max_height = max_height;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_height == 0 {
            debug!("rejecting skiplist max height {}", self.max_height);
            return Err(Error::InvalidMaxHeight(self.max_height));
        }
        Ok(())
    }

    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
