//! Unique-set sampler behind the lottery quick pick.
//!
//! Draws uniformly from `[1, max]` and rejects repeats until the set is full.
//! A request for more numbers than the range holds is refused up front
//! instead of spinning forever.

use std::collections::BTreeSet;

use rand::Rng;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("cannot draw {count} distinct numbers from 1..={max}")]
    CountExceedsRange { count: u32, max: u32 },
}

/// Distinct numbers in ascending order, all within `[1, max]`.
///
/// Only the sampler builds one, so the invariant holds for every value a
/// caller can observe. Regenerating a ticket swaps the whole set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NumberSet(Vec<u32>);

impl NumberSet {
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Draws `count` distinct numbers from `[1, max]` using the thread-local RNG.
pub fn sample(count: u32, max: u32) -> Result<NumberSet, SampleError> {
    sample_with(&mut rand::thread_rng(), count, max)
}

/// Same as [`sample`] but over a caller-supplied RNG.
pub fn sample_with<R: Rng + ?Sized>(
    rng: &mut R,
    count: u32,
    max: u32,
) -> Result<NumberSet, SampleError> {
    if count > max {
        return Err(SampleError::CountExceedsRange { count, max });
    }

    let target = count as usize;
    let mut picked = BTreeSet::new();
    while picked.len() < target {
        picked.insert(rng.gen_range(1..=max));
    }

    Ok(NumberSet(picked.into_iter().collect()))
}
