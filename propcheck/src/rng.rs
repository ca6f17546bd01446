//! Deterministic random source.
//!
//! [`RandomState`] is a plain value. Advancing it never mutates anything: every
//! call returns the drawn value together with the next state, so a generator
//! that is handed the same state always makes the same draw.

use std::time::{SystemTime, UNIX_EPOCH};

const MULTIPLIER: i64 = 0x5DEE_CE66D;
const INCREMENT: i64 = 0xB;
const MASK: i64 = (1 << 48) - 1;

/// Odd 64-bit constant used to spread worker indices across the seed space.
const SPLIT_GAMMA: i64 = 0x9E37_79B9_7F4A_7C15_u64 as i64;

/// Immutable position of the linear-congruential random source.
///
/// There is no `Default`; pick [`RandomState::new`] for a reproducible run or
/// [`RandomState::from_clock`] for an exploratory one.
///
/// ```compile_fail
/// let _state = propcheck::RandomState::default();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct RandomState {
    seed: i64,
}

impl RandomState {
    /// Create a state from a literal seed, for reproducible runs
    pub fn new(seed: i64) -> Self {
        Self { seed }
    }

    /// Create a state seeded from the wall clock, for exploratory runs
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as i64)
            .unwrap_or_default();
        Self::new(nanos)
    }

    /// The raw seed carried by this state
    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Draw the next value and the state that follows it.
    ///
    /// The seed advances as `(seed * 0x5DEECE66D + 0xB) mod 2^48`, and the
    /// value is the top 32 of those 48 bits read as a signed integer.
    pub fn next(self) -> (i32, RandomState) {
        let next_seed = self
            .seed
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT)
            & MASK;
        ((next_seed >> 16) as i32, RandomState::new(next_seed))
    }

    /// Derive an independent state for the `index`-th parallel worker
    pub fn derive(self, index: usize) -> RandomState {
        let offset = SPLIT_GAMMA.wrapping_mul(index as i64 + 1);
        RandomState::new(self.seed ^ offset).next().1
    }
}

impl From<i64> for RandomState {
    fn from(seed: i64) -> Self {
        Self::new(seed)
    }
}

/// Free-function form of [`RandomState::next`]
pub fn next_int(state: RandomState) -> (i32, RandomState) {
    state.next()
}

/// Adapter exposing a [`RandomState`] through [`rand::RngCore`].
///
/// The adapter owns a copy of the state; reading [`LcgRng::state`] after
/// drawing gives the state a pure generator should hand on.
#[derive(Debug, Clone)]
pub struct LcgRng {
    state: RandomState,
}

impl LcgRng {
    /// Start drawing from the given state
    pub fn from_state(state: RandomState) -> Self {
        Self { state }
    }

    /// The state after every draw made so far
    pub fn state(&self) -> RandomState {
        self.state
    }
}

impl rand::RngCore for LcgRng {
    fn next_u32(&mut self) -> u32 {
        let (value, next) = self.state.next();
        self.state = next;
        value as u32
    }

    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.next_u32());
        let low = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl rand::SeedableRng for LcgRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::from_state(RandomState::new(i64::from_le_bytes(seed)))
    }
}
