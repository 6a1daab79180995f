//! RNG trait abstraction for the sandbox sweep
//!
//! Every probabilistic decision in the engine is phrased as a test against a
//! raw value in `[0, FAST_RAND_MAX]`. The trait is implemented by:
//! - [`FastRand`], the classic linear-congruential generator (default)
//! - any `rand::RngCore` (seeded xoshiro, thread rng, ...)
//! - scripted test doubles

/// Largest value returned by [`SandRng::next_raw`]
pub const FAST_RAND_MAX: u32 = 0x7FFF;

/// Number of distinct raw values (`FAST_RAND_MAX + 1`)
const FAST_RAND_RANGE: f32 = (FAST_RAND_MAX + 1) as f32;

/// Random number generator trait for the sandbox
pub trait SandRng {
    /// Next raw value in `[0, FAST_RAND_MAX]`
    fn next_raw(&mut self) -> u32;

    /// `next % n == 0`, i.e. probability `1/n`
    fn one_in(&mut self, n: u32) -> bool {
        self.next_raw() % n == 0
    }

    /// `next % n != 0`, i.e. probability `(n-1)/n`
    fn all_but_one_in(&mut self, n: u32) -> bool {
        self.next_raw() % n != 0
    }

    /// Uniform pick in `[0, n)`
    fn pick(&mut self, n: u32) -> u32 {
        self.next_raw() % n
    }

    /// Fair coin; `true` when the raw value is even
    fn coin(&mut self) -> bool {
        self.next_raw() % 2 == 0
    }

    /// Check if random value is less than probability threshold
    ///
    /// The threshold is scaled by the full value range, so `1.0` always
    /// passes and `0.0` never does.
    fn check_probability(&mut self, probability: f32) -> bool {
        (self.next_raw() as f32) < FAST_RAND_RANGE * probability
    }
}

/// Linear congruential generator returning the middle 15 bits of its state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FastRand {
    state: u32,
}

impl FastRand {
    const MULTIPLIER: u32 = 214_013;
    const INCREMENT: u32 = 2_531_011;

    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Reset the sequence
    pub fn seed(&mut self, seed: u32) {
        self.state = seed;
    }
}

impl Default for FastRand {
    fn default() -> Self {
        Self::new(0)
    }
}

impl SandRng for FastRand {
    fn next_raw(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        (self.state >> 16) & FAST_RAND_MAX
    }
}

// Blanket implementation for any rand generator: top 15 bits of each word
impl<T: ?Sized + rand::RngCore> SandRng for T {
    fn next_raw(&mut self) -> u32 {
        self.next_u32() >> 17
    }
}
