//! Injectable randomness for deterministic resolution.
//!
//! Every probabilistic rule (lucky level-ups, check rolls, damage variance)
//! draws from a [`RandomSource`] passed in by the caller. Nothing in this crate
//! reaches for ambient randomness.
//!
//! # Determinism
//!
//! Implementations must be deterministic: given the same seed, they must
//! produce the same sequence of values. This is what makes a saved session
//! replay bit-identically and what lets tests script exact outcomes.

use std::collections::VecDeque;

/// Source of uniform random integers.
pub trait RandomSource {
    /// Generate the next raw u32 value.
    fn next_u32(&mut self) -> u32;

    /// Generate a random value in range [min, max] inclusive.
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = u64::from(max - min) + 1;
        min + (u64::from(self.next_u32()) % span) as u32
    }

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&mut self) -> u32 {
        self.range(1, 100)
    }

    /// Returns true with probability `percent`/100.
    ///
    /// A roll is consumed even for 0 and 100 so that the stream stays aligned
    /// regardless of the configured chance.
    fn percent(&mut self, percent: u32) -> bool {
        self.roll_d100() <= percent
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn range(&mut self, min: u32, max: u32) -> u32 {
        (**self).range(min, max)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn range(&mut self, min: u32, max: u32) -> u32 {
        (**self).range(min, max)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces the same stream
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits, trivially persisted alongside a session
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        // Mix the seed once so that small seeds (0, 1, 2...) diverge immediately.
        Self {
            state: Self::pcg_step(seed ^ 0x9e3779b97f4a7c15),
        }
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RandomSource for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}

/// Scripted source that replays fixed values, for tests and tutorials.
///
/// `range` returns the next scripted value clamped into `[min, max]` instead
/// of reducing it modulo the span, so a script reads as the literal rolls.
/// The script cycles once exhausted; an empty script always yields `min`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    values: VecDeque<u32>,
}

impl ScriptedRng {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    fn pop(&mut self) -> Option<u32> {
        let value = self.values.pop_front()?;
        self.values.push_back(value);
        Some(value)
    }
}

impl RandomSource for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.pop().unwrap_or(0)
    }

    fn range(&mut self, min: u32, max: u32) -> u32 {
        match self.pop() {
            Some(value) => value.clamp(min, max.max(min)),
            None => min,
        }
    }
}
