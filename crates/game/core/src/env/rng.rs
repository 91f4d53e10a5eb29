//! RNG oracle for deterministic random number generation.
//!
//! Randomness in the simulation (random animation frames, gun recoil,
//! death drops) must replay identically on the server and on clients, so
//! it is drawn from a stateless generator seeded per event rather than
//! from ambient process state.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// A uniform value in `[0, 1)`.
    fn unit_f32(&self, seed: u64) -> f32 {
        (self.next_u32(seed) >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = (max - min + 1) as u32;
        min + (self.next_u32(seed) % span) as i32
    }

    /// A percentage roll against `chance_percent`.
    fn percent(&self, seed: u64, chance_percent: u32) -> bool {
        self.next_u32(seed) % 100 < chance_percent
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state. Deterministic, fast, and
/// small, which is all the simulation needs.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Compute a deterministic seed from simulation state components.
///
/// `context` distinguishes multiple independent rolls within the same
/// actor and tick (e.g. recoil per bullet in a spread).
pub fn compute_seed(game_seed: u64, tick: u64, actor_uid: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= tick.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_uid as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
