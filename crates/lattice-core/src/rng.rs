//! Deterministic pseudo-random source for generated workloads and tests.

/// 64-bit LCG (Knuth MMIX constants). Same seed, same sequence.
#[derive(Debug, Clone)]
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Next 31 bits of output, taken from the high half of the state.
    pub fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }
}
