//! Reproducible pseudo-random stream.
//!
//! Mulberry32 mixing over a wrapping 32-bit accumulator. Any implementation
//! that performs the same 32-bit operations yields the same sequence for the
//! same seed, which is what makes the generated dataset reproducible.

const INCREMENT: u32 = 0x6D2B_79F5;
const SCALE: f64 = 4_294_967_296.0;

#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next value in `[0, 1)`.
    pub fn next(&mut self) -> f64 {
        self.state = self.state.wrapping_add(INCREMENT);
        let s = self.state;
        let mut t = (s ^ (s >> 15)).wrapping_mul(1 | s);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t));
        f64::from(t ^ (t >> 14)) / SCALE
    }
}
