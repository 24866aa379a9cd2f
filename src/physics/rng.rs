const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seeded draws for click-to-add spawning: a scale factor and a key tag per spawn.
#[derive(Clone, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Uniform in `[lo, hi)`; exactly `lo` when the range is empty.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        let unit = (self.advance() >> 11) as f64 / (1u64 << 53) as f64;
        lo + unit * (hi - lo)
    }

    /// 32-bit tag that disambiguates spawned follower keys.
    pub fn tag(&mut self) -> u32 {
        (self.advance() >> 32) as u32
    }

    fn advance(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        splitmix(self.state)
    }
}

fn splitmix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
#[path = "../../tests/unit/physics/rng.rs"]
mod tests;
