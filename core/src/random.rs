use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of uniform draws in `[0, 1)`.
///
/// Every randomized operation borrows a source for its own duration, so two
/// concurrent callers never share generator state.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform draw in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_unit() * (hi - lo)
    }

    /// Single lowercase hexadecimal digit.
    fn hex_digit(&mut self) -> char {
        let nibble = ((self.next_unit() * 16.0).floor() as u32).min(15);
        char::from_digit(nibble, 16).unwrap_or('0')
    }
}

/// `StdRng`-backed source, seedable for reproducible runs.
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::RandomSource;

    /// Replays a fixed list of draws, cycling when exhausted.
    pub struct ScriptedRandom {
        draws: Vec<f64>,
        cursor: usize,
    }

    impl ScriptedRandom {
        pub fn new(draws: Vec<f64>) -> Self {
            Self { draws, cursor: 0 }
        }

        pub fn constant(value: f64) -> Self {
            Self::new(vec![value])
        }
    }

    impl RandomSource for ScriptedRandom {
        fn next_unit(&mut self) -> f64 {
            let value = self.draws[self.cursor % self.draws.len()];
            self.cursor += 1;
            value
        }
    }
}
