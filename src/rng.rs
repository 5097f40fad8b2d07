use std::collections::HashMap;

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Master-seeded randomness with one derived stream per simulation system.
///
/// Each stream is seeded from the master generator the first time it is
/// requested, so a system's draws are independent of how many draws other
/// systems make within a tick.
pub struct RngManager {
    master: ChaCha8Rng,
    streams: HashMap<String, ChaCha8Rng>,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self {
            master: ChaCha8Rng::seed_from_u64(seed),
            streams: HashMap::new(),
        }
    }

    /// Draw directly from the master stream. Used for construction-time
    /// randomness before any system streams exist.
    pub fn master(&mut self) -> &mut ChaCha8Rng {
        &mut self.master
    }

    pub fn stream(&mut self, name: &str) -> SystemRng<'_> {
        let entry = self.streams.entry(name.to_string()).or_insert_with(|| {
            let derived = self.master.next_u64();
            ChaCha8Rng::seed_from_u64(derived)
        });
        SystemRng { inner: entry }
    }
}

/// Borrowed handle to one system's RNG stream.
pub struct SystemRng<'a> {
    inner: &'a mut ChaCha8Rng,
}

impl SystemRng<'_> {
    /// True with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.inner.gen::<f64>() < p
    }

    /// Symmetric uniform perturbation in [-magnitude, magnitude].
    pub fn drift(&mut self, magnitude: f64) -> f64 {
        if magnitude <= 0.0 {
            return 0.0;
        }
        self.inner.gen_range(-magnitude..=magnitude)
    }
}

impl RngCore for SystemRng<'_> {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}
