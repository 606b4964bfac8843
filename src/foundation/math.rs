#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// Maps `t` from `[0, 1]` to `[min, max]`.
pub fn denormalize(t: f64, min: f64, max: f64) -> f64 {
    min + (max - min) * t
}

/// Hash-derived lattice value in `[-1, 1]`.
fn lattice(seed: u64, channel: u64, i: i64) -> f64 {
    let mut h = Fnv1a64::new(Fnv1a64::OFFSET_BASIS ^ seed);
    h.write_u64(channel);
    h.write_u64(i as u64);
    let bits = h.finish() >> 11;
    (bits as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
}

/// Smooth 1D value noise in `[-1, 1]`, deterministic for a given `(seed, channel)`.
pub fn value_noise(seed: u64, channel: u64, x: f64) -> f64 {
    let x0 = x.floor();
    let t = x - x0;
    let i = x0 as i64;
    let a = lattice(seed, channel, i);
    let b = lattice(seed, channel, i + 1);
    // smoothstep keeps the derivative continuous across lattice points
    let s = t * t * (3.0 - 2.0 * t);
    a + (b - a) * s
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
