use bitmask::Bitmask;

/// Deterministic pseudo-random mask, roughly `density`/256 full.
pub fn noise_mask(width: usize, height: usize, seed: u64, density: u8) -> Bitmask {
    Bitmask::from_fn(width, height, |x, y| {
        let mut h = seed ^ (((y as u64) << 32) | x as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        h ^= h >> 29;
        h = h.wrapping_mul(0xbf58_476d_1ce4_e5b9);
        h ^= h >> 32;
        (h & 0xff) < density as u64
    })
}
