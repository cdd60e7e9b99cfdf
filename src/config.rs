use std::sync::OnceLock;

const DEFAULT_PARALLEL_MIN_PIXELS: usize = 256 * 256;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

static PARALLEL_MIN_PIXELS: OnceLock<usize> = OnceLock::new();

/// Smallest mask area (in pixels) that the surface adapters build row-parallel.
///
/// Read once from `BITMASK_PARALLEL_MIN_PIXELS`; `0` makes every build parallel.
pub(crate) fn parallel_min_pixels() -> usize {
    *PARALLEL_MIN_PIXELS
        .get_or_init(|| parse_env_usize("BITMASK_PARALLEL_MIN_PIXELS", DEFAULT_PARALLEL_MIN_PIXELS))
}

/// Whether a `width` x `height` build should be split across the rayon pool.
pub(crate) fn use_parallel(width: usize, height: usize) -> bool {
    height > 1 && width.saturating_mul(height) >= parallel_min_pixels()
}
