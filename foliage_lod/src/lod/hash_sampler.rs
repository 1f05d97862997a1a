/// Deterministic string → [0, 1) sampling.
///
/// Used wherever a "random" choice must stay identical across frames,
/// runs and processes: leaf thinning, paint jitter, direct material ids.

const FNV_OFFSET: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// 32-bit FNV-1a over the UTF-16 code units of `s`.
pub fn hash_str(s: &str) -> u32 {
    s.encode_utf16().fold(FNV_OFFSET, |h, unit| {
        (h ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Map `s` to a value in [0, 1).
///
/// Only the top 24 bits of the hash are kept so the quotient is exact in
/// `f32` and never rounds up to 1.0.
pub fn hash_to_unit(s: &str) -> f32 {
    (hash_str(s) >> 8) as f32 / (1u32 << 24) as f32
}

#[cfg(test)]
#[path = "hash_sampler_tests.rs"]
mod tests;
