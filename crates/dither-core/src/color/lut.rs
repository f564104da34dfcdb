//! Gamma lookup table access
//!
//! The table is generated at compile time by build.rs.

include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Decode an 8-bit sRGB channel to linear light (0.0..=1.0).
#[inline]
pub fn srgb8_to_linear(value: u8) -> f32 {
    SRGB8_TO_LINEAR[value as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert!(srgb8_to_linear(0).abs() < 1e-6);
        assert!((srgb8_to_linear(255) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_known_midpoint() {
        // ((128/255 + 0.055) / 1.055)^2.4 = 0.2158605
        assert!((srgb8_to_linear(128) - 0.21586).abs() < 1e-4);
    }

    #[test]
    fn test_monotonicity() {
        for i in 1..=255u8 {
            assert!(
                srgb8_to_linear(i) > srgb8_to_linear(i - 1),
                "not monotonic at {i}"
            );
        }
    }
}
