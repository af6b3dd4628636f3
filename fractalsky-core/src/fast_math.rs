//! Bit-trick float helpers used by the escape evaluators and the palette compositor.
//!
//! The coefficients are fixed so that smoothed values match the reference renderer
//! bit for bit. Inputs must be strictly positive; nothing here guards against zero,
//! negative, or NaN arguments.

use libm::sqrtf;

/// Approximate `log2(n)` from the IEEE-754 bit pattern of `n`.
///
/// Accurate to a few parts in a thousand for normal positive inputs.
#[inline]
#[allow(clippy::excessive_precision)]
pub fn fast_log2(n: f32) -> f32 {
    let bits = n.to_bits();
    let mantissa = f32::from_bits((bits & 0x007f_ffff) | 0x3f00_0000);
    let y = bits as f32 * 1.192_092_896e-7;
    y - 124.225_517_3 - 1.498_030_305 * mantissa - 1.725_880_027 / (0.352_088_719_6 + mantissa)
}

/// `log2(log2(sqrt(n)))`, the smoothing term for a squared escape magnitude.
#[inline]
pub fn double_log_sqrt(n: f32) -> f32 {
    fast_log2(fast_log2(n) * 0.5)
}

/// `x^(3/4)` via two square roots.
#[inline]
pub fn pow_three_quarters(x: f32) -> f32 {
    let root = sqrtf(x);
    root * sqrtf(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_log2_tracks_exact_log() {
        for n in [1.0_f32, 2.0, 3.5, 10.0, 1000.0, 12345.0, 1.0e6] {
            let approx = fast_log2(n);
            let exact = n.log2();
            assert!(
                (approx - exact).abs() < 0.01,
                "fast_log2({}) = {}, expected about {}",
                n,
                approx,
                exact
            );
        }
    }

    #[test]
    fn fast_log2_of_one_is_near_zero() {
        assert!(fast_log2(1.0).abs() < 1e-3);
    }

    #[test]
    fn double_log_sqrt_matches_composition() {
        let n = 40000.0_f32;
        let expected = (n.sqrt().log2()).log2();
        assert!((double_log_sqrt(n) - expected).abs() < 0.02);
    }

    #[test]
    fn pow_three_quarters_matches_powf() {
        for x in [0.0_f32, 0.25, 1.0, 16.0, 81.0] {
            assert!((pow_three_quarters(x) - x.powf(0.75)).abs() < 1e-4);
        }
    }
}
