//! sRGB / Oklab conversions for perceptually even palette expansion.

use fractalsky_core::packed_color::{blue, green, pack_rgb, red};

/// Remove the sRGB transfer curve from a component in [0,1].
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Apply the sRGB transfer curve to a linear component.
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// A color in Oklab: perceptual lightness `l`, green-red `a`, blue-yellow `b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oklab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Oklab {
    pub fn from_linear_rgb([r, g, b]: [f64; 3]) -> Self {
        let lms = [
            0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b,
            0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b,
            0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b,
        ]
        .map(f64::cbrt);

        Self {
            l: 0.2104542553 * lms[0] + 0.7936177850 * lms[1] - 0.0040720468 * lms[2],
            a: 1.9779984951 * lms[0] - 2.4285922050 * lms[1] + 0.4505937099 * lms[2],
            b: 0.0259040371 * lms[0] + 0.7827717662 * lms[1] - 0.8086757660 * lms[2],
        }
    }

    /// Linear RGB, clamped to [0,1].
    pub fn to_linear_rgb(self) -> [f64; 3] {
        let [l, m, s] = [
            self.l + 0.3963377774 * self.a + 0.2158037573 * self.b,
            self.l - 0.1055613458 * self.a - 0.0638541728 * self.b,
            self.l - 0.0894841775 * self.a - 1.2914855480 * self.b,
        ]
        .map(|v| v * v * v);

        [
            4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
            -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
            -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
        ]
        .map(|v| v.clamp(0.0, 1.0))
    }

    pub fn from_packed(color: u32) -> Self {
        Self::from_linear_rgb(
            [red(color), green(color), blue(color)].map(|c| srgb_to_linear(f64::from(c) / 255.0)),
        )
    }

    /// Opaque packed color, channels rounded to the nearest byte.
    pub fn to_packed(self) -> u32 {
        let [r, g, b] = self
            .to_linear_rgb()
            .map(|c| (linear_to_srgb(c).clamp(0.0, 1.0) * 255.0).round() as u32);
        pack_rgb(r, g, b)
    }

    pub fn lerp(self, other: Oklab, t: f64) -> Self {
        Self {
            l: self.l + (other.l - self.l) * t,
            a: self.a + (other.a - self.a) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_mid_gray_is_darker_in_linear() {
        // sRGB 0.5 ≈ linear 0.214
        assert!((srgb_to_linear(0.5) - 0.214).abs() < 0.01);
    }

    #[test]
    fn transfer_curves_invert_each_other() {
        for i in 0..=10 {
            let original = i as f64 / 10.0;
            let back = linear_to_srgb(srgb_to_linear(original));
            assert!((original - back).abs() < 1e-6, "failed at {original}");
        }
    }

    #[test]
    fn white_has_full_lightness_and_no_chroma() {
        let white = Oklab::from_linear_rgb([1.0, 1.0, 1.0]);
        assert!((white.l - 1.0).abs() < 0.01);
        assert!(white.a.abs() < 0.01);
        assert!(white.b.abs() < 0.01);
    }

    #[test]
    fn packed_colors_survive_oklab() {
        for color in [0xff00_0000, 0xffff_ffff, 0xff3c_b400, 0xffa0_0a0a, 0xff80_8080] {
            assert_eq!(Oklab::from_packed(color).to_packed(), color);
        }
    }

    #[test]
    fn lerp_endpoints() {
        let a = Oklab::from_packed(0xff00_00ff);
        let b = Oklab::from_packed(0xffff_0000);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0).to_packed(), 0xffff_0000);
    }
}
