//! Dispatch from (family, shading mode) to a concrete evaluator.

use crate::escape::families::*;
use crate::escape::{evaluate, Derivative, Evaluator, Flat, Stripes};
use fractalsky_core::{FractalFamily, ShadingMode};

/// Plain evaluators, indexed by [`FractalFamily::index`].
const FLAT: [Evaluator; 16] = [
    evaluate::<Mandelbrot, Flat>,
    evaluate::<Multibrot3, Flat>,
    evaluate::<Multibrot4, Flat>,
    evaluate::<Multibrot5, Flat>,
    evaluate::<Multibrot6, Flat>,
    evaluate::<Multibrot7, Flat>,
    evaluate::<BurningShip, Flat>,
    evaluate::<BurningShip3, Flat>,
    evaluate::<BurningShip4, Flat>,
    evaluate::<Celtic, Flat>,
    evaluate::<Perpendicular, Flat>,
    evaluate::<Buffalo, Flat>,
    evaluate::<Tricorn, Flat>,
    evaluate::<HybridShip, Flat>,
    evaluate::<HybridShip3, Flat>,
    evaluate::<HybridShip4, Flat>,
];

const STRIPED: [Evaluator; 16] = [
    evaluate::<Mandelbrot, Stripes>,
    evaluate::<Multibrot3, Stripes>,
    evaluate::<Multibrot4, Stripes>,
    evaluate::<Multibrot5, Stripes>,
    evaluate::<Multibrot6, Stripes>,
    evaluate::<Multibrot7, Stripes>,
    evaluate::<BurningShip, Stripes>,
    evaluate::<BurningShip3, Stripes>,
    evaluate::<BurningShip4, Stripes>,
    evaluate::<Celtic, Stripes>,
    evaluate::<Perpendicular, Stripes>,
    evaluate::<Buffalo, Stripes>,
    evaluate::<Tricorn, Stripes>,
    evaluate::<HybridShip, Stripes>,
    evaluate::<HybridShip3, Stripes>,
    evaluate::<HybridShip4, Stripes>,
];

/// Derivative lighting where the family has one, plain otherwise.
const LIT: [Evaluator; 16] = [
    evaluate::<Mandelbrot, Derivative>,
    evaluate::<Multibrot3, Derivative>,
    evaluate::<Multibrot4, Derivative>,
    evaluate::<Multibrot5, Derivative>,
    evaluate::<Multibrot6, Flat>,
    evaluate::<Multibrot7, Flat>,
    evaluate::<BurningShip, Derivative>,
    evaluate::<BurningShip3, Derivative>,
    evaluate::<BurningShip4, Derivative>,
    evaluate::<Celtic, Flat>,
    evaluate::<Perpendicular, Flat>,
    evaluate::<Buffalo, Flat>,
    evaluate::<Tricorn, Flat>,
    evaluate::<HybridShip, Flat>,
    evaluate::<HybridShip3, Flat>,
    evaluate::<HybridShip4, Flat>,
];

/// Evaluator for `family` under `shading`.
pub fn select(family: FractalFamily, shading: ShadingMode) -> Evaluator {
    let table = match shading {
        ShadingMode::None => &FLAT,
        ShadingMode::Shadow | ShadingMode::InvertedShadow => &LIT,
        ShadingMode::Stripes => &STRIPED,
    };
    table[family.index()]
}

/// Whether `family` has derivative lighting for the shadow modes.
pub fn has_derivative(family: FractalFamily) -> bool {
    matches!(
        family,
        FractalFamily::Mandelbrot
            | FractalFamily::Multibrot3
            | FractalFamily::Multibrot4
            | FractalFamily::Multibrot5
            | FractalFamily::BurningShip
            | FractalFamily::BurningShip3
            | FractalFamily::BurningShip4
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractalsky_core::Complex;

    fn outside() -> Complex {
        Complex::new(0.5, 0.5)
    }

    #[test]
    fn plain_evaluators_write_no_shading() {
        for family in FractalFamily::ALL {
            let sample = select(family, ShadingMode::None)(100, outside(), outside());
            assert_eq!(sample.shade, None, "{family:?}");
        }
    }

    #[test]
    fn stripes_cover_every_family() {
        let far = Complex::new(3.0, 3.0);
        for family in FractalFamily::ALL {
            let sample = select(family, ShadingMode::Stripes)(100, far, far);
            assert!(sample.escaped(), "{family:?}");
            assert!(sample.shade.is_some(), "{family:?}");
        }
    }

    #[test]
    fn shadow_modes_fall_back_to_plain_without_derivative() {
        let far = Complex::new(3.0, 3.0);
        for family in FractalFamily::ALL {
            for shading in [ShadingMode::Shadow, ShadingMode::InvertedShadow] {
                let sample = select(family, shading)(100, far, far);
                assert_eq!(sample.shade.is_some(), has_derivative(family), "{family:?}");
            }
        }
    }

    #[test]
    fn shading_tier_never_changes_the_escape_value() {
        let c = Complex::new(-0.6, 0.45);
        for family in FractalFamily::ALL {
            let plain = select(family, ShadingMode::None)(250, c, c).value;
            for shading in ShadingMode::ALL {
                assert_eq!(select(family, shading)(250, c, c).value, plain, "{family:?}");
            }
        }
    }
}
