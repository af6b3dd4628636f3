//! Iteration rules for the sixteen fractal families.

use super::{DerivativeRule, EscapeRule, Orbit};
use fractalsky_core::Complex;

/// `1 / log2(d)` for polynomial degree `d`.
const DEGREE_2: f32 = 1.0;
#[allow(clippy::excessive_precision)]
const DEGREE_3: f32 = 0.6309297535714575;
const DEGREE_4: f32 = 0.5;
#[allow(clippy::excessive_precision)]
const DEGREE_5: f32 = 0.43067655807339306;
#[allow(clippy::excessive_precision)]
const DEGREE_6: f32 = 0.38685280723454163;
#[allow(clippy::excessive_precision)]
const DEGREE_7: f32 = 0.3562071871080222;

/// Hybrids take a burning-ship step on every tenth iteration.
const SHIP_PERIOD: u32 = 10;

macro_rules! rule {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $name;
    };
}

rule!(Mandelbrot, "`z² + c`");
rule!(Multibrot3, "`z³ + c`");
rule!(Multibrot4, "`z⁴ + c`");
rule!(Multibrot5, "`z⁵ + c`");
rule!(Multibrot6, "`z⁶ + c`");
rule!(Multibrot7, "`z⁷ + c`");
rule!(BurningShip, "`(|re| + i|im|)² + c`");
rule!(BurningShip3, "Cubic burning ship.");
rule!(BurningShip4, "Quartic burning ship.");
rule!(Celtic, "`|re(z²)| + i·im(z²) + c`");
rule!(Perpendicular, "Perpendicular Mandelbrot.");
rule!(Buffalo, "`(|re| + i|im|)² - (|re| + i|im|) + c`");
rule!(Tricorn, "`conj(z)² + c`");

impl EscapeRule for Mandelbrot {
    const CORRECTION: f32 = DEGREE_2;

    #[inline]
    fn step(&mut self, z: &Orbit, c: Complex) -> (f64, f64) {
        (z.sr - z.si + c.re, 2.0 * z.r * z.i + c.im)
    }
}

impl EscapeRule for Multibrot3 {
    const CORRECTION: f32 = DEGREE_3;

    #[inline]
    fn step(&mut self, z: &Orbit, c: Complex) -> (f64, f64) {
        (
            z.r * (z.sr - 3.0 * z.si) + c.re,
            z.i * (3.0 * z.sr - z.si) + c.im,
        )
    }
}

impl EscapeRule for Multibrot4 {
    const CORRECTION: f32 = DEGREE_4;

    #[inline]
    fn step(&mut self, z: &Orbit, c: Complex) -> (f64, f64) {
        (
            z.sr * (z.sr - 6.0 * z.si) + z.si * z.si + c.re,
            4.0 * (z.sr * z.r * z.i - z.r * z.si * z.i) + c.im,
        )
    }
}

impl EscapeRule for Multibrot5 {
    const CORRECTION: f32 = DEGREE_5;

    #[inline]
    fn step(&mut self, z: &Orbit, c: Complex) -> (f64, f64) {
        let fi = z.si * z.si;
        (
            z.r * (z.sr * (z.sr - 10.0 * z.si) + 5.0 * fi) + c.re,
            z.i * (z.sr * (5.0 * z.sr - 10.0 * z.si) + fi) + c.im,
        )
    }
}

impl EscapeRule for Multibrot6 {
    const CORRECTION: f32 = DEGREE_6;

    #[inline]
    fn step(&mut self, z: &Orbit, c: Complex) -> (f64, f64) {
        let fr = z.sr * z.sr;
        let fi = z.si * z.si;
        (
            z.sr * (fr + 15.0 * fi) - z.si * (15.0 * fr + fi) + c.re,
            z.r * z.i * (6.0 * (fr + fi) - 20.0 * z.sr * z.si) + c.im,
        )
    }
}

impl EscapeRule for Multibrot7 {
    const CORRECTION: f32 = DEGREE_7;

    #[inline]
    fn step(&mut self, z: &Orbit, c: Complex) -> (f64, f64) {
        let fr = z.sr * z.sr;
        let fi = z.si * z.si;
        (
            z.r * (fr * (z.sr - 21.0 * z.si) + fi * (35.0 * z.sr - 7.0 * z.si)) + c.re,
            z.i * (fr * (7.0 * z.sr - 35.0 * z.si) + fi * (21.0 * z.sr - z.si)) + c.im,
        )
    }
}

impl EscapeRule for BurningShip {
    const CORRECTION: f32 = DEGREE_2;

    #[inline]
    fn step(&mut self, z: &Orbit, c: Complex) -> (f64, f64) {
        (z.sr - z.si + c.re, (2.0 * z.r * z.i).abs() + c.im)
    }
}

impl EscapeRule for BurningShip3 {
    const CORRECTION: f32 = DEGREE_3;

    #[inline]
    fn step(&mut self, z: &Orbit, c: Complex) -> (f64, f64) {
        (
            z.r.abs() * (z.sr - 3.0 * z.si) + c.re,
            z.i.abs() * (3.0 * z.sr - z.si) + c.im,
        )
    }
}

impl EscapeRule for BurningShip4 {
    const CORRECTION: f32 = DEGREE_4;

    #[inline]
    fn step(&mut self, z: &Orbit, c: Complex) -> (f64, f64) {
        (
            z.sr * z.sr - 6.0 * z.sr * z.si + z.si * z.si + c.re,
            (4.0 * z.r * z.i).abs() * (z.sr - z.si) + c.im,
        )
    }
}

impl EscapeRule for Celtic {
    const CORRECTION: f32 = DEGREE_2;

    #[inline]
    fn step(&mut self, z: &Orbit, c: Complex) -> (f64, f64) {
        ((z.sr - z.si).abs() + c.re, 2.0 * z.r * z.i + c.im)
    }
}

impl EscapeRule for Perpendicular {
    const CORRECTION: f32 = DEGREE_2;

    /// The orbit starts from `(|re|, -im)`.
    #[inline]
    fn start(&self, z0: Complex) -> Orbit {
        Orbit::new(z0.re.abs(), -z0.im)
    }

    #[inline]
    fn step(&mut self, z: &Orbit, c: Complex) -> (f64, f64) {
        let tr = 2.0 * z.r * z.i;
        ((z.sr - z.si + c.re).abs(), -tr - c.im)
    }
}

impl EscapeRule for Buffalo {
    const CORRECTION: f32 = DEGREE_2;

    #[inline]
    fn step(&mut self, z: &Orbit, c: Complex) -> (f64, f64) {
        let (ar, ai) = (z.r.abs(), z.i.abs());
        (z.sr - z.si - ar + c.re, 2.0 * ar * ai - ai + c.im)
    }
}

impl EscapeRule for Tricorn {
    const CORRECTION: f32 = DEGREE_2;

    #[inline]
    fn step(&mut self, z: &Orbit, c: Complex) -> (f64, f64) {
        (z.sr - z.si + c.re, -2.0 * z.r * z.i + c.im)
    }
}

/// Follows `P`, switching to `S` for one step every [`SHIP_PERIOD`] iterations.
#[derive(Clone, Copy, Debug)]
pub struct Hybrid<P, S> {
    plain: P,
    ship: S,
    exchange: u32,
}

impl<P: Default, S: Default> Default for Hybrid<P, S> {
    fn default() -> Self {
        Self {
            plain: P::default(),
            ship: S::default(),
            exchange: 1,
        }
    }
}

impl<P: EscapeRule, S: EscapeRule> EscapeRule for Hybrid<P, S> {
    const CORRECTION: f32 = P::CORRECTION;

    #[inline]
    fn step(&mut self, z: &Orbit, c: Complex) -> (f64, f64) {
        if self.exchange == SHIP_PERIOD {
            self.exchange = 1;
            self.ship.step(z, c)
        } else {
            self.exchange += 1;
            self.plain.step(z, c)
        }
    }
}

pub type HybridShip = Hybrid<Mandelbrot, BurningShip>;
pub type HybridShip3 = Hybrid<Multibrot3, BurningShip3>;
pub type HybridShip4 = Hybrid<Multibrot4, BurningShip4>;

// dz' = 2·z·dz + 1
#[inline]
fn quadratic_derivative(z: &Orbit, dz: Complex) -> Complex {
    Complex::new(
        2.0 * (dz.re * z.r - dz.im * z.i) + 1.0,
        2.0 * (dz.re * z.i + dz.im * z.r),
    )
}

// dz' = 3·z²·dz + 1
#[inline]
fn cubic_derivative(z: &Orbit, dz: Complex) -> Complex {
    let temp = 2.0 * z.r * z.i;
    let real = z.sr - z.si;
    Complex::new(
        3.0 * (dz.re * real - dz.im * temp) + 1.0,
        3.0 * (dz.re * temp + dz.im * real),
    )
}

// dz' = 4·z³·dz + 1
#[inline]
fn quartic_derivative(z: &Orbit, dz: Complex) -> Complex {
    let temp = z.r * z.i;
    let real = z.sr - z.si;
    let a = dz.re * z.r - dz.im * z.i;
    let b = dz.re * z.i + dz.im * z.r;
    Complex::new(
        4.0 * real * a - 8.0 * temp * b + 1.0,
        4.0 * real * b + 8.0 * temp * a,
    )
}

impl DerivativeRule for Mandelbrot {
    #[inline]
    fn derivative(&self, z: &Orbit, dz: Complex) -> Complex {
        quadratic_derivative(z, dz)
    }
}

impl DerivativeRule for BurningShip {
    #[inline]
    fn derivative(&self, z: &Orbit, dz: Complex) -> Complex {
        quadratic_derivative(z, dz)
    }
}

impl DerivativeRule for Multibrot3 {
    #[inline]
    fn derivative(&self, z: &Orbit, dz: Complex) -> Complex {
        cubic_derivative(z, dz)
    }
}

impl DerivativeRule for BurningShip3 {
    #[inline]
    fn derivative(&self, z: &Orbit, dz: Complex) -> Complex {
        cubic_derivative(z, dz)
    }
}

impl DerivativeRule for Multibrot4 {
    #[inline]
    fn derivative(&self, z: &Orbit, dz: Complex) -> Complex {
        quartic_derivative(z, dz)
    }
}

impl DerivativeRule for BurningShip4 {
    #[inline]
    fn derivative(&self, z: &Orbit, dz: Complex) -> Complex {
        quartic_derivative(z, dz)
    }
}

impl DerivativeRule for Multibrot5 {
    // dz' = 5·z⁴·dz + 1
    #[inline]
    fn derivative(&self, z: &Orbit, dz: Complex) -> Complex {
        let fi = z.si * z.si;
        let real = 5.0 * (z.sr * z.sr - 6.0 * z.sr * z.si + fi);
        let imag = 20.0 * z.r * z.i * (z.sr - z.si);
        Complex::new(
            real * dz.re - imag * dz.im + 1.0,
            real * dz.im + imag * dz.re,
        )
    }
}
