//! Escape-time evaluation for every fractal family.
//!
//! An evaluator is the pairing of an [`EscapeRule`] (how `z` advances) with a
//! [`ShadingProbe`] (what extra state is tracked for the lighting effect).
//! Both are resolved at compile time, so each `(rule, probe)` pair becomes its
//! own monomorphised loop behind a plain function pointer.

pub mod families;

use fractalsky_core::{double_log_sqrt, Complex, INTERIOR};

/// Squared magnitude past which an orbit counts as escaped.
pub const BAILOUT: f64 = 10_000.0;

const FRAC_1_SQRT_2: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Current orbit point with its squared components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    pub r: f64,
    pub i: f64,
    pub sr: f64,
    pub si: f64,
}

impl Orbit {
    #[inline]
    pub fn new(r: f64, i: f64) -> Self {
        Self {
            r,
            i,
            sr: r * r,
            si: i * i,
        }
    }

    #[inline]
    pub fn magnitude_sqr(&self) -> f64 {
        self.sr + self.si
    }
}

/// How one family advances `z`.
///
/// Rules are stateful only for the hybrid families, which alternate between
/// two rules on a fixed schedule.
pub trait EscapeRule: Default {
    /// Multiplier that turns the double-log of the final magnitude into a
    /// fractional iteration count. `1 / log2(degree)`.
    const CORRECTION: f32;

    /// Orbit start for sample point `z0`.
    #[inline]
    fn start(&self, z0: Complex) -> Orbit {
        Orbit::new(z0.re, z0.im)
    }

    /// Next `(r, i)` from the current orbit point.
    fn step(&mut self, z: &Orbit, c: Complex) -> (f64, f64);
}

/// Families with an analytic derivative `dz/dc`.
pub trait DerivativeRule: EscapeRule {
    /// Next derivative, computed from the orbit point *before* the step.
    fn derivative(&self, z: &Orbit, dz: Complex) -> Complex;
}

/// Per-sample state behind the shading effects.
pub trait ShadingProbe<R>: Default {
    /// Called once per iteration with the orbit point before the step.
    #[inline]
    fn track(&mut self, _rule: &R, _z: &Orbit) {}

    /// Shading intensity for an orbit that escaped at `z`, or `None` when the
    /// probe writes no shading.
    fn shade(&self, z: &Orbit) -> Option<f32>;
}

/// No shading.
#[derive(Clone, Copy, Debug, Default)]
pub struct Flat;

impl<R> ShadingProbe<R> for Flat {
    #[inline]
    fn shade(&self, _z: &Orbit) -> Option<f32> {
        None
    }
}

/// Stripe shading taken from the direction of the final orbit point.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stripes;

impl<R> ShadingProbe<R> for Stripes {
    #[inline]
    fn shade(&self, z: &Orbit) -> Option<f32> {
        Some(light_from(z.r + z.i, z.i - z.r))
    }
}

/// Lighting from the surface normal `z / dz`.
#[derive(Clone, Copy, Debug)]
pub struct Derivative {
    dz: Complex,
}

impl Default for Derivative {
    fn default() -> Self {
        Self {
            dz: Complex::new(1.0, 0.0),
        }
    }
}

impl<R: DerivativeRule> ShadingProbe<R> for Derivative {
    #[inline]
    fn track(&mut self, rule: &R, z: &Orbit) {
        self.dz = rule.derivative(z, self.dz);
    }

    #[inline]
    fn shade(&self, z: &Orbit) -> Option<f32> {
        let Complex { re: dr, im: di } = self.dz;
        let sqm = dr * dr + di * di;
        let ur = (z.r * dr + z.i * di) / sqm;
        let ui = (z.i * dr - z.r * di) / sqm;
        Some(light_from(ur, ui))
    }
}

/// Light intensity in `[0, 1]` for direction `(ur, ui)`, lit from 45°.
#[inline]
fn light_from(ur: f64, ui: f64) -> f32 {
    let norm = (ur * ur + ui * ui).sqrt();
    let (ur, ui) = (ur / norm, ui / norm);
    let t = ((ur + ui) * f64::from(FRAC_1_SQRT_2) + 1.5) as f32;
    t.max(0.0) * 0.4
}

/// Result of evaluating one sample point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Smooth escape value, or [`INTERIOR`] if the cap was reached.
    pub value: f32,
    /// Shading intensity, written only by shading evaluators on escape.
    pub shade: Option<f32>,
}

impl Sample {
    pub const INTERIOR: Sample = Sample {
        value: INTERIOR,
        shade: None,
    };

    pub fn escaped(&self) -> bool {
        self.value != INTERIOR
    }
}

/// Evaluator signature shared by every family and shading tier.
pub type Evaluator = fn(iteration_cap: u32, z0: Complex, c: Complex) -> Sample;

/// Iterate rule `R` from `z0` with parameter `c` for at most `iteration_cap` steps.
///
/// On escape at step `n` the value is `n - log2(log2(|z|²) / 2) * R::CORRECTION`.
pub fn evaluate<R, S>(iteration_cap: u32, z0: Complex, c: Complex) -> Sample
where
    R: EscapeRule,
    S: ShadingProbe<R>,
{
    let mut rule = R::default();
    let mut probe = S::default();
    let mut z = rule.start(z0);

    for n in 1..=iteration_cap {
        probe.track(&rule, &z);
        let (r, i) = rule.step(&z, c);
        z = Orbit::new(r, i);

        let magnitude = z.magnitude_sqr();
        if magnitude > BAILOUT {
            return Sample {
                value: n as f32 - double_log_sqrt(magnitude as f32) * R::CORRECTION,
                shade: probe.shade(&z),
            };
        }
    }
    Sample::INTERIOR
}
