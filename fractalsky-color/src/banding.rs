//! Per-segment banding policies for the palette render modes.
//!
//! Each policy blends the two palette entries bounding a segment with a base
//! curve, then runs a sequence of stages. A stage probes a value derived from
//! the segment fraction and applies the first rule whose interval contains it.
//! Alphas and darken amounts saturate to `[0, 255]`.

use fractalsky_core::packed_color::{blue, darken, green, mix, pack_rgb, red};
use fractalsky_core::{pow_three_quarters, RenderMode};
use libm::sqrtf;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bound {
    Unbounded,
    Open(f32),
    Closed(f32),
}

/// An interval on the real line with independently open or closed ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    pub lower: Bound,
    pub upper: Bound,
}

impl Interval {
    pub const fn new(lower: Bound, upper: Bound) -> Self {
        Self { lower, upper }
    }

    pub const fn open(lo: f32, hi: f32) -> Self {
        Self::new(Bound::Open(lo), Bound::Open(hi))
    }

    pub const fn closed(lo: f32, hi: f32) -> Self {
        Self::new(Bound::Closed(lo), Bound::Closed(hi))
    }

    pub fn contains(&self, x: f32) -> bool {
        let above = match self.lower {
            Bound::Unbounded => true,
            Bound::Open(lo) => x > lo,
            Bound::Closed(lo) => x >= lo,
        };
        let below = match self.upper {
            Bound::Unbounded => true,
            Bound::Open(hi) => x < hi,
            Bound::Closed(hi) => x <= hi,
        };
        above && below
    }
}

/// Maps a probe value to a blend alpha or darken amount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ramp {
    /// `(x - origin) · scale`
    Rising { origin: f32, scale: f32 },
    /// `(origin - x) · scale`
    Falling { origin: f32, scale: f32 },
    /// `scale · x + offset`
    Affine { scale: f32, offset: f32 },
    /// Constant full strength.
    Full,
}

impl Ramp {
    #[inline]
    pub fn amount(self, x: f32) -> u8 {
        match self {
            Ramp::Rising { origin, scale } => ((x - origin) * scale) as u8,
            Ramp::Falling { origin, scale } => ((origin - x) * scale) as u8,
            Ramp::Affine { scale, offset } => (scale * x + offset) as u8,
            Ramp::Full => u8::MAX,
        }
    }
}

/// Derived tone used by the layered mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    /// `45 + 0.8·c` per channel.
    Soft,
    /// `64 + 0.75·c` per channel.
    Bright,
}

impl Tone {
    #[inline]
    pub fn of(self, color: u32) -> u32 {
        let (base, scale) = match self {
            Tone::Soft => (45.0_f32, 0.8_f32),
            Tone::Bright => (64.0, 0.75),
        };
        let channel = |c: u32| (base + scale * c as f32) as u32;
        pack_rgb(channel(red(color)), channel(green(color)), channel(blue(color)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BlendRule {
    /// Cross-fade toward a tone derived from the current color. `Ramp::Full` snaps.
    TowardTone(Tone, Ramp),
    /// Cross-fade toward the segment's start entry.
    TowardStart(Ramp),
    /// Cross-fade toward the segment's end entry.
    TowardEnd(Ramp),
    Darken(Ramp),
    /// Three-quarter-power falloff into the end of the segment.
    TailShadow,
}

impl BlendRule {
    fn apply(self, color: u32, start: u32, end: u32, x: f32) -> u32 {
        match self {
            BlendRule::TowardTone(tone, Ramp::Full) => tone.of(color),
            BlendRule::TowardTone(tone, ramp) => mix(color, tone.of(color), ramp.amount(x)),
            BlendRule::TowardStart(ramp) => mix(color, start, ramp.amount(x)),
            BlendRule::TowardEnd(ramp) => mix(color, end, ramp.amount(x)),
            BlendRule::Darken(ramp) => darken(color, ramp.amount(x)),
            BlendRule::TailShadow => {
                let falloff = if x > 0.99 {
                    250.0 * x - 247.5
                } else {
                    2.5 * (1.0 - x)
                };
                darken(color, (200.0 - pow_three_quarters(falloff) * 200.0) as u8)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandRule {
    pub interval: Interval,
    pub blend: BlendRule,
}

const fn rule(interval: Interval, blend: BlendRule) -> BandRule {
    BandRule { interval, blend }
}

/// The value a stage tests its intervals against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Probe {
    /// The segment fraction itself.
    Segment,
    /// Fractional part of `fraction · n`, splitting the segment into `n` sub-bands.
    SubBand(f32),
}

impl Probe {
    #[inline]
    fn value(self, fraction: f32) -> f32 {
        match self {
            Probe::Segment => fraction,
            Probe::SubBand(n) => {
                let scaled = fraction * n;
                scaled - (scaled as i32) as f32
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stage {
    pub probe: Probe,
    pub rules: &'static [BandRule],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaseCurve {
    /// Blend alpha `frac · 255`.
    Linear,
    /// Blend alpha `frac^1.5 · 255`.
    Accelerating,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandPolicy {
    pub base: BaseCurve,
    pub stages: &'static [Stage],
}

const fn fade_in(tone: Tone, lo: f32, hi: f32, origin: f32) -> BandRule {
    rule(
        Interval::open(lo, hi),
        BlendRule::TowardTone(tone, Ramp::Rising { origin, scale: 100.0 }),
    )
}

const fn fade_out(tone: Tone, interval: Interval, origin: f32) -> BandRule {
    rule(
        interval,
        BlendRule::TowardTone(tone, Ramp::Falling { origin, scale: 100.0 }),
    )
}

const fn snap(tone: Tone, lo: f32, hi: f32) -> BandRule {
    rule(Interval::closed(lo, hi), BlendRule::TowardTone(tone, Ramp::Full))
}

// The (0.6, 0.7) window ramps from 0.5 and back toward 0.6, so it enters
// at 10% strength and its fade-out saturates to zero.
const LAYERED_WINDOWS: [BandRule; 15] = [
    rule(
        Interval::new(Bound::Unbounded, Bound::Open(0.025)),
        BlendRule::TowardTone(Tone::Soft, Ramp::Rising { origin: 0.0, scale: 100.0 }),
    ),
    fade_out(Tone::Soft, Interval::open(0.075, 0.1), 0.1),
    snap(Tone::Soft, 0.025, 0.075),
    fade_in(Tone::Soft, 0.2, 0.225, 0.2),
    fade_out(Tone::Soft, Interval::open(0.275, 0.3), 0.3),
    snap(Tone::Soft, 0.225, 0.275),
    fade_in(Tone::Soft, 0.4, 0.425, 0.4),
    fade_out(Tone::Soft, Interval::open(0.475, 0.5), 0.5),
    snap(Tone::Soft, 0.425, 0.475),
    fade_in(Tone::Soft, 0.6, 0.625, 0.5),
    fade_out(Tone::Soft, Interval::open(0.675, 0.7), 0.6),
    snap(Tone::Soft, 0.625, 0.675),
    fade_in(Tone::Bright, 0.8, 0.825, 0.8),
    fade_out(
        Tone::Bright,
        Interval::new(Bound::Open(0.875), Bound::Closed(0.99)),
        0.9,
    ),
    snap(Tone::Bright, 0.825, 0.875),
];

const LAYERED_TAIL: [BandRule; 1] = [rule(
    Interval::new(Bound::Open(0.6), Bound::Unbounded),
    BlendRule::TailShadow,
)];

const BANDED_RULES: [BandRule; 3] = [
    rule(
        Interval::new(Bound::Open(0.4), Bound::Closed(0.5)),
        BlendRule::Darken(Ramp::Affine { scale: 2500.0, offset: -1000.0 }),
    ),
    rule(
        Interval::open(0.5, 0.95),
        BlendRule::Darken(Ramp::Affine { scale: 160.0, offset: 0.0 }),
    ),
    rule(
        Interval::new(Bound::Closed(0.95), Bound::Unbounded),
        BlendRule::Darken(Ramp::Affine { scale: -2500.0, offset: 2500.0 }),
    ),
];

const RIBBON_RULES: [BandRule; 2] = [
    rule(
        Interval::open(0.3, 0.5),
        BlendRule::TowardStart(Ramp::Rising { origin: 0.3, scale: 1275.0 }),
    ),
    rule(
        Interval::new(Bound::Closed(0.5), Bound::Open(0.7)),
        BlendRule::TowardEnd(Ramp::Rising { origin: 0.5, scale: 1275.0 }),
    ),
];

static SMOOTH: BandPolicy = BandPolicy {
    base: BaseCurve::Linear,
    stages: &[],
};

static LAYERED: BandPolicy = BandPolicy {
    base: BaseCurve::Accelerating,
    stages: &[
        Stage {
            probe: Probe::Segment,
            rules: &LAYERED_WINDOWS,
        },
        Stage {
            probe: Probe::Segment,
            rules: &LAYERED_TAIL,
        },
    ],
};

static BANDED: BandPolicy = BandPolicy {
    base: BaseCurve::Linear,
    stages: &[Stage {
        probe: Probe::SubBand(5.0),
        rules: &BANDED_RULES,
    }],
};

static RIBBON: BandPolicy = BandPolicy {
    base: BaseCurve::Linear,
    stages: &[Stage {
        probe: Probe::SubBand(3.0),
        rules: &RIBBON_RULES,
    }],
};

impl BandPolicy {
    pub fn for_mode(mode: RenderMode) -> &'static BandPolicy {
        match mode {
            RenderMode::Smooth => &SMOOTH,
            RenderMode::Layered => &LAYERED,
            RenderMode::Banded => &BANDED,
            RenderMode::Ribbon => &RIBBON,
        }
    }

    /// Color at `fraction` in `[0, 1)` of the segment from `start` to `end`.
    pub fn shade_segment(&self, start: u32, end: u32, fraction: f32) -> u32 {
        let alpha = match self.base {
            BaseCurve::Linear => fraction * 255.0,
            BaseCurve::Accelerating => fraction * sqrtf(fraction) * 255.0,
        };
        let mut color = mix(start, end, alpha as u8);
        for stage in self.stages {
            let x = stage.probe.value(fraction);
            if let Some(rule) = stage.rules.iter().find(|r| r.interval.contains(x)) {
                color = rule.blend.apply(color, start, end, x);
            }
        }
        color
    }
}
