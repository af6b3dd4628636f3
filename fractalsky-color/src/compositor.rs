//! Turns resolved escape values into final pixel colors.

use crate::{BandPolicy, Palette};
use fractalsky_core::packed_color::{darken, mix};
use fractalsky_core::{
    fast_log2, ColorParameters, RenderMode, ShadingMode, INTERIOR, MIN_SMOOTH_ESCAPE,
};
use libm::sqrtf;

/// Darken byte for an amount in `[0, 1]`; the compositor darkens by at most 200/255.
#[inline]
fn darken_byte(amount: f32) -> u8 {
    (200.0 * amount) as u8
}

/// Color at palette `position` for `mode`, darkened by `darken_amount`.
///
/// The integer part selects the segment (modulo the palette length), the
/// fractional part positions within it. Negative positions are treated as 0.
pub fn color_at(position: f32, palette: &Palette, mode: RenderMode, darken_amount: f32) -> u32 {
    position_color(position, palette, BandPolicy::for_mode(mode), darken_amount)
}

#[inline]
fn position_color(position: f32, palette: &Palette, policy: &BandPolicy, darken_amount: f32) -> u32 {
    let position = position.max(0.0);
    let len = palette.len() as i32;
    let whole = position as i32;
    let id = whole % len;
    let fraction = position - ((whole / len) * len) as f32 - id as f32;
    let id = id as usize;
    let color = policy.shade_segment(palette.entry(id), palette.entry(id + 1), fraction);
    darken(color, darken_byte(darken_amount))
}

/// Per-pass coloring state derived from [`ColorParameters`].
#[derive(Clone, Copy, Debug)]
pub struct Compositor<'a> {
    palette: &'a Palette,
    policy: &'static BandPolicy,
    interior: u32,
    shading: ShadingMode,
    log_speed: f32,
    linear_speed: f32,
    flow: f32,
}

impl<'a> Compositor<'a> {
    pub fn new(palette: &'a Palette, colors: &ColorParameters) -> Self {
        Self {
            palette,
            policy: BandPolicy::for_mode(colors.render_mode),
            interior: colors.interior_color,
            shading: colors.shading,
            log_speed: sqrtf(sqrtf(colors.cycle_speed)),
            linear_speed: 0.035 * colors.cycle_speed,
            flow: colors.flow_offset,
        }
    }

    /// Palette position of a smooth escape value.
    #[inline]
    pub fn position(&self, value: f32) -> f32 {
        fast_log2(value) * self.log_speed + (value - 1.0) * self.linear_speed + self.flow
    }

    /// Color for a resolved pixel value and its stored shading intensity.
    ///
    /// Values below [`MIN_SMOOTH_ESCAPE`] use the fixed sentinel blend.
    #[inline]
    pub fn pixel_color(&self, value: f32, shade: f32) -> u32 {
        if value == INTERIOR {
            return self.interior;
        }
        let amount = self.shading.darken_amount(shade);
        if value < MIN_SMOOTH_ESCAPE {
            self.sentinel_color(amount)
        } else {
            position_color(self.position(value), self.palette, self.policy, amount)
        }
    }

    /// Blend of the two entries around the flow offset, independent of render mode.
    pub fn sentinel_color(&self, darken_amount: f32) -> u32 {
        let flow = self.flow.max(0.0);
        let index = flow as i32;
        let slot = (index % self.palette.len() as i32) as usize;
        let a = f64::from(flow - index as f32);
        let alpha = (a * a.sqrt() * 255.0) as u8;
        let color = mix(self.palette.entry(slot), self.palette.entry(slot + 1), alpha);
        darken(color, darken_byte(darken_amount))
    }
}
