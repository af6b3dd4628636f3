/// Largest palette flow rate in either direction.
pub const MAX_FLOW_RATE: f32 = 10.0;

/// Animation ticks per unit of flow rate.
const TICKS_PER_UNIT: f32 = 120.0;

/// Drifts the palette offset by a signed rate on every animation tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlowAnimator {
    rate: f32,
    amount: f32,
}

impl FlowAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Current palette offset, in `[0, palette length)`.
    pub fn amount(&self) -> f32 {
        self.amount
    }

    pub fn is_animating(&self) -> bool {
        self.rate != 0.0
    }

    /// Change the rate by `delta`, clamped to `±MAX_FLOW_RATE`.
    pub fn adjust_rate(&mut self, delta: f32) {
        self.rate = (self.rate + delta).clamp(-MAX_FLOW_RATE, MAX_FLOW_RATE);
    }

    /// Reset the offset, e.g. after switching palettes. The rate is kept.
    pub fn reset(&mut self) {
        self.amount = 0.0;
    }

    /// Advance one tick and return the new offset.
    pub fn tick(&mut self, palette_len: usize) -> f32 {
        if self.rate == 0.0 {
            return self.amount;
        }
        let len = palette_len as f32;
        self.amount += self.rate / TICKS_PER_UNIT;
        if self.amount < 0.0 {
            self.amount += len;
        } else if self.amount >= len {
            self.amount -= len;
        }
        self.amount
    }
}
