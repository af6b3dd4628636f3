//! Palette handling and the escape-value to color compositor.

pub mod banding;
pub mod color_space;
pub mod compositor;
pub mod error;
pub mod flow;
pub mod palette;
pub mod presets;

pub use banding::BandPolicy;
pub use compositor::{color_at, Compositor};
pub use error::PaletteError;
pub use flow::FlowAnimator;
pub use palette::Palette;
pub use presets::PalettePreset;
