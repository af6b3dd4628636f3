pub mod buffers;
pub mod complex;
pub mod config;
pub mod cursor;
pub mod error;
pub mod fast_math;
pub mod fractal_family;
pub mod messages;
pub mod packed_color;
pub mod params;
pub mod plane;

pub use buffers::{
    ColorField, PixelBuffers, ScalarField, INTERIOR, MIN_SMOOTH_ESCAPE, THRESHOLD_SENTINEL,
    UNRESOLVED,
};
pub use complex::Complex;
pub use config::EngineConfig;
pub use cursor::WorkCursor;
pub use error::{ConfigError, ParamError};
pub use fast_math::{double_log_sqrt, fast_log2, pow_three_quarters};
pub use fractal_family::{FractalFamily, RenderMode, ShadingMode};
pub use messages::{WorkerRequest, WorkerResponse};
pub use packed_color::{darken, mix, pack_rgb};
pub use params::{ColorParameters, RenderParameters};
pub use plane::PlaneGrid;
