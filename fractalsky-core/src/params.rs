use crate::{Complex, FractalFamily, ParamError, PlaneGrid, RenderMode, ShadingMode};
use serde::{Deserialize, Serialize};

/// Everything the compositor needs to turn a resolved pixel into a color.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorParameters {
    pub interior_color: u32,
    pub render_mode: RenderMode,
    pub shading: ShadingMode,
    /// Palette entries advanced per unit of escape time. Must be non-negative.
    pub cycle_speed: f32,
    /// Palette position added to every pixel, used to animate the colors.
    pub flow_offset: f32,
}

impl Default for ColorParameters {
    fn default() -> Self {
        Self {
            interior_color: 0xff00_0000,
            render_mode: RenderMode::Smooth,
            shading: ShadingMode::None,
            cycle_speed: 1.0,
            flow_offset: 0.0,
        }
    }
}

impl ColorParameters {
    /// Build from the integer wire contract of `colorizeAll`.
    pub fn from_raw(
        interior_color: u32,
        render_mode: i32,
        darken_mode: i32,
        cycle_speed: f32,
        flow_offset: f32,
    ) -> Result<Self, ParamError> {
        let shading = ShadingMode::from_id(darken_mode).ok_or(ParamError::UnknownShading(darken_mode))?;
        let colors = Self {
            interior_color,
            render_mode: RenderMode::from_id(render_mode),
            shading,
            cycle_speed,
            flow_offset,
        };
        colors.validate()?;
        Ok(colors)
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        if !self.cycle_speed.is_finite() || self.cycle_speed < 0.0 {
            return Err(ParamError::InvalidCycleSpeed(self.cycle_speed));
        }
        if !self.flow_offset.is_finite() || self.flow_offset < 0.0 {
            return Err(ParamError::InvalidFlowOffset(self.flow_offset));
        }
        Ok(())
    }
}

/// Immutable snapshot of one compute pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderParameters {
    pub family: FractalFamily,
    /// Fixed parameter point in Julia mode; `None` samples Mandelbrot-style.
    pub julia: Option<Complex>,
    pub grid: PlaneGrid,
    /// Score a single worker may accumulate before it suspends.
    pub cost_budget: i64,
    pub iteration_cap: u32,
    pub colors: ColorParameters,
}

impl RenderParameters {
    /// Build from the integer wire contract of `computeAndColorize`.
    ///
    /// A negative `fractal_type` selects Julia mode with parameter
    /// `(julia_x, julia_y)`.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        fractal_type: i32,
        width: i32,
        height: i32,
        origin_x: f64,
        origin_y: f64,
        step: f64,
        cost_budget: i64,
        iteration_cap: i32,
        interior_color: u32,
        render_mode: i32,
        darken_mode: i32,
        cycle_speed: f32,
        flow_offset: f32,
        julia_x: f64,
        julia_y: f64,
    ) -> Result<Self, ParamError> {
        let family = FractalFamily::from_id(fractal_type.saturating_abs())
            .ok_or(ParamError::UnknownFamily(fractal_type))?;
        let julia = (fractal_type < 0).then(|| Complex::new(julia_x, julia_y));
        let (width, height) = match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(ParamError::InvalidDimensions {
                    width: width.into(),
                    height: height.into(),
                })
            }
        };
        let iteration_cap = u32::try_from(iteration_cap)
            .map_err(|_| ParamError::InvalidIterationCap(iteration_cap.into()))?;

        let params = Self {
            family,
            julia,
            grid: PlaneGrid::new(width, height, Complex::new(origin_x, origin_y), step),
            cost_budget,
            iteration_cap,
            colors: ColorParameters::from_raw(
                interior_color,
                render_mode,
                darken_mode,
                cycle_speed,
                flow_offset,
            )?,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(ParamError::InvalidDimensions {
                width: self.grid.width.into(),
                height: self.grid.height.into(),
            });
        }
        if self.iteration_cap < 1 {
            return Err(ParamError::InvalidIterationCap(self.iteration_cap.into()));
        }
        if !self.grid.step.is_finite() || self.grid.step <= 0.0 {
            return Err(ParamError::InvalidStep(self.grid.step));
        }
        if self.cost_budget < 0 {
            return Err(ParamError::InvalidCostBudget(self.cost_budget));
        }
        let mut coordinates = vec![
            ("origin.re", self.grid.origin.re),
            ("origin.im", self.grid.origin.im),
        ];
        if let Some(julia) = self.julia {
            coordinates.extend([("julia.re", julia.re), ("julia.im", julia.im)]);
        }
        if let Some((name, value)) = coordinates.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ParamError::NonFinite { name, value });
        }
        self.colors.validate()
    }

    pub fn is_julia(&self) -> bool {
        self.julia.is_some()
    }
}
