use crate::{Complex, FractalFamily};
use serde::{Deserialize, Serialize};

/// Plane step used by the default view of every family.
pub const HOME_STEP: f64 = 0.004;

/// Maps pixel indices of a `width × height` raster onto the complex plane.
///
/// Pixel `(x, y)` samples `origin + (x·step, y·step)`. Rows grow along the
/// positive imaginary axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneGrid {
    pub width: u32,
    pub height: u32,
    pub origin: Complex,
    pub step: f64,
}

impl PlaneGrid {
    pub fn new(width: u32, height: u32, origin: Complex, step: f64) -> Self {
        Self {
            width,
            height,
            origin,
            step,
        }
    }

    /// Default view for `family`, centred on its interesting region.
    pub fn home(family: FractalFamily, width: u32, height: u32) -> Self {
        let (dx, dy) = family.home_offset();
        let step = HOME_STEP;
        let origin = Complex::new(
            (-f64::from(width) * 0.5 - 0.5) * step + 1e-5 - dx,
            (-f64::from(height) * 0.5 - 0.5) * step + 1e-5 + dy,
        );
        Self::new(width, height, origin, step)
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Plane coordinate sampled by the flat pixel `index`.
    #[inline]
    pub fn point_at(&self, index: usize) -> Complex {
        let width = self.width as usize;
        let x = (index % width) as f64;
        let y = (index / width) as f64;
        Complex::new(self.origin.re + x * self.step, self.origin.im + y * self.step)
    }

    /// Scale the step by `factor`, keeping the point under pixel `(px, py)` fixed.
    pub fn zoom_about(&self, factor: f64, px: f64, py: f64) -> Self {
        let step = self.step * factor;
        let anchor = Complex::new(
            self.origin.re + px * self.step,
            self.origin.im + py * self.step,
        );
        Self {
            origin: Complex::new(anchor.re - px * step, anchor.im - py * step),
            step,
            ..*self
        }
    }

    /// Shift the view by a number of pixels.
    pub fn pan(&self, dx: f64, dy: f64) -> Self {
        Self {
            origin: Complex::new(
                self.origin.re + dx * self.step,
                self.origin.im + dy * self.step,
            ),
            ..*self
        }
    }
}
