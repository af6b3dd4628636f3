//! Per-pixel fields shared by every worker of a pass.
//!
//! Each cell is an `AtomicU32` accessed with relaxed ordering. Chunk claiming
//! guarantees that no two workers write the same index during a pass, so the
//! atomics only provide safe shared mutation, not synchronization.

use std::sync::atomic::{AtomicU32, Ordering};

/// Pixel has not been computed yet.
pub const UNRESOLVED: f32 = 0.0;
/// Orbit never escaped within the iteration cap.
pub const INTERIOR: f32 = -999.0;
/// Escaped too early for a meaningful smooth value; colored with a fixed blend.
pub const THRESHOLD_SENTINEL: f32 = 1.0;
/// Smallest smoothed value colored through the palette position path.
pub const MIN_SMOOTH_ESCAPE: f32 = 1.000_004;

/// A flat field of `f32` values.
#[derive(Debug)]
pub struct ScalarField {
    cells: Vec<AtomicU32>,
}

impl ScalarField {
    /// Field of `len` zeros.
    pub fn new(len: usize) -> Self {
        Self {
            cells: (0..len).map(|_| AtomicU32::new(0)).collect(),
        }
    }

    pub fn from_values(values: &[f32]) -> Self {
        Self {
            cells: values.iter().map(|v| AtomicU32::new(v.to_bits())).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn load(&self, index: usize) -> f32 {
        f32::from_bits(self.cells[index].load(Ordering::Relaxed))
    }

    #[inline]
    pub fn store(&self, index: usize, value: f32) {
        self.cells[index].store(value.to_bits(), Ordering::Relaxed);
    }

    pub fn fill(&self, value: f32) {
        let bits = value.to_bits();
        for cell in &self.cells {
            cell.store(bits, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> Vec<f32> {
        self.cells
            .iter()
            .map(|c| f32::from_bits(c.load(Ordering::Relaxed)))
            .collect()
    }
}

/// A flat field of packed colors.
#[derive(Debug)]
pub struct ColorField {
    cells: Vec<AtomicU32>,
}

impl ColorField {
    pub fn new(len: usize) -> Self {
        Self {
            cells: (0..len).map(|_| AtomicU32::new(0)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn load(&self, index: usize) -> u32 {
        self.cells[index].load(Ordering::Relaxed)
    }

    #[inline]
    pub fn store(&self, index: usize, color: u32) {
        self.cells[index].store(color, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> Vec<u32> {
        self.cells.iter().map(|c| c.load(Ordering::Relaxed)).collect()
    }

    /// Copy the colors out as RGBA bytes, ready for an image buffer.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.cells
            .iter()
            .flat_map(|c| c.load(Ordering::Relaxed).to_le_bytes())
            .collect()
    }
}

/// The iteration, shading and color fields of one raster, all the same length.
#[derive(Debug)]
pub struct PixelBuffers {
    pub iterations: ScalarField,
    pub shading: ScalarField,
    pub colors: ColorField,
}

impl PixelBuffers {
    pub fn new(pixel_count: usize) -> Self {
        Self {
            iterations: ScalarField::new(pixel_count),
            shading: ScalarField::new(pixel_count),
            colors: ColorField::new(pixel_count),
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.iterations.len()
    }

    /// Mark every pixel unresolved so the next pass recomputes it.
    pub fn clear_iterations(&self) {
        self.iterations.fill(UNRESOLVED);
    }

    pub fn clear_shading(&self) {
        self.shading.fill(0.0);
    }

    pub fn resolved_count(&self) -> usize {
        (0..self.pixel_count())
            .filter(|&i| self.iterations.load(i) != UNRESOLVED)
            .count()
    }

    pub fn is_fully_resolved(&self) -> bool {
        self.resolved_count() == self.pixel_count()
    }
}
