//! The two worker loops: budgeted compute-and-colorize, and recolor-only.
//!
//! Any number of threads may run either loop at once over the same
//! [`PixelBuffers`]; they coordinate only through the shared [`WorkCursor`].

use crate::evaluator;
use fractalsky_color::{Compositor, Palette};
use fractalsky_core::{
    ColorParameters, EngineConfig, PixelBuffers, RenderParameters, WorkCursor, INTERIOR,
    MIN_SMOOTH_ESCAPE, THRESHOLD_SENTINEL, UNRESOLVED,
};
use serde::{Deserialize, Serialize};

/// Pixels claimed per cursor step by the compute loop.
pub const COMPUTE_CHUNK: usize = 32;

/// Pixels per chunk for the recolor loop, which claims chunk indices.
pub const COLORIZE_CHUNK: usize = 4096;

/// Fixed cost charged for an escaping pixel on top of its escape value.
const ESCAPE_COST: i64 = 12;

/// Result of one worker's compute loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassOutcome {
    /// The cursor ran past the last pixel.
    Complete,
    /// Budget exhausted. Every pixel before `resume_at` that this worker
    /// claimed is resolved.
    Suspended { resume_at: usize },
}

impl PassOutcome {
    /// `-1` for complete, otherwise the resume index.
    pub fn to_raw(self) -> i64 {
        match self {
            PassOutcome::Complete => -1,
            PassOutcome::Suspended { resume_at } => resume_at as i64,
        }
    }

    pub fn is_complete(self) -> bool {
        matches!(self, PassOutcome::Complete)
    }

    /// Combine the outcomes of every worker in a pass.
    ///
    /// The pass resumes at the smallest suspended index, and is complete if
    /// nobody suspended or that index is already past the last pixel.
    pub fn merge(outcomes: impl IntoIterator<Item = PassOutcome>, pixel_count: usize) -> Self {
        outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                PassOutcome::Suspended { resume_at } => Some(resume_at),
                PassOutcome::Complete => None,
            })
            .min()
            .filter(|&resume_at| resume_at < pixel_count)
            .map_or(PassOutcome::Complete, |resume_at| PassOutcome::Suspended { resume_at })
    }
}

/// One worker's view of the shared render state.
#[derive(Clone, Copy, Debug)]
pub struct WorkDispatcher<'a> {
    buffers: &'a PixelBuffers,
    cursor: &'a WorkCursor,
    palette: &'a Palette,
    compute_chunk: usize,
    colorize_chunk: usize,
}

impl<'a> WorkDispatcher<'a> {
    pub fn new(buffers: &'a PixelBuffers, cursor: &'a WorkCursor, palette: &'a Palette) -> Self {
        Self {
            buffers,
            cursor,
            palette,
            compute_chunk: COMPUTE_CHUNK,
            colorize_chunk: COLORIZE_CHUNK,
        }
    }

    /// Use the chunk sizes from `config`.
    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.compute_chunk = config.compute_chunk.max(1);
        self.colorize_chunk = config.colorize_chunk.max(1);
        self
    }

    /// Claim pixel chunks from the cursor, evaluate every unresolved pixel and
    /// color every pixel of the chunk, until the cursor runs out or the cost
    /// accumulated by this worker reaches `params.cost_budget`.
    ///
    /// Pixels already resolved are recolored but never recomputed, so a
    /// suspended pass can be resumed from any earlier index.
    pub fn compute_and_colorize(&self, params: &RenderParameters) -> PassOutcome {
        let pixels = self.pixel_count(params);
        let evaluate = evaluator::select(params.family, params.colors.shading);
        let compositor = Compositor::new(self.palette, &params.colors);
        let interior_cost = i64::from(params.iteration_cap) + 2;
        let iterations = &self.buffers.iterations;
        let shading = &self.buffers.shading;
        let mut score: i64 = 0;

        loop {
            let start = self.cursor.claim(self.compute_chunk);
            let end = start.saturating_add(self.compute_chunk).min(pixels);

            for index in start..end {
                if iterations.load(index) == UNRESOLVED {
                    let z0 = params.grid.point_at(index);
                    let c = params.julia.unwrap_or(z0);
                    let sample = evaluate(params.iteration_cap, z0, c);

                    score += if sample.value == INTERIOR {
                        interior_cost
                    } else {
                        ESCAPE_COST + sample.value as i64
                    };
                    let value = if sample.value != INTERIOR && sample.value < MIN_SMOOTH_ESCAPE {
                        THRESHOLD_SENTINEL
                    } else {
                        sample.value
                    };
                    iterations.store(index, value);
                    if let Some(shade) = sample.shade {
                        shading.store(index, shade);
                    }
                }
                self.colorize_pixel(&compositor, index);
            }

            if start >= pixels {
                return PassOutcome::Complete;
            }
            if score >= params.cost_budget {
                return if end == pixels {
                    PassOutcome::Complete
                } else {
                    PassOutcome::Suspended { resume_at: end }
                };
            }
        }
    }

    /// Recolor every pixel from its stored value and shading, claiming
    /// chunk indices from the cursor. The cursor must start at zero.
    pub fn colorize_all(&self, colors: &ColorParameters) {
        let pixels = self.buffers.pixel_count();
        let total_chunks = pixels.div_ceil(self.colorize_chunk);
        let compositor = Compositor::new(self.palette, colors);

        loop {
            let chunk = self.cursor.claim(1);
            if chunk >= total_chunks {
                break;
            }
            let start = chunk * self.colorize_chunk;
            let end = (start + self.colorize_chunk).min(pixels);
            for index in start..end {
                self.colorize_pixel(&compositor, index);
            }
        }
    }

    #[inline]
    fn colorize_pixel(&self, compositor: &Compositor<'_>, index: usize) {
        let value = self.buffers.iterations.load(index);
        let shade = self.buffers.shading.load(index);
        self.buffers
            .colors
            .store(index, compositor.pixel_color(value, shade));
    }

    fn pixel_count(&self, params: &RenderParameters) -> usize {
        let expected = params.grid.pixel_count();
        let available = self.buffers.pixel_count();
        if expected > available {
            log::warn!(
                "Grid has {} pixels but buffers hold {}, rendering the first {}",
                expected,
                available,
                available
            );
        }
        expected.min(available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractalsky_core::{Complex, FractalFamily, PlaneGrid};

    fn params(width: u32, height: u32, cost_budget: i64) -> RenderParameters {
        RenderParameters {
            family: FractalFamily::Mandelbrot,
            julia: None,
            grid: PlaneGrid::new(width, height, Complex::new(-2.0, -1.5), 3.0 / height as f64),
            cost_budget,
            iteration_cap: 64,
            colors: ColorParameters::default(),
        }
    }

    fn palette() -> Palette {
        Palette::new(&[0xff00_00ff, 0xff00_ff00, 0xffff_0000]).unwrap()
    }

    #[test]
    fn outcome_raw_contract() {
        assert_eq!(PassOutcome::Complete.to_raw(), -1);
        assert_eq!(PassOutcome::Suspended { resume_at: 96 }.to_raw(), 96);
    }

    #[test]
    fn merge_takes_the_smallest_resume_index() {
        let outcomes = [
            PassOutcome::Suspended { resume_at: 640 },
            PassOutcome::Complete,
            PassOutcome::Suspended { resume_at: 96 },
        ];
        assert_eq!(
            PassOutcome::merge(outcomes, 1000),
            PassOutcome::Suspended { resume_at: 96 }
        );
        assert_eq!(
            PassOutcome::merge([PassOutcome::Complete; 3], 1000),
            PassOutcome::Complete
        );
        assert_eq!(
            PassOutcome::merge([PassOutcome::Suspended { resume_at: 1000 }], 1000),
            PassOutcome::Complete
        );
    }

    #[test]
    fn unbudgeted_pass_resolves_everything() {
        let params = params(16, 12, i64::MAX);
        let buffers = PixelBuffers::new(params.grid.pixel_count());
        let cursor = WorkCursor::new();
        let palette = palette();
        let outcome = WorkDispatcher::new(&buffers, &cursor, &palette).compute_and_colorize(&params);
        assert_eq!(outcome, PassOutcome::Complete);
        assert!(buffers.is_fully_resolved());
        assert!(buffers.colors.snapshot().iter().all(|c| c >> 24 == 0xff));
    }

    #[test]
    fn zero_budget_stops_after_one_chunk() {
        let params = params(16, 12, 0);
        let buffers = PixelBuffers::new(params.grid.pixel_count());
        let cursor = WorkCursor::new();
        let palette = palette();
        let outcome = WorkDispatcher::new(&buffers, &cursor, &palette).compute_and_colorize(&params);
        assert_eq!(outcome, PassOutcome::Suspended { resume_at: COMPUTE_CHUNK });
        assert_eq!(buffers.resolved_count(), COMPUTE_CHUNK);
        assert_eq!(cursor.load(), COMPUTE_CHUNK);
    }

    #[test]
    fn last_chunk_completes_even_when_over_budget() {
        let params = params(8, 4, 0);
        let buffers = PixelBuffers::new(params.grid.pixel_count());
        let cursor = WorkCursor::new();
        let palette = palette();
        let outcome = WorkDispatcher::new(&buffers, &cursor, &palette).compute_and_colorize(&params);
        assert_eq!(outcome, PassOutcome::Complete);
        assert!(buffers.is_fully_resolved());
    }

    #[test]
    fn resolved_pixels_are_not_recomputed() {
        let params = params(8, 4, i64::MAX);
        let buffers = PixelBuffers::new(params.grid.pixel_count());
        buffers.iterations.store(5, 42.5);
        let cursor = WorkCursor::new();
        let palette = palette();
        WorkDispatcher::new(&buffers, &cursor, &palette).compute_and_colorize(&params);
        assert_eq!(buffers.iterations.load(5), 42.5);
    }

    #[test]
    fn early_escapes_become_the_sentinel() {
        // far corner escapes on the first step with a value below one
        let mut params = params(1, 1, i64::MAX);
        params.grid.origin = Complex::new(150.0, 150.0);
        let buffers = PixelBuffers::new(1);
        let cursor = WorkCursor::new();
        let palette = palette();
        WorkDispatcher::new(&buffers, &cursor, &palette).compute_and_colorize(&params);
        assert_eq!(buffers.iterations.load(0), THRESHOLD_SENTINEL);
        let compositor = Compositor::new(&palette, &params.colors);
        assert_eq!(buffers.colors.load(0), compositor.sentinel_color(0.0));
    }

    #[test]
    fn colorize_all_repaints_with_new_interior() {
        let params = params(8, 4, i64::MAX);
        let buffers = PixelBuffers::new(params.grid.pixel_count());
        let cursor = WorkCursor::new();
        let palette = palette();
        let dispatcher = WorkDispatcher::new(&buffers, &cursor, &palette);
        dispatcher.compute_and_colorize(&params);

        let colors = ColorParameters {
            interior_color: 0xff12_3456,
            ..params.colors
        };
        cursor.reset();
        dispatcher.colorize_all(&colors);
        let values = buffers.iterations.snapshot();
        let painted = buffers.colors.snapshot();
        assert!(values.contains(&INTERIOR));
        for (value, color) in values.iter().zip(painted) {
            assert_eq!(*value == INTERIOR, color == 0xff12_3456);
        }
    }

    #[test]
    fn colorize_chunk_size_comes_from_config() {
        let buffers = PixelBuffers::new(10);
        let cursor = WorkCursor::new();
        let palette = palette();
        let config = EngineConfig {
            colorize_chunk: 4,
            ..EngineConfig::default()
        };
        WorkDispatcher::new(&buffers, &cursor, &palette)
            .with_config(&config)
            .colorize_all(&ColorParameters::default());
        // three chunks plus the failed claim
        assert_eq!(cursor.load(), 4);
    }
}
