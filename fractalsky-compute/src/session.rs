//! Host-side driver for a pool of symmetric workers sharing one raster.

use crate::{BudgetTuner, PassOutcome, SessionError, WorkDispatcher};
use fractalsky_color::Palette;
use fractalsky_core::{ColorParameters, EngineConfig, PixelBuffers, RenderParameters, WorkCursor};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::time::Instant;

/// Owns the pixel fields, the palette, the shared cursor and the worker pool.
///
/// Every pass runs the same loop on every worker; the only coordination is
/// the cursor.
pub struct RenderSession {
    config: EngineConfig,
    pool: ThreadPool,
    buffers: PixelBuffers,
    cursor: WorkCursor,
    palette: Palette,
    tuner: BudgetTuner,
}

impl RenderSession {
    pub fn new(config: EngineConfig, pixel_count: usize, palette: Palette) -> Result<Self, SessionError> {
        config.validate()?;
        let workers = config.resolved_worker_count();
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("fractalsky-worker-{index}"))
            .build()?;
        log::debug!("Session with {} workers over {} pixels", workers, pixel_count);

        Ok(Self {
            tuner: BudgetTuner::new(workers, &config),
            config,
            pool,
            buffers: PixelBuffers::new(pixel_count),
            cursor: WorkCursor::new(),
            palette,
        })
    }

    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn buffers(&self) -> &PixelBuffers {
        &self.buffers
    }

    pub fn cursor(&self) -> &WorkCursor {
        &self.cursor
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Swap the palette. Takes effect on the next pass or recolor.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn budgets(&self) -> &[i64] {
        self.tuner.budgets()
    }

    fn dispatcher(&self) -> WorkDispatcher<'_> {
        WorkDispatcher::new(&self.buffers, &self.cursor, &self.palette).with_config(&self.config)
    }

    /// Run one pass with the tuner's current budgets, then adapt them to
    /// how long the pass took.
    pub fn compute_pass(&mut self, params: &RenderParameters) -> Result<PassOutcome, SessionError> {
        let started = Instant::now();
        let outcomes = self.broadcast_compute(params, self.tuner.budgets())?;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        self.tuner.record_pass(&outcomes, elapsed_ms);
        Ok(self.finish_pass(outcomes))
    }

    /// Run one pass where worker `k` gets `budgets[k]`. Workers past the end
    /// of `budgets` reuse its last entry.
    pub fn compute_pass_with_budgets(
        &self,
        params: &RenderParameters,
        budgets: &[i64],
    ) -> Result<PassOutcome, SessionError> {
        let outcomes = self.broadcast_compute(params, budgets)?;
        Ok(self.finish_pass(outcomes))
    }

    fn broadcast_compute(
        &self,
        params: &RenderParameters,
        budgets: &[i64],
    ) -> Result<Vec<PassOutcome>, SessionError> {
        params.validate()?;
        let pixels = self.buffers.pixel_count();
        if params.grid.pixel_count() != pixels {
            return Err(SessionError::SizeMismatch {
                grid: params.grid.pixel_count(),
                buffers: pixels,
            });
        }
        log::debug!("Compute pass from pixel {} of {}", self.cursor.load(), pixels);

        let dispatcher = self.dispatcher();
        Ok(self.pool.broadcast(|ctx| {
            let cost_budget = budgets
                .get(ctx.index())
                .or(budgets.last())
                .copied()
                .unwrap_or(params.cost_budget);
            let outcome = dispatcher.compute_and_colorize(&RenderParameters {
                cost_budget,
                ..*params
            });
            log::trace!("Worker {} finished with {:?}", ctx.index(), outcome);
            outcome
        }))
    }

    /// Apply the resume rule and position the cursor for the next pass.
    fn finish_pass(&self, outcomes: Vec<PassOutcome>) -> PassOutcome {
        let outcome = PassOutcome::merge(outcomes, self.buffers.pixel_count());
        match outcome {
            PassOutcome::Suspended { resume_at } => {
                self.cursor.store(resume_at);
                log::debug!("Pass suspended, resuming at {}", resume_at);
            }
            PassOutcome::Complete => log::debug!("Pass complete"),
        }
        outcome
    }

    /// Recolor every pixel from its stored value. The cursor position of an
    /// unfinished render is preserved.
    pub fn recolor(&self, colors: &ColorParameters) -> Result<(), SessionError> {
        colors.validate()?;
        let resume_at = self.cursor.load();
        self.cursor.reset();
        let dispatcher = self.dispatcher();
        self.pool.broadcast(|_| dispatcher.colorize_all(colors));
        self.cursor.store(resume_at);
        log::debug!("Recolored {} pixels", self.buffers.pixel_count());
        Ok(())
    }

    /// Forget every computed value and start the next pass from pixel 0.
    pub fn restart(&mut self) {
        self.buffers.clear_iterations();
        self.buffers.clear_shading();
        self.cursor.reset();
        self.tuner.reset();
    }

    /// Drop stale shading, e.g. after switching shading modes.
    pub fn clear_shading(&self) {
        self.buffers.clear_shading();
    }

    /// Drive passes until the raster is complete, returning how many ran.
    pub fn render_until_complete(&mut self, params: &RenderParameters) -> Result<usize, SessionError> {
        let mut passes = 0;
        loop {
            passes += 1;
            if self.compute_pass(params)?.is_complete() {
                log::debug!("Render complete after {} passes", passes);
                return Ok(passes);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractalsky_core::{Complex, FractalFamily, PlaneGrid, ShadingMode};

    fn config(workers: usize) -> EngineConfig {
        EngineConfig {
            worker_count: workers,
            ..EngineConfig::default()
        }
    }

    fn palette() -> Palette {
        Palette::new(&[0xff20_4080, 0xff80_4020, 0xff10_f010]).unwrap()
    }

    fn params(width: u32, height: u32) -> RenderParameters {
        RenderParameters {
            family: FractalFamily::Mandelbrot,
            julia: None,
            grid: PlaneGrid::new(width, height, Complex::new(-2.5, -1.25), 3.5 / width as f64),
            cost_budget: 0,
            iteration_cap: 200,
            colors: ColorParameters::default(),
        }
    }

    #[test]
    fn rejects_mismatched_grid() {
        let session = RenderSession::new(config(2), 10, palette()).unwrap();
        let err = session.compute_pass_with_budgets(&params(4, 4), &[1000]).unwrap_err();
        assert!(matches!(
            err,
            SessionError::SizeMismatch {
                grid: 16,
                buffers: 10
            }
        ));
    }

    #[test]
    fn invalid_config_is_reported() {
        let bad = EngineConfig {
            compute_chunk: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            RenderSession::new(bad, 4, palette()),
            Err(SessionError::Config(_))
        ));
    }

    #[test_log::test]
    fn tiny_budgets_resume_until_complete() {
        let params = params(40, 30);
        let mut session = RenderSession::new(config(3), params.grid.pixel_count(), palette()).unwrap();
        let mut passes = 0;
        loop {
            passes += 1;
            let outcome = session.compute_pass_with_budgets(&params, &[0]).unwrap();
            if outcome.is_complete() {
                break;
            }
            assert!(passes < 1000);
        }
        assert!(passes > 1);
        assert!(session.buffers().is_fully_resolved());

        session.restart();
        assert_eq!(session.buffers().resolved_count(), 0);
        assert_eq!(session.cursor().load(), 0);
        assert_eq!(session.render_until_complete(&params).unwrap(), 1);
    }

    #[test]
    fn recolor_keeps_an_unfinished_cursor() {
        let params = params(40, 30);
        let session = RenderSession::new(config(2), params.grid.pixel_count(), palette()).unwrap();
        let outcome = session.compute_pass_with_budgets(&params, &[0]).unwrap();
        let PassOutcome::Suspended { resume_at } = outcome else {
            panic!("expected suspension, got {outcome:?}");
        };
        session.recolor(&params.colors).unwrap();
        assert_eq!(session.cursor().load(), resume_at);
    }

    #[test]
    fn clear_shading_zeroes_the_field() {
        let mut params = params(20, 15);
        params.colors.shading = ShadingMode::Stripes;
        let mut session = RenderSession::new(config(2), params.grid.pixel_count(), palette()).unwrap();
        session.render_until_complete(&params).unwrap();
        assert!(session.buffers().shading.snapshot().iter().any(|&s| s > 0.0));
        session.clear_shading();
        assert!(session.buffers().shading.snapshot().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn julia_grid_renders() {
        let mut params = params(16, 16);
        params.julia = Some(Complex::new(-0.8, 0.156));
        let mut session = RenderSession::new(config(2), 256, palette()).unwrap();
        session.render_until_complete(&params).unwrap();
        assert!(session.buffers().is_fully_resolved());
    }
}
