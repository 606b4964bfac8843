use crate::capture::CaptureSource;
use crate::installation::{Installation, Phase};
use crate::palette::PaletteSampler;
use crate::pose::PoseEstimator;
use crate::render::Surface;

/// Fixed-rate frame clock for headless runs.
#[derive(Clone, Copy, Debug)]
pub struct Driver {
    dt_ms: f64,
    frame: u64,
}

impl Driver {
    pub fn new(fps: f64) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 { fps } else { 30.0 };
        Self {
            dt_ms: 1000.0 / fps,
            frame: 0,
        }
    }

    pub fn dt_ms(&self) -> f64 {
        self.dt_ms
    }

    /// Frames stepped so far, skipped ones included.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advances one frame. Returns `None` when the installation's tick gate is closed.
    pub fn step<C, P, S>(
        &mut self,
        installation: &mut Installation<C, P, S>,
        surface: &mut dyn Surface,
    ) -> Option<Phase>
    where
        C: CaptureSource,
        P: PoseEstimator,
        S: PaletteSampler,
    {
        self.frame += 1;
        if !installation.tick_gate().is_open() {
            tracing::debug!(frame = self.frame, "tick skipped, gate closed");
            return None;
        }
        Some(pollster::block_on(installation.tick(self.dt_ms, surface)))
    }
}
