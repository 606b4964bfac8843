use crate::animation::{Ease, Tween};
use crate::capture::CaptureSource;
use crate::foundation::error::BoothResult;
use crate::geometry::collision::CollisionBody;
use crate::installation::config::InstallationConfig;
use crate::installation::{CycleContext, Phase, Rig};
use crate::palette::PaletteSampler;
use crate::pose::{PoseEstimator, estimate_pose};
use crate::render::{Surface, draw_keypoints};

const OUTLINE_FROM: f64 = 5.0;
const OUTLINE_TO: f64 = 200.0;

/// Debounce gate: the body outline swells while every landmark stays inside the collision
/// body and shrinks back otherwise.
pub struct Found {
    swell: Tween,
}

impl Found {
    pub fn new(config: &InstallationConfig) -> Self {
        Self {
            swell: Tween::new(OUTLINE_FROM, OUTLINE_TO, config.found_ms, Ease::InSine),
        }
    }

    pub fn progress(&self) -> f64 {
        self.swell.progress()
    }

    pub(crate) fn is_at_rest(&self) -> bool {
        self.swell.is_at_start()
    }

    #[tracing::instrument(level = "debug", name = "found", skip_all, fields(dt_ms = dt_ms))]
    pub async fn tick<C, P, S>(
        &mut self,
        rig: &mut Rig<C, P, S>,
        ctx: &mut CycleContext,
        dt_ms: f64,
        surface: &mut dyn Surface,
    ) -> BoothResult<Phase>
    where
        C: CaptureSource,
        P: PoseEstimator,
        S: PaletteSampler,
    {
        let body = CollisionBody::for_canvas(rig.canvas);
        let frame = {
            let _closed = rig.gate().close();
            rig.capture.capture_frame(rig.canvas).await?
        };
        let pose = estimate_pose(&mut rig.estimator, &frame, rig.config.min_score).await?;
        let all_in = body.colliding(pose.positions());

        if all_in {
            self.swell.play();
        } else {
            self.swell.reverse();
        }
        self.swell.advance(dt_ms);

        let config = &rig.config;
        surface.clear(config.background);
        surface.draw_frame(&frame, rig.canvas.rect());
        body.draw_outline(surface, config.accent, self.swell.value());
        if config.debug_overlay {
            draw_keypoints(surface, &pose.keypoints, config.min_score);
        }

        if self.swell.is_complete() {
            self.swell.reset();
            ctx.pose = Some(pose);
            return Ok(Phase::Flash);
        }
        if self.swell.is_at_start() {
            self.swell.reset();
            ctx.reset();
            return Ok(Phase::Idle);
        }
        Ok(Phase::Found)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/installation/found.rs"]
mod tests;
