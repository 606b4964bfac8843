use crate::capture::{CaptureSource, Frame};
use crate::foundation::core::{Canvas, Color};
use crate::foundation::error::BoothResult;
use crate::geometry::collision::CollisionBody;
use crate::installation::config::{GateMode, InstallationConfig};
use crate::installation::{CycleContext, Phase, Rig};
use crate::palette::PaletteSampler;
use crate::pose::follower::ShapeFollower;
use crate::pose::{BodyPart, Pose, PoseEstimator, estimate_pose};
use crate::render::{Surface, draw_keypoints};

pub const STATUS_INCOMPLETE: &str = "Step back until your whole body is in view";
pub const STATUS_COMPLETE: &str = "Perfect, hold still";

/// Waits for a subject. Accumulates an uninterrupted "perfect hold" in the cycle context.
///
/// Every incomplete tick asks the subject to step back; the hold prompt is announced once per
/// run of complete ticks.
pub struct Idle {
    follower: ShapeFollower,
    announced_complete: bool,
}

impl Idle {
    pub fn new(canvas: Canvas, config: &InstallationConfig) -> Self {
        Self {
            follower: ShapeFollower::new(canvas, config.follower, config.seed),
            announced_complete: false,
        }
    }

    #[tracing::instrument(level = "debug", name = "idle", skip_all, fields(dt_ms = dt_ms))]
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
        let frame = rig.capture.capture_frame(rig.canvas).await?;
        let pose = estimate_pose(&mut rig.estimator, &frame, rig.config.min_score).await?;
        let complete = pose.is_complete(&BodyPart::REQUIRED);

        if !complete {
            self.announced_complete = false;
            rig.emit_status(STATUS_INCOMPLETE);
        } else if !self.announced_complete {
            self.announced_complete = true;
            rig.emit_status(STATUS_COMPLETE);
        }

        let tracked = (!pose.is_empty()).then_some(&pose);
        self.follower.update(dt_ms, tracked, rig.canvas);

        let body = CollisionBody::for_canvas(rig.canvas);
        self.draw(rig, &body, &frame, &pose, surface);

        let next = match rig.config.gate {
            GateMode::HoldTimer => {
                if complete {
                    ctx.hold_ms += dt_ms;
                } else {
                    ctx.hold_ms = 0.0;
                }
                tracing::trace!(hold_ms = ctx.hold_ms, complete, "hold timer");
                if ctx.hold_ms > rig.config.hold_ms {
                    ctx.hold_ms = 0.0;
                    Phase::Flash
                } else {
                    Phase::Idle
                }
            }
            GateMode::Collision => {
                if body.colliding(pose.positions()) {
                    Phase::Found
                } else {
                    Phase::Idle
                }
            }
        };

        if next != Phase::Idle {
            // later phases capture their own frame; the pose is only a fallback
            self.announced_complete = false;
            ctx.pose = Some(pose);
        }
        Ok(next)
    }

    fn draw<C, P, S>(
        &self,
        rig: &Rig<C, P, S>,
        body: &CollisionBody,
        frame: &Frame,
        pose: &Pose,
        surface: &mut dyn Surface,
    ) {
        let config = &rig.config;
        surface.clear(config.background);
        surface.draw_frame(frame, rig.canvas.rect());
        surface.stroke_path(&self.follower.path(), config.accent, 4.0);
        if config.debug_overlay {
            if config.gate == GateMode::Collision {
                body.debug_draw(surface, Color::WHITE.with_alpha(64));
            }
            draw_keypoints(surface, &pose.keypoints, config.min_score);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/installation/idle.rs"]
mod tests;
