use crate::animation::{Ease, Tween};
use crate::capture::CaptureSource;
use crate::foundation::core::Color;
use crate::foundation::error::{BoothError, BoothResult};
use crate::installation::config::InstallationConfig;
use crate::installation::{CycleContext, Phase, Rig};
use crate::palette::PaletteSampler;
use crate::pose::{BodyPart, PoseEstimator, estimate_pose};
use crate::render::Surface;

/// Freezes the frame that will be sampled and fades a white overlay off it.
pub struct Flash {
    brightness: Tween,
}

impl Flash {
    pub fn new(config: &InstallationConfig) -> Self {
        Self {
            brightness: Tween::new(1.0, 0.0, config.flash_ms, Ease::InOutQuart),
        }
    }

    pub fn brightness(&self) -> f64 {
        self.brightness.value()
    }

    pub(crate) fn is_at_rest(&self) -> bool {
        self.brightness.is_at_start()
    }

    #[tracing::instrument(level = "debug", name = "flash", skip_all, fields(dt_ms = dt_ms))]
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
        if self.brightness.is_at_start() {
            let frame = rig.capture.capture_frame(rig.canvas).await?;
            if rig.config.refresh_pose_on_flash {
                let pose = estimate_pose(&mut rig.estimator, &frame, rig.config.min_score).await?;
                if pose.is_complete(&BodyPart::REQUIRED) || ctx.pose.is_none() {
                    ctx.pose = Some(pose);
                } else {
                    tracing::debug!("refreshed pose incomplete, keeping the earlier one");
                }
            }
            ctx.frame = Some(frame);
        }

        let frame = ctx
            .frame
            .as_ref()
            .ok_or_else(|| BoothError::capture("flash has no captured frame"))?;

        self.brightness.play();
        self.brightness.advance(dt_ms);

        surface.clear(Color::BLACK);
        surface.draw_frame(frame, rig.canvas.rect());
        surface.fill_rect(
            rig.canvas.rect(),
            Color::WHITE.fade(self.brightness.value()),
        );

        if self.brightness.is_complete() {
            self.brightness.reset();
            return Ok(Phase::ColorSteal);
        }
        Ok(Phase::Flash)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/installation/flash.rs"]
mod tests;
