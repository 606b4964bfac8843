//! Box the six regions, reveal each region's palette and fly its prominent colour out to the
//! result column.

use crate::animation::{
    Animation, Ease, HighlightPalette, LineAnimation, Parallel, PaletteReveal, RectBinding,
    Rectangle, RectangleChain, Sequential, Size,
};
use crate::capture::{CaptureSource, Frame};
use crate::foundation::core::{Canvas, Color, Point};
use crate::foundation::error::{BoothError, BoothResult};
use crate::geometry::bbox::{BodyRegion, BoundingBox, region_boxes};
use crate::installation::config::InstallationConfig;
use crate::installation::{CycleContext, Phase, Rig};
use crate::palette::{ColorSample, PaletteSampler, Swatch, sample_regions};
use crate::pose::{Pose, PoseEstimator, estimate_pose};
use crate::render::Surface;

const PALETTE_OFFSET: f64 = 20.0;
const RESULT_MARGIN: f64 = 20.0;
const RESULT_GAP: f64 = 8.0;

/// Per-cycle state: built on the first tick, dropped when the cycle completes.
#[derive(Default)]
pub struct ColorSteal {
    animation: Option<Sequential>,
    swatch: Option<Swatch>,
    retries: u32,
}

impl ColorSteal {
    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn is_building(&self) -> bool {
        self.animation.is_none()
    }

    pub(crate) fn is_at_rest(&self) -> bool {
        self.animation.is_none() && self.swatch.is_none() && self.retries == 0
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    #[tracing::instrument(level = "debug", name = "color_steal", skip_all, fields(dt_ms = dt_ms))]
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
        let Some(frame) = ctx.frame.as_ref() else {
            tracing::warn!("no captured frame, abandoning cycle");
            self.reset();
            ctx.reset();
            return Ok(Phase::Idle);
        };

        surface.clear(Color::BLACK);
        surface.draw_frame(frame, rig.canvas.rect());

        // the first tick only builds; time starts on the next one
        let dt_ms = if self.animation.is_none() {
            match self.build(rig, &mut ctx.pose, frame).await {
                Ok(()) => 0.0,
                Err(err) => return self.retry(rig, ctx, err),
            }
        } else {
            dt_ms
        };

        let Some(animation) = self.animation.as_mut() else {
            return Ok(Phase::ColorSteal);
        };
        let finished = animation.update(dt_ms);
        animation.draw(surface);

        if !finished {
            return Ok(Phase::ColorSteal);
        }

        if let Some(swatch) = self.swatch.take() {
            rig.emit_result(&swatch);
        }
        self.reset();
        ctx.reset();
        Ok(Phase::Idle)
    }

    fn retry<C, P, S>(
        &mut self,
        rig: &Rig<C, P, S>,
        ctx: &mut CycleContext,
        err: BoothError,
    ) -> BoothResult<Phase> {
        // the next attempt re-estimates from the captured frame
        ctx.pose = None;
        self.retries += 1;
        if self.retries > rig.config.max_pose_retries {
            tracing::warn!(%err, retries = self.retries, "giving up on this cycle");
            self.reset();
            ctx.reset();
            return Ok(Phase::Idle);
        }
        Err(err)
    }

    async fn build<C, P, S>(
        &mut self,
        rig: &mut Rig<C, P, S>,
        pose_slot: &mut Option<Pose>,
        frame: &Frame,
    ) -> BoothResult<()>
    where
        C: CaptureSource,
        P: PoseEstimator,
        S: PaletteSampler,
    {
        let pose = match pose_slot.take() {
            Some(pose) => pose,
            None => estimate_pose(&mut rig.estimator, frame, rig.config.min_score).await?,
        };
        let boxes = region_boxes(&pose);
        *pose_slot = Some(pose);
        let boxes = boxes?;
        let samples = sample_regions(&rig.sampler, frame, &boxes)?;

        self.swatch = Some(Swatch::from_samples(&samples));
        self.animation = Some(steal_animation(&rig.config, rig.canvas, &boxes, &samples));
        tracing::debug!("color steal animation built");
        Ok(())
    }
}

/// Where region `index`'s colour lands: a column down the right edge of the canvas.
pub fn result_slot(canvas: Canvas, box_size: f64, index: usize) -> Point {
    let size = box_size * 2.0;
    Point::new(
        f64::from(canvas.width) - RESULT_MARGIN - size,
        RESULT_MARGIN + index as f64 * (size + RESULT_GAP),
    )
}

fn outline(bb: &BoundingBox, duration_ms: f64) -> Parallel {
    let (sx, sy, ex, ey) = (bb.start_x, bb.start_y, bb.end_x, bb.end_y);
    let edges = [
        ((sx, sy), (ex, sy)),
        ((ex, ey), (sx, ey)),
        ((sx, sy), (sx, ey)),
        ((ex, ey), (ex, sy)),
    ];
    Parallel::new(
        edges
            .into_iter()
            .map(|(from, to)| {
                LineAnimation::new(Point::from(from), Point::from(to), duration_ms).boxed()
            })
            .collect(),
    )
}

fn palette_flight(
    config: &InstallationConfig,
    canvas: Canvas,
    index: usize,
    bb: &BoundingBox,
    sample: &ColorSample,
) -> Sequential {
    let top_left = Point::new(bb.end_x + PALETTE_OFFSET, bb.start_y - PALETTE_OFFSET);
    let reveal = PaletteReveal::new(
        sample.palette().to_vec(),
        top_left,
        config.box_size,
        config.reveal_ms,
    );
    let mut highlight = HighlightPalette::new(
        reveal,
        sample.prominent_index(),
        config.highlight_ms,
        Ease::OutCubic,
    );

    let binding = RectBinding::default();
    let landing = Rectangle::new(highlight.prominent_rect(), sample.prominent());
    let bind = binding.clone();
    highlight.set_on_finish(Box::new(move || bind.set(landing)));

    let chain = RectangleChain::with_binding(binding)
        .scale(
            Size::new(config.box_size * 2.0, config.box_size * 2.0),
            config.rect_scale_ms,
            Ease::OutCubic,
        )
        .translate(
            result_slot(canvas, config.box_size, index),
            config.rect_translate_ms,
            Ease::OutCubic,
        );

    Sequential::new(vec![highlight.boxed(), chain.boxed()])
}

/// `Sequential(Parallel(outlines), Parallel(Sequential(highlight, chain)...))`.
pub fn steal_animation(
    config: &InstallationConfig,
    canvas: Canvas,
    boxes: &[BoundingBox; 6],
    samples: &[ColorSample; 6],
) -> Sequential {
    let mut outlines = Vec::with_capacity(6);
    let mut palettes = Vec::with_capacity(6);
    for (i, ((bb, sample), region)) in boxes
        .iter()
        .zip(samples)
        .zip(BodyRegion::ALL)
        .enumerate()
    {
        let name = format!("{region:?}");
        outlines.push(
            outline(bb, config.outline_ms)
                .named(&format!("{name} outline"))
                .boxed(),
        );
        palettes.push(
            palette_flight(config, canvas, i, bb, sample)
                .named(&format!("{name} palette"))
                .boxed(),
        );
    }
    Sequential::new(vec![
        Parallel::new(outlines).named("outlines").boxed(),
        Parallel::new(palettes).named("palettes").boxed(),
    ])
}

#[cfg(test)]
#[path = "../../tests/unit/installation/color_steal.rs"]
mod tests;
