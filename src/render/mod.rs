//! The drawing-surface collaborator.
//!
//! Everything the installation renders goes through [`Surface`]. Two implementations ship with
//! the crate: [`CpuSurface`] rasterises with `vello_cpu`, [`RecordingSurface`] keeps a command
//! log for tests and headless runs.

pub mod cpu;
pub mod record;

pub use cpu::CpuSurface;
pub use record::{DrawCmd, DrawOp, RecordingSurface};

use crate::capture::Frame;
use crate::foundation::core::{Affine, BezPath, Canvas, Color, Point, Rect};

/// Primitive drawing operations. Colours are multiplied by the current global alpha.
///
/// `save`/`restore` push and pop the transform and global alpha.
pub trait Surface {
    fn size(&self) -> Canvas;

    fn clear(&mut self, color: Color);

    fn save(&mut self);
    fn restore(&mut self);

    /// Pre-multiplies the current transform.
    fn transform(&mut self, affine: Affine);

    fn global_alpha(&self) -> f64;
    fn set_global_alpha(&mut self, alpha: f64);

    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);
    fn stroke_line(&mut self, from: Point, to: Point, color: Color, width: f64);
    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);
    fn stroke_circle(&mut self, center: Point, radius: f64, color: Color, width: f64);
    fn fill_path(&mut self, path: &BezPath, color: Color);
    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64);

    /// Draws `frame` stretched into `dest`.
    fn draw_frame(&mut self, frame: &Frame, dest: Rect);
}

/// Multiplies the surface's global alpha for as long as the scope lives.
pub struct AlphaScope<'a> {
    surface: &'a mut dyn Surface,
    restore: f64,
}

impl<'a> AlphaScope<'a> {
    pub fn new(surface: &'a mut dyn Surface, opacity: f64) -> Self {
        let restore = surface.global_alpha();
        surface.set_global_alpha(restore * opacity.clamp(0.0, 1.0));
        Self { surface, restore }
    }

    pub fn surface(&mut self) -> &mut dyn Surface {
        &mut *self.surface
    }
}

impl Drop for AlphaScope<'_> {
    fn drop(&mut self) {
        self.surface.set_global_alpha(self.restore);
    }
}

/// Blue keypoint dots, skipping anything below `min_score`.
pub fn draw_keypoints(
    surface: &mut dyn Surface,
    keypoints: &[crate::pose::Keypoint],
    min_score: f64,
) {
    for k in keypoints.iter().filter(|k| k.score >= min_score) {
        surface.fill_circle(k.position, 3.0, Color::rgb(0, 0, 255));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/mod.rs"]
mod tests;
