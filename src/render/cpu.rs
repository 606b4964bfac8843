use std::sync::Arc;

use kurbo::Shape as _;

use crate::capture::Frame;
use crate::foundation::core::{Affine, BezPath, Canvas, Color, Point, Rect};
use crate::foundation::error::{BoothError, BoothResult};
use crate::render::Surface;

#[derive(Clone, Copy, Debug)]
struct State {
    transform: Affine,
    alpha: f64,
}

/// Raster surface backed by `vello_cpu`.
pub struct CpuSurface {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    state: State,
    stack: Vec<State>,
}

impl CpuSurface {
    pub fn new(canvas: Canvas) -> BoothResult<Self> {
        let (w, h) = dims_u16(canvas.width, canvas.height)?;
        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            state: State {
                transform: Affine::IDENTITY,
                alpha: 1.0,
            },
            stack: Vec::new(),
        })
    }

    /// Flushes pending draws and reads back straight RGBA8.
    pub fn snapshot(&mut self) -> BoothResult<Frame> {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        let mut data = self.pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut data);
        Frame::new(self.canvas.width, self.canvas.height, data)
    }

    fn paint(&mut self, color: Color) {
        let c = color.fade(self.state.alpha);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
        self.ctx.set_transform(affine_to_cpu(self.state.transform));
    }

    fn visible(&self, color: Color) -> bool {
        self.state.alpha > 0.0 && color.a > 0
    }
}

impl Surface for CpuSurface {
    fn size(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self, color: Color) {
        self.ctx.reset();
        if color.a > 0 {
            let c = vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, color.a);
            self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            self.ctx.set_paint(c);
            self.ctx.fill_rect(&rect_to_cpu(self.canvas.rect()));
        }
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn transform(&mut self, affine: Affine) {
        self.state.transform = self.state.transform * affine;
    }

    fn global_alpha(&self) -> f64 {
        self.state.alpha
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if !self.visible(color) {
            return;
        }
        self.paint(color);
        self.ctx.fill_rect(&rect_to_cpu(rect.abs()));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        self.stroke_path(&rect.abs().to_path(0.1), color, width);
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color, width: f64) {
        let mut path = BezPath::new();
        path.move_to(from);
        path.line_to(to);
        self.stroke_path(&path, color, width);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.fill_path(&kurbo::Circle::new(center, radius).to_path(0.1), color);
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, color: Color, width: f64) {
        self.stroke_path(
            &kurbo::Circle::new(center, radius).to_path(0.1),
            color,
            width,
        );
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        if !self.visible(color) {
            return;
        }
        self.paint(color);
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        if !self.visible(color) || width <= 0.0 {
            return;
        }
        self.paint(color);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    fn draw_frame(&mut self, frame: &Frame, dest: Rect) {
        if self.state.alpha <= 0.0 || frame.width() == 0 || frame.height() == 0 {
            return;
        }
        let pixmap = match frame_to_pixmap(frame) {
            Ok(p) => p,
            Err(err) => {
                tracing::warn!(%err, "skipping frame draw");
                return;
            }
        };
        let image = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        let fw = f64::from(frame.width());
        let fh = f64::from(frame.height());
        let place = self.state.transform
            * Affine::translate(dest.origin().to_vec2())
            * Affine::scale_non_uniform(dest.width() / fw, dest.height() / fh);

        self.ctx.set_transform(affine_to_cpu(place));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(image);
        let opacity = self.state.alpha as f32;
        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, fw, fh));
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
    }
}

fn dims_u16(width: u32, height: u32) -> BoothResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BoothError::validation("surface width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BoothError::validation("surface height exceeds u16"))?;
    Ok((w, h))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn frame_to_pixmap(frame: &Frame) -> BoothResult<vello_cpu::Pixmap> {
    let (w, h) = dims_u16(frame.width(), frame.height())?;
    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(frame.data().len() / 4);
    for px in frame.data().chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        let premul = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: premul(px[0]),
            g: premul(px[1]),
            b: premul(px[2]),
            a,
        });
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
