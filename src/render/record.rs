use crate::capture::Frame;
use crate::foundation::core::{Affine, BezPath, Canvas, Color, Point, Rect};
use crate::render::Surface;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear(Color),
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, color: Color, width: f64 },
    Line { from: Point, to: Point, color: Color, width: f64 },
    FillCircle { center: Point, radius: f64, color: Color },
    StrokeCircle { center: Point, radius: f64, color: Color, width: f64 },
    FillPath { bounds: Rect, color: Color },
    StrokePath { bounds: Rect, color: Color, width: f64 },
    Frame { width: u32, height: u32, dest: Rect },
}

/// One recorded primitive with the state it was issued under.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCmd {
    pub op: DrawOp,
    pub alpha: f64,
    pub transform: Affine,
}

#[derive(Clone, Copy, Debug)]
struct State {
    transform: Affine,
    alpha: f64,
}

/// Surface that records instead of rasterising.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    state: State,
    stack: Vec<State>,
    commands: Vec<DrawCmd>,
}

impl RecordingSurface {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            state: State {
                transform: Affine::IDENTITY,
                alpha: 1.0,
            },
            stack: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Drains the log, keeping transform and alpha.
    pub fn take(&mut self) -> Vec<DrawCmd> {
        std::mem::take(&mut self.commands)
    }

    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(&c.op)).count()
    }

    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    fn push(&mut self, op: DrawOp) {
        self.commands.push(DrawCmd {
            op,
            alpha: self.state.alpha,
            transform: self.state.transform,
        });
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self, color: Color) {
        self.push(DrawOp::Clear(color));
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
        self.push(DrawOp::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        self.push(DrawOp::StrokeRect { rect, color, width });
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color, width: f64) {
        self.push(DrawOp::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.push(DrawOp::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, color: Color, width: f64) {
        self.push(DrawOp::StrokeCircle {
            center,
            radius,
            color,
            width,
        });
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.push(DrawOp::FillPath {
            bounds: kurbo::Shape::bounding_box(path),
            color,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        self.push(DrawOp::StrokePath {
            bounds: kurbo::Shape::bounding_box(path),
            color,
            width,
        });
    }

    fn draw_frame(&mut self, frame: &Frame, dest: Rect) {
        self.push(DrawOp::Frame {
            width: frame.width(),
            height: frame.height(),
            dest,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/record.rs"]
mod tests;
