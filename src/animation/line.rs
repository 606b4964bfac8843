use crate::animation::node::{Animation, NodeState};
use crate::foundation::core::{Color, Point};
use crate::render::Surface;

/// A line drawn from `from` towards `to` at constant speed.
#[derive(Debug)]
pub struct LineAnimation {
    node: NodeState,
    from: Point,
    to: Point,
    current: Point,
    duration: f64,
    elapsed: f64,
    color: Color,
    width: f64,
}

impl LineAnimation {
    pub fn new(from: Point, to: Point, duration_ms: f64) -> Self {
        Self {
            node: NodeState::new("line"),
            from,
            to,
            current: from,
            duration: duration_ms.max(0.0),
            elapsed: 0.0,
            color: Color::WHITE,
            width: 1.0,
        }
    }

    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.color = color;
        self.width = width;
        self
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }

    pub fn current(&self) -> Point {
        self.current
    }

    /// Each axis is done once it has covered its own span; a zero span counts as covered.
    fn reached(&self) -> bool {
        let span = self.to - self.from;
        let covered = self.current - self.from;
        span.x.abs() <= covered.x.abs() && span.y.abs() <= covered.y.abs()
    }
}

impl Animation for LineAnimation {
    fn node(&self) -> &NodeState {
        &self.node
    }

    fn node_mut(&mut self) -> &mut NodeState {
        &mut self.node
    }

    fn advance(&mut self, dt_ms: f64) -> bool {
        if self.node.is_finished() {
            return true;
        }
        if dt_ms <= 0.0 && self.duration > 0.0 {
            return false;
        }

        self.elapsed = (self.elapsed + dt_ms.max(0.0)).min(self.duration);
        let t = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            1.0
        };
        self.current = if t >= 1.0 {
            self.to
        } else {
            self.from.lerp(self.to, t)
        };

        if self.reached() {
            self.current = self.to;
            return true;
        }
        false
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.stroke_line(self.from, self.current, self.color, self.width);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/line.rs"]
mod tests;
