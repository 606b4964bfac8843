//! Silhouette hit-testing for the collision gate.

use crate::foundation::core::{BezPath, Canvas, Color, Point, Vec2};
use crate::render::Surface;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn contains(&self, p: Point) -> bool {
        (p - self.center).hypot2() <= self.radius * self.radius
    }
}

/// Simple polygon in local coordinates, placed at `origin`.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub origin: Point,
    pub points: Vec<Vec2>,
}

impl Polygon {
    pub fn world_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().map(|&v| self.origin + v)
    }

    /// Even-odd ray cast; handles the concave silhouette.
    pub fn contains(&self, p: Point) -> bool {
        let pts: Vec<Point> = self.world_points().collect();
        if pts.len() < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = pts.len() - 1;
        for i in 0..pts.len() {
            let (a, b) = (pts[i], pts[j]);
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Area centroid in world coordinates.
    pub fn centroid(&self) -> Point {
        let pts: Vec<Point> = self.world_points().collect();
        let n = pts.len();
        let mut area2 = 0.0;
        let mut c = Vec2::ZERO;
        for i in 0..n {
            let (a, b) = (pts[i], pts[(i + 1) % n]);
            let cross = a.x * b.y - b.x * a.y;
            area2 += cross;
            c += (a.to_vec2() + b.to_vec2()) * cross;
        }
        if area2.abs() < f64::EPSILON {
            let mean = pts.iter().fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
            return (mean / n.max(1) as f64).to_point();
        }
        (c / (3.0 * area2)).to_point()
    }

    pub fn path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = self.world_points();
        if let Some(first) = iter.next() {
            path.move_to(first);
            for p in iter {
                path.line_to(p);
            }
            path.close_path();
        }
        path
    }
}

/// Head circle plus torso-and-legs polygon, in a 100x250 reference frame.
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionBody {
    pub circle: Circle,
    pub body: Polygon,
}

impl CollisionBody {
    pub fn new(pos: Point, scale: f64) -> Self {
        let circle = Circle {
            center: Point::new(pos.x + 50.0 * scale, pos.y + 30.0 * scale),
            radius: 30.0 * scale,
        };
        let outline = [
            (0.0, 0.0),
            (100.0, 0.0),
            (100.0, 120.0),
            (80.0, 120.0),
            (80.0, 220.0),
            (20.0, 220.0),
            (20.0, 120.0),
            (0.0, 120.0),
        ];
        let body = Polygon {
            origin: Point::new(pos.x, pos.y + 50.0 * scale),
            points: outline
                .iter()
                .map(|&(x, y)| Vec2::new(x * scale, y * scale))
                .collect(),
        };
        Self { circle, body }
    }

    /// The silhouette the installation positions against a canvas of this size.
    pub fn for_canvas(canvas: Canvas) -> Self {
        Self::new(Point::new(20.0, 0.0), f64::from(canvas.height) / 280.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.body.contains(p) || self.circle.contains(p)
    }

    /// True iff there is at least one point and every point is inside the circle or polygon.
    pub fn colliding<I>(&self, points: I) -> bool
    where
        I: IntoIterator<Item = Point>,
    {
        let mut any = false;
        for p in points {
            if !self.contains(p) {
                return false;
            }
            any = true;
        }
        any
    }

    pub fn debug_draw(&self, surface: &mut dyn Surface, fill: Color) {
        surface.save();
        surface.fill_circle(self.circle.center, self.circle.radius, fill);
        surface.fill_path(&self.body.path(), fill);
        surface.restore();
    }

    /// Outline stroke whose width swells with the gate's progress.
    pub fn draw_outline(&self, surface: &mut dyn Surface, color: Color, line_width: f64) {
        surface.save();
        surface.stroke_path(&self.body.path(), color, line_width);
        surface.stroke_circle(self.circle.center, self.circle.radius, color, line_width);
        surface.restore();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/collision.rs"]
mod tests;
