//! Decorative blob that trails the subject's silhouette in the Idle phase.

use std::f64::consts::TAU;

use crate::foundation::core::{BezPath, Canvas, Point, Vec2};
use crate::foundation::math::value_noise;
use crate::pose::{BodyPart, Pose};

const MAX_STEP_SECS: f64 = 1.0 / 120.0;
/// Longest span simulated per update; a stalled frame does not fling the chain.
const MAX_UPDATE_SECS: f64 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Relative radius wobble of the idle circle.
    pub wobble: f64,
    /// Noise samples per second.
    pub wobble_speed: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 60.0,
            damping: 9.0,
            mass: 1.0,
            wobble: 0.12,
            wobble_speed: 0.4,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Node {
    pos: Point,
    vel: Vec2,
}

/// Mass-spring chain, one node per [`BodyPart::OUTLINE`] entry.
#[derive(Clone, Debug)]
pub struct ShapeFollower {
    params: SpringParams,
    nodes: Vec<Node>,
    clock_secs: f64,
    seed: u64,
}

impl ShapeFollower {
    pub fn new(canvas: Canvas, params: SpringParams, seed: u64) -> Self {
        let mut out = Self {
            params,
            nodes: Vec::with_capacity(BodyPart::OUTLINE.len()),
            clock_secs: 0.0,
            seed,
        };
        for i in 0..BodyPart::OUTLINE.len() {
            out.nodes.push(Node {
                pos: out.idle_target(canvas, i),
                vel: Vec2::ZERO,
            });
        }
        out
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.nodes.iter().map(|n| n.pos)
    }

    fn idle_target(&self, canvas: Canvas, i: usize) -> Point {
        let n = BodyPart::OUTLINE.len() as f64;
        let center = canvas.center();
        let base = f64::from(canvas.width.min(canvas.height)) * 0.25;
        let wobble = value_noise(
            self.seed,
            i as u64,
            self.clock_secs * self.params.wobble_speed,
        );
        let r = base * (1.0 + self.params.wobble * wobble);
        let angle = (i as f64) * TAU / n;
        center + Vec2::new(angle.cos(), angle.sin()) * r
    }

    /// Springs every node towards its landmark, or the idle circle where the landmark is absent.
    pub fn update(&mut self, dt_ms: f64, pose: Option<&Pose>, canvas: Canvas) {
        let mut remaining = if dt_ms.is_finite() {
            (dt_ms / 1000.0).clamp(0.0, MAX_UPDATE_SECS)
        } else {
            0.0
        };
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP_SECS);
            remaining -= h;
            self.clock_secs += h;

            for i in 0..self.nodes.len() {
                let target = pose
                    .and_then(|p| p.get(BodyPart::OUTLINE[i]))
                    .unwrap_or_else(|| self.idle_target(canvas, i));
                let SpringParams {
                    stiffness,
                    damping,
                    mass,
                    ..
                } = self.params;
                let node = &mut self.nodes[i];
                let accel = ((target - node.pos) * stiffness - node.vel * damping) / mass;
                node.vel += accel * h;
                node.pos += node.vel * h;
            }
        }
    }

    /// Closed curve through the midpoints of consecutive nodes.
    pub fn path(&self) -> BezPath {
        smooth_closed_path(&self.nodes.iter().map(|n| n.pos).collect::<Vec<_>>())
    }
}

pub fn smooth_closed_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return path;
    };

    path.move_to(last.midpoint(first));
    for (i, &p) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        path.quad_to(p, p.midpoint(next));
    }
    path.close_path();
    path
}

#[cfg(test)]
#[path = "../../tests/unit/pose/follower.rs"]
mod tests;
