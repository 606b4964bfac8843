//! Geometry tweens over a shared rectangle, and the chain that defers building them until
//! the rectangle exists.

use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::composite::Sequential;
use crate::animation::ease::Ease;
use crate::animation::node::{Animation, NodeState};
use crate::foundation::core::{Color, Point, Rect};
use crate::foundation::math::denormalize;
use crate::render::Surface;

pub use kurbo::Size;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color,
}

impl Rectangle {
    pub fn new(rect: Rect, color: Color) -> Self {
        let rect = rect.abs();
        Self {
            x: rect.x0,
            y: rect.y0,
            width: rect.width(),
            height: rect.height(),
            color,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin_size((self.x, self.y), (self.width, self.height))
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

pub type SharedRect = Rc<RefCell<Rectangle>>;

fn fill_shared(rect: &SharedRect, surface: &mut dyn Surface) {
    let r = *rect.borrow();
    surface.fill_rect(r.rect(), r.color);
}

fn eased(elapsed: f64, duration: f64, ease: Ease) -> f64 {
    if duration > 0.0 {
        ease.apply(elapsed / duration)
    } else {
        1.0
    }
}

/// Resizes the shared rectangle about its centre.
#[derive(Debug)]
pub struct Scale {
    node: NodeState,
    rect: SharedRect,
    from: Option<Size>,
    to: Size,
    duration: f64,
    elapsed: f64,
    ease: Ease,
}

impl Scale {
    pub fn new(rect: SharedRect, to: Size, duration_ms: f64, ease: Ease) -> Self {
        Self {
            node: NodeState::new("scale"),
            rect,
            from: None,
            to,
            duration: duration_ms.max(0.0),
            elapsed: 0.0,
            ease,
        }
    }
}

impl Animation for Scale {
    fn node(&self) -> &NodeState {
        &self.node
    }

    fn node_mut(&mut self) -> &mut NodeState {
        &mut self.node
    }

    fn advance(&mut self, dt_ms: f64) -> bool {
        let mut r = self.rect.borrow_mut();
        let from = *self.from.get_or_insert_with(|| r.size());
        self.elapsed = (self.elapsed + dt_ms.max(0.0)).min(self.duration);
        let t = eased(self.elapsed, self.duration, self.ease);
        let (width, height) = if t >= 1.0 {
            (self.to.width, self.to.height)
        } else {
            (
                denormalize(t, from.width, self.to.width),
                denormalize(t, from.height, self.to.height),
            )
        };

        r.x -= (width - r.width) / 2.0;
        r.y -= (height - r.height) / 2.0;
        r.width = width;
        r.height = height;

        self.elapsed >= self.duration
    }

    fn render(&self, surface: &mut dyn Surface) {
        fill_shared(&self.rect, surface);
    }
}

/// Moves the shared rectangle's top-left corner.
#[derive(Debug)]
pub struct Translate {
    node: NodeState,
    rect: SharedRect,
    from: Option<Point>,
    to: Point,
    duration: f64,
    elapsed: f64,
    ease: Ease,
}

impl Translate {
    pub fn new(rect: SharedRect, to: Point, duration_ms: f64, ease: Ease) -> Self {
        Self {
            node: NodeState::new("translate"),
            rect,
            from: None,
            to,
            duration: duration_ms.max(0.0),
            elapsed: 0.0,
            ease,
        }
    }
}

impl Animation for Translate {
    fn node(&self) -> &NodeState {
        &self.node
    }

    fn node_mut(&mut self) -> &mut NodeState {
        &mut self.node
    }

    fn advance(&mut self, dt_ms: f64) -> bool {
        let mut r = self.rect.borrow_mut();
        let from = *self.from.get_or_insert_with(|| r.origin());
        self.elapsed = (self.elapsed + dt_ms.max(0.0)).min(self.duration);
        let t = eased(self.elapsed, self.duration, self.ease);
        let p = if t >= 1.0 { self.to } else { from.lerp(self.to, t) };
        r.x = p.x;
        r.y = p.y;

        self.elapsed >= self.duration
    }

    fn render(&self, surface: &mut dyn Surface) {
        fill_shared(&self.rect, surface);
    }
}

/// A declared step, built into a node once the chain has a rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RectStep {
    Scale { to: Size, duration: f64, ease: Ease },
    Translate { to: Point, duration: f64, ease: Ease },
}

impl RectStep {
    fn build(self, rect: &SharedRect) -> Box<dyn Animation> {
        match self {
            Self::Scale { to, duration, ease } => {
                Box::new(Scale::new(rect.clone(), to, duration, ease))
            }
            Self::Translate { to, duration, ease } => {
                Box::new(Translate::new(rect.clone(), to, duration, ease))
            }
        }
    }
}

/// Write-once slot a [`RectangleChain`] reads its rectangle from.
///
/// Cloning shares the slot, so a finish callback elsewhere in the tree can bind the rectangle.
#[derive(Clone, Debug, Default)]
pub struct RectBinding(Rc<RefCell<Option<Rectangle>>>);

impl RectBinding {
    pub fn set(&self, rect: Rectangle) {
        *self.0.borrow_mut() = Some(rect);
    }

    pub fn get(&self) -> Option<Rectangle> {
        *self.0.borrow()
    }

    pub fn is_bound(&self) -> bool {
        self.0.borrow().is_some()
    }
}

#[derive(Debug)]
enum ChainState {
    Pending(Vec<RectStep>),
    Materialized(Sequential),
}

/// Sequence of rectangle steps declared before the rectangle is known.
#[derive(Debug)]
pub struct RectangleChain {
    node: NodeState,
    binding: RectBinding,
    shared: Option<SharedRect>,
    state: ChainState,
}

impl Default for RectangleChain {
    fn default() -> Self {
        Self::new()
    }
}

impl RectangleChain {
    pub fn new() -> Self {
        Self::with_binding(RectBinding::default())
    }

    pub fn with_binding(binding: RectBinding) -> Self {
        Self {
            node: NodeState::new("rectangle chain"),
            binding,
            shared: None,
            state: ChainState::Pending(Vec::new()),
        }
    }

    pub fn scale(self, to: Size, duration_ms: f64, ease: Ease) -> Self {
        self.step(RectStep::Scale {
            to,
            duration: duration_ms,
            ease,
        })
    }

    pub fn translate(self, to: Point, duration_ms: f64, ease: Ease) -> Self {
        self.step(RectStep::Translate {
            to,
            duration: duration_ms,
            ease,
        })
    }

    /// Appends a step. Ignored once the chain has materialised.
    pub fn step(mut self, step: RectStep) -> Self {
        match &mut self.state {
            ChainState::Pending(steps) => steps.push(step),
            ChainState::Materialized(_) => {
                tracing::warn!(name = self.node.name(), "step added after materialisation");
            }
        }
        self
    }

    pub fn set_rectangle(&self, rect: Rectangle) {
        self.binding.set(rect);
    }

    pub fn binding(&self) -> RectBinding {
        self.binding.clone()
    }

    pub fn is_materialized(&self) -> bool {
        matches!(self.state, ChainState::Materialized(_))
    }

    /// Current geometry of the rectangle being animated, once materialised.
    pub fn rectangle(&self) -> Option<Rectangle> {
        self.shared.as_ref().map(|r| *r.borrow())
    }

    fn materialize(&mut self) -> bool {
        let ChainState::Pending(steps) = &mut self.state else {
            return true;
        };
        let Some(rect) = self.binding.get() else {
            return false;
        };

        let shared = Rc::new(RefCell::new(rect));
        let children = steps.drain(..).map(|s| s.build(&shared)).collect();
        self.shared = Some(shared);
        self.state = ChainState::Materialized(Sequential::new(children));
        tracing::debug!(name = self.node.name(), "rectangle chain materialised");
        true
    }
}

impl Animation for RectangleChain {
    fn node(&self) -> &NodeState {
        &self.node
    }

    fn node_mut(&mut self) -> &mut NodeState {
        &mut self.node
    }

    fn advance(&mut self, dt_ms: f64) -> bool {
        if !self.materialize() {
            return false;
        }
        match &mut self.state {
            ChainState::Materialized(seq) => seq.update(dt_ms),
            ChainState::Pending(_) => false,
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        if let ChainState::Materialized(seq) = &self.state {
            seq.draw(surface);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/rectangle.rs"]
mod tests;
