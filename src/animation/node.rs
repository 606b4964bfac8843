//! Lifecycle-aware animation nodes.
//!
//! [`Animation`] is implemented by every leaf and composite. Implementors supply [`NodeState`]
//! access, a kind-specific [`Animation::advance`] and [`Animation::render`]; the provided
//! `update`/`draw` wrap those with fade-out handling, opacity scoping and finish callbacks.

use crate::animation::ease::Ease;
use crate::render::{AlphaScope, Surface};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Lifecycle {
    Active,
    FadeOut {
        elapsed: f64,
        duration: f64,
        opacity: f64,
        ease: Ease,
        remove_when_invisible: bool,
    },
    Gone,
    ScheduledForDeletion,
}

impl Lifecycle {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Gone | Self::ScheduledForDeletion)
    }

    pub fn opacity(&self) -> f64 {
        match *self {
            Self::Active => 1.0,
            Self::FadeOut { opacity, .. } => opacity,
            Self::Gone | Self::ScheduledForDeletion => 0.0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity() > 0.0
    }

    fn step_fade(&mut self, dt_ms: f64) {
        let Self::FadeOut {
            elapsed,
            duration,
            opacity,
            ease,
            remove_when_invisible,
        } = self
        else {
            return;
        };

        *elapsed = (*elapsed + dt_ms.max(0.0)).min(*duration);
        let t = if *duration > 0.0 {
            *elapsed / *duration
        } else {
            1.0
        };
        *opacity = (1.0 - ease.apply(t)).max(0.0);

        if *opacity == 0.0 {
            *self = if *remove_when_invisible {
                Self::ScheduledForDeletion
            } else {
                Self::Gone
            };
        }
    }
}

pub type FinishCallback = Box<dyn FnOnce()>;

/// Bookkeeping shared by every node kind.
pub struct NodeState {
    name: String,
    lifecycle: Lifecycle,
    temporary: bool,
    finished: bool,
    on_finish: Option<FinishCallback>,
}

impl NodeState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lifecycle: Lifecycle::Active,
            temporary: false,
            finished: false,
            on_finish: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_temporary(&self) -> bool {
        self.temporary
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl std::fmt::Debug for NodeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeState")
            .field("name", &self.name)
            .field("lifecycle", &self.lifecycle)
            .field("temporary", &self.temporary)
            .field("finished", &self.finished)
            .field("on_finish", &self.on_finish.is_some())
            .finish()
    }
}

pub trait Animation {
    fn node(&self) -> &NodeState;
    fn node_mut(&mut self) -> &mut NodeState;

    /// Kind-specific progress by `dt_ms`. Returns whether the node is finished.
    fn advance(&mut self, dt_ms: f64) -> bool;

    /// Kind-specific drawing. Called by [`Animation::draw`] with opacity already applied.
    fn render(&self, surface: &mut dyn Surface);

    fn update(&mut self, dt_ms: f64) -> bool {
        let node = self.node_mut();
        node.lifecycle.step_fade(dt_ms);
        if node.lifecycle.is_terminal() {
            return true;
        }

        let was_finished = node.finished;
        let finished = self.advance(dt_ms);

        let node = self.node_mut();
        node.finished = finished;
        if !was_finished && finished {
            tracing::debug!(name = %node.name, "animation finished");
            if let Some(callback) = node.on_finish.take() {
                callback();
            }
        }
        finished
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let lifecycle = self.node().lifecycle;
        if !lifecycle.is_visible() {
            return;
        }
        let mut scope = AlphaScope::new(surface, lifecycle.opacity());
        self.render(scope.surface());
    }

    fn fade_out(&mut self, duration_ms: f64, ease: Ease, remove_when_invisible: bool) {
        let node = self.node_mut();
        if node.lifecycle.is_terminal() {
            return;
        }
        node.lifecycle = Lifecycle::FadeOut {
            elapsed: 0.0,
            duration: duration_ms.max(0.0),
            opacity: 1.0,
            ease,
            remove_when_invisible,
        };
    }

    fn should_delete(&self) -> bool {
        let node = self.node();
        node.lifecycle == Lifecycle::ScheduledForDeletion || (node.finished && node.temporary)
    }

    fn is_finished(&self) -> bool {
        let node = self.node();
        node.finished || node.lifecycle.is_terminal()
    }

    fn name(&self) -> &str {
        self.node().name()
    }

    fn set_name(&mut self, name: &str) {
        self.node_mut().name = name.to_owned();
    }

    fn set_temporary(&mut self, temporary: bool) {
        self.node_mut().temporary = temporary;
    }

    /// Runs once, on the first update that reports the node finished.
    fn set_on_finish(&mut self, callback: FinishCallback) {
        self.node_mut().on_finish = Some(callback);
    }

    fn named(mut self, name: &str) -> Self
    where
        Self: Sized,
    {
        self.set_name(name);
        self
    }

    fn temporary(mut self) -> Self
    where
        Self: Sized,
    {
        self.set_temporary(true);
        self
    }

    fn boxed(self) -> Box<dyn Animation>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl std::fmt::Debug for dyn Animation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Animation").field(self.node()).finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/node.rs"]
mod tests;
