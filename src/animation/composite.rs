use crate::animation::node::{Animation, NodeState};
use crate::render::Surface;

/// Runs every child each tick; finished once all remaining children are.
#[derive(Debug)]
pub struct Parallel {
    node: NodeState,
    children: Vec<Box<dyn Animation>>,
}

impl Parallel {
    pub fn new(children: Vec<Box<dyn Animation>>) -> Self {
        Self {
            node: NodeState::new("parallel"),
            children,
        }
    }

    pub fn push(&mut self, child: Box<dyn Animation>) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Box<dyn Animation>] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Animation for Parallel {
    fn node(&self) -> &NodeState {
        &self.node
    }

    fn node_mut(&mut self) -> &mut NodeState {
        &mut self.node
    }

    fn advance(&mut self, dt_ms: f64) -> bool {
        self.children.retain(|child| {
            let delete = child.should_delete();
            if delete {
                tracing::debug!(name = child.name(), "pruning child");
            }
            !delete
        });

        let mut all_finished = true;
        for child in &mut self.children {
            all_finished &= child.update(dt_ms);
        }
        all_finished
    }

    fn render(&self, surface: &mut dyn Surface) {
        for child in &self.children {
            child.draw(surface);
        }
    }
}

/// Runs children one after another.
///
/// Finished children keep being updated (and drawn) so their final state stays on screen; a
/// child is only drawn once every child before it has finished.
#[derive(Debug)]
pub struct Sequential {
    node: NodeState,
    children: Vec<Box<dyn Animation>>,
}

impl Sequential {
    pub fn new(children: Vec<Box<dyn Animation>>) -> Self {
        Self {
            node: NodeState::new("sequential"),
            children,
        }
    }

    pub fn push(&mut self, child: Box<dyn Animation>) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Box<dyn Animation>] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Animation for Sequential {
    fn node(&self) -> &NodeState {
        &self.node
    }

    fn node_mut(&mut self) -> &mut NodeState {
        &mut self.node
    }

    fn advance(&mut self, dt_ms: f64) -> bool {
        let mut i = 0;
        while i < self.children.len() {
            if self.children[i].should_delete() {
                let child = self.children.remove(i);
                tracing::debug!(name = child.name(), "pruning child");
                continue;
            }
            if !self.children[i].update(dt_ms) {
                return false;
            }
            i += 1;
        }
        true
    }

    fn render(&self, surface: &mut dyn Surface) {
        for child in &self.children {
            child.draw(surface);
            if !child.is_finished() {
                break;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/composite.rs"]
mod tests;
