use crate::animation::ease::Ease;
use crate::foundation::math::denormalize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Paused,
    Forward,
    Reverse,
}

/// A bounded timeline over one eased value that can run forwards or backwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    duration: f64,
    ease: Ease,
    progress: f64,
    direction: Direction,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration_ms: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration: duration_ms.max(0.0),
            ease,
            progress: 0.0,
            direction: Direction::Paused,
        }
    }

    pub fn play(&mut self) {
        self.direction = Direction::Forward;
    }

    pub fn reverse(&mut self) {
        self.direction = Direction::Reverse;
    }

    pub fn pause(&mut self) {
        self.direction = Direction::Paused;
    }

    /// Back to the start, paused.
    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.direction = Direction::Paused;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Moves along the current direction and returns the new progress.
    pub fn advance(&mut self, dt_ms: f64) -> f64 {
        let step = if self.duration > 0.0 {
            dt_ms.max(0.0) / self.duration
        } else {
            1.0
        };
        self.progress = match self.direction {
            Direction::Paused => self.progress,
            Direction::Forward => (self.progress + step).min(1.0),
            Direction::Reverse => (self.progress - step).max(0.0),
        };
        self.progress
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn set_progress(&mut self, progress: f64) {
        self.progress = progress.clamp(0.0, 1.0);
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    pub fn is_at_start(&self) -> bool {
        self.progress <= 0.0
    }

    pub fn value(&self) -> f64 {
        let t = self.ease.apply(self.progress);
        if t >= 1.0 {
            self.to
        } else {
            denormalize(t, self.from, self.to)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
