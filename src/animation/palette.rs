//! Swatch reveal and the highlight that settles on the prominent colour.

use crate::animation::ease::Ease;
use crate::animation::node::{Animation, NodeState};
use crate::foundation::core::{Color, Point, Rect};
use crate::render::Surface;

/// Swatches appearing left to right as filled boxes.
#[derive(Debug)]
pub struct PaletteReveal {
    node: NodeState,
    colors: Vec<Color>,
    top_left: Point,
    box_size: f64,
    duration: f64,
    elapsed: f64,
    revealed: usize,
}

impl PaletteReveal {
    pub fn new(colors: Vec<Color>, top_left: Point, box_size: f64, duration_ms: f64) -> Self {
        Self {
            node: NodeState::new("palette reveal"),
            colors,
            top_left,
            box_size,
            duration: duration_ms.max(0.0),
            elapsed: 0.0,
            revealed: 0,
        }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn swatch_rect(&self, index: usize) -> Rect {
        Rect::from_origin_size(
            (self.top_left.x + self.box_size * index as f64, self.top_left.y),
            (self.box_size, self.box_size),
        )
    }
}

impl Animation for PaletteReveal {
    fn node(&self) -> &NodeState {
        &self.node
    }

    fn node_mut(&mut self) -> &mut NodeState {
        &mut self.node
    }

    fn advance(&mut self, dt_ms: f64) -> bool {
        let len = self.colors.len();
        self.elapsed = (self.elapsed + dt_ms.max(0.0)).min(self.duration);
        let t = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            1.0
        };
        self.revealed = ((t * len as f64).floor() as usize).min(len);
        self.revealed == len
    }

    fn render(&self, surface: &mut dyn Surface) {
        for (i, &color) in self.colors.iter().take(self.revealed).enumerate() {
            surface.fill_rect(self.swatch_rect(i), color);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum HighlightStage {
    Revealing,
    Cycling,
    Blinking,
    Focus,
}

/// Full laps the outline makes around the palette before landing on the prominent swatch.
pub const LOOP_COUNT: usize = 3;

const CYCLE_SHARE: f64 = 0.60;
const BLINK_SHARE: f64 = 0.25;
const FOCUS_SHARE: f64 = 0.15;
const BLINKS: f64 = 3.0;

/// Runs a [`PaletteReveal`], then cycles an outline over the swatches, blinks it on the
/// prominent one and finally fills that swatch solid.
#[derive(Debug)]
pub struct HighlightPalette {
    node: NodeState,
    reveal: PaletteReveal,
    prominent: usize,
    duration: f64,
    ease: Ease,
    stage: HighlightStage,
    stage_elapsed: f64,
    outline_index: usize,
    outline_alpha: f64,
    blink_rising: bool,
}

impl HighlightPalette {
    pub fn new(reveal: PaletteReveal, prominent: usize, duration_ms: f64, ease: Ease) -> Self {
        let prominent = prominent.min(reveal.len().saturating_sub(1));
        Self {
            node: NodeState::new("highlight palette"),
            reveal,
            prominent,
            duration: duration_ms.max(0.0),
            ease,
            stage: HighlightStage::Revealing,
            stage_elapsed: 0.0,
            outline_index: 0,
            outline_alpha: 1.0,
            blink_rising: false,
        }
    }

    pub fn stage(&self) -> HighlightStage {
        self.stage
    }

    pub fn outline_index(&self) -> usize {
        self.outline_index
    }

    pub fn outline_alpha(&self) -> f64 {
        self.outline_alpha
    }

    pub fn prominent(&self) -> usize {
        self.prominent
    }

    pub fn prominent_color(&self) -> Option<Color> {
        self.reveal.colors().get(self.prominent).copied()
    }

    pub fn prominent_rect(&self) -> Rect {
        self.reveal.swatch_rect(self.prominent)
    }

    pub fn reveal(&self) -> &PaletteReveal {
        &self.reveal
    }

    fn allotment(&self, stage: HighlightStage) -> f64 {
        let share = match stage {
            HighlightStage::Cycling => CYCLE_SHARE,
            HighlightStage::Blinking => BLINK_SHARE,
            HighlightStage::Focus => FOCUS_SHARE,
            HighlightStage::Revealing => 0.0,
        };
        self.duration * share
    }

    fn final_index(&self) -> usize {
        LOOP_COUNT * self.reveal.len() + self.prominent
    }

    fn enter(&mut self, stage: HighlightStage) {
        tracing::trace!(from = ?self.stage, to = ?stage, "highlight stage");
        self.stage = stage;
        self.stage_elapsed = 0.0;
        match stage {
            HighlightStage::Blinking => {
                self.outline_index = self.prominent;
                self.outline_alpha = 1.0;
                self.blink_rising = false;
            }
            HighlightStage::Focus => {
                self.outline_index = self.prominent;
                self.outline_alpha = 1.0;
            }
            HighlightStage::Revealing | HighlightStage::Cycling => {}
        }
    }

    fn step_blink(&mut self, dt_ms: f64) {
        let half_period = self.allotment(HighlightStage::Blinking) / (2.0 * BLINKS);
        if half_period <= 0.0 {
            return;
        }
        let step = dt_ms / half_period;
        let next = if self.blink_rising {
            self.outline_alpha + step
        } else {
            self.outline_alpha - step
        };
        if next >= 1.0 {
            self.outline_alpha = 1.0;
            self.blink_rising = false;
        } else if next <= 0.0 {
            self.outline_alpha = 0.0;
            self.blink_rising = true;
        } else {
            self.outline_alpha = next;
        }
    }
}

impl Animation for HighlightPalette {
    fn node(&self) -> &NodeState {
        &self.node
    }

    fn node_mut(&mut self) -> &mut NodeState {
        &mut self.node
    }

    fn advance(&mut self, dt_ms: f64) -> bool {
        let dt_ms = dt_ms.max(0.0);
        match self.stage {
            HighlightStage::Revealing => {
                if self.reveal.update(dt_ms) {
                    if self.reveal.is_empty() {
                        return true;
                    }
                    self.enter(HighlightStage::Cycling);
                }
                false
            }
            HighlightStage::Cycling => {
                let allot = self.allotment(HighlightStage::Cycling);
                self.stage_elapsed = (self.stage_elapsed + dt_ms).min(allot);
                let t = if allot > 0.0 {
                    self.stage_elapsed / allot
                } else {
                    1.0
                };
                let step = (self.ease.apply(t) * self.final_index() as f64).floor() as usize;
                self.outline_index = step.min(self.final_index()) % self.reveal.len();
                if self.stage_elapsed >= allot {
                    self.enter(HighlightStage::Blinking);
                }
                false
            }
            HighlightStage::Blinking => {
                let allot = self.allotment(HighlightStage::Blinking);
                self.stage_elapsed = (self.stage_elapsed + dt_ms).min(allot);
                self.step_blink(dt_ms);
                if self.stage_elapsed >= allot {
                    self.enter(HighlightStage::Focus);
                }
                false
            }
            HighlightStage::Focus => {
                let allot = self.allotment(HighlightStage::Focus);
                self.stage_elapsed = (self.stage_elapsed + dt_ms).min(allot);
                self.stage_elapsed >= allot
            }
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.reveal.draw(surface);
        if self.reveal.is_empty() {
            return;
        }

        let rect = self.reveal.swatch_rect(self.outline_index);
        match self.stage {
            HighlightStage::Revealing => {}
            HighlightStage::Cycling | HighlightStage::Blinking => {
                surface.stroke_rect(rect, Color::WHITE.fade(self.outline_alpha), 2.0);
            }
            HighlightStage::Focus => {
                if let Some(color) = self.prominent_color() {
                    surface.fill_rect(rect, color);
                }
                surface.stroke_rect(rect, Color::WHITE, 3.0);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/palette.rs"]
mod tests;
