//! The phase state machine that runs the installation.
//!
//! [`Installation`] owns the collaborators, the per-cycle [`CycleContext`] and one state struct
//! per [`Phase`]. Each call to [`Installation::tick`] runs the current phase once and moves to
//! whatever phase it returns. Phase failures are logged and the phase is retried next frame.

pub mod color_steal;
pub mod config;
pub mod driver;
pub mod flash;
pub mod found;
pub mod idle;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

pub use config::{GateMode, HOLD_MS_ENV, InstallationConfig};
pub use driver::Driver;

use crate::capture::{CaptureSource, Frame};
use crate::foundation::core::Canvas;
use crate::foundation::error::BoothResult;
use crate::palette::{PaletteSampler, Swatch};
use crate::pose::{Pose, PoseEstimator};
use crate::render::Surface;

use color_steal::ColorSteal;
use flash::Flash;
use found::Found;
use idle::Idle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Found,
    Flash,
    ColorSteal,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Found => "found",
            Self::Flash => "flash",
            Self::ColorSteal => "color_steal",
        })
    }
}

/// Data carried between phases within one cycle.
#[derive(Clone, Debug, Default)]
pub struct CycleContext {
    pub frame: Option<Frame>,
    pub pose: Option<Pose>,
    pub hold_ms: f64,
}

impl CycleContext {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_none() && self.pose.is_none() && self.hold_ms == 0.0
    }
}

/// Open/closed flag the frame driver consults before ticking.
///
/// Closed while a capture is outstanding so the driver does not re-enter the phase.
#[derive(Clone, Debug)]
pub struct TickGate(Rc<Cell<bool>>);

impl Default for TickGate {
    fn default() -> Self {
        Self(Rc::new(Cell::new(true)))
    }
}

impl TickGate {
    pub fn is_open(&self) -> bool {
        self.0.get()
    }

    /// Closes the gate until the returned guard is dropped.
    pub fn close(&self) -> TickGateGuard {
        self.0.set(false);
        TickGateGuard(self.0.clone())
    }
}

#[must_use = "the gate reopens as soon as the guard is dropped"]
pub struct TickGateGuard(Rc<Cell<bool>>);

impl Drop for TickGateGuard {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

type StatusHook = Box<dyn FnMut(&str)>;
type ResultHook = Box<dyn FnMut(&Swatch)>;

#[derive(Default)]
struct Hooks {
    on_status: Option<StatusHook>,
    on_result: Option<ResultHook>,
}

/// Collaborators and settings shared by every phase.
pub struct Rig<C, P, S> {
    pub capture: C,
    pub estimator: P,
    pub sampler: S,
    pub config: InstallationConfig,
    pub canvas: Canvas,
    gate: TickGate,
    hooks: Hooks,
}

impl<C, P, S> Rig<C, P, S> {
    pub fn gate(&self) -> &TickGate {
        &self.gate
    }

    pub(crate) fn emit_status(&mut self, message: &str) {
        tracing::info!(status = message, "status changed");
        if let Some(hook) = self.hooks.on_status.as_mut() {
            hook(message);
        }
    }

    pub(crate) fn emit_result(&mut self, swatch: &Swatch) {
        tracing::info!(%swatch, "palette stolen");
        if let Some(hook) = self.hooks.on_result.as_mut() {
            hook(swatch);
        }
    }
}

pub struct Installation<C, P, S> {
    rig: Rig<C, P, S>,
    phase: Phase,
    ctx: CycleContext,
    idle: Idle,
    found: Found,
    flash: Flash,
    steal: ColorSteal,
}

impl<C, P, S> Installation<C, P, S>
where
    C: CaptureSource,
    P: PoseEstimator,
    S: PaletteSampler,
{
    pub fn new(
        canvas: Canvas,
        config: InstallationConfig,
        capture: C,
        estimator: P,
        sampler: S,
    ) -> BoothResult<Self> {
        config.validate()?;
        Ok(Self {
            idle: Idle::new(canvas, &config),
            found: Found::new(&config),
            flash: Flash::new(&config),
            steal: ColorSteal::default(),
            rig: Rig {
                capture,
                estimator,
                sampler,
                config,
                canvas,
                gate: TickGate::default(),
                hooks: Hooks::default(),
            },
            phase: Phase::Idle,
            ctx: CycleContext::default(),
        })
    }

    /// Called from Idle whenever landmark completeness flips.
    pub fn on_status(mut self, hook: impl FnMut(&str) + 'static) -> Self {
        self.rig.hooks.on_status = Some(Box::new(hook));
        self
    }

    /// Called once per completed cycle with the six prominent colours.
    pub fn on_result(mut self, hook: impl FnMut(&Swatch) + 'static) -> Self {
        self.rig.hooks.on_result = Some(Box::new(hook));
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn context(&self) -> &CycleContext {
        &self.ctx
    }

    pub fn config(&self) -> &InstallationConfig {
        &self.rig.config
    }

    pub fn canvas(&self) -> Canvas {
        self.rig.canvas
    }

    pub fn tick_gate(&self) -> TickGate {
        self.rig.gate.clone()
    }

    /// True when no cycle is in flight: every per-cycle timer, flag and buffer is at rest.
    pub fn is_at_rest(&self) -> bool {
        self.phase == Phase::Idle
            && self.ctx.is_empty()
            && self.found.is_at_rest()
            && self.flash.is_at_rest()
            && self.steal.is_at_rest()
    }

    /// Runs the current phase once. A closed tick gate skips the tick entirely.
    pub async fn tick(&mut self, dt_ms: f64, surface: &mut dyn Surface) -> Phase {
        if !self.rig.gate.is_open() {
            tracing::trace!(phase = %self.phase, "tick gate closed, skipping");
            return self.phase;
        }

        let started = Instant::now();
        let dt_ms = if dt_ms.is_finite() {
            dt_ms.max(0.0)
        } else {
            tracing::warn!(dt_ms, phase = %self.phase, "non-finite frame time, using 0");
            0.0
        };
        let result = match self.phase {
            Phase::Idle => {
                self.idle
                    .tick(&mut self.rig, &mut self.ctx, dt_ms, surface)
                    .await
            }
            Phase::Found => {
                self.found
                    .tick(&mut self.rig, &mut self.ctx, dt_ms, surface)
                    .await
            }
            Phase::Flash => {
                self.flash
                    .tick(&mut self.rig, &mut self.ctx, dt_ms, surface)
                    .await
            }
            Phase::ColorSteal => {
                self.steal
                    .tick(&mut self.rig, &mut self.ctx, dt_ms, surface)
                    .await
            }
        };

        let next = match result {
            Ok(next) => next,
            Err(err) if err.is_transient() => {
                tracing::warn!(phase = %self.phase, %err, "tick failed, retrying next frame");
                self.phase
            }
            Err(err) => {
                tracing::error!(phase = %self.phase, %err, "tick failed, retrying next frame");
                self.phase
            }
        };

        if next != self.phase {
            tracing::info!(from = %self.phase, to = %next, "phase transition");
        }
        self.phase = next;

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        if elapsed_ms > self.rig.config.slow_tick_ms {
            tracing::warn!(phase = %next, elapsed_ms, "slow tick");
        }
        next
    }
}

#[cfg(test)]
#[path = "../../tests/unit/installation/support.rs"]
pub(crate) mod support;

#[cfg(test)]
#[path = "../../tests/unit/installation/mod.rs"]
mod tests;
