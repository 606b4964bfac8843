use std::path::Path;

use crate::foundation::core::Color;
use crate::foundation::error::{BoothError, BoothResult};
use crate::pose::follower::SpringParams;

/// Environment override for [`InstallationConfig::hold_ms`].
pub const HOLD_MS_ENV: &str = "FARG_HOLD_MS";

/// How Idle decides the subject is ready.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMode {
    /// All required landmarks visible for longer than `hold_ms`, then straight to Flash.
    #[default]
    HoldTimer,
    /// Every landmark inside the collision body, then the Found debounce.
    Collision,
}

/// Every tunable of the installation. Durations are in milliseconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InstallationConfig {
    pub gate: GateMode,
    /// Keypoints scoring at or below this are dropped.
    pub min_score: f64,
    pub hold_ms: f64,
    pub found_ms: f64,
    pub flash_ms: f64,
    pub outline_ms: f64,
    pub reveal_ms: f64,
    pub highlight_ms: f64,
    pub rect_scale_ms: f64,
    pub rect_translate_ms: f64,
    pub box_size: f64,
    pub refresh_pose_on_flash: bool,
    pub max_pose_retries: u32,
    pub background: Color,
    pub accent: Color,
    pub debug_overlay: bool,
    pub follower: SpringParams,
    pub seed: u64,
    /// Ticks slower than this are logged.
    pub slow_tick_ms: f64,
}

impl Default for InstallationConfig {
    fn default() -> Self {
        Self {
            gate: GateMode::HoldTimer,
            min_score: 0.6,
            hold_ms: 3000.0,
            found_ms: 3000.0,
            flash_ms: 700.0,
            outline_ms: 1500.0,
            reveal_ms: 3000.0,
            highlight_ms: 3000.0,
            rect_scale_ms: 1000.0,
            rect_translate_ms: 1200.0,
            box_size: 32.0,
            refresh_pose_on_flash: true,
            max_pose_retries: 5,
            background: Color::rgb(0x02, 0x3f, 0x92),
            accent: Color::rgb(0xf7, 0x56, 0x6a),
            debug_overlay: true,
            follower: SpringParams::default(),
            seed: 0x00fa_4267,
            slow_tick_ms: 250.0,
        }
    }
}

impl InstallationConfig {
    pub fn from_json(json: &str) -> BoothResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| BoothError::serde(format!("invalid installation config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> BoothResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            BoothError::validation(format!("failed to read '{}': {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Applies `FARG_HOLD_MS` when it parses as a positive number; anything else is ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(hold) = std::env::var(HOLD_MS_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
        {
            tracing::debug!(hold_ms = hold, "hold threshold overridden from environment");
            self.hold_ms = hold;
        }
        self
    }

    pub fn validate(&self) -> BoothResult<()> {
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(BoothError::validation("min_score must be within [0, 1]"));
        }
        let positive = [
            ("hold_ms", self.hold_ms),
            ("found_ms", self.found_ms),
            ("flash_ms", self.flash_ms),
            ("box_size", self.box_size),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(BoothError::validation(format!("{name} must be > 0")));
            }
        }
        let non_negative = [
            ("outline_ms", self.outline_ms),
            ("reveal_ms", self.reveal_ms),
            ("highlight_ms", self.highlight_ms),
            ("rect_scale_ms", self.rect_scale_ms),
            ("rect_translate_ms", self.rect_translate_ms),
            ("slow_tick_ms", self.slow_tick_ms),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(BoothError::validation(format!("{name} must be >= 0")));
            }
        }
        let f = &self.follower;
        if f.mass <= 0.0 || f.stiffness < 0.0 || f.damping < 0.0 {
            return Err(BoothError::validation(
                "follower mass must be > 0 and stiffness/damping >= 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/installation/config.rs"]
mod tests;
