use std::path::Path;

use crate::capture::Frame;
use crate::foundation::error::{BoothError, BoothResult};
use crate::pose::{Keypoint, PoseEstimator};

/// Plays back recorded estimates in order, looping at the end.
#[derive(Clone, Debug)]
pub struct ReplayEstimator {
    takes: Vec<Vec<Keypoint>>,
    cursor: usize,
}

impl ReplayEstimator {
    pub fn new(takes: Vec<Vec<Keypoint>>) -> BoothResult<Self> {
        if takes.is_empty() {
            return Err(BoothError::validation("pose replay needs at least one take"));
        }
        Ok(Self { takes, cursor: 0 })
    }

    /// Accepts either one take (`[keypoint, ...]`) or a list of takes (`[[keypoint, ...], ...]`).
    pub fn from_json(json: &str) -> BoothResult<Self> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Many(Vec<Vec<Keypoint>>),
            One(Vec<Keypoint>),
        }

        let repr: Repr = serde_json::from_str(json)
            .map_err(|e| BoothError::serde(format!("pose replay: {e}")))?;
        match repr {
            Repr::Many(takes) => Self::new(takes),
            Repr::One(take) => Self::new(vec![take]),
        }
    }

    pub fn load(path: &Path) -> BoothResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            BoothError::pose(format!("failed to read '{}': {e}", path.display()))
        })?;
        Self::from_json(&json)
    }
}

impl PoseEstimator for ReplayEstimator {
    async fn estimate(&mut self, _frame: &Frame) -> BoothResult<Vec<Keypoint>> {
        let take = self.takes[self.cursor % self.takes.len()].clone();
        self.cursor = self.cursor.wrapping_add(1);
        Ok(take)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pose/replay.rs"]
mod tests;
