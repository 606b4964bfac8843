//! Named body landmarks and the pose-estimation collaborator.

pub mod follower;
pub mod replay;

use std::fmt;

use crate::capture::Frame;
use crate::foundation::core::Point;
use crate::foundation::error::{BoothError, BoothResult};

/// Landmarks reported by single-person pose models, in model order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum BodyPart {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl BodyPart {
    pub const ALL: [BodyPart; 17] = [
        Self::Nose,
        Self::LeftEye,
        Self::RightEye,
        Self::LeftEar,
        Self::RightEar,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
    ];

    /// Landmarks every region box depends on. A pose lacking any of these cannot be sampled.
    pub const REQUIRED: [BodyPart; 10] = [
        Self::LeftEye,
        Self::LeftEar,
        Self::RightEar,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::LeftHip,
        Self::RightHip,
        Self::RightKnee,
        Self::LeftAnkle,
    ];

    /// Clockwise walk around the silhouette, used by the shape follower.
    pub const OUTLINE: [BodyPart; 15] = [
        Self::Nose,
        Self::LeftEar,
        Self::LeftShoulder,
        Self::LeftElbow,
        Self::LeftWrist,
        Self::LeftHip,
        Self::LeftKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::RightKnee,
        Self::RightHip,
        Self::RightWrist,
        Self::RightElbow,
        Self::RightShoulder,
        Self::RightEar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "leftEye",
            Self::RightEye => "rightEye",
            Self::LeftEar => "leftEar",
            Self::RightEar => "rightEar",
            Self::LeftShoulder => "leftShoulder",
            Self::RightShoulder => "rightShoulder",
            Self::LeftElbow => "leftElbow",
            Self::RightElbow => "rightElbow",
            Self::LeftWrist => "leftWrist",
            Self::RightWrist => "rightWrist",
            Self::LeftHip => "leftHip",
            Self::RightHip => "rightHip",
            Self::LeftKnee => "leftKnee",
            Self::RightKnee => "rightKnee",
            Self::LeftAnkle => "leftAnkle",
            Self::RightAnkle => "rightAnkle",
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keypoint {
    pub part: BodyPart,
    pub position: Point,
    pub score: f64,
}

impl Keypoint {
    pub fn new(part: BodyPart, x: f64, y: f64, score: f64) -> Self {
        Self {
            part,
            position: Point::new(x, y),
            score,
        }
    }
}

/// One estimate: zero or more landmarks, at most one per part after filtering.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pose {
    pub keypoints: Vec<Keypoint>,
}

impl Pose {
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self { keypoints }
    }

    /// Drops every landmark scoring at or below `min_score`.
    pub fn confident(mut self, min_score: f64) -> Self {
        self.keypoints.retain(|k| k.score > min_score);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    /// First landmark named `part`, if present.
    pub fn get(&self, part: BodyPart) -> Option<Point> {
        self.keypoints
            .iter()
            .find(|k| k.part == part)
            .map(|k| k.position)
    }

    pub fn require(&self, part: BodyPart) -> BoothResult<Point> {
        self.get(part).ok_or(BoothError::missing(part))
    }

    pub fn missing<'a>(&'a self, parts: &'a [BodyPart]) -> impl Iterator<Item = BodyPart> + 'a {
        parts.iter().copied().filter(|&p| self.get(p).is_none())
    }

    pub fn is_complete(&self, parts: &[BodyPart]) -> bool {
        self.missing(parts).next().is_none()
    }

    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.keypoints.iter().map(|k| k.position)
    }
}

/// Opaque pose model. Implementations may take arbitrarily long; callers await sequentially.
#[allow(async_fn_in_trait)]
pub trait PoseEstimator {
    async fn estimate(&mut self, frame: &Frame) -> BoothResult<Vec<Keypoint>>;
}

/// Runs `estimator` once and applies the confidence threshold.
pub async fn estimate_pose<P: PoseEstimator>(
    estimator: &mut P,
    frame: &Frame,
    min_score: f64,
) -> BoothResult<Pose> {
    let keypoints = estimator.estimate(frame).await?;
    let raw = keypoints.len();
    let pose = Pose::new(keypoints).confident(min_score);
    tracing::trace!(raw, kept = pose.len(), "pose estimated");
    Ok(pose)
}

#[cfg(test)]
#[path = "../../tests/unit/pose/mod.rs"]
mod tests;
