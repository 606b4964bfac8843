//! Axis-aligned sampling regions derived from landmarks.
//!
//! The frame is mirrored, so the subject's left side appears on the right of the image: boxes
//! run from a right-side landmark (`start_x`) to a left-side one (`end_x`). Offsets are in pixels
//! of the captured frame.

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::BoothResult;
use crate::pose::{BodyPart, Pose};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl BoundingBox {
    pub fn new(start_x: f64, start_y: f64, end_x: f64, end_y: f64) -> Self {
        Self {
            start_x,
            start_y,
            end_x,
            end_y,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }

    pub fn end(&self) -> Point {
        Point::new(self.end_x, self.end_y)
    }

    /// Normalised rectangle, regardless of which corner is "start".
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.start(), self.end())
    }

    pub fn width(&self) -> f64 {
        (self.end_x - self.start_x).abs()
    }

    pub fn height(&self) -> f64 {
        (self.end_y - self.start_y).abs()
    }
}

/// The six sampled regions, in the order results are published.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyRegion {
    Hair,
    Face,
    UpperBody,
    LowerBody,
    Thighs,
    Feet,
}

impl BodyRegion {
    pub const ALL: [BodyRegion; 6] = [
        Self::Hair,
        Self::Face,
        Self::UpperBody,
        Self::LowerBody,
        Self::Thighs,
        Self::Feet,
    ];

    pub fn bounding_box(self, pose: &Pose) -> BoothResult<BoundingBox> {
        match self {
            Self::Hair => hair_box(pose),
            Self::Face => face_box(pose),
            Self::UpperBody => upper_body_box(pose),
            Self::LowerBody => lower_body_box(pose),
            Self::Thighs => thighs_box(pose),
            Self::Feet => feet_box(pose),
        }
    }
}

pub fn hair_box(pose: &Pose) -> BoothResult<BoundingBox> {
    let left_ear = pose.require(BodyPart::LeftEar)?;
    let left_eye = pose.require(BodyPart::LeftEye)?;
    let right_ear = pose.require(BodyPart::RightEar)?;
    Ok(BoundingBox::new(
        right_ear.x,
        left_eye.y - 45.0,
        left_ear.x,
        left_eye.y - 30.0,
    ))
}

pub fn face_box(pose: &Pose) -> BoothResult<BoundingBox> {
    let left_ear = pose.require(BodyPart::LeftEar)?;
    let right_ear = pose.require(BodyPart::RightEar)?;
    let eye = pose.require(BodyPart::LeftEye)?;
    Ok(BoundingBox::new(
        right_ear.x,
        eye.y - 30.0,
        left_ear.x,
        right_ear.y + 30.0,
    ))
}

pub fn upper_body_box(pose: &Pose) -> BoothResult<BoundingBox> {
    let left_shoulder = pose.require(BodyPart::LeftShoulder)?;
    let right_shoulder = pose.require(BodyPart::RightShoulder)?;
    let elbow = pose.require(BodyPart::LeftElbow)?;
    Ok(BoundingBox::new(
        right_shoulder.x,
        left_shoulder.y,
        left_shoulder.x,
        elbow.y,
    ))
}

pub fn lower_body_box(pose: &Pose) -> BoothResult<BoundingBox> {
    let elbow = pose.require(BodyPart::LeftElbow)?;
    let left_hip = pose.require(BodyPart::LeftHip)?;
    let right_hip = pose.require(BodyPart::RightHip)?;
    Ok(BoundingBox::new(right_hip.x, elbow.y, left_hip.x, right_hip.y))
}

pub fn thighs_box(pose: &Pose) -> BoothResult<BoundingBox> {
    let left_hip = pose.require(BodyPart::LeftHip)?;
    let right_knee = pose.require(BodyPart::RightKnee)?;
    Ok(BoundingBox::new(
        right_knee.x,
        left_hip.y,
        left_hip.x,
        right_knee.y,
    ))
}

pub fn feet_box(pose: &Pose) -> BoothResult<BoundingBox> {
    let ankle = pose.require(BodyPart::LeftAnkle)?;
    Ok(BoundingBox::new(
        ankle.x - 20.0,
        ankle.y - 20.0,
        ankle.x + 20.0,
        ankle.y + 20.0,
    ))
}

/// All six boxes in [`BodyRegion::ALL`] order; fails on the first absent landmark.
pub fn region_boxes(pose: &Pose) -> BoothResult<[BoundingBox; 6]> {
    Ok([
        hair_box(pose)?,
        face_box(pose)?,
        upper_body_box(pose)?,
        lower_body_box(pose)?,
        thighs_box(pose)?,
        feet_box(pose)?,
    ])
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/bbox.rs"]
mod tests;
