use crate::pose::BodyPart;

pub type BoothResult<T> = Result<T, BoothError>;

#[derive(thiserror::Error, Debug)]
pub enum BoothError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("capture error: {0}")]
    Capture(String),

    #[error("pose error: {0}")]
    Pose(String),

    #[error("missing landmark: {part}")]
    MissingLandmark { part: BodyPart },

    #[error("sampling error: {0}")]
    Sampling(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoothError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    pub fn pose(msg: impl Into<String>) -> Self {
        Self::Pose(msg.into())
    }

    pub fn missing(part: BodyPart) -> Self {
        Self::MissingLandmark { part }
    }

    pub fn sampling(msg: impl Into<String>) -> Self {
        Self::Sampling(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Errors that a phase can absorb by staying put and retrying on the next frame.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Capture(_) | Self::Pose(_) | Self::MissingLandmark { .. } | Self::Sampling(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
