#![forbid(unsafe_code)]

pub mod animation;
pub mod capture;
pub mod foundation;
pub mod geometry;
pub mod installation;
pub mod palette;
pub mod pose;
pub mod render;

pub use animation::{Animation, Ease, Parallel, Sequential, Tween};
pub use capture::{CaptureSource, Frame, StillCapture};
pub use foundation::core::{Canvas, Color, Point, Rect};
pub use foundation::error::{BoothError, BoothResult};
pub use geometry::bbox::{BodyRegion, BoundingBox, region_boxes};
pub use installation::{
    CycleContext, Driver, GateMode, Installation, InstallationConfig, Phase, TickGate,
};
pub use palette::{ColorSample, HistogramSampler, PaletteSampler, Swatch, sample_regions};
pub use pose::replay::ReplayEstimator;
pub use pose::{BodyPart, Keypoint, Pose, PoseEstimator};
pub use render::{CpuSurface, RecordingSurface, Surface};
