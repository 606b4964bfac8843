//! Time-driven animation engine.
//!
//! Nodes are advanced with a millisecond delta through [`Animation::update`] and drawn onto a
//! [`Surface`](crate::render::Surface) passed in by the caller.

pub mod composite;
pub mod ease;
pub mod line;
pub mod node;
pub mod palette;
pub mod rectangle;
pub mod tween;

pub use composite::{Parallel, Sequential};
pub use ease::Ease;
pub use line::LineAnimation;
pub use node::{Animation, FinishCallback, Lifecycle, NodeState};
pub use palette::{HighlightPalette, HighlightStage, LOOP_COUNT, PaletteReveal};
pub use rectangle::{
    RectBinding, RectStep, Rectangle, RectangleChain, Scale, SharedRect, Size, Translate,
};
pub use tween::{Direction, Tween};
