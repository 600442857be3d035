//! Staged Progress Indicator
//!
//! Horizontal line of labeled stage markers that animates transitions between
//! the stages of a linear process (e.g. created → processed → sent → completed).
//!
//! ## Components
//!
//! - **StageSet**: Ordered stages with labels and optional colors
//! - **TransitionRenderer**: Pure scene computation for a transition state
//! - **AnimationDriver**: Eased progress over a fixed duration
//! - **StagedProgress**: Complete widget combining the above
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stage_progress::app::staged_progress::StagedProgress;
//!
//! let mut progress = StagedProgress::new(Order::Created, Order::labels())?
//!     .with_colors([(Order::Completed, Color32::GREEN)]);
//!
//! // On an external update:
//! progress.set_stage(Order::Sent)?;
//!
//! // In UI rendering:
//! ui.add(&mut progress);
//! ```

#![warn(clippy::all, rust_2018_idioms)]

mod animation;
pub mod color;
mod renderer;
mod stages;
mod widget;

pub use animation::{AnimationDriver, AnimationPhase, Easing, DEFAULT_ANIMATION_DURATION};
pub use renderer::{
    center_x, line_end_x, LabelCell, LineShape, MarkerShape, Palette, RenderStyle, StageScene,
    TransitionRenderer, TransitionState, DEFAULT_ACTIVE_COLOR, DEFAULT_CANVAS_HEIGHT,
    DEFAULT_INACTIVE_COLOR, DEFAULT_LABEL_GAP, DEFAULT_LINE_WIDTH,
};
pub use stages::{Stage, StageId, StageSet};
pub use widget::StagedProgress;
