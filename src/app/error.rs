//! Errors surfaced to code that integrates the staged progress widget.
//!
//! Missing labels and colors never produce errors; they resolve to defaults.
//! The variants here cover misconfiguration that would otherwise turn into an
//! arithmetic fault or a silently wrong drawing.

use std::fmt;

/// Configuration errors for the staged progress widget
#[derive(Debug, Clone, PartialEq)]
pub enum StageError {
    /// The stage set has no stages, so there is nothing to lay out
    NoStages,
    /// A stage identifier that is not part of the stage set
    UnknownStage(String),
    /// A current or previous stage index outside `[0, len)`
    StageIndexOutOfRange { index: usize, len: usize },
    /// Canvas width that is negative or not finite
    InvalidCanvas(f32),
    /// A configured dimension that is negative or not finite
    InvalidDimension { name: &'static str, value: f32 },
    /// A color string that is not `#RRGGBB` or `#RRGGBBAA`
    InvalidColor(String),
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageError::NoStages => write!(f, "Stage set must contain at least one stage"),
            StageError::UnknownStage(stage) => {
                write!(f, "Stage {} is not part of the stage set", stage)
            }
            StageError::StageIndexOutOfRange { index, len } => write!(
                f,
                "Stage index {} is out of range for {} stages",
                index, len
            ),
            StageError::InvalidCanvas(width) => {
                write!(f, "Canvas width must be finite and non-negative: {}", width)
            }
            StageError::InvalidDimension { name, value } => {
                write!(f, "{} must be finite and non-negative: {}", name, value)
            }
            StageError::InvalidColor(value) => {
                write!(f, "Invalid color (expected #RRGGBB or #RRGGBBAA): {}", value)
            }
        }
    }
}

impl std::error::Error for StageError {}
