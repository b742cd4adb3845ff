use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::geometry::{Bounds, CanvasExtents};

/// Which extents, if any, the rectangle is clamped against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConstraintMode {
    #[default]
    None,
    Image,
    Drawable,
}

impl ConstraintMode {
    pub(crate) fn bounds(self, extents: &CanvasExtents) -> Option<Bounds> {
        match self {
            Self::None => None,
            Self::Image => Some(extents.image_bounds()),
            Self::Drawable => extents.drawable,
        }
    }
}

/// The active fixed rule. Rules are mutually exclusive by construction;
/// the variant payloads carry the rule's target values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum FixedRule {
    #[default]
    None,
    Aspect {
        numerator: f64,
        denominator: f64,
    },
    Size {
        width: f64,
        height: f64,
    },
    Width(f64),
    Height(f64),
}

impl FixedRule {
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    pub fn validate(self) -> Result<(), EngineError> {
        match self {
            Self::None => Ok(()),
            Self::Aspect {
                numerator,
                denominator,
            } => {
                if numerator > 0.0 && denominator > 0.0 {
                    Ok(())
                } else {
                    Err(EngineError::InvalidAspectRatio {
                        numerator,
                        denominator,
                    })
                }
            }
            Self::Size { width, height } => {
                if width > 0.0 && height > 0.0 {
                    Ok(())
                } else {
                    Err(EngineError::InvalidFixedSize { width, height })
                }
            }
            Self::Width(width) => {
                if width > 0.0 {
                    Ok(())
                } else {
                    Err(EngineError::InvalidFixedWidth(width))
                }
            }
            Self::Height(height) => {
                if height > 0.0 {
                    Ok(())
                } else {
                    Err(EngineError::InvalidFixedHeight(height))
                }
            }
        }
    }
}

/// Which view of the rectangle consumers see: pixel-quantized or the
/// raw double corners. Internal math is always double precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Precision {
    #[default]
    Int,
    Double,
}

/// Sticky tool options consumed on every coordinate update.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RectangleOptions {
    pub constraint: ConstraintMode,
    pub fixed_rule: FixedRule,
    pub fixed_center: bool,
    pub precision: Precision,
}

impl RectangleOptions {
    pub fn validate(&self) -> Result<(), EngineError> {
        self.fixed_rule.validate()
    }
}
