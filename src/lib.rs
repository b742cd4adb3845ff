//! Rectangle-region geometry and constraint engine for raster image
//! editors.
//!
//! The crate is the toolkit-independent core behind a crop/rectangle-
//! select/text-frame tool family: a stateful geometric solver that
//! takes pointer and keyboard deltas plus the active constraints (fixed
//! aspect, fixed size/width/height, bounds clamping, center-anchored
//! symmetric resize) and produces a new, consistent rectangle on every
//! step. Windowing, rendering, cursors and the image data model stay on
//! the caller's side of the [`engine::RectangleEngine`] contract.

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;

pub use engine::{
    ConstraintMode, EndKind, FixedRule, Function, HandleAnchor, HandleLayout, Precision,
    RectangleEngine, RectangleOptions, SessionOutcome,
};
pub use error::{EngineError, EngineResult};
pub use geometry::{Bounds, CanvasExtents, IntRect, Point, Rect, Viewport};
