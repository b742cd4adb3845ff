//! The interactive rectangle-region geometry and constraint engine.
//!
//! The engine owns the rectangle's double-precision corners, the
//! pixel-quantized public view derived from them, and the `Function`
//! state machine describing which handle (if any) is being manipulated.
//! Callers feed it abstract pointer/key events in image coordinates and
//! pull the rectangle back after each update; nothing is pushed.

mod clamp;
mod fixed;
mod function;
mod handles;
mod interaction;
mod options;

pub use clamp::ClampedSides;
pub use function::Function;
pub use handles::{HandleAnchor, HandleLayout};
pub use interaction::{EndKind, SessionOutcome};
pub use options::{ConstraintMode, FixedRule, Precision, RectangleOptions};

use crate::geometry::{IntRect, Point, Rect};

/// State alive for exactly one grab-to-release cycle.
#[derive(Debug, Clone, Copy)]
struct InteractionSession {
    /// Whether the rectangle is being rubber-banded from scratch. A
    /// cancelled brand-new rectangle is discarded entirely instead of
    /// reverted, so no degenerate rectangle is left behind.
    is_new: bool,
    /// Rectangle as it stood at grab start, restored on cancel.
    saved: Rect,
    /// Center the rectangle is pinned to while fixed-center resizing.
    anchor: Point,
    /// The coordinate held fixed while the opposite corner/edge moves.
    /// Restored when a fixed rule or fixed-center is toggled off
    /// mid-drag.
    other_side: Point,
}

#[derive(Debug)]
pub struct RectangleEngine {
    rect: Rect,
    int_rect: IntRect,
    function: Function,
    options: RectangleOptions,
    handles: HandleLayout,
    session: Option<InteractionSession>,
    /// Last pointer coordinate applied to the rectangle. Persists past
    /// the session because option toggles re-apply it.
    last_applied: Point,
    /// Hover classification is suppressed for this many calls after a
    /// key nudge, so the stationary cursor does not immediately steal
    /// the function back.
    suppress_hover: u8,
}

impl RectangleEngine {
    pub fn new(options: RectangleOptions) -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, 0.0, 0.0),
            int_rect: IntRect::default(),
            function: Function::Inactive,
            options,
            handles: HandleLayout::default(),
            session: None,
            last_applied: Point::new(0.0, 0.0),
            suppress_hover: 0,
        }
    }

    /// The rectangle as consumers see it: quantized or raw depending on
    /// the precision option.
    pub fn rect(&self) -> Rect {
        match self.options.precision {
            Precision::Int => Rect::new(
                f64::from(self.int_rect.x),
                f64::from(self.int_rect.y),
                f64::from(self.int_rect.x + self.int_rect.width),
                f64::from(self.int_rect.y + self.int_rect.height),
            ),
            Precision::Double => self.rect,
        }
    }

    /// The raw double-precision corners, regardless of precision mode.
    pub fn rect_raw(&self) -> Rect {
        self.rect
    }

    pub fn rect_int(&self) -> IntRect {
        self.int_rect
    }

    pub fn function(&self) -> Function {
        self.function
    }

    pub fn set_function(&mut self, function: Function) {
        if self.function != function {
            tracing::debug!(from = ?self.function, to = ?function, "function changed");
            self.function = function;
        }
    }

    pub fn options(&self) -> &RectangleOptions {
        &self.options
    }

    pub fn set_precision(&mut self, precision: Precision) {
        self.options.precision = precision;
    }

    pub fn interaction_active(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the active interaction is rubber-banding a rectangle
    /// created from scratch. Meaningful only while a session is active.
    pub fn is_new(&self) -> bool {
        self.session.map(|session| session.is_new).unwrap_or(false)
    }

    /// Containment test against the public view of the rectangle.
    pub fn point_in_rectangle(&self, point: Point) -> bool {
        self.rect().contains(point)
    }

    /// Current size with a one-pixel floor, for numeric option boxes.
    pub fn pending_size(&self) -> (f64, f64) {
        (self.rect.width().max(1.0), self.rect.height().max(1.0))
    }

    fn adjust_point(&self, point: Point) -> Point {
        match self.options.precision {
            Precision::Int => point.rounded(),
            Precision::Double => point,
        }
    }

    /// Restores `x1 <= x2` / `y1 <= y2` after a coordinate was applied,
    /// remapping the function to its mirror when the user dragged a
    /// corner or edge across the opposite one.
    fn check_function(&mut self) {
        let mut function = self.function;

        if self.rect.x2 < self.rect.x1 {
            std::mem::swap(&mut self.rect.x1, &mut self.rect.x2);
            function = function.mirror_x();
        }

        if self.rect.y2 < self.rect.y1 {
            std::mem::swap(&mut self.rect.y1, &mut self.rect.y2);
            function = function.mirror_y();
        }

        self.set_function(function);
    }

    /// The coordinate of the side(s) opposite to what the current
    /// function drags. Components the function does not control fall
    /// back to the far corner.
    fn other_side_coord(&self) -> Point {
        let mut other = Point::new(self.rect.x2, self.rect.y2);

        if self.function.resizes_right_edge() {
            other.x = self.rect.x1;
        } else if self.function.resizes_left_edge() {
            other.x = self.rect.x2;
        }

        if self.function.resizes_bottom_edge() {
            other.y = self.rect.y1;
        } else if self.function.resizes_top_edge() {
            other.y = self.rect.y2;
        }

        other
    }

    /// Writes a previously captured other-side coordinate back into the
    /// rectangle, used when a constraint toggle releases the mirrored
    /// side mid-drag.
    fn apply_other_side_coord(&mut self, other: Point) {
        if self.function.resizes_right_edge() {
            self.rect.x1 = other.x;
        } else if self.function.resizes_left_edge() {
            self.rect.x2 = other.x;
        }

        if self.function.resizes_bottom_edge() {
            self.rect.y1 = other.y;
        } else if self.function.resizes_top_edge() {
            self.rect.y2 = other.y;
        }

        self.check_function();
        self.update_int_rect();
    }

    fn anchor(&self) -> Point {
        self.session
            .map(|session| session.anchor)
            .unwrap_or_else(|| self.rect.center())
    }

    /// Rederives the integer view from the double corners. The origin
    /// always tracks; the size only while rubber-banding, so a pure
    /// move cannot change the quantized width/height through rounding.
    fn update_int_rect(&mut self) {
        self.int_rect.x = self.rect.x1.round() as i32;
        self.int_rect.y = self.rect.y1.round() as i32;

        if self.function.is_rubber_banding() {
            self.int_rect.width = self.rect.x2.round() as i32 - self.int_rect.x;
            self.int_rect.height = self.rect.y2.round() as i32 - self.int_rect.y;
        }
    }
}

impl Default for RectangleEngine {
    fn default() -> Self {
        Self::new(RectangleOptions::default())
    }
}

#[cfg(test)]
impl RectangleEngine {
    pub(crate) fn set_rect_for_test(&mut self, rect: Rect) {
        self.rect = rect;
        let previous = self.function;
        self.function = Function::Creating;
        self.update_int_rect();
        self.function = previous;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_engine_is_inactive_with_a_zero_rectangle() {
        let engine = RectangleEngine::default();
        assert_eq!(engine.function(), Function::Inactive);
        assert_eq!(engine.rect_int(), IntRect::default());
        assert!(!engine.interaction_active());
        assert!(!engine.is_new());
    }

    #[test]
    fn int_precision_exposes_the_quantized_view() {
        let mut engine = RectangleEngine::default();
        engine.set_rect_for_test(Rect::new(10.4, 10.6, 110.4, 60.4));

        let rect = engine.rect();
        assert_eq!(rect, Rect::new(10.0, 11.0, 110.0, 60.0));
        assert_eq!(engine.rect_raw(), Rect::new(10.4, 10.6, 110.4, 60.4));
    }

    #[test]
    fn double_precision_exposes_the_raw_corners() {
        let mut options = RectangleOptions::default();
        options.precision = Precision::Double;
        let mut engine = RectangleEngine::new(options);
        engine.set_rect_for_test(Rect::new(10.4, 10.6, 110.4, 60.4));

        assert_eq!(engine.rect(), Rect::new(10.4, 10.6, 110.4, 60.4));
    }

    #[test]
    fn pending_size_floors_at_one_pixel() {
        let engine = RectangleEngine::default();
        assert_eq!(engine.pending_size(), (1.0, 1.0));
    }
}
