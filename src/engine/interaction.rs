use tracing::{debug, trace, warn};

use super::clamp::{clamp_rect, keep_inside, ClampedSides};
use super::fixed::{apply_aspect, apply_fixed_height, apply_fixed_width};
use super::function::Function;
use super::options::{ConstraintMode, FixedRule};
use super::{InteractionSession, RectangleEngine};
use crate::error::EngineResult;
use crate::geometry::{coords_equal, same_pixel, CanvasExtents, Point, Rect};

/// How a grab-to-release cycle ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndKind {
    /// Normal release after motion: keep the rectangle.
    Commit,
    /// Abort: restore the rectangle present at grab start.
    Cancel,
    /// Release without meaningful motion. Behaves like a commit except
    /// on a dead grab, which absorbs the click.
    Click,
}

/// What a completed (or refused) operation produced. `Committed` is the
/// change-complete checkpoint consumers hang undo steps or downstream
/// effects off of; it fires exactly once per committed session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionOutcome {
    Committed { rect: Rect },
    /// The pre-session rectangle was restored.
    Reverted,
    /// A cancelled brand-new rectangle: the caller should drop the
    /// rectangle entirely rather than keep the degenerate leftover.
    Discarded,
    /// Nothing to report (no active session, dead grab, no-op change).
    Ignored,
}

impl RectangleEngine {
    /// Starts a grab at `point`. A session already in flight is
    /// committed first; the engine holds at most one.
    ///
    /// With `is_new` the rectangle collapses onto the click point and
    /// rubber-banding starts from scratch; otherwise the grab adjusts
    /// the existing rectangle with whatever function is current
    /// (normally assigned by [`hover`](Self::hover) beforehand).
    pub fn begin_interaction(&mut self, point: Point, is_new: bool) {
        if self.session.is_some() {
            debug!("committing in-flight interaction before a new grab");
            let _ = self.end_interaction(EndKind::Commit);
        }

        let point = self.adjust_point(point);
        let is_new = is_new || self.function == Function::Creating;

        if is_new {
            self.set_function(Function::Creating);
            self.rect = Rect::from_point(point);
            self.handles.leave_narrow_mode();
        }

        let (anchor, other_side) = if is_new {
            (point, point)
        } else {
            (self.rect.center(), self.other_side_coord())
        };

        self.session = Some(InteractionSession {
            is_new,
            saved: self.rect,
            anchor,
            other_side,
        });
        self.last_applied = point;
        self.update_int_rect();

        debug!(x = point.x, y = point.y, function = ?self.function, is_new, "interaction started");
    }

    /// Applies one pointer sample to the grabbed corner/edge and runs
    /// the constraint pipeline. Returns the up-to-date public
    /// rectangle; never fails, though the result may legitimately be
    /// zero-area.
    pub fn update(&mut self, point: Point, extents: &CanvasExtents) -> Rect {
        if matches!(self.function, Function::Executing | Function::Dead) {
            return self.rect();
        }
        if self.session.is_none() {
            warn!("pointer update with no active interaction");
            return self.rect();
        }
        if self.function == Function::Inactive {
            warn!("pointer update while inactive");
            return self.rect();
        }

        let point = self.adjust_point(point);
        trace!(x = point.x, y = point.y, function = ?self.function, "applying coordinate");

        if self.function == Function::Creating {
            let dx = point.x - self.last_applied.x;
            let dy = point.y - self.last_applied.y;

            if dx != 0.0 || dy != 0.0 {
                self.set_function(Function::from_drag_direction(dx, dy));
                self.update_with_point(point, extents);

                if matches!(self.options.fixed_rule, FixedRule::Size { .. }) {
                    // The size is locked, so the rest of the drag can
                    // only place the rectangle.
                    self.set_function(Function::Moving);
                }
            }
        } else {
            self.update_with_point(point, extents);
        }

        self.last_applied = point;
        self.rect()
    }

    /// Ends the active session. Idempotent: with no session in flight
    /// this reports `Ignored`.
    pub fn end_interaction(&mut self, kind: EndKind) -> SessionOutcome {
        let Some(session) = self.session.take() else {
            return SessionOutcome::Ignored;
        };

        let outcome = match kind {
            EndKind::Commit => SessionOutcome::Committed { rect: self.rect() },
            EndKind::Click => {
                if self.function == Function::Dead {
                    SessionOutcome::Ignored
                } else {
                    SessionOutcome::Committed { rect: self.rect() }
                }
            }
            EndKind::Cancel => {
                self.rect = session.saved;
                self.update_int_rect();

                if session.is_new {
                    self.set_function(Function::Inactive);
                    SessionOutcome::Discarded
                } else {
                    SessionOutcome::Reverted
                }
            }
        };

        debug!(?kind, function = ?self.function, "interaction ended");
        outcome
    }

    /// Arrow-key movement outside a pointer grab: moves the grabbed
    /// corner/edge (or the whole rectangle) by the given delta and
    /// commits immediately. Each nudge is a complete change.
    pub fn nudge(&mut self, dx: f64, dy: f64, extents: &CanvasExtents) -> SessionOutcome {
        if self.session.is_some() {
            return SessionOutcome::Ignored;
        }

        let rect = self.rect;
        let point = match self.function {
            Function::Moving | Function::ResizingUpperLeft => {
                Point::new(rect.x1 + dx, rect.y1 + dy)
            }
            Function::ResizingUpperRight => Point::new(rect.x2 + dx, rect.y1 + dy),
            Function::ResizingLowerLeft => Point::new(rect.x1 + dx, rect.y2 + dy),
            Function::ResizingLowerRight => Point::new(rect.x2 + dx, rect.y2 + dy),
            Function::ResizingLeft => Point::new(rect.x1 + dx, rect.y1),
            Function::ResizingRight => Point::new(rect.x2 + dx, rect.y1),
            Function::ResizingTop => Point::new(rect.x1, rect.y1 + dy),
            Function::ResizingBottom => Point::new(rect.x1, rect.y2 + dy),
            _ => return SessionOutcome::Ignored,
        };

        let point = self.adjust_point(point);
        self.session = Some(InteractionSession {
            is_new: false,
            saved: self.rect,
            anchor: self.rect.center(),
            other_side: self.other_side_coord(),
        });
        self.update_with_point(point, extents);
        self.session = None;
        self.last_applied = point;
        self.suppress_hover = 2;

        SessionOutcome::Committed { rect: self.rect() }
    }

    /// Adopts an externally computed replacement rectangle (such as a
    /// shrink-to-content result) and re-runs the constraint pipeline
    /// against it.
    pub fn auto_shrink_result(&mut self, rect: Rect, extents: &CanvasExtents) -> SessionOutcome {
        if self.function == Function::Inactive {
            return SessionOutcome::Ignored;
        }

        let previous = self.function;
        self.set_function(Function::AutoShrink);
        self.rect = rect;
        self.check_function();

        self.session = Some(InteractionSession {
            is_new: false,
            saved: self.rect,
            anchor: self.rect.center(),
            other_side: self.other_side_coord(),
        });
        self.apply_general_clamping(extents);
        self.apply_fixed_rule(extents);
        self.session = None;
        self.update_int_rect();

        let outcome = SessionOutcome::Committed { rect: self.rect() };
        self.set_function(previous);
        outcome
    }

    /// Sets the rectangle to externally given bounds, e.g. to frame a
    /// layer. The rectangle behaves as freshly rubber-banded afterwards.
    pub fn frame_rect(&mut self, rect: Rect) {
        self.set_function(Function::Creating);
        self.rect = rect;
        self.check_function();
        self.update_int_rect();
    }

    /// Switches the bounds constraint, immediately re-clamping the
    /// existing rectangle against the new extents.
    pub fn set_constraint(&mut self, mode: ConstraintMode, extents: &CanvasExtents) -> SessionOutcome {
        self.options.constraint = mode;
        debug!(?mode, "constraint changed");

        if let Some(bounds) = mode.bounds(extents) {
            clamp_rect(&mut self.rect, &bounds, false);
        }
        self.update_int_rect();

        SessionOutcome::Committed { rect: self.rect() }
    }

    /// Switches the fixed rule. Mid-drag the rectangle reshapes under
    /// the cursor right away; turning the rule off releases the side
    /// that was mirrored for it. While idle, a portrait/landscape flip
    /// of an active fixed size or aspect re-drives the pending
    /// rectangle so it flips on canvas too.
    pub fn set_fixed_rule(
        &mut self,
        rule: FixedRule,
        extents: &CanvasExtents,
    ) -> EngineResult<SessionOutcome> {
        rule.validate()?;
        self.options.fixed_rule = rule;
        debug!(?rule, "fixed rule changed");

        if let Some(session) = self.session {
            if rule.is_none() {
                self.apply_other_side_coord(session.other_side);
            }
            let last = self.last_applied;
            self.update_with_point(last, extents);
            return Ok(SessionOutcome::Ignored);
        }

        if let FixedRule::Size { width, height } = rule {
            if coords_equal(width, self.rect.height()) && coords_equal(height, self.rect.width()) {
                return Ok(self.swap_pending_size(extents));
            }
        }

        if let FixedRule::Aspect {
            numerator,
            denominator,
        } = rule
        {
            if self.aspect_swaps_pending_rect(numerator, denominator) {
                let corner = Point::new(
                    self.rect.x1 + self.rect.height(),
                    self.rect.y1 + self.rect.width(),
                );
                return Ok(self.synthesize_update(Function::ResizingLowerRight, corner, extents));
            }
        }

        Ok(SessionOutcome::Ignored)
    }

    /// Toggles center-anchored symmetric resizing. Mid-drag the last
    /// pointer coordinate is re-applied so the rectangle recenters (or
    /// the mirrored side is released); while idle, enabling it commits
    /// the recentered rectangle immediately.
    pub fn set_fixed_center(&mut self, enabled: bool, extents: &CanvasExtents) -> SessionOutcome {
        self.options.fixed_center = enabled;
        debug!(enabled, "fixed center changed");

        if enabled {
            if self.session.is_some() {
                let last = self.last_applied;
                self.update_with_point(last, extents);
                return SessionOutcome::Ignored;
            }
            if self.function == Function::Inactive {
                return SessionOutcome::Ignored;
            }
            let function = self.function;
            let last = self.last_applied;
            return self.synthesize_update(function, last, extents);
        }

        if let Some(session) = self.session {
            self.apply_other_side_coord(session.other_side);
        }
        SessionOutcome::Ignored
    }

    /// Numeric option-box setters. Each synthesizes a motion with the
    /// matching function and runs the full pipeline, so the same
    /// re-validation applies as for pointer input. Refused (as a no-op)
    /// while a pointer session is in flight.
    pub fn set_x(&mut self, x: f64, extents: &CanvasExtents) -> SessionOutcome {
        if same_pixel(self.rect.x1, x) {
            return SessionOutcome::Ignored;
        }
        let point = Point::new(x, self.rect.y1);
        self.synthesize_update(Function::Moving, point, extents)
    }

    pub fn set_y(&mut self, y: f64, extents: &CanvasExtents) -> SessionOutcome {
        if same_pixel(self.rect.y1, y) {
            return SessionOutcome::Ignored;
        }
        let point = Point::new(self.rect.x1, y);
        self.synthesize_update(Function::Moving, point, extents)
    }

    pub fn set_width(&mut self, width: f64, extents: &CanvasExtents) -> SessionOutcome {
        if same_pixel(self.rect.width(), width) {
            return SessionOutcome::Ignored;
        }
        let x2 = if self.options.fixed_center {
            self.rect.center().x + width / 2.0
        } else {
            self.rect.x1 + width
        };
        let point = Point::new(x2, self.rect.y2);
        self.synthesize_update(Function::ResizingRight, point, extents)
    }

    pub fn set_height(&mut self, height: f64, extents: &CanvasExtents) -> SessionOutcome {
        if same_pixel(self.rect.height(), height) {
            return SessionOutcome::Ignored;
        }
        let y2 = if self.options.fixed_center {
            self.rect.center().y + height / 2.0
        } else {
            self.rect.y1 + height
        };
        let point = Point::new(self.rect.x2, y2);
        self.synthesize_update(Function::ResizingBottom, point, extents)
    }

    /// The shared motion pipeline: apply the coordinate, restore corner
    /// ordering (possibly remapping the function), clamp to bounds, and
    /// apply the active fixed rule. Each stage feeds the next.
    fn update_with_point(&mut self, point: Point, extents: &CanvasExtents) {
        self.apply_point(point);
        self.check_function();
        self.apply_general_clamping(extents);

        if self.function != Function::Moving {
            self.apply_fixed_rule(extents);
        }

        self.update_int_rect();
    }

    /// Moves whichever corner(s)/edge(s) the current function controls
    /// to the given coordinate. With fixed-center active the opposite
    /// side mirrors around the anchor. A move relocates the whole
    /// rectangle, interpreting the coordinate as its new origin.
    fn apply_point(&mut self, point: Point) {
        if self.function == Function::Moving {
            let width = self.rect.width();
            let height = self.rect.height();

            self.rect.x1 = point.x;
            self.rect.y1 = point.y;
            self.rect.x2 = self.rect.x1 + width;
            self.rect.y2 = self.rect.y1 + height;
            return;
        }

        let anchor = self.anchor();
        let fixed_center = self.options.fixed_center;

        if self.function.resizes_left_edge() {
            self.rect.x1 = point.x;
            if fixed_center {
                self.rect.x2 = 2.0 * anchor.x - self.rect.x1;
            }
        } else if self.function.resizes_right_edge() {
            self.rect.x2 = point.x;
            if fixed_center {
                self.rect.x1 = 2.0 * anchor.x - self.rect.x2;
            }
        }

        if self.function.resizes_top_edge() {
            self.rect.y1 = point.y;
            if fixed_center {
                self.rect.y2 = 2.0 * anchor.y - self.rect.y1;
            }
        } else if self.function.resizes_bottom_edge() {
            self.rect.y2 = point.y;
            if fixed_center {
                self.rect.y1 = 2.0 * anchor.y - self.rect.y2;
            }
        }
    }

    /// Bounds pass of the pipeline. Resizing pulls offending sides back
    /// (mirrored when fixed-center is on); moving translates the whole
    /// rectangle instead.
    fn apply_general_clamping(&mut self, extents: &CanvasExtents) {
        let Some(bounds) = self.options.constraint.bounds(extents) else {
            return;
        };

        if self.function != Function::Moving {
            clamp_rect(&mut self.rect, &bounds, self.options.fixed_center);
        } else {
            keep_inside(&mut self.rect, &bounds);
        }
    }

    /// Applies the active fixed rule. Aspect needs the clamp pass rerun
    /// around it: applying aspect can push the rectangle back outside
    /// the bounds, and the second application consults the clamped
    /// sides so it never grows a side the clamp just pulled in.
    fn apply_fixed_rule(&mut self, extents: &CanvasExtents) {
        let bounds = self.options.constraint.bounds(extents);
        let anchor = self.anchor();
        let fixed_center = self.options.fixed_center;
        let function = self.function;

        match self.options.fixed_rule {
            FixedRule::None => {}
            FixedRule::Aspect {
                numerator,
                denominator,
            } => {
                let mut aspect = numerator / denominator;
                if extents.image_width > 0.0 && extents.image_height > 0.0 {
                    aspect = aspect.clamp(1.0 / extents.image_height, extents.image_width);
                }

                match bounds {
                    None => apply_aspect(
                        &mut self.rect,
                        function,
                        anchor,
                        fixed_center,
                        aspect,
                        ClampedSides::NONE,
                    ),
                    Some(bounds) => {
                        if function != Function::Moving {
                            apply_aspect(
                                &mut self.rect,
                                function,
                                anchor,
                                fixed_center,
                                aspect,
                                ClampedSides::NONE,
                            );
                            let clamped = clamp_rect(&mut self.rect, &bounds, fixed_center);
                            apply_aspect(
                                &mut self.rect,
                                function,
                                anchor,
                                fixed_center,
                                aspect,
                                clamped,
                            );
                        } else {
                            apply_aspect(
                                &mut self.rect,
                                function,
                                anchor,
                                fixed_center,
                                aspect,
                                ClampedSides::NONE,
                            );
                            keep_inside(&mut self.rect, &bounds);
                        }
                    }
                }
            }
            FixedRule::Size { width, height } => {
                apply_fixed_width(&mut self.rect, function, anchor, bounds.as_ref(), width);
                apply_fixed_height(&mut self.rect, function, anchor, bounds.as_ref(), height);
            }
            FixedRule::Width(width) => {
                apply_fixed_width(&mut self.rect, function, anchor, bounds.as_ref(), width);
            }
            FixedRule::Height(height) => {
                apply_fixed_height(&mut self.rect, function, anchor, bounds.as_ref(), height);
            }
        }
    }

    /// Runs one motion through the pipeline under a temporary function,
    /// as if the pointer had produced it, then restores the previous
    /// function and reports the commit. Used by the numeric setters and
    /// idle constraint toggles.
    fn synthesize_update(
        &mut self,
        function: Function,
        point: Point,
        extents: &CanvasExtents,
    ) -> SessionOutcome {
        if self.session.is_some() {
            return SessionOutcome::Ignored;
        }

        let previous = self.function;
        self.set_function(function);

        let point = self.adjust_point(point);
        self.session = Some(InteractionSession {
            is_new: false,
            saved: self.rect,
            anchor: self.rect.center(),
            other_side: self.other_side_coord(),
        });
        self.update_with_point(point, extents);
        self.session = None;

        self.set_function(previous);
        SessionOutcome::Committed { rect: self.rect() }
    }

    /// Portrait/landscape flip of an active fixed size: re-drive the
    /// pending rectangle through a corner motion, then put its origin
    /// back.
    fn swap_pending_size(&mut self, extents: &CanvasExtents) -> SessionOutcome {
        let origin = Point::new(self.rect.x1, self.rect.y1);
        let corner = Point::new(self.rect.x2, self.rect.y2);

        self.synthesize_update(Function::ResizingLowerRight, corner, extents);
        self.set_x(origin.x, extents);
        self.set_y(origin.y, extents);

        SessionOutcome::Committed { rect: self.rect() }
    }

    /// True when a newly set aspect is (within a pixel's tolerance) the
    /// inverse of the pending rectangle's ratio, i.e. the user flipped
    /// the ratio and expects the rectangle to flip with it. Small
    /// rectangles get a proportionally wider acceptance interval.
    fn aspect_swaps_pending_rect(&self, numerator: f64, denominator: f64) -> bool {
        let width = self.rect.width();
        let height = self.rect.height();

        if width <= 0.0 || height <= 0.0 {
            return false;
        }

        let new_inverse_ratio = denominator / numerator;
        let (lower_ratio, higher_ratio) = if width > height && height > 1.0 {
            (width / (height + 1.0), width / (height - 1.0))
        } else {
            ((width - 1.0) / height, (width + 1.0) / height)
        };

        lower_ratio < new_inverse_ratio && new_inverse_ratio < higher_ratio
    }
}
