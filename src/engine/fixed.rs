use super::clamp::{translate_inside_horizontally, translate_inside_vertically, ClampedSides};
use super::function::Function;
use crate::geometry::{Bounds, Point, Rect};

/// The side(s) an aspect violation is resolved against. Symmetric
/// variants adjust two opposite sides equally around the fixed-center
/// anchor and are only chosen while fixed-center is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SideToResize {
    Left,
    Right,
    Top,
    Bottom,
    LeftAndRightSymmetrically,
    TopAndBottomSymmetrically,
}

/// Adjusts the rectangle to the desired aspect ratio.
///
/// A side that was clamped in the preceding bounds pass must not be
/// moved outwards again, so the choice of side consults `clamped`.
/// Shrinking a side is always safe.
pub(super) fn apply_aspect(
    rect: &mut Rect,
    function: Function,
    anchor: Point,
    fixed_center: bool,
    aspect: f64,
    clamped: ClampedSides,
) {
    let current_w = rect.width();
    let current_h = rect.height();

    if current_w == 0.0 && current_h == 0.0 {
        return;
    }

    let current_aspect = current_w / current_h;
    if current_aspect == aspect {
        return;
    }

    let side = if fixed_center {
        choose_side_symmetric(function, current_aspect > aspect, clamped)
    } else {
        choose_side(function, current_aspect > aspect, clamped)
    };

    match side {
        SideToResize::Left => rect.x1 = rect.x2 - aspect * current_h,
        SideToResize::Right => rect.x2 = rect.x1 + aspect * current_h,
        SideToResize::Top => rect.y1 = rect.y2 - current_w / aspect,
        SideToResize::Bottom => rect.y2 = rect.y1 + current_w / aspect,
        SideToResize::TopAndBottomSymmetrically => {
            let correct_h = current_w / aspect;
            rect.y1 = anchor.y - correct_h / 2.0;
            rect.y2 = rect.y1 + correct_h;
        }
        SideToResize::LeftAndRightSymmetrically => {
            let correct_w = current_h * aspect;
            rect.x1 = anchor.x - correct_w / 2.0;
            rect.x2 = rect.x1 + correct_w;
        }
    }
}

/// Side choice with fixed-center active: only symmetric adjustments
/// keep the anchor pinned. The axis the user is not holding is
/// preferred so the cursor stays on the dragged edge.
fn choose_side_symmetric(function: Function, too_wide: bool, clamped: ClampedSides) -> SideToResize {
    if too_wide {
        match function {
            Function::ResizingLeft
            | Function::ResizingRight
            | Function::ResizingUpperLeft
            | Function::ResizingUpperRight
            | Function::ResizingLowerLeft
            | Function::ResizingLowerRight => {
                if !clamped.top && !clamped.bottom {
                    SideToResize::TopAndBottomSymmetrically
                } else {
                    SideToResize::LeftAndRightSymmetrically
                }
            }
            _ => SideToResize::LeftAndRightSymmetrically,
        }
    } else {
        match function {
            Function::ResizingTop
            | Function::ResizingBottom
            | Function::ResizingUpperLeft
            | Function::ResizingUpperRight
            | Function::ResizingLowerLeft
            | Function::ResizingLowerRight => {
                if !clamped.left && !clamped.right {
                    SideToResize::LeftAndRightSymmetrically
                } else {
                    SideToResize::TopAndBottomSymmetrically
                }
            }
            _ => SideToResize::TopAndBottomSymmetrically,
        }
    }
}

/// Side choice without fixed-center: exactly one side moves. Corner
/// grabs prefer the side that shrinks the rectangle; edge grabs grow
/// the perpendicular axis one side at a time, skipping clamped sides.
fn choose_side(function: Function, too_wide: bool, clamped: ClampedSides) -> SideToResize {
    if too_wide {
        match function {
            Function::ResizingUpperLeft => {
                if !clamped.top {
                    SideToResize::Top
                } else {
                    SideToResize::Left
                }
            }
            Function::ResizingUpperRight => {
                if !clamped.top {
                    SideToResize::Top
                } else {
                    SideToResize::Right
                }
            }
            Function::ResizingLowerLeft => {
                if !clamped.bottom {
                    SideToResize::Bottom
                } else {
                    SideToResize::Left
                }
            }
            Function::ResizingLowerRight => {
                if !clamped.bottom {
                    SideToResize::Bottom
                } else {
                    SideToResize::Right
                }
            }
            Function::ResizingLeft => {
                if !clamped.bottom {
                    SideToResize::Bottom
                } else if !clamped.top {
                    SideToResize::Top
                } else {
                    SideToResize::Left
                }
            }
            Function::ResizingRight => {
                if !clamped.bottom {
                    SideToResize::Bottom
                } else if !clamped.top {
                    SideToResize::Top
                } else {
                    SideToResize::Right
                }
            }
            Function::ResizingTop | Function::ResizingBottom => SideToResize::Right,
            _ => first_unclamped(clamped),
        }
    } else {
        match function {
            Function::ResizingUpperLeft => {
                if !clamped.left {
                    SideToResize::Left
                } else {
                    SideToResize::Top
                }
            }
            Function::ResizingUpperRight => {
                if !clamped.right {
                    SideToResize::Right
                } else {
                    SideToResize::Top
                }
            }
            Function::ResizingLowerLeft => {
                if !clamped.left {
                    SideToResize::Left
                } else {
                    SideToResize::Bottom
                }
            }
            Function::ResizingLowerRight => {
                if !clamped.right {
                    SideToResize::Right
                } else {
                    SideToResize::Bottom
                }
            }
            Function::ResizingTop => {
                if !clamped.right {
                    SideToResize::Right
                } else if !clamped.left {
                    SideToResize::Left
                } else {
                    SideToResize::Top
                }
            }
            Function::ResizingBottom => {
                if !clamped.right {
                    SideToResize::Right
                } else if !clamped.left {
                    SideToResize::Left
                } else {
                    SideToResize::Bottom
                }
            }
            Function::ResizingLeft | Function::ResizingRight => SideToResize::Bottom,
            _ => first_unclamped(clamped),
        }
    }
}

fn first_unclamped(clamped: ClampedSides) -> SideToResize {
    if !clamped.bottom {
        SideToResize::Bottom
    } else if !clamped.right {
        SideToResize::Right
    } else if !clamped.top {
        SideToResize::Top
    } else {
        SideToResize::Left
    }
}

/// Forces the rectangle to `width`, centered on the fixed-center anchor
/// when a horizontal edge is held so the anchor lands on the opposite
/// side, then translated back inside the bounds. The width survives the
/// constraint; containment loses when the two conflict.
pub(super) fn apply_fixed_width(
    rect: &mut Rect,
    function: Function,
    anchor: Point,
    bounds: Option<&Bounds>,
    width: f64,
) {
    if function.resizes_left_edge() || function.resizes_right_edge() {
        rect.x1 = anchor.x - width / 2.0;
        rect.x2 = rect.x1 + width;
    }

    if let Some(bounds) = bounds {
        translate_inside_horizontally(rect, bounds);
    }
}

pub(super) fn apply_fixed_height(
    rect: &mut Rect,
    function: Function,
    anchor: Point,
    bounds: Option<&Bounds>,
    height: f64,
) {
    if function.resizes_top_edge() || function.resizes_bottom_edge() {
        rect.y1 = anchor.y - height / 2.0;
        rect.y2 = rect.y1 + height;
    }

    if let Some(bounds) = bounds {
        translate_inside_vertically(rect, bounds);
    }
}
