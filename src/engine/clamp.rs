use crate::geometry::{Bounds, Rect};

/// Records which edges were pulled back to satisfy a bounds constraint
/// during the current update. Fixed-rule resolution uses this to avoid
/// growing a side that was just clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClampedSides {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl ClampedSides {
    pub const NONE: ClampedSides = ClampedSides {
        left: false,
        right: false,
        top: false,
        bottom: false,
    };

    pub const fn any(self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// Pulls offending sides back inside `bounds`, reporting which sides
/// were touched. With `symmetrically` set the opposite side is pulled in
/// by the same amount, which is what fixed-center resizing needs.
pub(super) fn clamp_rect(rect: &mut Rect, bounds: &Bounds, symmetrically: bool) -> ClampedSides {
    let mut sides = ClampedSides::NONE;
    clamp_width(rect, bounds, symmetrically, &mut sides);
    clamp_height(rect, bounds, symmetrically, &mut sides);
    sides
}

pub(super) fn clamp_width(
    rect: &mut Rect,
    bounds: &Bounds,
    symmetrically: bool,
    sides: &mut ClampedSides,
) {
    if rect.x1 < bounds.min_x {
        let dx = bounds.min_x - rect.x1;
        rect.x1 += dx;
        if symmetrically {
            rect.x2 -= dx;
        }
        if rect.x2 < bounds.min_x {
            rect.x2 = bounds.min_x;
        }
        sides.left = true;
    }

    if rect.x2 > bounds.max_x {
        let dx = bounds.max_x - rect.x2;
        rect.x2 += dx;
        if symmetrically {
            rect.x1 -= dx;
        }
        if rect.x1 > bounds.max_x {
            rect.x1 = bounds.max_x;
        }
        sides.right = true;
    }
}

pub(super) fn clamp_height(
    rect: &mut Rect,
    bounds: &Bounds,
    symmetrically: bool,
    sides: &mut ClampedSides,
) {
    if rect.y1 < bounds.min_y {
        let dy = bounds.min_y - rect.y1;
        rect.y1 += dy;
        if symmetrically {
            rect.y2 -= dy;
        }
        if rect.y2 < bounds.min_y {
            rect.y2 = bounds.min_y;
        }
        sides.top = true;
    }

    if rect.y2 > bounds.max_y {
        let dy = bounds.max_y - rect.y2;
        rect.y2 += dy;
        if symmetrically {
            rect.y1 -= dy;
        }
        if rect.y1 > bounds.max_y {
            rect.y1 = bounds.max_y;
        }
        sides.bottom = true;
    }
}

/// Moves the rectangle back inside `bounds` without resizing it, unless
/// it is larger than the bounds in an axis, in which case it is made to
/// fill the bounds in that axis.
pub(super) fn keep_inside(rect: &mut Rect, bounds: &Bounds) {
    keep_inside_horizontally(rect, bounds);
    keep_inside_vertically(rect, bounds);
}

pub(super) fn keep_inside_horizontally(rect: &mut Rect, bounds: &Bounds) {
    if bounds.width() < rect.width() {
        rect.x1 = bounds.min_x;
        rect.x2 = bounds.max_x;
        return;
    }

    if rect.x1 < bounds.min_x {
        let dx = bounds.min_x - rect.x1;
        rect.x1 += dx;
        rect.x2 += dx;
    }
    if rect.x2 > bounds.max_x {
        let dx = bounds.max_x - rect.x2;
        rect.x1 += dx;
        rect.x2 += dx;
    }
}

pub(super) fn keep_inside_vertically(rect: &mut Rect, bounds: &Bounds) {
    if bounds.height() < rect.height() {
        rect.y1 = bounds.min_y;
        rect.y2 = bounds.max_y;
        return;
    }

    if rect.y1 < bounds.min_y {
        let dy = bounds.min_y - rect.y1;
        rect.y1 += dy;
        rect.y2 += dy;
    }
    if rect.y2 > bounds.max_y {
        let dy = bounds.max_y - rect.y2;
        rect.y1 += dy;
        rect.y2 += dy;
    }
}

/// Translate-only variant used by the fixed width/height rules: a
/// rectangle wider than the bounds is left where the rule centered it
/// rather than shrunk, so the fixed size wins over containment.
pub(super) fn translate_inside_horizontally(rect: &mut Rect, bounds: &Bounds) {
    if bounds.width() < rect.width() {
        return;
    }
    keep_inside_horizontally(rect, bounds);
}

pub(super) fn translate_inside_vertically(rect: &mut Rect, bounds: &Bounds) {
    if bounds.height() < rect.height() {
        return;
    }
    keep_inside_vertically(rect, bounds);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pulls_back_only_offending_sides() {
        let bounds = Bounds::from_size(100.0, 100.0);
        let mut rect = Rect::new(10.0, -5.0, 120.0, 90.0);
        let sides = clamp_rect(&mut rect, &bounds, false);

        assert_eq!(rect, Rect::new(10.0, 0.0, 100.0, 90.0));
        assert!(sides.top);
        assert!(sides.right);
        assert!(!sides.left);
        assert!(!sides.bottom);
    }

    #[test]
    fn symmetric_clamp_preserves_the_center() {
        let bounds = Bounds::from_size(100.0, 100.0);
        let mut rect = Rect::new(-20.0, 10.0, 80.0, 50.0);
        let sides = clamp_rect(&mut rect, &bounds, true);

        assert_eq!(rect, Rect::new(0.0, 10.0, 60.0, 50.0));
        assert_eq!(rect.center().x, 30.0);
        assert!(sides.left);
    }

    #[test]
    fn clamp_collapses_rather_than_inverting_when_fully_outside() {
        let bounds = Bounds::from_size(100.0, 100.0);
        let mut rect = Rect::new(-30.0, 20.0, -10.0, 40.0);
        let sides = clamp_rect(&mut rect, &bounds, false);

        assert_eq!(rect.x1, 0.0);
        assert_eq!(rect.x2, 0.0);
        assert!(sides.left);
    }

    #[test]
    fn keep_inside_translates_without_resizing() {
        let bounds = Bounds::from_size(100.0, 100.0);
        let mut rect = Rect::new(80.0, -10.0, 120.0, 30.0);
        keep_inside(&mut rect, &bounds);

        assert_eq!(rect, Rect::new(60.0, 0.0, 100.0, 40.0));
        assert_eq!(rect.width(), 40.0);
        assert_eq!(rect.height(), 40.0);
    }

    #[test]
    fn keep_inside_fills_an_axis_the_rect_overflows() {
        let bounds = Bounds::from_size(100.0, 100.0);
        let mut rect = Rect::new(-20.0, 10.0, 130.0, 50.0);
        keep_inside(&mut rect, &bounds);

        assert_eq!(rect.x1, 0.0);
        assert_eq!(rect.x2, 100.0);
        assert_eq!(rect.y1, 10.0);
        assert_eq!(rect.y2, 50.0);
    }

    #[test]
    fn keep_inside_respects_offset_bounds() {
        let bounds = Bounds::with_offset(50.0, 50.0, 100.0, 100.0);
        let mut rect = Rect::new(0.0, 0.0, 40.0, 40.0);
        keep_inside(&mut rect, &bounds);

        assert_eq!(rect, Rect::new(50.0, 50.0, 90.0, 90.0));
    }

    #[test]
    fn translate_inside_leaves_oversized_rectangles_in_place() {
        let bounds = Bounds::from_size(100.0, 100.0);
        let mut rect = Rect::new(-25.0, 10.0, 125.0, 50.0);
        translate_inside_horizontally(&mut rect, &bounds);
        assert_eq!(rect, Rect::new(-25.0, 10.0, 125.0, 50.0));

        let mut rect = Rect::new(80.0, 10.0, 120.0, 50.0);
        translate_inside_horizontally(&mut rect, &bounds);
        assert_eq!(rect, Rect::new(60.0, 10.0, 100.0, 50.0));

        let mut rect = Rect::new(10.0, -30.0, 50.0, 130.0);
        translate_inside_vertically(&mut rect, &bounds);
        assert_eq!(rect, Rect::new(10.0, -30.0, 50.0, 130.0));
    }
}
