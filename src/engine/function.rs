/// The current manipulation mode of the rectangle: which handle is
/// grabbed, or whether the rectangle is being moved, created from
/// scratch, or left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Inactive,
    Creating,
    Moving,
    ResizingUpperLeft,
    ResizingUpperRight,
    ResizingLowerLeft,
    ResizingLowerRight,
    ResizingLeft,
    ResizingRight,
    ResizingTop,
    ResizingBottom,
    AutoShrink,
    Executing,
    Dead,
}

impl Function {
    /// The mirrored function after the rectangle flips across its
    /// vertical axis (x1/x2 swapped).
    pub const fn mirror_x(self) -> Self {
        match self {
            Self::ResizingUpperLeft => Self::ResizingUpperRight,
            Self::ResizingUpperRight => Self::ResizingUpperLeft,
            Self::ResizingLowerLeft => Self::ResizingLowerRight,
            Self::ResizingLowerRight => Self::ResizingLowerLeft,
            Self::ResizingLeft => Self::ResizingRight,
            Self::ResizingRight => Self::ResizingLeft,
            other => other,
        }
    }

    /// The mirrored function after the rectangle flips across its
    /// horizontal axis (y1/y2 swapped).
    pub const fn mirror_y(self) -> Self {
        match self {
            Self::ResizingUpperLeft => Self::ResizingLowerLeft,
            Self::ResizingLowerLeft => Self::ResizingUpperLeft,
            Self::ResizingUpperRight => Self::ResizingLowerRight,
            Self::ResizingLowerRight => Self::ResizingUpperRight,
            Self::ResizingTop => Self::ResizingBottom,
            Self::ResizingBottom => Self::ResizingTop,
            other => other,
        }
    }

    pub const fn resizes_left_edge(self) -> bool {
        matches!(
            self,
            Self::ResizingUpperLeft | Self::ResizingLowerLeft | Self::ResizingLeft
        )
    }

    pub const fn resizes_right_edge(self) -> bool {
        matches!(
            self,
            Self::ResizingUpperRight | Self::ResizingLowerRight | Self::ResizingRight
        )
    }

    pub const fn resizes_top_edge(self) -> bool {
        matches!(
            self,
            Self::ResizingUpperLeft | Self::ResizingUpperRight | Self::ResizingTop
        )
    }

    pub const fn resizes_bottom_edge(self) -> bool {
        matches!(
            self,
            Self::ResizingLowerLeft | Self::ResizingLowerRight | Self::ResizingBottom
        )
    }

    /// True while the rectangle's size is being dragged out, as opposed
    /// to being moved whole. The integer size view is only rederived in
    /// these states so that a pure move never changes the quantized
    /// width/height.
    pub const fn is_rubber_banding(self) -> bool {
        matches!(
            self,
            Self::Creating
                | Self::ResizingUpperLeft
                | Self::ResizingUpperRight
                | Self::ResizingLowerLeft
                | Self::ResizingLowerRight
                | Self::ResizingLeft
                | Self::ResizingRight
                | Self::ResizingTop
                | Self::ResizingBottom
                | Self::AutoShrink
        )
    }

    pub const fn is_adjusting(self) -> bool {
        self.is_rubber_banding() || matches!(self, Self::Moving)
    }

    /// Picks the resize function a brand-new rectangle enters from the
    /// direction of the first pointer movement away from the anchor.
    pub fn from_drag_direction(dx: f64, dy: f64) -> Self {
        if dx < 0.0 {
            if dy < 0.0 {
                Self::ResizingUpperLeft
            } else {
                Self::ResizingLowerLeft
            }
        } else if dx > 0.0 {
            if dy < 0.0 {
                Self::ResizingUpperRight
            } else {
                Self::ResizingLowerRight
            }
        } else if dy < 0.0 {
            Self::ResizingUpperRight
        } else {
            Self::ResizingLowerRight
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrors_are_involutions() {
        let all = [
            Function::Inactive,
            Function::Creating,
            Function::Moving,
            Function::ResizingUpperLeft,
            Function::ResizingUpperRight,
            Function::ResizingLowerLeft,
            Function::ResizingLowerRight,
            Function::ResizingLeft,
            Function::ResizingRight,
            Function::ResizingTop,
            Function::ResizingBottom,
            Function::AutoShrink,
            Function::Executing,
            Function::Dead,
        ];
        for function in all {
            assert_eq!(function.mirror_x().mirror_x(), function);
            assert_eq!(function.mirror_y().mirror_y(), function);
        }
    }

    #[test]
    fn corner_mirrors_swap_the_flipped_axis_only() {
        assert_eq!(
            Function::ResizingUpperLeft.mirror_x(),
            Function::ResizingUpperRight
        );
        assert_eq!(
            Function::ResizingUpperLeft.mirror_y(),
            Function::ResizingLowerLeft
        );
        assert_eq!(Function::ResizingLeft.mirror_x(), Function::ResizingRight);
        assert_eq!(Function::ResizingLeft.mirror_y(), Function::ResizingLeft);
        assert_eq!(Function::ResizingTop.mirror_y(), Function::ResizingBottom);
        assert_eq!(Function::ResizingTop.mirror_x(), Function::ResizingTop);
    }

    #[test]
    fn drag_direction_selects_the_pulled_corner() {
        assert_eq!(
            Function::from_drag_direction(-1.0, -1.0),
            Function::ResizingUpperLeft
        );
        assert_eq!(
            Function::from_drag_direction(1.0, -1.0),
            Function::ResizingUpperRight
        );
        assert_eq!(
            Function::from_drag_direction(-1.0, 1.0),
            Function::ResizingLowerLeft
        );
        assert_eq!(
            Function::from_drag_direction(1.0, 1.0),
            Function::ResizingLowerRight
        );
        // A purely vertical first movement still picks a corner so both
        // axes stay draggable.
        assert_eq!(
            Function::from_drag_direction(0.0, -1.0),
            Function::ResizingUpperRight
        );
        assert_eq!(
            Function::from_drag_direction(0.0, 1.0),
            Function::ResizingLowerRight
        );
    }

    #[test]
    fn moving_is_adjusting_but_not_rubber_banding() {
        assert!(Function::Moving.is_adjusting());
        assert!(!Function::Moving.is_rubber_banding());
        assert!(Function::Creating.is_rubber_banding());
        assert!(Function::AutoShrink.is_rubber_banding());
        assert!(!Function::Dead.is_adjusting());
        assert!(!Function::Inactive.is_adjusting());
    }

    #[test]
    fn edge_classification_matches_the_handles() {
        assert!(Function::ResizingUpperLeft.resizes_left_edge());
        assert!(Function::ResizingUpperLeft.resizes_top_edge());
        assert!(!Function::ResizingUpperLeft.resizes_right_edge());
        assert!(Function::ResizingLowerRight.resizes_bottom_edge());
        assert!(Function::ResizingLeft.resizes_left_edge());
        assert!(!Function::ResizingLeft.resizes_top_edge());
        assert!(!Function::Moving.resizes_left_edge());
    }
}
