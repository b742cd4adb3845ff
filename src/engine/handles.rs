use super::function::Function;
use super::RectangleEngine;
use crate::geometry::{intersect_extent, Point, Viewport};

const MAX_HANDLE_SIZE: f64 = 50.0;
const MIN_HANDLE_SIZE: f64 = 15.0;
const NARROW_MODE_HANDLE_SIZE: f64 = 15.0;
const NARROW_MODE_THRESHOLD: f64 = 45.0;

/// Where a handle sits on the rectangle outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleAnchor {
    Center,
    North,
    NorthWest,
    NorthEast,
    South,
    SouthWest,
    SouthEast,
    West,
    East,
}

impl Function {
    /// The handle a renderer should emphasize for this function, if
    /// any. Move and the non-grab states map to the center.
    pub const fn handle_anchor(self) -> HandleAnchor {
        match self {
            Self::ResizingUpperLeft => HandleAnchor::NorthWest,
            Self::ResizingUpperRight => HandleAnchor::NorthEast,
            Self::ResizingLowerLeft => HandleAnchor::SouthWest,
            Self::ResizingLowerRight => HandleAnchor::SouthEast,
            Self::ResizingLeft => HandleAnchor::West,
            Self::ResizingRight => HandleAnchor::East,
            Self::ResizingTop => HandleAnchor::North,
            Self::ResizingBottom => HandleAnchor::South,
            _ => HandleAnchor::Center,
        }
    }
}

/// Handle dimensions in screen pixels, derived from the on-screen size
/// of the rectangle. In narrow mode (rectangle too small on screen for
/// inside handles) the handles straddle the outside of the edges so
/// tiny rectangles stay manipulable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleLayout {
    pub corner_width: f64,
    pub corner_height: f64,
    pub top_bottom_width: f64,
    pub left_right_height: f64,
    pub narrow_mode: bool,
    scale_x: f64,
    scale_y: f64,
}

impl Default for HandleLayout {
    fn default() -> Self {
        Self {
            corner_width: MIN_HANDLE_SIZE,
            corner_height: MIN_HANDLE_SIZE,
            top_bottom_width: MIN_HANDLE_SIZE,
            left_right_height: MIN_HANDLE_SIZE,
            narrow_mode: false,
            scale_x: 0.0,
            scale_y: 0.0,
        }
    }
}

impl HandleLayout {
    /// Freshly created rectangles never start in narrow mode.
    pub(super) fn leave_narrow_mode(&mut self) {
        self.narrow_mode = false;
    }
}

impl RectangleEngine {
    pub fn handle_layout(&self) -> HandleLayout {
        self.handles
    }

    /// Recomputes handle sizes for the current zoom and rectangle size.
    /// Must be rerun whenever either changes; sizing is a pure function
    /// of the viewport-intersected on-screen extents of the rectangle.
    pub fn update_handle_layout(&mut self, viewport: &Viewport) {
        let rect = self.rect();

        let x1 = rect.x1 * viewport.scale_x;
        let y1 = rect.y1 * viewport.scale_y;
        let width = rect.width() * viewport.scale_x;
        let height = rect.height() * viewport.scale_y;

        let (visible_width, visible_height) = intersect_extent(
            x1,
            y1,
            width,
            height,
            viewport.offset_x,
            viewport.offset_y,
            viewport.width,
            viewport.height,
        );

        self.handles.narrow_mode =
            visible_width < NARROW_MODE_THRESHOLD || visible_height < NARROW_MODE_THRESHOLD;

        if self.handles.narrow_mode {
            self.handles.corner_width = NARROW_MODE_HANDLE_SIZE;
            self.handles.corner_height = NARROW_MODE_HANDLE_SIZE;

            self.handles.top_bottom_width =
                width.clamp((width - 2.0).min(NARROW_MODE_HANDLE_SIZE), f64::INFINITY);
            self.handles.left_right_height =
                height.clamp((height - 2.0).min(NARROW_MODE_HANDLE_SIZE), f64::INFINITY);
        } else {
            self.handles.corner_width =
                (visible_width / 4.0).clamp(MIN_HANDLE_SIZE, MAX_HANDLE_SIZE);
            self.handles.corner_height =
                (visible_height / 4.0).clamp(MIN_HANDLE_SIZE, MAX_HANDLE_SIZE);

            self.handles.top_bottom_width = (width - 3.0 * self.handles.corner_width)
                .clamp(MIN_HANDLE_SIZE, f64::INFINITY);
            self.handles.left_right_height = (height - 3.0 * self.handles.corner_height)
                .clamp(MIN_HANDLE_SIZE, f64::INFINITY);
        }

        self.handles.scale_x = viewport.scale_x;
        self.handles.scale_y = viewport.scale_y;
    }

    /// True when the layout was computed for a different zoom than the
    /// given viewport's, meaning it must be recomputed before use.
    pub fn scale_has_changed(&self, viewport: &Viewport) -> bool {
        viewport.scale_x != self.handles.scale_x || viewport.scale_y != self.handles.scale_y
    }

    /// Hit-tests `point` against the eight resize handles, the interior
    /// and the exterior, returning the function a press at that point
    /// should begin. A zero-area rectangle only classifies as creating
    /// or dead.
    pub fn classify_point(&self, point: Point, viewport: &Viewport) -> Function {
        let rect = self.rect();

        if rect.is_empty() {
            return if rect.contains(point) {
                Function::Dead
            } else {
                Function::Creating
            };
        }

        if self.coord_outside(point, viewport) {
            return Function::Creating;
        }

        let handle_functions = [
            (HandleAnchor::NorthWest, Function::ResizingUpperLeft),
            (HandleAnchor::SouthEast, Function::ResizingLowerRight),
            (HandleAnchor::NorthEast, Function::ResizingUpperRight),
            (HandleAnchor::SouthWest, Function::ResizingLowerLeft),
            (HandleAnchor::West, Function::ResizingLeft),
            (HandleAnchor::East, Function::ResizingRight),
            (HandleAnchor::North, Function::ResizingTop),
            (HandleAnchor::South, Function::ResizingBottom),
        ];

        for (anchor, function) in handle_functions {
            if self.point_on_handle(point, anchor, viewport) {
                return function;
            }
        }

        if self.point_on_handle(point, HandleAnchor::Center, viewport) {
            Function::Moving
        } else {
            Function::Dead
        }
    }

    /// Classifies and stores the function for the hovered point, as a
    /// press would use it. Suppressed briefly after key nudges so the
    /// stationary cursor does not steal the grabbed handle back.
    pub fn hover(&mut self, point: Point, viewport: &Viewport) {
        if self.suppress_hover > 0 {
            self.suppress_hover -= 1;
            return;
        }

        let function = self.classify_point(point, viewport);
        self.set_function(function);
    }

    /// Whether the coordinate lies outside the rectangle including the
    /// outside-straddling handles of narrow mode.
    fn coord_outside(&self, point: Point, viewport: &Viewport) -> bool {
        let rect = self.rect();

        let (border_x, border_y) = if self.handles.narrow_mode {
            (
                self.handles.corner_width / viewport.scale_x,
                self.handles.corner_height / viewport.scale_y,
            )
        } else {
            (0.0, 0.0)
        };

        point.x < rect.x1 - border_x
            || point.x > rect.x2 + border_x
            || point.y < rect.y1 - border_y
            || point.y > rect.y2 + border_y
    }

    /// Screen-space square test against one handle. Handle sizes are
    /// screen pixels while the anchor position is image space, so both
    /// the point and the anchor go through the viewport scale.
    fn point_on_handle(&self, point: Point, anchor: HandleAnchor, viewport: &Viewport) -> bool {
        let rect = self.rect();
        let width = rect.width();
        let height = rect.height();
        let handles = &self.handles;

        let (mut handle_x, mut handle_y, handle_width, handle_height, narrow_dir_x, narrow_dir_y) =
            match anchor {
                HandleAnchor::NorthWest => (
                    rect.x1,
                    rect.y1,
                    handles.corner_width,
                    handles.corner_height,
                    -1.0,
                    -1.0,
                ),
                HandleAnchor::SouthEast => (
                    rect.x2,
                    rect.y2,
                    handles.corner_width,
                    handles.corner_height,
                    1.0,
                    1.0,
                ),
                HandleAnchor::NorthEast => (
                    rect.x2,
                    rect.y1,
                    handles.corner_width,
                    handles.corner_height,
                    1.0,
                    -1.0,
                ),
                HandleAnchor::SouthWest => (
                    rect.x1,
                    rect.y2,
                    handles.corner_width,
                    handles.corner_height,
                    -1.0,
                    1.0,
                ),
                HandleAnchor::West => (
                    rect.x1,
                    rect.y1 + height / 2.0,
                    handles.corner_width,
                    handles.left_right_height,
                    -1.0,
                    0.0,
                ),
                HandleAnchor::East => (
                    rect.x2,
                    rect.y1 + height / 2.0,
                    handles.corner_width,
                    handles.left_right_height,
                    1.0,
                    0.0,
                ),
                HandleAnchor::North => (
                    rect.x1 + width / 2.0,
                    rect.y1,
                    handles.top_bottom_width,
                    handles.corner_height,
                    0.0,
                    -1.0,
                ),
                HandleAnchor::South => (
                    rect.x1 + width / 2.0,
                    rect.y2,
                    handles.top_bottom_width,
                    handles.corner_height,
                    0.0,
                    1.0,
                ),
                HandleAnchor::Center => {
                    let (handle_width, handle_height) = if handles.narrow_mode {
                        (width * viewport.scale_x, height * viewport.scale_y)
                    } else {
                        (
                            width * viewport.scale_x - handles.corner_width * 2.0,
                            height * viewport.scale_y - handles.corner_height * 2.0,
                        )
                    };
                    (
                        rect.x1 + width / 2.0,
                        rect.y1 + height / 2.0,
                        handle_width,
                        handle_height,
                        0.0,
                        0.0,
                    )
                }
            };

        if handles.narrow_mode {
            handle_x += narrow_dir_x * handle_width / viewport.scale_x;
            handle_y += narrow_dir_y * handle_height / viewport.scale_y;
        }

        let (tx, ty) = viewport.to_screen(point);
        let (handle_tx, handle_ty) = viewport.to_screen(Point::new(handle_x, handle_y));
        let (north_west_x, north_west_y) =
            shift_to_north_west(anchor, handle_tx, handle_ty, handle_width, handle_height);

        tx >= north_west_x
            && tx <= north_west_x + handle_width
            && ty >= north_west_y
            && ty <= north_west_y + handle_height
    }
}

/// Shifts a handle's anchor position to the handle's north-west corner.
fn shift_to_north_west(anchor: HandleAnchor, x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
    match anchor {
        HandleAnchor::Center => (x - width / 2.0, y - height / 2.0),
        HandleAnchor::North => (x - width / 2.0, y),
        HandleAnchor::NorthWest => (x, y),
        HandleAnchor::NorthEast => (x - width, y),
        HandleAnchor::South => (x - width / 2.0, y - height),
        HandleAnchor::SouthWest => (x, y - height),
        HandleAnchor::SouthEast => (x - width, y - height),
        HandleAnchor::West => (x, y - height / 2.0),
        HandleAnchor::East => (x - width, y - height / 2.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn engine_with_rect(rect: Rect) -> RectangleEngine {
        let mut engine = RectangleEngine::default();
        engine.set_rect_for_test(rect);
        engine
    }

    fn viewport() -> Viewport {
        Viewport::unscaled(1000.0, 1000.0)
    }

    #[test]
    fn corner_handles_scale_with_the_visible_rectangle() {
        let mut engine = engine_with_rect(Rect::new(100.0, 100.0, 300.0, 250.0));
        engine.update_handle_layout(&viewport());

        let layout = engine.handle_layout();
        assert!(!layout.narrow_mode);
        assert_eq!(layout.corner_width, 50.0);
        assert_eq!(layout.corner_height, 37.5);
        assert_eq!(layout.top_bottom_width, 50.0);
        assert_eq!(layout.left_right_height, 37.5);
    }

    #[test]
    fn handle_sizes_are_clamped_to_their_range() {
        let mut engine = engine_with_rect(Rect::new(0.0, 0.0, 900.0, 900.0));
        engine.update_handle_layout(&viewport());
        let layout = engine.handle_layout();
        assert_eq!(layout.corner_width, 50.0);
        assert_eq!(layout.corner_height, 50.0);

        let mut engine = engine_with_rect(Rect::new(0.0, 0.0, 70.0, 70.0));
        engine.update_handle_layout(&viewport());
        let layout = engine.handle_layout();
        assert!(!layout.narrow_mode);
        assert_eq!(layout.corner_width, 17.5);
        // Side handles never shrink below the minimum.
        assert_eq!(layout.top_bottom_width, 17.5);
    }

    #[test]
    fn small_on_screen_rectangles_enter_narrow_mode() {
        let mut engine = engine_with_rect(Rect::new(10.0, 10.0, 20.0, 20.0));
        engine.update_handle_layout(&viewport());

        let layout = engine.handle_layout();
        assert!(layout.narrow_mode);
        assert_eq!(layout.corner_width, 15.0);
        assert_eq!(layout.corner_height, 15.0);
    }

    #[test]
    fn zoom_decides_narrow_mode_not_image_size() {
        // A 40-pixel rectangle is narrow at 1:1 but comfortable at 4x.
        let mut engine = engine_with_rect(Rect::new(0.0, 0.0, 40.0, 40.0));
        engine.update_handle_layout(&viewport());
        assert!(engine.handle_layout().narrow_mode);

        let zoomed = Viewport {
            scale_x: 4.0,
            scale_y: 4.0,
            offset_x: 0.0,
            offset_y: 0.0,
            width: 1000.0,
            height: 1000.0,
        };
        engine.update_handle_layout(&zoomed);
        assert!(!engine.handle_layout().narrow_mode);
        assert_eq!(engine.handle_layout().corner_width, 40.0);
    }

    #[test]
    fn scale_change_invalidates_the_layout() {
        let mut engine = engine_with_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(engine.scale_has_changed(&viewport()));

        engine.update_handle_layout(&viewport());
        assert!(!engine.scale_has_changed(&viewport()));

        let zoomed = Viewport {
            scale_x: 2.0,
            ..viewport()
        };
        assert!(engine.scale_has_changed(&zoomed));
    }

    #[test]
    fn classification_covers_corners_edges_interior_and_exterior() {
        let mut engine = engine_with_rect(Rect::new(100.0, 100.0, 300.0, 250.0));
        engine.update_handle_layout(&viewport());
        let viewport = viewport();

        assert_eq!(
            engine.classify_point(Point::new(110.0, 110.0), &viewport),
            Function::ResizingUpperLeft
        );
        assert_eq!(
            engine.classify_point(Point::new(295.0, 245.0), &viewport),
            Function::ResizingLowerRight
        );
        assert_eq!(
            engine.classify_point(Point::new(295.0, 105.0), &viewport),
            Function::ResizingUpperRight
        );
        assert_eq!(
            engine.classify_point(Point::new(105.0, 245.0), &viewport),
            Function::ResizingLowerLeft
        );
        assert_eq!(
            engine.classify_point(Point::new(102.0, 175.0), &viewport),
            Function::ResizingLeft
        );
        assert_eq!(
            engine.classify_point(Point::new(298.0, 175.0), &viewport),
            Function::ResizingRight
        );
        assert_eq!(
            engine.classify_point(Point::new(200.0, 105.0), &viewport),
            Function::ResizingTop
        );
        assert_eq!(
            engine.classify_point(Point::new(200.0, 245.0), &viewport),
            Function::ResizingBottom
        );
        assert_eq!(
            engine.classify_point(Point::new(200.0, 175.0), &viewport),
            Function::Moving
        );
        assert_eq!(
            engine.classify_point(Point::new(50.0, 50.0), &viewport),
            Function::Creating
        );
    }

    #[test]
    fn gaps_between_handles_classify_as_dead() {
        let mut engine = engine_with_rect(Rect::new(100.0, 100.0, 300.0, 250.0));
        engine.update_handle_layout(&viewport());

        // Inside the rectangle, right of the NW handle, above the
        // center region.
        assert_eq!(
            engine.classify_point(Point::new(160.0, 110.0), &viewport()),
            Function::Dead
        );
    }

    #[test]
    fn narrow_mode_handles_straddle_the_outside() {
        let mut engine = engine_with_rect(Rect::new(10.0, 10.0, 20.0, 20.0));
        engine.update_handle_layout(&viewport());
        assert!(engine.handle_layout().narrow_mode);

        // Just outside the top-left corner still grabs the handle.
        assert_eq!(
            engine.classify_point(Point::new(2.0, 2.0), &viewport()),
            Function::ResizingUpperLeft
        );
        // The whole interior moves.
        assert_eq!(
            engine.classify_point(Point::new(15.0, 15.0), &viewport()),
            Function::Moving
        );
        // Beyond the straddling handles a press creates a new
        // rectangle.
        assert_eq!(
            engine.classify_point(Point::new(60.0, 15.0), &viewport()),
            Function::Creating
        );
    }

    #[test]
    fn zero_area_rectangle_only_classifies_creating_or_dead() {
        let engine = RectangleEngine::default();
        assert_eq!(
            engine.classify_point(Point::new(5.0, 5.0), &viewport()),
            Function::Creating
        );
        assert_eq!(
            engine.classify_point(Point::new(0.0, 0.0), &viewport()),
            Function::Dead
        );
    }

    #[test]
    fn hover_stores_the_classification() {
        let mut engine = engine_with_rect(Rect::new(100.0, 100.0, 300.0, 250.0));
        engine.update_handle_layout(&viewport());

        engine.hover(Point::new(110.0, 110.0), &viewport());
        assert_eq!(engine.function(), Function::ResizingUpperLeft);

        engine.hover(Point::new(50.0, 50.0), &viewport());
        assert_eq!(engine.function(), Function::Creating);
    }

    #[test]
    fn hover_is_suppressed_briefly_after_a_nudge() {
        use crate::geometry::CanvasExtents;

        let mut engine = engine_with_rect(Rect::new(100.0, 100.0, 300.0, 250.0));
        engine.update_handle_layout(&viewport());
        engine.set_function(Function::ResizingRight);

        engine.nudge(5.0, 0.0, &CanvasExtents::new(1000.0, 1000.0));
        assert_eq!(engine.function(), Function::ResizingRight);

        // The two classification passes after a nudge are swallowed.
        engine.hover(Point::new(50.0, 50.0), &viewport());
        assert_eq!(engine.function(), Function::ResizingRight);
        engine.hover(Point::new(50.0, 50.0), &viewport());
        assert_eq!(engine.function(), Function::ResizingRight);

        engine.hover(Point::new(50.0, 50.0), &viewport());
        assert_eq!(engine.function(), Function::Creating);
    }

    #[test]
    fn hit_testing_follows_the_zoom() {
        let mut engine = engine_with_rect(Rect::new(100.0, 100.0, 140.0, 140.0));
        let zoomed = Viewport {
            scale_x: 4.0,
            scale_y: 4.0,
            offset_x: 0.0,
            offset_y: 0.0,
            width: 1000.0,
            height: 1000.0,
        };
        engine.update_handle_layout(&zoomed);
        assert!(!engine.handle_layout().narrow_mode);

        // 40 screen-pixel corner handles are 10 image pixels at 4x.
        assert_eq!(
            engine.classify_point(Point::new(108.0, 108.0), &zoomed),
            Function::ResizingUpperLeft
        );
        assert_eq!(
            engine.classify_point(Point::new(120.0, 120.0), &zoomed),
            Function::Moving
        );
    }

    #[test]
    fn grabbed_function_maps_to_its_handle_anchor() {
        assert_eq!(
            Function::ResizingUpperLeft.handle_anchor(),
            HandleAnchor::NorthWest
        );
        assert_eq!(Function::ResizingBottom.handle_anchor(), HandleAnchor::South);
        assert_eq!(Function::Moving.handle_anchor(), HandleAnchor::Center);
    }
}
