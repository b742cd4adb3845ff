//! Shared geometric primitives used across the engine and its consumers.

use serde::{Deserialize, Serialize};

/// Absolute tolerance for comparing image-space coordinates.
pub const COORD_EPSILON: f64 = 0.0001;

/// Tolerance below which two coordinates land on the same pixel.
pub const PIXEL_EPSILON: f64 = 0.5;

pub fn coords_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < COORD_EPSILON
}

pub fn same_pixel(a: f64, b: f64) -> bool {
    (a - b).abs() < PIXEL_EPSILON
}

/// An image-space coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn rounded(self) -> Self {
        Self {
            x: self.x.round(),
            y: self.y.round(),
        }
    }
}

/// A double-precision rectangle stored as corner coordinates.
///
/// The engine restores `x1 <= x2` and `y1 <= y2` after every mutation by
/// swapping corners, so consumers may rely on the ordering holding
/// whenever a rectangle leaves the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Rect {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// A zero-size rectangle collapsed onto `point`.
    pub const fn from_point(point: Point) -> Self {
        Self {
            x1: point.x,
            y1: point.y,
            x2: point.x,
            y2: point.y,
        }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x1 && point.x <= self.x2 && point.y >= self.y1 && point.y <= self.y2
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

/// The integer-quantized public view of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IntRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl IntRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Inclusive constraint extents in image space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Extents of an image anchored at the origin.
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            max_x: width,
            max_y: height,
        }
    }

    /// Extents of a drawable placed at `offset` within the image.
    pub fn with_offset(offset_x: f64, offset_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x: offset_x,
            min_y: offset_y,
            max_x: offset_x + width,
            max_y: offset_y + height,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Read-only snapshot of the canvas the rectangle may be constrained to.
///
/// The engine never reads pixels; this is the only image-model state it
/// consumes. Callers rebuild it whenever the image is resized or the
/// active drawable changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasExtents {
    pub image_width: f64,
    pub image_height: f64,
    pub drawable: Option<Bounds>,
}

impl CanvasExtents {
    pub const fn new(image_width: f64, image_height: f64) -> Self {
        Self {
            image_width,
            image_height,
            drawable: None,
        }
    }

    pub fn with_drawable(mut self, drawable: Bounds) -> Self {
        self.drawable = Some(drawable);
        self
    }

    pub const fn image_bounds(&self) -> Bounds {
        Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: self.image_width,
            max_y: self.image_height,
        }
    }
}

/// Screen mapping used by handle sizing and hit-testing.
///
/// `offset_*`, `width` and `height` describe the visible part of the
/// canvas in scaled (screen-pixel) coordinates; `scale_*` convert image
/// coordinates into that space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale_x: f64,
    pub scale_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// A viewport that shows the whole canvas 1:1. Convenient for
    /// consumers that do not zoom or scroll.
    pub const fn unscaled(width: f64, height: f64) -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            width,
            height,
        }
    }

    pub fn to_screen(&self, point: Point) -> (f64, f64) {
        (point.x * self.scale_x, point.y * self.scale_y)
    }
}

/// Intersects two axis-aligned boxes given as origin + size, returning
/// the size of the overlap (zero when disjoint).
pub(crate) fn intersect_extent(
    a_x: f64,
    a_y: f64,
    a_w: f64,
    a_h: f64,
    b_x: f64,
    b_y: f64,
    b_w: f64,
    b_h: f64,
) -> (f64, f64) {
    let x1 = a_x.max(b_x);
    let y1 = a_y.max(b_y);
    let x2 = (a_x + a_w).min(b_x + b_w);
    let y2 = (a_y + a_h).min(b_y + b_h);
    ((x2 - x1).max(0.0), (y2 - y1).max(0.0))
}
