//! Geometric primitives for canvas layout and image placement.
//!
//! This module provides the value types every other part of Storeshot uses to
//! describe where things land on the output canvas.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in canvas space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangle defined by minimum and maximum coordinates
//! - [`Insets`] - Border offsets for four sides
//! - [`aspect_fill`] - Scale-to-cover placement of an image inside a rectangle
//!
//! # Coordinate System
//!
//! Storeshot uses the raster coordinate system:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner of the canvas at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//! - **Angles**: Degrees; positive angles rotate clockwise on screen

/// A 2D point representing a position in canvas coordinate space.
///
/// # Examples
///
/// ```
/// # use storeshot_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns `width / height`, or zero for a degenerate height.
    pub fn aspect_ratio(self) -> f32 {
        if self.height <= 0.0 {
            0.0
        } else {
            self.width / self.height
        }
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Returns true if either dimension is zero or negative
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Represents a rectangular region with minimum and maximum coordinates.
///
/// Bounds are allowed to extend past the canvas; a device rect deliberately
/// hangs off the bottom edge in most layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// The zero rectangle at the origin.
    pub const ZERO: Bounds = Bounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 0.0,
        max_y: 0.0,
    };

    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Creates a new bounds from origin coordinates and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// # use storeshot_core::geometry::Bounds;
    /// let rect = Bounds::from_xywh(10.0, 20.0, 100.0, 50.0);
    /// assert_eq!(rect.max_x(), 110.0);
    /// assert_eq!(rect.max_y(), 70.0);
    /// ```
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new_from_top_left(Point::new(x, y), Size::new(width, height))
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Returns true if this is exactly the zero rectangle
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// Moves the bounds by the specified offset.
    ///
    /// # Examples
    ///
    /// ```
    /// # use storeshot_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::from_xywh(10.0, 20.0, 50.0, 30.0);
    /// let moved = bounds.translate(Point::new(100.0, 50.0));
    /// assert_eq!(moved.min_x(), 110.0);
    /// assert_eq!(moved.min_y(), 70.0);
    /// assert_eq!(moved.width(), 50.0);
    /// assert_eq!(moved.height(), 30.0);
    /// ```
    pub fn translate(self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Shrinks the bounds by the given insets.
    ///
    /// Insets larger than the bounds collapse the result to a zero-sized
    /// rectangle at the clamped position instead of producing negative sizes.
    pub fn inset(self, insets: Insets) -> Self {
        let min_x = self.min_x + insets.left;
        let min_y = self.min_y + insets.top;
        let max_x = (self.max_x - insets.right).max(min_x);
        let max_y = (self.max_y - insets.bottom).max(min_y);
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Returns true if `other` lies entirely within these bounds.
    pub fn contains_bounds(self, other: Bounds) -> bool {
        other.min_x >= self.min_x
            && other.min_y >= self.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }

    /// Returns true if the interiors of the two bounds overlap.
    pub fn intersects(self, other: Bounds) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}

/// Represents spacing around an element with potentially different values for
/// each side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Creates insets with one value for left/right and one for top/bottom
    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}

/// Computes the rectangle an image of `source` size must be drawn into so
/// that it covers `dest` completely while keeping its aspect ratio.
///
/// When the source is wider than the destination it is scaled to the
/// destination height and overflows left and right by the same amount;
/// otherwise it is scaled to the destination width and overflows top and
/// bottom. The caller clips to `dest`. The result is never letterboxed and
/// never has negative area; a degenerate source returns `dest` unchanged.
///
/// # Examples
///
/// ```
/// # use storeshot_core::geometry::{aspect_fill, Bounds, Size};
/// let dest = Bounds::from_xywh(0.0, 0.0, 100.0, 100.0);
/// let drawn = aspect_fill(Size::new(200.0, 100.0), dest);
/// assert_eq!(drawn.height(), 100.0);
/// assert_eq!(drawn.width(), 200.0);
/// assert_eq!(drawn.min_x(), -50.0);
/// ```
pub fn aspect_fill(source: Size, dest: Bounds) -> Bounds {
    if source.is_empty() || dest.to_size().is_empty() {
        return dest;
    }

    let source_aspect = source.aspect_ratio();
    let dest_aspect = dest.to_size().aspect_ratio();
    let scale = if source_aspect > dest_aspect {
        dest.height() / source.height()
    } else {
        dest.width() / source.width()
    };

    Bounds::new_from_center(dest.center(), source.scale(scale))
}
