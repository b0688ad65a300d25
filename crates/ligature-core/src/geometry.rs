//! Geometric primitives for existential graph layout.
//!
//! This module provides the fundamental geometric types used throughout the
//! layout engine for sizes, positions and bounding boxes of sheet, cuts,
//! predicates and vertices, together with the helpers every ligature is
//! built from.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned box defined by minimum and maximum coordinates
//! - [`Insets`] - Padding/margin values for four sides
//! - [`predicate_periphery_point`], [`branching_junction`], [`straight_path`] -
//!   the attachment and path helpers used by hook assignment and routing
//!
//! # Coordinate System
//!
//! Coordinates follow the SVG convention:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```

mod path;

pub use path::{branching_junction, path_length, predicate_periphery_point, straight_path};

use serde::Serialize;

/// Minimum area for two boxes to count as overlapping.
const AREA_EPSILON: f32 = 1e-4;

/// Tolerance used when deciding whether a point lies in the open interior of a box.
const INTERIOR_EPSILON: f32 = 1e-4;

/// A 2D point representing a position in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use ligature_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
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

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f32 {
        self.sub_point(other).hypot()
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns true if both coordinates are within `tolerance` of `other`.
    pub fn approx_eq(self, other: Point, tolerance: f32) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
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

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Returns a new Size with padding added to both width and height
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    /// Returns true if either dimension is zero or negative
    pub fn is_degenerate(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle with minimum and maximum coordinates.
///
/// All containment and collision reasoning of the engine is expressed on
/// `Bounds`: strict containment for parent/child, positive-area
/// intersection for siblings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from explicit corner coordinates
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

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

    /// Returns the area of the bounds, zero for inverted bounds
    pub fn area(self) -> f32 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Returns the four corners, clockwise from the top-left one
    pub fn corners(self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ligature_core::geometry::{Bounds, Point, Size};
    /// let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 30.0));
    /// let b = Bounds::new_from_top_left(Point::new(10.0, 40.0), Size::new(120.0, 80.0));
    ///
    /// let combined = a.merge(&b);
    /// assert_eq!(combined.min_x(), 0.0);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// The overlapping region of two bounds; inverted when they are disjoint.
    pub fn intersection(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        }
    }

    /// Moves the bounds by the specified offset.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Expands the bounds by adding insets on every side.
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left(),
            min_y: self.min_y - insets.top(),
            max_x: self.max_x + insets.right(),
            max_y: self.max_y + insets.bottom(),
        }
    }

    /// Shrinks the bounds by removing insets on every side.
    ///
    /// The result may be inverted if the insets exceed the size.
    pub fn shrink(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x + insets.left(),
            min_y: self.min_y + insets.top(),
            max_x: self.max_x - insets.right(),
            max_y: self.max_y - insets.bottom(),
        }
    }

    /// Strict containment: `other` lies inside `self` with a positive margin
    /// on all four sides.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ligature_core::geometry::Bounds;
    /// let parent = Bounds::new(0.0, 0.0, 100.0, 100.0);
    ///
    /// assert!(parent.strictly_contains(&Bounds::new(10.0, 10.0, 90.0, 90.0)));
    /// assert!(!parent.strictly_contains(&Bounds::new(0.0, 10.0, 90.0, 90.0)));
    /// ```
    pub fn strictly_contains(&self, other: &Bounds) -> bool {
        other.min_x > self.min_x
            && other.min_y > self.min_y
            && other.max_x < self.max_x
            && other.max_y < self.max_y
    }

    /// Closed containment of a point
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Open containment of a point, with a small tolerance so points on the
    /// boundary never count as interior.
    pub fn contains_point_strictly(&self, point: Point) -> bool {
        point.x > self.min_x + INTERIOR_EPSILON
            && point.x < self.max_x - INTERIOR_EPSILON
            && point.y > self.min_y + INTERIOR_EPSILON
            && point.y < self.max_y - INTERIOR_EPSILON
    }

    /// Area of the intersection of two bounds, zero when disjoint or touching
    pub fn intersection_area(&self, other: &Bounds) -> f32 {
        let width = self.max_x.min(other.max_x) - self.min_x.max(other.min_x);
        let height = self.max_y.min(other.max_y) - self.min_y.max(other.min_y);
        if width <= 0.0 || height <= 0.0 {
            0.0
        } else {
            width * height
        }
    }

    /// Returns true if the two bounds intersect with positive area.
    ///
    /// Boxes that merely share an edge do not overlap.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.intersection_area(other) > AREA_EPSILON
    }

    /// Returns true if `point` lies on the boundary within `tolerance`.
    pub fn on_boundary(&self, point: Point, tolerance: f32) -> bool {
        let within = point.x >= self.min_x - tolerance
            && point.x <= self.max_x + tolerance
            && point.y >= self.min_y - tolerance
            && point.y <= self.max_y + tolerance;
        let interior = point.x > self.min_x + tolerance
            && point.x < self.max_x - tolerance
            && point.y > self.min_y + tolerance
            && point.y < self.max_y - tolerance;
        within && !interior
    }

    /// Clamps a point into the bounds.
    ///
    /// An inverted axis collapses to its midpoint.
    pub fn clamp_point(&self, point: Point) -> Point {
        let center = self.center();
        let x = if self.min_x <= self.max_x {
            point.x.clamp(self.min_x, self.max_x)
        } else {
            center.x
        };
        let y = if self.min_y <= self.max_y {
            point.y.clamp(self.min_y, self.max_y)
        } else {
            center.y
        };
        Point::new(x, y)
    }

    /// Returns true if the segment `a`-`b` passes through the open interior.
    ///
    /// Segments that run along an edge or touch a corner do not cross the
    /// interior.
    pub fn segment_crosses_interior(&self, a: Point, b: Point) -> bool {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        if dx.abs() < f32::EPSILON && dy.abs() < f32::EPSILON {
            return self.contains_point_strictly(a);
        }

        // Liang-Barsky clipping against the closed box.
        let mut t0 = 0.0_f32;
        let mut t1 = 1.0_f32;
        for (p, q) in [
            (-dx, a.x - self.min_x),
            (dx, self.max_x - a.x),
            (-dy, a.y - self.min_y),
            (dy, self.max_y - a.y),
        ] {
            if p.abs() < f32::EPSILON {
                if q < 0.0 {
                    return false;
                }
            } else {
                let r = q / p;
                if p < 0.0 {
                    if r > t1 {
                        return false;
                    }
                    t0 = t0.max(r);
                } else {
                    if r < t0 {
                        return false;
                    }
                    t1 = t1.min(r);
                }
            }
        }

        if t1 <= t0 {
            return false;
        }
        let mid_t = (t0 + t1) / 2.0;
        let mid = Point::new(a.x + dx * mid_t, a.y + dy * mid_t);
        self.contains_point_strictly(mid)
    }

    /// Returns true if the segment `a`-`b` crosses the boundary curve: one
    /// endpoint inside and the other outside, or both outside while passing
    /// through the interior.
    pub fn segment_crosses_boundary(&self, a: Point, b: Point) -> bool {
        let a_inside = self.contains_point_strictly(a);
        let b_inside = self.contains_point_strictly(b);
        match (a_inside, b_inside) {
            (true, true) => false,
            (false, false) => self.segment_crosses_interior(a, b),
            _ => true,
        }
    }
}

/// Represents spacing around an element (padding, margin, etc.)
/// with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with the specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates new insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            1.0f32..500.0,
            1.0f32..500.0,
        )
            .prop_map(|(x, y, w, h)| Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h)))
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn inset_strategy() -> impl Strategy<Value = f32> {
        0.0f32..50.0
    }

    // ===================
    // Property Test Functions
    // ===================

    fn check_overlap_is_symmetric(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        prop_assert_eq!(b1.overlaps(&b2), b2.overlaps(&b1));
        prop_assert!(approx_eq!(
            f32,
            b1.intersection_area(&b2),
            b2.intersection_area(&b1)
        ));
        Ok(())
    }

    fn check_intersection_area_is_bounded(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        let area = b1.intersection_area(&b2);
        prop_assert!(area >= 0.0);
        prop_assert!(area <= b1.area().min(b2.area()) + 0.01);
        Ok(())
    }

    fn check_strict_containment_is_asymmetric(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        if b1.strictly_contains(&b2) {
            prop_assert!(!b2.strictly_contains(&b1));
            prop_assert!(b1.overlaps(&b2));
        }
        prop_assert!(!b1.strictly_contains(&b1));
        Ok(())
    }

    fn check_padding_gives_strict_containment(
        bounds: Bounds,
        inset: f32,
    ) -> Result<(), TestCaseError> {
        let padded = bounds.add_padding(Insets::uniform(inset + 0.5));
        prop_assert!(padded.strictly_contains(&bounds));
        Ok(())
    }

    fn check_clamped_point_is_inside(bounds: Bounds, point: Point) -> Result<(), TestCaseError> {
        prop_assert!(bounds.contains_point(bounds.clamp_point(point)));
        Ok(())
    }

    fn check_periphery_point_is_on_boundary(
        bounds: Bounds,
        toward: Point,
    ) -> Result<(), TestCaseError> {
        let point = predicate_periphery_point(bounds, toward);
        prop_assert!(bounds.on_boundary(point, 0.01), "{point:?} not on {bounds:?}");
        Ok(())
    }

    fn check_edges_do_not_cross_interior(bounds: Bounds) -> Result<(), TestCaseError> {
        let [a, b, c, d] = bounds.corners();
        for (start, end) in [(a, b), (b, c), (c, d), (d, a)] {
            prop_assert!(!bounds.segment_crosses_interior(start, end));
        }
        Ok(())
    }

    fn check_diagonal_crosses_interior(bounds: Bounds) -> Result<(), TestCaseError> {
        let start = Point::new(bounds.min_x() - 1.0, bounds.min_y() - 1.0);
        let end = Point::new(bounds.max_x() + 1.0, bounds.max_y() + 1.0);
        prop_assert!(bounds.segment_crosses_interior(start, end));
        prop_assert!(bounds.segment_crosses_boundary(start, end));
        prop_assert!(!bounds.segment_crosses_boundary(bounds.center(), bounds.center()));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn overlap_is_symmetric(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_overlap_is_symmetric(b1, b2)?;
        }

        #[test]
        fn intersection_area_is_bounded(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_intersection_area_is_bounded(b1, b2)?;
        }

        #[test]
        fn strict_containment_is_asymmetric(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_strict_containment_is_asymmetric(b1, b2)?;
        }

        #[test]
        fn padding_gives_strict_containment(
            bounds in bounds_strategy(),
            inset in inset_strategy(),
        ) {
            check_padding_gives_strict_containment(bounds, inset)?;
        }

        #[test]
        fn clamped_point_is_inside(bounds in bounds_strategy(), point in point_strategy()) {
            check_clamped_point_is_inside(bounds, point)?;
        }

        #[test]
        fn periphery_point_is_on_boundary(bounds in bounds_strategy(), toward in point_strategy()) {
            check_periphery_point_is_on_boundary(bounds, toward)?;
        }

        #[test]
        fn edges_do_not_cross_interior(bounds in bounds_strategy()) {
            check_edges_do_not_cross_interior(bounds)?;
        }

        #[test]
        fn diagonal_crosses_interior(bounds in bounds_strategy()) {
            check_diagonal_crosses_interior(bounds)?;
        }
    }
}
