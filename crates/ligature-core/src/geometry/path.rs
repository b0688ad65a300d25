//! Attachment and path helpers for ligatures.

use super::{Bounds, Point};

/// Below this distance the direction toward a target is considered undefined.
const DEGENERATE_DISTANCE: f32 = 1e-4;

/// Returns the point where the ray from the center of `bounds` toward
/// `toward` leaves the rectangle.
///
/// The result always lies exactly on the boundary: the coordinate of the
/// edge that is hit is snapped to that edge. When `toward` coincides with
/// the center the top-edge midpoint is returned.
///
/// # Examples
///
/// ```
/// # use ligature_core::geometry::{predicate_periphery_point, Bounds, Point};
/// let bounds = Bounds::new(0.0, 0.0, 40.0, 20.0);
///
/// let right = predicate_periphery_point(bounds, Point::new(100.0, 10.0));
/// assert_eq!(right, Point::new(40.0, 10.0));
///
/// let degenerate = predicate_periphery_point(bounds, Point::new(20.0, 10.0));
/// assert_eq!(degenerate, Point::new(20.0, 0.0));
/// ```
pub fn predicate_periphery_point(bounds: Bounds, toward: Point) -> Point {
    let center = bounds.center();
    let direction = toward.sub_point(center);
    let half_width = bounds.width() / 2.0;
    let half_height = bounds.height() / 2.0;

    if direction.hypot() <= DEGENERATE_DISTANCE || half_width <= 0.0 || half_height <= 0.0 {
        return Point::new(center.x(), bounds.min_y());
    }

    let t_x = if direction.x().abs() > f32::EPSILON {
        half_width / direction.x().abs()
    } else {
        f32::INFINITY
    };
    let t_y = if direction.y().abs() > f32::EPSILON {
        half_height / direction.y().abs()
    } else {
        f32::INFINITY
    };

    let hit = center.add_point(direction.scale(t_x.min(t_y)));
    let hit = bounds.clamp_point(hit);
    if t_x <= t_y {
        let edge_x = if direction.x() > 0.0 {
            bounds.max_x()
        } else {
            bounds.min_x()
        };
        hit.with_x(edge_x)
    } else {
        let edge_y = if direction.y() > 0.0 {
            bounds.max_y()
        } else {
            bounds.min_y()
        };
        hit.with_y(edge_y)
    }
}

/// Junction point for a ligature of degree three or more.
///
/// Currently the vertex position itself; this is the place to plug in a
/// crossing-aware placement.
pub fn branching_junction(vertex: Point, _hooks: &[Point]) -> Point {
    vertex
}

/// A two point path from `a` to `b`.
pub fn straight_path(a: Point, b: Point) -> Vec<Point> {
    vec![a, b]
}

/// Total Euclidean length of a polyline.
pub fn path_length(points: &[Point]) -> f32 {
    points
        .windows(2)
        .map(|pair| pair[0].distance(pair[1]))
        .sum()
}
