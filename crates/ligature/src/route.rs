//! Obstacle-avoiding routing of identity lines.
//!
//! [`Router`] wraps an optional [`RoutingStrategy`]. When a strategy is
//! available it returns the shortest polyline from start to end that does
//! not pass through any obstacle; when none is available, or no path exists,
//! it returns an empty path and the caller falls back to a straight line.

mod visibility;

pub use visibility::VisibilityRouter;

use std::{fmt, sync::Arc};

use log::trace;

use ligature_core::geometry::{Bounds, Point};

/// Points closer than this are merged when normalizing a route.
const DUPLICATE_TOLERANCE: f32 = 1e-4;

/// A pluggable geometric backend for the [`Router`].
///
/// Implementations must be free of shared mutable state so that independent
/// layouts may route concurrently.
pub trait RoutingStrategy: fmt::Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Computes a path from `start` to `end` that does not cross the
    /// interior of any obstacle.
    ///
    /// Returns `None` if no such path exists. The returned points may omit
    /// `start` or `end`; [`Router::route`] restores them.
    fn shortest_path(&self, start: Point, end: Point, obstacles: &[Bounds]) -> Option<Vec<Point>>;
}

/// Computes obstacle-avoiding polylines through an optional backend.
#[derive(Debug, Clone)]
pub struct Router {
    strategy: Option<Arc<dyn RoutingStrategy>>,
}

impl Default for Router {
    /// A router backed by a [`VisibilityRouter`] without padding.
    fn default() -> Self {
        Self::new(VisibilityRouter::default())
    }
}

impl Router {
    /// Creates a router backed by `strategy`.
    pub fn new(strategy: impl RoutingStrategy + 'static) -> Self {
        Self {
            strategy: Some(Arc::new(strategy)),
        }
    }

    /// Creates a router with no backend; every route is empty.
    pub fn unavailable() -> Self {
        Self { strategy: None }
    }

    /// Returns true if a backend is configured.
    pub fn is_available(&self) -> bool {
        self.strategy.is_some()
    }

    /// Routes from `start` to `end` around `obstacles`.
    ///
    /// A non-empty result starts exactly at `start`, ends exactly at `end`
    /// and has no consecutive duplicate points. An empty result means no
    /// backend is available or no path exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use ligature::route::Router;
    /// use ligature_core::geometry::{Bounds, Point};
    ///
    /// let router = Router::default();
    /// let wall = Bounds::new(40.0, -50.0, 60.0, 50.0);
    /// let path = router.route(Point::new(0.0, 0.0), Point::new(100.0, 0.0), &[wall]);
    ///
    /// assert_eq!(path.first(), Some(&Point::new(0.0, 0.0)));
    /// assert_eq!(path.last(), Some(&Point::new(100.0, 0.0)));
    /// assert!(path.len() > 2);
    ///
    /// let path = Router::unavailable().route(Point::new(0.0, 0.0), Point::new(1.0, 1.0), &[]);
    /// assert!(path.is_empty());
    /// ```
    pub fn route(&self, start: Point, end: Point, obstacles: &[Bounds]) -> Vec<Point> {
        let Some(strategy) = &self.strategy else {
            return Vec::new();
        };
        let Some(points) = strategy.shortest_path(start, end, obstacles) else {
            trace!(strategy = strategy.name(), obstacles = obstacles.len(); "No route found");
            return Vec::new();
        };
        normalize(start, end, points)
    }
}

/// Pins the endpoints of a backend path and removes consecutive duplicates.
fn normalize(start: Point, end: Point, points: Vec<Point>) -> Vec<Point> {
    let mut path = Vec::with_capacity(points.len() + 2);
    path.push(start);
    for point in points {
        if let Some(last) = path.last()
            && last.approx_eq(point, DUPLICATE_TOLERANCE)
        {
            continue;
        }
        path.push(point);
    }

    let reaches_end = path.last().is_some_and(|last| {
        *last == end || (path.len() > 1 && last.approx_eq(end, DUPLICATE_TOLERANCE))
    });
    if reaches_end {
        if let Some(last) = path.last_mut() {
            *last = end;
        }
    } else {
        path.push(end);
    }
    path
}
