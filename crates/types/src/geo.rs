//! Point type wrapping the `geo` crate primitive.
//!
//! Clustering works in raw coordinate space: distances are planar Euclidean
//! distances between `(x, y)` pairs, which is what DBSCAN's epsilon is
//! expressed in for the small radii it is used with.

use serde::{Deserialize, Serialize};

/// A 2D point with x (longitude) and y (latitude) coordinates.
///
/// # Examples
///
/// ```
/// use geoscan_types::geo::Point;
///
/// let p = Point::new(-74.0060, 40.7128);
/// assert_eq!(p.x(), -74.0060);
/// assert_eq!(p.y(), 40.7128);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    inner: geo::Point<f64>,
}

impl Point {
    /// Create a new point from x (longitude) and y (latitude) coordinates.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            inner: geo::Point::new(x, y),
        }
    }

    /// Get the x coordinate (longitude).
    #[inline]
    pub fn x(&self) -> f64 {
        self.inner.x()
    }

    /// Get the y coordinate (latitude).
    #[inline]
    pub fn y(&self) -> f64 {
        self.inner.y()
    }

    /// Get the longitude (alias for x).
    #[inline]
    pub fn lon(&self) -> f64 {
        self.x()
    }

    /// Get the latitude (alias for y).
    #[inline]
    pub fn lat(&self) -> f64 {
        self.y()
    }

    /// Access the inner `geo::Point`.
    #[inline]
    pub fn inner(&self) -> &geo::Point<f64> {
        &self.inner
    }

    /// Euclidean distance to another point in coordinate units.
    ///
    /// ```
    /// use geoscan_types::geo::Point;
    ///
    /// let a = Point::new(0.0, 0.0);
    /// let b = Point::new(3.0, 4.0);
    /// assert_eq!(a.distance(&b), 5.0);
    /// ```
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        use geo::Distance;
        geo::Euclidean.distance(self.inner, other.inner)
    }

    /// True when both coordinates are exactly equal (distance zero).
    ///
    /// This is the identity used to aggregate duplicate input points.
    #[inline]
    pub fn coincides(&self, other: &Point) -> bool {
        self.x() == other.x() && self.y() == other.y()
    }
}

impl From<geo::Point<f64>> for Point {
    fn from(inner: geo::Point<f64>) -> Self {
        Self { inner }
    }
}

impl From<Point> for geo::Point<f64> {
    fn from(point: Point) -> Self {
        point.inner
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    fn from(point: Point) -> Self {
        (point.x(), point.y())
    }
}
