use crate::geo::Point;
use serde::{Deserialize, Serialize};

/// A 2D axis-aligned rectangle given by its origin and extent.
///
/// `(x, y)` is the minimum corner; `w` and `h` are expected to be
/// non-negative. All intersection tests treat the rectangle as a closed
/// region, so points and rectangles touching an edge count as inside.
///
/// # Examples
///
/// ```
/// use geoscan_types::geo::Point;
/// use geoscan_types::rect::Rect;
///
/// let rect = Rect::new(0.0, 0.0, 10.0, 5.0);
/// assert_eq!(rect.centroid(), Point::new(5.0, 2.5));
/// assert!(rect.contains_point(&Point::new(10.0, 5.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// Create a rectangle from its minimum corner and size.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle spanning two corners given in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let min_x = a.x().min(b.x());
        let min_y = a.y().min(b.y());
        let max_x = a.x().max(b.x());
        let max_y = a.y().max(b.y());
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// A square of half-width `radius` centered on `center`.
    pub fn around(center: &Point, radius: f64) -> Self {
        Self::new(
            center.x() - radius,
            center.y() - radius,
            radius * 2.0,
            radius * 2.0,
        )
    }

    /// Tight bounding rectangle of a set of points, `None` if empty.
    pub fn bounding<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min_x, mut min_y) = (first.x(), first.y());
        let (mut max_x, mut max_y) = (min_x, min_y);
        for p in iter {
            min_x = min_x.min(p.x());
            min_y = min_y.min(p.y());
            max_x = max_x.max(p.x());
            max_y = max_y.max(p.y());
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Bounding rectangle of `points` padded by `pad` on every side.
    ///
    /// An empty input yields a `2 * pad` square around the origin.
    pub fn padded_bounds<'a, I>(points: I, pad: f64) -> Self
    where
        I: IntoIterator<Item = &'a Point>,
    {
        Self::bounding(points)
            .unwrap_or_else(|| Self::new(0.0, 0.0, 0.0, 0.0))
            .expand(pad)
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.w
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.h
    }

    pub fn width(&self) -> f64 {
        self.w
    }

    pub fn height(&self) -> f64 {
        self.h
    }

    /// Center point of the rectangle.
    pub fn centroid(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn merge(&self, other: &Rect) -> Self {
        let min_x = self.min_x().min(other.min_x());
        let min_y = self.min_y().min(other.min_y());
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Smallest rectangle containing `self` and `point`.
    pub fn include(&self, point: &Point) -> Self {
        self.merge(&Self::new(point.x(), point.y(), 0.0, 0.0))
    }

    /// Pad every side by `amount`. A negative amount shrinks the rectangle.
    pub fn expand(&self, amount: f64) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.w + amount * 2.0,
            self.h + amount * 2.0,
        )
    }

    /// Pad every side by `radius` plus a few ULPs of the coordinate magnitude.
    ///
    /// `max = x + w` can round inward, so `expand` alone may leave out a
    /// point exactly `radius` away from a true edge. The result covers every
    /// such point; callers confirm candidates with an exact distance test.
    pub fn reach(&self, radius: f64) -> Self {
        let magnitude = self
            .min_x()
            .abs()
            .max(self.max_x().abs())
            .max(self.min_y().abs())
            .max(self.max_y().abs())
            + radius.abs();
        self.expand(radius + magnitude * 8.0 * f64::EPSILON)
    }

    /// Closed-interval rectangle overlap; touching edges intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x() <= other.max_x()
            && self.max_x() >= other.min_x()
            && self.min_y() <= other.max_y()
            && self.max_y() >= other.min_y()
    }

    /// Closed-interval point containment; boundary points are inside.
    pub fn contains_point(&self, point: &Point) -> bool {
        self.min_x() <= point.x()
            && self.max_x() >= point.x()
            && self.min_y() <= point.y()
            && self.max_y() >= point.y()
    }
}

impl From<geo::Rect<f64>> for Rect {
    fn from(rect: geo::Rect<f64>) -> Self {
        Self::new(rect.min().x, rect.min().y, rect.width(), rect.height())
    }
}

impl From<Rect> for geo::Rect<f64> {
    fn from(rect: Rect) -> Self {
        geo::Rect::new(
            geo::coord! { x: rect.min_x(), y: rect.min_y() },
            geo::coord! { x: rect.max_x(), y: rect.max_y() },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let rect = Rect::new(1.0, 2.0, 10.0, 5.0);
        assert_eq!(rect.min_x(), 1.0);
        assert_eq!(rect.min_y(), 2.0);
        assert_eq!(rect.max_x(), 11.0);
        assert_eq!(rect.max_y(), 7.0);
        assert_eq!(rect.width(), 10.0);
        assert_eq!(rect.height(), 5.0);
    }

    #[test]
    fn test_rect_centroid() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(rect.centroid(), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_rect_from_corners_any_order() {
        let a = Rect::from_corners(Point::new(4.0, 1.0), Point::new(0.0, 3.0));
        assert_eq!(a, Rect::new(0.0, 1.0, 4.0, 2.0));
    }

    #[test]
    fn test_rect_expand_round_trip() {
        let rect = Rect::new(0.5, -1.25, 4.0, 2.0);
        assert_eq!(rect.expand(0.75).expand(-0.75), rect);
        assert_eq!(rect.expand(-1.0).expand(1.0), rect);
    }

    #[test]
    fn test_rect_expand() {
        let expanded = Rect::new(0.0, 0.0, 10.0, 10.0).expand(5.0);
        assert_eq!(expanded.min_x(), -5.0);
        assert_eq!(expanded.min_y(), -5.0);
        assert_eq!(expanded.max_x(), 15.0);
        assert_eq!(expanded.max_y(), 15.0);
    }

    #[test]
    fn test_rect_merge() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(2.0, -1.0, 1.0, 1.0);
        let merged = a.merge(&b);
        assert_eq!(merged, b.merge(&a));
        assert_eq!(merged, Rect::new(0.0, -1.0, 3.0, 2.0));
        assert!(merged.intersects(&a) && merged.intersects(&b));
        assert_eq!(merged.merge(&a), merged);
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let far = Rect::new(20.0, 20.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 5.0, 5.0);

        assert!(a.intersects(&a));
        assert!(a.intersects(&b) && b.intersects(&a));
        assert!(!a.intersects(&far) && !far.intersects(&a));
        assert!(a.intersects(&touching) && touching.intersects(&a));
    }

    #[test]
    fn test_rect_contains_boundary() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains_point(&Point::new(5.0, 5.0)));
        assert!(rect.contains_point(&Point::new(0.0, 5.0)));
        assert!(rect.contains_point(&Point::new(10.0, 5.0)));
        assert!(rect.contains_point(&Point::new(5.0, 0.0)));
        assert!(rect.contains_point(&Point::new(5.0, 10.0)));
        assert!(rect.contains_point(&Point::new(10.0, 10.0)));
        assert!(!rect.contains_point(&Point::new(-0.1, 5.0)));
        assert!(!rect.contains_point(&Point::new(5.0, 10.1)));
    }

    #[test]
    fn test_rect_bounding() {
        let points = [
            Point::new(1.0, 2.0),
            Point::new(-1.0, 4.0),
            Point::new(3.0, 0.0),
        ];
        let rect = Rect::bounding(&points).unwrap();
        assert_eq!(rect, Rect::new(-1.0, 0.0, 4.0, 4.0));
        assert!(Rect::bounding(&[] as &[Point]).is_none());
        assert_eq!(
            Rect::padded_bounds(&points, 1.0),
            Rect::new(-2.0, -1.0, 6.0, 6.0)
        );
    }

    #[test]
    fn test_rect_geo_conversion() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        let geo_rect: geo::Rect<f64> = rect.into();
        assert_eq!(geo_rect.max().x, 4.0);
        assert_eq!(Rect::from(geo_rect), rect);
    }

    #[test]
    fn test_rect_reach_covers_rounded_edges() {
        let a = Point::new(-110.51437090049232, 0.0);
        let b = Point::new(28.312610239609313, 0.0);
        let c = Point::new(28.312910239609312, 0.0);
        let eps = c.x() - b.x();

        let spanning = Rect::bounding(&[a, b]).unwrap();
        let window = spanning.reach(eps);
        assert!(window.contains_point(&c));
        assert!(window.max_x() >= spanning.expand(eps).max_x());

        let single = Rect::new(c.x(), c.y(), 0.0, 0.0).reach(eps);
        assert!(single.contains_point(&b));
        assert!(!single.contains_point(&Point::new(b.x() - 1e-9, 0.0)));
    }
}
