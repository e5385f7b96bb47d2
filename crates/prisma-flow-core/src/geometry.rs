//! Points, sizes and axis-aligned rectangles.
//!
//! The same types describe the normalized 0–100 layout space and the final
//! pixel space. Both use the SVG orientation:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! so mapping one onto the other is a per-axis scale followed by a
//! translation ([`Point::scale`], [`Point::offset`]).

/// A position in diagram space.
///
/// # Examples
///
/// ```
/// # use prisma_flow_core::geometry::Point;
/// let anchor = Point::new(50.0, 30.0);
/// let pixels = anchor.scale(8.0, 10.0).offset(45.0, 85.0);
/// assert_eq!(pixels, Point::new(445.0, 385.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// Multiplies each coordinate by its axis factor.
    pub fn scale(self, sx: f32, sy: f32) -> Self {
        Self::new(self.x * sx, self.y * sy)
    }

    /// Shifts the point by `dx`, `dy`.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Returns the bounds of `size` centered on this point.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Width and height of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the size with each dimension multiplied by its axis factor.
    pub fn scale(self, sx: f32, sy: f32) -> Self {
        Self::new(self.width * sx, self.height * sy)
    }

    /// Returns true if the size has no area and no extent.
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// An axis-aligned rectangle stored by its edges.
///
/// Keeping the edges rather than an origin and a size makes the anchor
/// points on a box edge exactly equal to the edge coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
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

    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the top-left corner.
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Returns the smallest bounds covering both `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use prisma_flow_core::geometry::{Bounds, Point, Size};
    /// let db = Bounds::new_from_top_left(Point::new(20.0, 7.0), Size::new(25.0, 8.0));
    /// let other = Bounds::new_from_top_left(Point::new(55.0, 7.0), Size::new(25.0, 8.0));
    ///
    /// let band = db.merge(&other);
    /// assert_eq!(band.min_x(), 20.0);
    /// assert_eq!(band.max_x(), 80.0);
    /// assert_eq!(band.height(), 8.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Returns true if `other` lies inside these bounds; shared edges count.
    pub fn contains(&self, other: &Self) -> bool {
        other.min_x >= self.min_x
            && other.min_y >= self.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }

    /// Returns true if `point` lies inside or on the edge of these bounds.
    pub fn contains_point(&self, point: Point) -> bool {
        (self.min_x..=self.max_x).contains(&point.x)
            && (self.min_y..=self.max_y).contains(&point.y)
    }

    /// Returns true if the interiors of the two bounds intersect.
    ///
    /// Bounds that only share an edge or a corner do not overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// # use prisma_flow_core::geometry::{Bounds, Point, Size};
    /// let upper = Bounds::new_from_top_left(Point::new(70.0, 37.0), Size::new(25.0, 8.0));
    /// let lower = Bounds::new_from_top_left(Point::new(70.0, 45.0), Size::new(25.0, 15.0));
    /// assert!(!upper.overlaps(&lower));
    ///
    /// let inside = Bounds::new_from_top_left(Point::new(75.0, 40.0), Size::new(5.0, 10.0));
    /// assert!(upper.overlaps(&inside));
    /// ```
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_scale_then_offset() {
        let mapped = Point::new(100.0, 100.0).scale(8.1, 10.7).offset(45.0, 85.0);
        assert_approx_eq!(f32, mapped.x(), 855.0, epsilon = 0.001);
        assert_approx_eq!(f32, mapped.y(), 1155.0, epsilon = 0.001);
    }

    #[test]
    fn test_point_to_bounds() {
        let bounds = Point::new(50.0, 26.0).to_bounds(Size::new(25.0, 8.0));
        assert_approx_eq!(f32, bounds.min_x(), 37.5);
        assert_approx_eq!(f32, bounds.min_y(), 22.0);
        assert_approx_eq!(f32, bounds.max_x(), 62.5);
        assert_approx_eq!(f32, bounds.max_y(), 30.0);
    }

    #[test]
    fn test_size_scale_and_is_zero() {
        assert_eq!(Size::new(25.0, 8.0).scale(2.0, 0.5), Size::new(50.0, 4.0));
        assert!(Size::default().is_zero());
        assert!(!Size::new(0.0, 1.0).is_zero());
    }

    #[test]
    fn test_bounds_from_top_left() {
        let bounds = Bounds::new_from_top_left(Point::new(37.5, 22.0), Size::new(25.0, 8.0));
        assert_eq!(bounds.width(), 25.0);
        assert_eq!(bounds.height(), 8.0);
        assert_eq!(bounds.center(), Point::new(50.0, 26.0));
        assert_eq!(bounds.min_point(), Point::new(37.5, 22.0));
        assert_eq!(bounds.to_size(), Size::new(25.0, 8.0));
    }

    #[test]
    fn test_bounds_contains() {
        let canvas = Bounds::new_from_top_left(Point::default(), Size::new(100.0, 100.0));
        let inner = Bounds::new_from_top_left(Point::new(70.0, 45.0), Size::new(25.0, 15.0));
        let outside = Bounds::new_from_top_left(Point::new(90.0, 45.0), Size::new(25.0, 15.0));

        assert!(canvas.contains(&inner));
        assert!(canvas.contains(&canvas));
        assert!(!canvas.contains(&outside));
    }

    #[test]
    fn test_bounds_contains_point_on_edges() {
        let screened = Bounds::new_from_top_left(Point::new(37.5, 37.0), Size::new(25.0, 8.0));
        assert!(screened.contains_point(Point::new(50.0, 45.0)));
        assert!(screened.contains_point(Point::new(62.5, 41.0)));
        assert!(screened.contains_point(screened.center()));
        assert!(!screened.contains_point(Point::new(63.0, 41.0)));
    }

    #[test]
    fn test_bounds_overlaps_touching_edges() {
        let left = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let right = Bounds::new_from_top_left(Point::new(10.0, 0.0), Size::new(10.0, 10.0));
        let corner = Bounds::new_from_top_left(Point::new(10.0, 10.0), Size::new(10.0, 10.0));

        assert!(!left.overlaps(&right));
        assert!(!left.overlaps(&corner));
        assert!(left.overlaps(&left));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (0.0f32..100.0, 0.0f32..100.0, 0.5f32..50.0, 0.5f32..50.0)
            .prop_map(|(x, y, w, h)| Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h)))
    }

    fn check_merge_contains_both(a: Bounds, b: Bounds) -> Result<(), TestCaseError> {
        let merged = a.merge(&b);
        prop_assert!(merged.contains(&a));
        prop_assert!(merged.contains(&b));
        Ok(())
    }

    fn check_overlaps_is_symmetric(a: Bounds, b: Bounds) -> Result<(), TestCaseError> {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        Ok(())
    }

    fn check_center_is_contained(a: Bounds) -> Result<(), TestCaseError> {
        prop_assert!(a.contains_point(a.center()));
        Ok(())
    }

    proptest! {
        #[test]
        fn merge_contains_both(a in bounds_strategy(), b in bounds_strategy()) {
            check_merge_contains_both(a, b)?;
        }

        #[test]
        fn overlaps_is_symmetric(a in bounds_strategy(), b in bounds_strategy()) {
            check_overlaps_is_symmetric(a, b)?;
        }

        #[test]
        fn center_is_contained(a in bounds_strategy()) {
            check_center_is_contained(a)?;
        }
    }
}
