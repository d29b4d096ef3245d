use super::point::Point;
use super::polygon::Polygon;

/// Axis-aligned integer rectangle. Covers the half-open cell range
/// `min.x..max.x` by `min.y..max.y`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Normalized bounding box of two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn bounding(points: &[Point]) -> Option<Self> {
        let first = *points.first()?;
        Some(points.iter().skip(1).fold(
            Self::new(first, first),
            |acc, p| Self {
                min: Point::new(acc.min.x.min(p.x), acc.min.y.min(p.y)),
                max: Point::new(acc.max.x.max(p.x), acc.max.y.max(p.y)),
            },
        ))
    }

    pub fn width(&self) -> i64 {
        self.max.x - self.min.x
    }
    pub fn height(&self) -> i64 {
        self.max.y - self.min.y
    }
    pub fn area(&self) -> i64 {
        self.width() * self.height()
    }

    pub fn cell_count(&self) -> usize {
        (self.width().max(0) as usize) * (self.height().max(0) as usize)
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn contains_cell(&self, cell: Point) -> bool {
        cell.x >= self.min.x && cell.x < self.max.x && cell.y >= self.min.y && cell.y < self.max.y
    }

    /// Corners in the order (min x, min y), (min x, max y), (max x, min y), (max x, max y).
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.min.x, self.max.y),
            Point::new(self.max.x, self.min.y),
            self.max,
        ]
    }

    /// Cells covered by the rectangle, x outer and y inner.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        let (min_y, max_y) = (self.min.y, self.max.y);
        (self.min.x..self.max.x).flat_map(move |x| (min_y..max_y).map(move |y| Point::new(x, y)))
    }

    pub fn to_polygon(&self) -> Polygon {
        Polygon::from_points(vec![
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ])
    }
}
