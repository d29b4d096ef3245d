use super::point::Point;
use super::rect::Rect;
use crate::error::GeometryError;

const ON_EDGE_TOLERANCE: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    Inside,
    Boundary,
    Outside,
}

/// Simple polygon over integer vertices. The closing edge is implicit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Validated constructor. A repeated closing vertex is dropped.
    pub fn new(mut points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if points.len() < 3 {
            return Err(GeometryError::TooFewVertices(points.len()));
        }
        let polygon = Self { points };
        if polygon.is_collinear() {
            return Err(GeometryError::ZeroArea);
        }
        if !polygon.is_simple() {
            return Err(GeometryError::SelfIntersecting);
        }
        if polygon.twice_signed_area() == 0 {
            return Err(GeometryError::ZeroArea);
        }
        Ok(polygon)
    }

    /// Unchecked constructor for shapes built by the engine itself.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    fn twice_signed_area(&self) -> i128 {
        self.edges()
            .map(|(a, b)| a.x as i128 * b.y as i128 - b.x as i128 * a.y as i128)
            .sum()
    }

    pub fn area(&self) -> f64 {
        (self.twice_signed_area() as f64 / 2.0).abs()
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::bounding(&self.points).unwrap_or_default()
    }

    pub fn locate(&self, p: Point<f64>) -> Location {
        if self.points.len() < 3 {
            return Location::Outside;
        }

        let mut inside = false;
        for (a, b) in self.edges() {
            let (a, b) = (a.to_f64(), b.to_f64());
            if on_segment_f64(p, a, b) {
                return Location::Boundary;
            }
            // Ray cast towards +x, counting crossings.
            if ((a.y > p.y) != (b.y > p.y)) && (p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x)
            {
                inside = !inside;
            }
        }

        if inside { Location::Inside } else { Location::Outside }
    }

    /// Strict interior test.
    pub fn contains_point(&self, p: Point) -> bool {
        self.locate(p.to_f64()) == Location::Inside
    }

    /// True when `other` lies in the closed region of `self` and shares interior with it.
    /// Boundaries may touch.
    pub fn contains(&self, other: &Polygon) -> bool {
        if other.points.len() < 3 || !self.bounding_box_covers(other) {
            return false;
        }
        if other
            .points
            .iter()
            .any(|v| self.locate(v.to_f64()) == Location::Outside)
        {
            return false;
        }
        !other
            .edge_probes(self)
            .any(|m| self.locate(m) == Location::Outside)
    }

    /// True when the open interiors of the two polygons intersect.
    pub fn interiors_intersect(&self, other: &Polygon) -> bool {
        if !self.bounding_box().overlaps(&other.bounding_box()) {
            return false;
        }
        if other
            .edge_probes(self)
            .any(|m| self.locate(m) == Location::Inside)
        {
            return true;
        }
        if self
            .edge_probes(other)
            .any(|m| other.locate(m) == Location::Inside)
        {
            return true;
        }
        // Boundaries fully coincide or lie on each other.
        self.contains(other) || other.contains(self)
    }

    pub fn is_simple(&self) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let edges: Vec<(Point, Point)> = self.edges().collect();
        for i in 0..n {
            let (a, b) = edges[i];
            if a == b {
                return false;
            }
            let (_, c) = edges[(i + 1) % n];
            // Consecutive edges folding back onto each other.
            if orientation(a, b, c) == 0 && dot(b - a, c - b) < 0 {
                return false;
            }
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                let (c, d) = edges[j];
                if segments_touch(a, b, c, d) {
                    return false;
                }
            }
        }
        true
    }

    fn is_collinear(&self) -> bool {
        let first = self.points[0];
        match self.points.iter().find(|&&p| p != first) {
            Some(&other) => self.points.iter().all(|&p| orientation(first, other, p) == 0),
            None => true,
        }
    }

    fn bounding_box_covers(&self, other: &Polygon) -> bool {
        let outer = self.bounding_box();
        let inner = other.bounding_box();
        outer.min.x <= inner.min.x
            && outer.min.y <= inner.min.y
            && outer.max.x >= inner.max.x
            && outer.max.y >= inner.max.y
    }

    /// Midpoints of this polygon's edges after splitting them wherever they meet
    /// the boundary of `other`. No open sub-segment crosses `other`'s boundary, so
    /// each midpoint classifies its whole sub-segment.
    fn edge_probes<'a>(&'a self, other: &'a Polygon) -> impl Iterator<Item = Point<f64>> + 'a {
        self.edges().flat_map(move |(a, b)| {
            let mut params = vec![0.0, 1.0];
            for (c, d) in other.edges() {
                split_params(a, b, c, d, &mut params);
            }
            params.sort_by(|x, y| x.total_cmp(y));
            params.dedup_by(|x, y| (*x - *y).abs() < ON_EDGE_TOLERANCE);

            let (fa, fb) = (a.to_f64(), b.to_f64());
            params
                .windows(2)
                .map(|w| fa.lerp(fb, (w[0] + w[1]) / 2.0))
                .collect::<Vec<_>>()
        })
    }
}

#[inline(always)]
fn cross(a: Point, b: Point) -> i128 {
    a.x as i128 * b.y as i128 - a.y as i128 * b.x as i128
}

#[inline(always)]
fn dot(a: Point, b: Point) -> i128 {
    a.x as i128 * b.x as i128 + a.y as i128 * b.y as i128
}

fn orientation(a: Point, b: Point, c: Point) -> i32 {
    match cross(b - a, c - a) {
        v if v > 0 => 1,
        v if v < 0 => -1,
        _ => 0,
    }
}

fn on_segment(p: Point, a: Point, b: Point) -> bool {
    orientation(a, b, p) == 0
        && p.x >= a.x.min(b.x)
        && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y)
        && p.y <= a.y.max(b.y)
}

fn on_segment_f64(p: Point<f64>, a: Point<f64>, b: Point<f64>) -> bool {
    let len = a.distance(b);
    if len == 0.0 {
        return p.distance(a) < ON_EDGE_TOLERANCE;
    }
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    if (cross / len).abs() > ON_EDGE_TOLERANCE {
        return false;
    }
    p.x >= a.x.min(b.x) - ON_EDGE_TOLERANCE
        && p.x <= a.x.max(b.x) + ON_EDGE_TOLERANCE
        && p.y >= a.y.min(b.y) - ON_EDGE_TOLERANCE
        && p.y <= a.y.max(b.y) + ON_EDGE_TOLERANCE
}

/// Closed segment intersection, touching included.
fn segments_touch(a: Point, b: Point, c: Point, d: Point) -> bool {
    let o1 = orientation(a, b, c);
    let o2 = orientation(a, b, d);
    let o3 = orientation(c, d, a);
    let o4 = orientation(c, d, b);

    if o1 * o2 < 0 && o3 * o4 < 0 {
        return true;
    }
    (o1 == 0 && on_segment(c, a, b))
        || (o2 == 0 && on_segment(d, a, b))
        || (o3 == 0 && on_segment(a, c, d))
        || (o4 == 0 && on_segment(b, c, d))
}

/// Pushes the parameters along `a->b` in (0, 1) where segment `c-d` meets it.
fn split_params(a: Point, b: Point, c: Point, d: Point, params: &mut Vec<f64>) {
    let ab = b - a;
    let len_sq = dot(ab, ab);
    if len_sq == 0 {
        return;
    }
    let project = |p: Point| dot(p - a, ab) as f64 / len_sq as f64;

    let o1 = orientation(a, b, c);
    let o2 = orientation(a, b, d);
    let o3 = orientation(c, d, a);
    let o4 = orientation(c, d, b);

    let mut push = |t: f64| {
        if t > 0.0 && t < 1.0 {
            params.push(t);
        }
    };

    if o1 == 0 && o2 == 0 {
        // Collinear: the overlap ends at c or d.
        push(project(c));
        push(project(d));
    } else if o1 * o2 < 0 && o3 * o4 < 0 {
        let cd = d - c;
        let t = cross(c - a, cd) as f64 / cross(ab, cd) as f64;
        push(t);
    } else {
        if o1 == 0 && on_segment(c, a, b) {
            push(project(c));
        }
        if o2 == 0 && on_segment(d, a, b) {
            push(project(d));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(pts: &[(i64, i64)]) -> Polygon {
        Polygon::new(pts.iter().map(|&(x, y)| Point::new(x, y)).collect()).unwrap()
    }

    fn square(x: i64, y: i64, w: i64, h: i64) -> Polygon {
        poly(&[(x, y), (x + w, y), (x + w, y + h), (x, y + h)])
    }

    #[test]
    fn rejects_degenerate_input() {
        assert!(matches!(
            Polygon::new(vec![Point::new(0, 0), Point::new(1, 1)]),
            Err(GeometryError::TooFewVertices(2))
        ));
        assert!(matches!(
            Polygon::new(vec![Point::new(0, 0), Point::new(1, 1), Point::new(2, 2)]),
            Err(GeometryError::ZeroArea)
        ));
        // Bow tie: the lobes' signed areas cancel out.
        assert!(matches!(
            Polygon::new(vec![
                Point::new(0, 0),
                Point::new(10, 10),
                Point::new(10, 0),
                Point::new(0, 10)
            ]),
            Err(GeometryError::SelfIntersecting)
        ));
    }

    #[test]
    fn drops_repeated_closing_vertex() {
        let p = poly(&[(0, 0), (4, 0), (4, 4), (0, 4), (0, 0)]);
        assert_eq!(p.len(), 4);
        assert_eq!(p.area(), 16.0);
    }

    #[test]
    fn locate_point() {
        let p = square(0, 0, 10, 10);
        assert_eq!(p.locate(Point::new(5.0, 5.0)), Location::Inside);
        assert_eq!(p.locate(Point::new(10.0, 5.0)), Location::Boundary);
        assert_eq!(p.locate(Point::new(0.0, 0.0)), Location::Boundary);
        assert_eq!(p.locate(Point::new(11.0, 5.0)), Location::Outside);
        assert!(!p.contains_point(Point::new(0, 3)));
        assert!(p.contains_point(Point::new(1, 3)));
    }

    #[test]
    fn contains_touching_inner_rect() {
        let outer = square(0, 0, 10, 10);
        assert!(outer.contains(&square(0, 0, 4, 10)));
        assert!(outer.contains(&outer.clone()));
        assert!(!outer.contains(&square(8, 8, 4, 4)));
    }

    #[test]
    fn concave_shell_rejects_rect_bridging_the_notch() {
        // U shape: notch between x=4..6 from y=4 up.
        let shell = poly(&[(0, 0), (10, 0), (10, 10), (6, 10), (6, 4), (4, 4), (4, 10), (0, 10)]);
        assert!(shell.contains(&square(0, 0, 10, 4)));
        // All four corners lie inside or on the shell but the top edge crosses the notch.
        assert!(!shell.contains(&square(2, 2, 6, 6)));
        // Edge runs exactly along the notch floor.
        assert!(shell.contains(&square(2, 2, 6, 2)));
    }

    #[test]
    fn diagonal_shell_edge() {
        let shell = poly(&[(0, 0), (10, 0), (10, 10), (5, 10), (0, 5)]);
        assert!(shell.contains(&square(1, 1, 4, 4)));
        assert!(!shell.contains(&square(0, 6, 2, 2)));
    }

    #[test]
    fn interior_overlap_cases() {
        let hole = square(4, 4, 4, 4);
        assert!(hole.interiors_intersect(&square(2, 2, 4, 4)));
        // Touching along an edge only.
        assert!(!hole.interiors_intersect(&square(8, 4, 2, 4)));
        // Touching at a corner only.
        assert!(!hole.interiors_intersect(&square(8, 8, 2, 2)));
        // Identical footprint.
        assert!(hole.interiors_intersect(&square(4, 4, 4, 4)));
        // One inside the other, both ways.
        assert!(hole.interiors_intersect(&square(5, 5, 1, 1)));
        assert!(hole.interiors_intersect(&square(0, 0, 20, 20)));
        // Cross shape: no vertex of either inside the other.
        assert!(hole.interiors_intersect(&square(2, 5, 10, 2)));
        assert!(!hole.interiors_intersect(&square(20, 20, 2, 2)));
    }

    #[test]
    fn bounding_box_and_area() {
        let p = poly(&[(370, 60), (670, 60), (670, 520), (110, 520), (110, 330), (220, 220), (370, 220)]);
        let bb = p.bounding_box();
        assert_eq!(bb.min, Point::new(110, 60));
        assert_eq!(bb.max, Point::new(670, 520));
        assert!(p.area() > 0.0);
    }
}
