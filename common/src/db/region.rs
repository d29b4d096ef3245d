use crate::error::GeometryError;
use crate::geom::point::Point;
use crate::geom::polygon::Polygon;
use crate::geom::rect::Rect;

/// Outer shell with excluded holes. Immutable once built.
#[derive(Clone, Debug)]
pub struct Region {
    shell: Polygon,
    holes: Vec<Polygon>,
    bounds: Rect,
}

impl Region {
    pub fn new(shell: Vec<Point>, holes: Vec<Vec<Point>>) -> Result<Self, GeometryError> {
        let shell = Polygon::new(shell).map_err(|e| GeometryError::InvalidRing {
            ring: "shell".to_string(),
            source: Box::new(e),
        })?;

        let mut hole_polygons = Vec::with_capacity(holes.len());
        for (index, points) in holes.into_iter().enumerate() {
            let hole = Polygon::new(points).map_err(|e| GeometryError::InvalidRing {
                ring: format!("hole {}", index),
                source: Box::new(e),
            })?;
            if !shell.contains(&hole) {
                return Err(GeometryError::HoleOutsideShell { index });
            }
            hole_polygons.push(hole);
        }

        let bounds = shell.bounding_box();
        Ok(Self {
            shell,
            holes: hole_polygons,
            bounds,
        })
    }

    pub fn shell(&self) -> &Polygon {
        &self.shell
    }

    pub fn holes(&self) -> &[Polygon] {
        &self.holes
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Coverable area: shell minus holes.
    pub fn area(&self) -> f64 {
        self.shell.area() - self.holes.iter().map(Polygon::area).sum::<f64>()
    }

    /// Candidate lies in the shell and shares no interior with any hole.
    pub fn fits(&self, candidate: &Polygon) -> bool {
        self.shell.contains(candidate) && !self.holes.iter().any(|h| h.interiors_intersect(candidate))
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.shell.contains_point(p)
    }
}
