use crate::db::indices::{PassId, ShapeId};
use crate::geom::point::Point;
use crate::geom::polygon::Polygon;
use crate::geom::rect::Rect;

pub const WIRE_FILL: &str = "red";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Mat { fill: String },
    Wire,
}

/// A placed rectangle. Equality is structural.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Shape {
    pub kind: ShapeKind,
    pub points: [Point; 4],
}

impl Shape {
    pub fn mat(points: [Point; 4], fill: impl Into<String>) -> Self {
        Self {
            kind: ShapeKind::Mat { fill: fill.into() },
            points,
        }
    }

    pub fn wire(points: [Point; 4]) -> Self {
        Self {
            kind: ShapeKind::Wire,
            points,
        }
    }

    pub fn is_mat(&self) -> bool {
        matches!(self.kind, ShapeKind::Mat { .. })
    }

    pub fn fill(&self) -> &str {
        match &self.kind {
            ShapeKind::Mat { fill } => fill,
            ShapeKind::Wire => WIRE_FILL,
        }
    }

    pub fn polygon(&self) -> Polygon {
        Polygon::from_points(self.points.to_vec())
    }

    pub fn bounds(&self) -> Rect {
        Rect::bounding(&self.points).unwrap_or_default()
    }

    pub fn area(&self) -> f64 {
        self.polygon().area()
    }

    /// Bounding-box width, used as the material length of the piece.
    pub fn length(&self) -> i64 {
        self.bounds().width()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedShape {
    pub id: ShapeId,
    pub pass: PassId,
    pub shape: Shape,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutStats {
    pub shapes: usize,
    pub mats: usize,
    pub wires: usize,
    pub covered_area: f64,
    pub total_length: i64,
    pub fill_ratio: f64,
}

#[derive(Clone, Debug, Default)]
pub struct Layout {
    pub shapes: Vec<PlacedShape>,
    pub passes: usize,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pass: PassId, shape: Shape) -> ShapeId {
        let id = ShapeId::new(self.shapes.len());
        self.shapes.push(PlacedShape { id, pass, shape });
        self.passes = self.passes.max(pass.index() + 1);
        id
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().map(|p| &p.shape)
    }

    pub fn in_pass(&self, pass: PassId) -> impl Iterator<Item = &Shape> {
        self.shapes
            .iter()
            .filter(move |p| p.pass == pass)
            .map(|p| &p.shape)
    }

    /// Aggregates area and length; `region_area` is the coverable area.
    pub fn stats(&self, region_area: f64) -> LayoutStats {
        let mut stats = LayoutStats::default();
        for shape in self.iter() {
            stats.shapes += 1;
            if shape.is_mat() {
                stats.mats += 1;
            } else {
                stats.wires += 1;
            }
            stats.covered_area += shape.area();
            stats.total_length += shape.length();
        }
        if region_area > 0.0 {
            stats.fill_ratio = stats.covered_area / region_area;
        }
        stats
    }
}
