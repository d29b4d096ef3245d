use super::OccupancyField;
use heatfloor_common::geom::point::Point;
use heatfloor_common::geom::rect::Rect;
use std::collections::HashSet;

/// Unbounded field; only occupied cells are stored.
#[derive(Clone, Debug, Default)]
pub struct SparseField {
    occupied: HashSet<Point>,
}

impl SparseField {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OccupancyField for SparseField {
    fn is_free(&self, cell: Point) -> bool {
        !self.occupied.contains(&cell)
    }

    fn mark_rect(&mut self, rect: Rect) {
        self.occupied.extend(rect.cells());
    }

    fn occupied_count(&self) -> usize {
        self.occupied.len()
    }
}
