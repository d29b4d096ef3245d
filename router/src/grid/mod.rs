pub mod dense;
pub mod sparse;

pub use dense::DenseField;
pub use sparse::SparseField;

use heatfloor_common::geom::point::Point;
use heatfloor_common::geom::polygon::Polygon;
use heatfloor_common::geom::rect::Rect;

/// Per-cell occupancy. Cells only ever go from free to occupied.
///
/// Cell `(x, y)` is the unit square with lower corner `(x, y)`; a rectangle
/// covers its half-open cell range, so shapes sharing an edge share no cell.
pub trait OccupancyField {
    fn is_free(&self, cell: Point) -> bool;
    fn mark_rect(&mut self, rect: Rect);
    fn occupied_count(&self) -> usize;

    fn rect_free(&self, rect: Rect) -> bool {
        rect.cells().all(|c| self.is_free(c))
    }

    /// Marks every cell of the shape's bounding box.
    fn mark_occupied(&mut self, shape: &Polygon) {
        self.mark_rect(shape.bounding_box());
    }

    fn all_free(&self, shape: &Polygon) -> bool {
        self.rect_free(shape.bounding_box())
    }
}
