use super::OccupancyField;
use heatfloor_common::db::region::Region;
use heatfloor_common::geom::point::Point;
use heatfloor_common::geom::rect::Rect;

/// Field backed by a flat array over a fixed bounding box. Cells outside the
/// box read as occupied and cannot be marked.
#[derive(Clone, Debug)]
pub struct DenseField {
    bounds: Rect,
    width: usize,
    cells: Vec<bool>,
    occupied: usize,
}

impl DenseField {
    pub fn new(bounds: Rect) -> Self {
        let size = bounds.cell_count();
        if size > 200_000_000 {
            log::warn!(
                "Allocating large DenseField: {} cells. Ensure sufficient RAM.",
                size
            );
        }
        Self {
            bounds,
            width: bounds.width().max(0) as usize,
            cells: vec![false; size],
            occupied: 0,
        }
    }

    pub fn for_region(region: &Region) -> Self {
        Self::new(region.bounds())
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline(always)]
    fn index(&self, cell: Point) -> Option<usize> {
        if !self.bounds.contains_cell(cell) {
            return None;
        }
        let dx = (cell.x - self.bounds.min.x) as usize;
        let dy = (cell.y - self.bounds.min.y) as usize;
        Some(dy * self.width + dx)
    }
}

impl OccupancyField for DenseField {
    fn is_free(&self, cell: Point) -> bool {
        match self.index(cell) {
            Some(idx) => !self.cells[idx],
            None => false,
        }
    }

    fn mark_rect(&mut self, rect: Rect) {
        let min_x = rect.min.x.max(self.bounds.min.x);
        let max_x = rect.max.x.min(self.bounds.max.x);
        let min_y = rect.min.y.max(self.bounds.min.y);
        let max_y = rect.max.y.min(self.bounds.max.y);
        if min_x >= max_x || min_y >= max_y {
            return;
        }
        if min_x != rect.min.x || max_x != rect.max.x || min_y != rect.min.y || max_y != rect.max.y {
            log::debug!("Clipping {:?} to field bounds {:?}", rect, self.bounds);
        }

        for y in min_y..max_y {
            for x in min_x..max_x {
                if let Some(idx) = self.index(Point::new(x, y)) {
                    if !self.cells[idx] {
                        self.cells[idx] = true;
                        self.occupied += 1;
                    }
                }
            }
        }
    }

    fn occupied_count(&self) -> usize {
        self.occupied
    }

    fn rect_free(&self, rect: Rect) -> bool {
        if rect.min.x < self.bounds.min.x
            || rect.min.y < self.bounds.min.y
            || rect.max.x > self.bounds.max.x
            || rect.max.y > self.bounds.max.y
        {
            return rect.cell_count() == 0;
        }
        (rect.min.y..rect.max.y).all(|y| {
            let row = (y - self.bounds.min.y) as usize * self.width;
            let start = row + (rect.min.x - self.bounds.min.x) as usize;
            let end = row + (rect.max.x - self.bounds.min.x) as usize;
            self.cells[start..end].iter().all(|&c| !c)
        })
    }
}
