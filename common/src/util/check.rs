use crate::db::core::Shape;
use crate::db::region::Region;
use crate::error::CheckError;
use crate::geom::rect::Rect;
use crate::geom::rtree::SpatialIndex;
use rayon::prelude::*;

/// Verifies containment and pairwise non-overlap of a finished layout.
pub fn run<'a, I>(region: &Region, shapes: I) -> Result<(), CheckError>
where
    I: IntoIterator<Item = &'a Shape>,
{
    let shapes: Vec<&Shape> = shapes.into_iter().collect();
    log::info!("Starting Layout Verification ({} shapes)...", shapes.len());

    let containment = check_containment(region, &shapes);
    if containment == 0 {
        log::info!("\x1b[32mPASS\x1b[0m: All shapes inside the shell and clear of holes.");
    } else {
        log::error!(
            "\x1b[31mFAIL\x1b[0m: {} shape(s) violate the region",
            containment
        );
    }

    let overlaps = check_overlaps(&shapes);
    if overlaps == 0 {
        log::info!("\x1b[32mPASS\x1b[0m: No overlapping shapes.");
    } else {
        log::error!("\x1b[31mFAIL\x1b[0m: {} overlapping pair(s)", overlaps);
    }

    if containment == 0 && overlaps == 0 {
        log::info!("\x1b[32mSUCCESS\x1b[0m: VALID LAYOUT");
        Ok(())
    } else {
        Err(CheckError {
            containment,
            overlaps,
        })
    }
}

fn check_containment(region: &Region, shapes: &[&Shape]) -> usize {
    shapes
        .par_iter()
        .enumerate()
        .filter(|(i, shape)| {
            let ok = region.fits(&shape.polygon());
            if !ok {
                log::error!("FAIL: shape #{} {:?} leaves the region", i, shape.points);
            }
            !ok
        })
        .count()
}

fn check_overlaps(shapes: &[&Shape]) -> usize {
    let rects: Vec<Rect> = shapes.iter().map(|s| s.bounds()).collect();
    let index = SpatialIndex::from_rects(&rects);

    (0..rects.len())
        .into_par_iter()
        .map(|i| {
            index
                .query(rects[i])
                .into_iter()
                .filter(|&j| j > i)
                .inspect(|&j| log::error!("FAIL: shape #{} overlaps shape #{}", i, j))
                .count()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::point::Point;

    fn rect(x: i64, y: i64, w: i64, h: i64) -> Shape {
        Shape::wire([
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x + w, y + h),
            Point::new(x, y + h),
        ])
    }

    fn region() -> Region {
        Region::new(
            vec![
                Point::new(0, 0),
                Point::new(20, 0),
                Point::new(20, 20),
                Point::new(0, 20),
            ],
            vec![vec![
                Point::new(10, 10),
                Point::new(14, 10),
                Point::new(14, 14),
                Point::new(10, 14),
            ]],
        )
        .unwrap()
    }

    #[test]
    fn valid_layout_passes() {
        let shapes = [rect(0, 0, 4, 4), rect(4, 0, 4, 4), rect(0, 4, 8, 2)];
        assert!(run(&region(), &shapes).is_ok());
    }

    #[test]
    fn reports_overlap_and_containment() {
        let shapes = [rect(0, 0, 4, 4), rect(2, 2, 4, 4), rect(9, 9, 2, 2), rect(18, 18, 4, 4)];
        let err = run(&region(), &shapes).unwrap_err();
        assert_eq!(err.overlaps, 1);
        assert_eq!(err.containment, 2);
    }
}
