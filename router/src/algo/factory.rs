use crate::algo::method::{Extent, Sign, SignPair};
use heatfloor_common::geom::point::Point;
use heatfloor_common::geom::polygon::Polygon;
use heatfloor_common::geom::rect::Rect;

/// Axis-aligned rectangle with one corner at `anchor`, extending `width`
/// along x and `height` along y in the given directions. Points are ordered
/// anchor, x-neighbour, opposite, y-neighbour.
pub fn build(anchor: Point, width: i64, height: i64, sign_x: Sign, sign_y: Sign) -> [Point; 4] {
    let dx = width * sign_x.factor();
    let dy = height * sign_y.factor();
    [
        anchor,
        anchor.offset(dx, 0),
        anchor.offset(dx, dy),
        anchor.offset(0, dy),
    ]
}

pub fn candidate(anchor: Point, extent: Extent, signs: SignPair) -> Polygon {
    Polygon::from_points(build(anchor, extent.width, extent.height, signs.x, signs.y).to_vec())
}

pub fn bounds(points: &[Point; 4]) -> Rect {
    Rect::from_corners(points[0], points[2])
}
