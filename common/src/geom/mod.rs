pub mod point;
pub mod polygon;
pub mod rect;
pub mod rtree;

pub use point::Point;
pub use polygon::Polygon;
pub use rect::Rect;
