pub mod factory;
pub mod method;

pub use method::{Axis, Extent, MethodTable, PlacementMethod, Sign, SignOrder, SignPair};
