pub mod algo;
pub mod grid;
pub mod mat_router;
pub mod planner;

pub use grid::{DenseField, OccupancyField, SparseField};
pub use mat_router::{Route, Router};
pub use planner::{Plan, Planner};

use heatfloor_common::db::region::Region;
use heatfloor_common::error::ConfigError;
use heatfloor_common::geom::point::Point;
use heatfloor_common::util::config::Config;

pub fn plan(
    region: &Region,
    entry: Option<Point>,
    config: &Config,
) -> Result<Plan<DenseField>, ConfigError> {
    Planner::new(region, entry, config).run()
}
