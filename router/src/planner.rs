use crate::grid::{DenseField, OccupancyField};
use crate::mat_router::Router;
use heatfloor_common::db::core::{Layout, LayoutStats};
use heatfloor_common::db::indices::PassId;
use heatfloor_common::db::region::Region;
use heatfloor_common::error::ConfigError;
use heatfloor_common::geom::point::Point;
use heatfloor_common::util::config::Config;
use heatfloor_common::util::profiler::ScopedTimer;

/// Result of a full multi-pass run.
#[derive(Debug)]
pub struct Plan<F> {
    pub layout: Layout,
    pub stats: LayoutStats,
    pub field: F,
}

/// Runs the configured passes over one region, carrying the occupancy
/// field from each pass into the next.
pub struct Planner<'a, F: OccupancyField = DenseField> {
    region: &'a Region,
    entry: Option<Point>,
    config: &'a Config,
    field: F,
}

impl<'a> Planner<'a, DenseField> {
    pub fn new(region: &'a Region, entry: Option<Point>, config: &'a Config) -> Self {
        Self::with_field(region, entry, config, DenseField::for_region(region))
    }
}

impl<'a, F: OccupancyField> Planner<'a, F> {
    pub fn with_field(region: &'a Region, entry: Option<Point>, config: &'a Config, field: F) -> Self {
        Self {
            region,
            entry,
            config,
            field,
        }
    }

    pub fn run(self) -> Result<Plan<F>, ConfigError> {
        let routing = &self.config.routing;
        let passes = &self.config.passes;
        routing.validate()?;
        passes.validate()?;

        log::info!(
            "Planning {} pass(es): wire radius {}, mat width {}, length cap {}",
            passes.count,
            routing.wire_radius,
            routing.mat_width,
            passes.max_wire_length
        );

        let mut layout = Layout::new();
        let mut field = self.field;

        for pass in 0..passes.count {
            let _timer = ScopedTimer::new(format!("Pass {}", pass));
            let fill = passes.fill_for(pass);
            let mut router = Router::with_field(self.region, self.entry, routing, fill, field)?;

            let pass_id = PassId::new(pass);
            let mut length = 0;
            let mut emitted = 0;
            for shape in router.by_ref() {
                length += shape.length();
                layout.push(pass_id, shape);
                emitted += 1;
                if length > passes.max_wire_length {
                    log::info!(
                        "Pass {}: length cap {} reached at {}",
                        pass,
                        passes.max_wire_length,
                        length
                    );
                    break;
                }
            }

            if emitted == 0 {
                log::info!("Pass {} ({}): nothing left to place", pass, fill);
            } else {
                log::info!(
                    "Pass {} ({}): {} shapes, length {}",
                    pass,
                    fill,
                    emitted,
                    length
                );
            }
            field = router.into_field();
        }
        layout.passes = passes.count;

        let stats = layout.stats(self.region.area());
        log::info!(
            "Placed {} shapes ({} mats, {} wires), fill ratio {:.1}%",
            stats.shapes,
            stats.mats,
            stats.wires,
            stats.fill_ratio * 100.0
        );

        Ok(Plan {
            layout,
            stats,
            field,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SparseField;
    use heatfloor_common::db::core::ShapeKind;

    fn square(size: i64) -> Region {
        Region::new(
            vec![
                Point::new(0, 0),
                Point::new(size, 0),
                Point::new(size, size),
                Point::new(0, size),
            ],
            vec![],
        )
        .unwrap()
    }

    fn config(count: usize, cap: i64) -> Config {
        let mut config = Config::default();
        config.routing.wire_radius = 4;
        config.routing.mat_width = 8;
        config.passes.count = count;
        config.passes.max_wire_length = cap;
        config
    }

    #[test]
    fn passes_rotate_fills() {
        let region = square(200);
        let config = config(3, 40);
        let plan = Planner::new(&region, None, &config).run().unwrap();

        assert_eq!(plan.layout.passes, 3);
        for (pass, fill) in ["green", "blue", "yellow"].iter().enumerate() {
            let shapes: Vec<_> = plan.layout.in_pass(PassId::new(pass)).collect();
            assert!(!shapes.is_empty());
            for shape in shapes {
                if let ShapeKind::Mat { fill: f } = &shape.kind {
                    assert_eq!(f.as_str(), *fill);
                }
            }
        }
    }

    #[test]
    fn length_cap_keeps_crossing_shape() {
        let region = square(200);
        let config = config(1, 10);
        let plan = Planner::new(&region, None, &config).run().unwrap();
        // Each mat is 4 long: the third one crosses 10 and is kept.
        assert_eq!(plan.layout.len(), 3);
        assert_eq!(plan.stats.total_length, 12);
    }

    #[test]
    fn empty_passes_do_not_abort() {
        // Only wires fit, and the first pass exhausts the room.
        let region = square(10);
        let config = config(3, 5000);
        let plan = Planner::with_field(&region, None, &config, SparseField::new())
            .run()
            .unwrap();
        assert_eq!(plan.layout.passes, 3);
        assert!(plan.layout.in_pass(PassId::new(0)).count() > 0);
        assert_eq!(plan.layout.in_pass(PassId::new(1)).count(), 0);
        assert_eq!(plan.stats.shapes, plan.layout.len());
    }

    #[test]
    fn rejects_empty_fills() {
        let region = square(20);
        let mut config = config(1, 100);
        config.passes.fills.clear();
        let err = Planner::new(&region, None, &config).run().err();
        assert_eq!(err, Some(ConfigError::NoFills));
    }
}
