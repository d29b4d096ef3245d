use heatfloor_common::db::parser::room;
use heatfloor_common::geom::point::Point;
use heatfloor_common::geom::rect::Rect;
use heatfloor_common::util::check;
use heatfloor_common::util::config::{Config, RoutingConfig};
use heatfloor_router::algo::{Sign, SignPair};
use heatfloor_router::{DenseField, OccupancyField, Planner, Router, SparseField};

const ROOM: &str = "\
UNITS CM ;
SHELL ( 370 60 ) ( 670 60 ) ( 670 520 ) ( 110 520 ) ( 110 330 ) ( 220 220 ) ( 370 220 ) ;
HOLE ( 420 450 ) ( 660 450 ) ( 660 510 ) ( 420 510 ) ;
HOLE ( 420 250 ) ( 420 350 ) ( 620 350 ) ( 620 250 ) ;
ENTRY ( 370 110 ) ;
";

fn config() -> Config {
    let mut config = Config::default();
    config.routing = RoutingConfig {
        wire_radius: 8,
        mat_width: 55,
        ..Default::default()
    };
    config
}

#[test]
fn start_near_entry() {
    let spec = room::parse_str(ROOM).unwrap();
    let region = spec.region().unwrap();
    let config = config();
    let router = Router::new(&region, spec.entry, &config.routing, "green").unwrap();

    let pp = SignPair::new(Sign::Forward, Sign::Forward);
    assert_eq!(router.resolve_start(Point::new(370, 110)), (Point::new(371, 61), pp));
}

#[test]
fn start_moves_when_first_corner_is_taken() {
    let spec = room::parse_str(ROOM).unwrap();
    let region = spec.region().unwrap();
    let config = config();
    let mut field = SparseField::new();
    field.mark_rect(Rect::new(Point::new(371, 61), Point::new(490, 200)));
    let router = Router::with_field(&region, spec.entry, &config.routing, "green", field).unwrap();

    let pp = SignPair::new(Sign::Forward, Sign::Forward);
    assert_eq!(router.resolve_start(Point::new(370, 110)), (Point::new(371, 221), pp));
}

#[test]
fn full_plan_verifies() {
    let _ = env_logger::builder().is_test(true).try_init();
    let spec = room::parse_str(ROOM).unwrap();
    let region = spec.region().unwrap();
    let config = config();

    let plan = Planner::new(&region, spec.entry, &config).run().unwrap();
    assert!(plan.stats.mats > 0);
    assert!(plan.stats.fill_ratio > 0.0 && plan.stats.fill_ratio <= 1.0);
    assert_eq!(check::run(&region, plan.layout.iter()), Ok(()));

    let covered: i64 = plan.layout.iter().map(|s| s.bounds().area()).sum();
    assert_eq!(plan.field.occupied_count() as i64, covered);
}

#[test]
fn field_backings_agree() {
    let spec = room::parse_str(ROOM).unwrap();
    let region = spec.region().unwrap();
    let mut config = config();
    config.passes.count = 1;

    let dense = Planner::with_field(&region, spec.entry, &config, DenseField::for_region(&region))
        .run()
        .unwrap();
    let sparse = Planner::with_field(&region, spec.entry, &config, SparseField::new())
        .run()
        .unwrap();
    let a: Vec<_> = dense.layout.iter().collect();
    let b: Vec<_> = sparse.layout.iter().collect();
    assert_eq!(a, b);
}

#[test]
fn unreachable_entry_matches_default_start() {
    let spec = room::parse_str(ROOM).unwrap();
    let region = spec.region().unwrap();
    let config = config();

    let far = Router::new(&region, Some(Point::new(-500, -500)), &config.routing, "green")
        .unwrap()
        .next();
    let default = Router::new(&region, None, &config.routing, "green")
        .unwrap()
        .next();
    assert!(far.is_some());
    assert_eq!(far, default);
    assert_eq!(far.map(|s| s.points[0]), Some(Point::new(221, 221)));
}
