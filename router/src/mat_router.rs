use crate::algo::factory;
use crate::algo::method::{Axis, MethodTable, PlacementMethod, SignOrder, SignPair};
use crate::grid::{OccupancyField, SparseField};
use heatfloor_common::db::core::Shape;
use heatfloor_common::db::region::Region;
use heatfloor_common::error::ConfigError;
use heatfloor_common::geom::point::Point;
use heatfloor_common::geom::rect::Rect;
use heatfloor_common::util::config::RoutingConfig;
use std::iter::FusedIterator;

/// A validated placement: probe of `method` anchored at `anchor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    pub method: PlacementMethod,
    pub anchor: Point,
    pub signs: SignPair,
}

/// Row-major walk over the region's bounding box. Cells behind the cursor
/// never become usable again within a pass.
#[derive(Clone, Debug)]
struct ScanCursor {
    bounds: Rect,
    next: Point,
    dead: usize,
}

impl ScanCursor {
    fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            next: bounds.min,
            dead: 0,
        }
    }

    fn peek(&self) -> Option<Point> {
        (self.next.x < self.bounds.max.x && self.bounds.min.y < self.bounds.max.y)
            .then_some(self.next)
    }

    fn bump(&mut self) {
        self.next.y += 1;
        if self.next.y >= self.bounds.max.y {
            self.next.y = self.bounds.min.y;
            self.next.x += 1;
        }
    }
}

/// Greedy coverage router for one pass.
///
/// Each pull of the iterator places one shape: a mat when one fits at the
/// current position, otherwise a wire. When nothing fits locally the router
/// falls back to the corners of the previous shape and then to a scan of the
/// whole region. The sequence ends once no free anchor is left.
pub struct Router<'a, F: OccupancyField = SparseField> {
    region: &'a Region,
    entry: Point,
    fill: String,
    methods: MethodTable,
    order: SignOrder,
    precision: i64,
    max_entry_distance: f64,
    field: F,

    position: Option<Point>,
    signs: SignPair,
    last_shape: Option<[Point; 4]>,
    scan: ScanCursor,
    steps: usize,
    max_steps: usize,
    placed: usize,
    finished: bool,
}

impl<'a> Router<'a, SparseField> {
    pub fn new(
        region: &'a Region,
        entry: Option<Point>,
        config: &RoutingConfig,
        fill: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Self::with_field(region, entry, config, fill, SparseField::new())
    }
}

impl<'a, F: OccupancyField> Router<'a, F> {
    /// Router continuing on an existing field, e.g. one from a previous pass.
    pub fn with_field(
        region: &'a Region,
        entry: Option<Point>,
        config: &RoutingConfig,
        fill: impl Into<String>,
        field: F,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let entry = entry.unwrap_or_else(|| default_entry(region));
        let order = SignOrder::new(
            config.mirror_horizontal,
            config.mirror_vertical,
            config.favor_vertical,
        );
        let bounds = region.bounds();

        Ok(Self {
            region,
            entry,
            fill: fill.into(),
            methods: MethodTable::new(config.wire_radius, config.mat_width),
            order,
            precision: config.precision,
            max_entry_distance: config.max_entry_distance as f64,
            field,
            position: None,
            signs: order.first(),
            last_shape: None,
            scan: ScanCursor::new(bounds),
            steps: 0,
            max_steps: 2 * bounds.cell_count() + 16,
            placed: 0,
            finished: false,
        })
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    /// Hands the field over to the next pass.
    pub fn into_field(self) -> F {
        self.field
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn signs(&self) -> SignPair {
        self.signs
    }

    pub fn placed(&self) -> usize {
        self.placed
    }

    /// First free diagonal neighbour of `p` in sign priority order.
    fn free_neighbour(&self, p: Point) -> Option<(Point, SignPair)> {
        self.order.iter().find_map(|signs| {
            let q = p.offset(
                self.precision * signs.x.factor(),
                self.precision * signs.y.factor(),
            );
            (self.region.contains_point(q) && self.field.is_free(q)).then_some((q, signs))
        })
    }

    /// Closest shell vertex within reach of `entry` that has a free neighbour.
    fn vertex_near(&self, entry: Point) -> Option<Point> {
        let entry_f = entry.to_f64();
        let mut best: Option<(Point, f64)> = None;
        for &vertex in self.region.shell().points() {
            let d = vertex.to_f64().distance(entry_f);
            if d >= self.max_entry_distance {
                continue;
            }
            if best.is_some_and(|(_, best_d)| d >= best_d) {
                continue;
            }
            if self.free_neighbour(vertex).is_some() {
                best = Some((vertex, d));
            }
        }
        best.map(|(v, _)| v)
    }

    /// Start position and initial signs for an entry point. An entry outside
    /// the shell with no vertex in reach resolves from the top-left vertex.
    pub fn resolve_start(&self, entry: Point) -> (Point, SignPair) {
        let origin = match self.vertex_near(entry) {
            Some(vertex) => vertex,
            None if self.region.contains_point(entry) => entry,
            None => {
                let fallback = default_entry(self.region);
                log::debug!("Entry {:?} unreachable, falling back to {:?}", entry, fallback);
                self.vertex_near(fallback).unwrap_or(fallback)
            }
        };
        match self.free_neighbour(origin) {
            Some(start) => start,
            None => {
                log::debug!("No free neighbour around {:?}, starting on it", origin);
                (origin, self.order.first())
            }
        }
    }

    /// First method and signs whose probe anchored at `p` fits the region and
    /// covers only free cells.
    pub fn find_route(&self, p: Point) -> Option<Route> {
        self.methods.probes().find_map(|(method, probe)| {
            self.order.iter().find_map(|signs| {
                let candidate = factory::candidate(p, probe, signs);
                (self.region.fits(&candidate) && self.field.all_free(&candidate)).then_some(Route {
                    method,
                    anchor: p,
                    signs,
                })
            })
        })
    }

    fn tick(&mut self) -> bool {
        self.steps += 1;
        if self.steps > self.max_steps {
            log::warn!(
                "Router stopped after {} search steps with {} shapes placed",
                self.max_steps,
                self.placed
            );
            return false;
        }
        true
    }

    fn route_from_last_shape(&self) -> Option<Route> {
        let last = self.last_shape.as_ref()?;
        factory::bounds(last).corners().into_iter().find_map(|corner| {
            let route = self.find_route(corner)?;
            log::debug!("Resuming from previous shape corner {:?}", corner);
            Some(route)
        })
    }

    fn route_from_scan(&mut self) -> Option<Route> {
        while let Some(cell) = self.scan.peek() {
            if !self.region.contains_point(cell) || !self.field.is_free(cell) {
                self.scan.bump();
                continue;
            }
            if !self.tick() {
                return None;
            }
            self.position = Some(cell);
            if let Some(route) = self.find_route(cell) {
                log::debug!("Scan resumed at {:?}", cell);
                return Some(route);
            }
            self.scan.dead += 1;
            self.scan.bump();
        }
        log::info!(
            "Region exhausted: {} shapes placed, {} dead anchors",
            self.placed,
            self.scan.dead
        );
        None
    }

    fn next_route(&mut self) -> Option<Route> {
        let position = match self.position {
            Some(p) => p,
            None => {
                let (start, signs) = self.resolve_start(self.entry);
                log::debug!("Start resolved to {:?} with {:?}", start, signs);
                self.position = Some(start);
                self.signs = signs;
                start
            }
        };

        if !self.tick() {
            return None;
        }
        if let Some(route) = self.find_route(position) {
            return Some(route);
        }
        if let Some(route) = self.route_from_last_shape() {
            return Some(route);
        }
        self.route_from_scan()
    }

    fn commit(&mut self, route: Route) -> Shape {
        self.signs = route.signs;
        let footprint = self.methods.footprint(route.method);
        let points = factory::build(
            route.anchor,
            footprint.width,
            footprint.height,
            route.signs.x,
            route.signs.y,
        );
        self.field.mark_rect(factory::bounds(&points));

        let step = self.methods.step();
        self.position = Some(match route.method.axis() {
            Axis::Horizontal => route.anchor.offset(step * route.signs.x.factor(), 0),
            Axis::Vertical => route.anchor.offset(0, step * route.signs.y.factor()),
        });
        self.last_shape = Some(points);
        self.placed += 1;

        log::debug!("Placed {:?} at {:?} {:?}", route.method, route.anchor, route.signs);
        if route.method.is_mat() {
            Shape::mat(points, self.fill.clone())
        } else {
            Shape::wire(points)
        }
    }

    /// Places the next shape, or returns `None` once the region is exhausted.
    pub fn advance(&mut self) -> Option<Shape> {
        if self.finished {
            return None;
        }
        match self.next_route() {
            Some(route) => Some(self.commit(route)),
            None => {
                self.finished = true;
                None
            }
        }
    }
}

impl<F: OccupancyField> Iterator for Router<'_, F> {
    type Item = Shape;

    fn next(&mut self) -> Option<Shape> {
        self.advance()
    }
}

impl<F: OccupancyField> FusedIterator for Router<'_, F> {}

/// Shell vertex closest to the bounding box's minimum corner.
pub fn default_entry(region: &Region) -> Point {
    let corner = region.bounds().min;
    let mut best = corner;
    let mut best_d = f64::INFINITY;
    for &vertex in region.shell().points() {
        let d = vertex.distance(corner);
        if d < best_d {
            best = vertex;
            best_d = d;
        }
    }
    best
}
