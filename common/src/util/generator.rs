use crate::db::parser::room::{self, RoomSpec};
use crate::geom::point::Point;
use crate::geom::polygon::Polygon;
use crate::geom::rect::Rect;
use rand::Rng;

const MIN_SIDE: i64 = 40;
const HOLE_ATTEMPTS_PER_HOLE: usize = 50;

pub fn generate_random_room_file(
    filename: &str,
    width: i64,
    height: i64,
    num_holes: usize,
) -> std::io::Result<()> {
    let mut rng = rand::thread_rng();
    let room = generate_random_room(&mut rng, width, height, num_holes);

    log::info!(
        "Generating Room: {}x{} cm, {} shell vertices, {} hole(s)",
        width.max(MIN_SIDE),
        height.max(MIN_SIDE),
        room.shell.len(),
        room.holes.len()
    );
    room::write(&room, filename)
}

/// L- or U-shaped room: a rectangle with a corner notched out or a notch cut
/// into the middle of one side, plus rectangular holes kept clear of the walls
/// and of each other.
pub fn generate_random_room<R: Rng>(
    rng: &mut R,
    width: i64,
    height: i64,
    num_holes: usize,
) -> RoomSpec {
    let w = width.max(MIN_SIDE);
    let h = height.max(MIN_SIDE);

    let nw = rng.gen_range(w / 5..=w / 2);
    let nh = rng.gen_range(h / 5..=h / 2);

    let raw: Vec<(i64, i64)> = match rng.gen_range(0..6) {
        0 => vec![(nw, 0), (w, 0), (w, h), (0, h), (0, nh), (nw, nh)],
        1 => vec![(0, 0), (w - nw, 0), (w - nw, nh), (w, nh), (w, h), (0, h)],
        2 => vec![(0, 0), (w, 0), (w, h - nh), (w - nw, h - nh), (w - nw, h), (0, h)],
        3 => vec![(0, 0), (w, 0), (w, h), (nw, h), (nw, h - nh), (0, h - nh)],
        4 => {
            // Notch in the bottom wall.
            let x0 = rng.gen_range(w / 8..=w - nw - w / 8);
            vec![
                (0, 0),
                (x0, 0),
                (x0, nh),
                (x0 + nw, nh),
                (x0 + nw, 0),
                (w, 0),
                (w, h),
                (0, h),
            ]
        }
        _ => {
            // Notch in the left wall.
            let y0 = rng.gen_range(h / 8..=h - nh - h / 8);
            vec![
                (0, 0),
                (w, 0),
                (w, h),
                (0, h),
                (0, y0 + nh),
                (nw, y0 + nh),
                (nw, y0),
                (0, y0),
            ]
        }
    };
    let shell: Vec<Point> = raw.iter().map(|&(x, y)| Point::new(x, y)).collect();
    let shell_polygon = Polygon::from_points(shell.clone());

    let margin = (w.min(h) / 20).max(1);
    let mut placed: Vec<Rect> = Vec::new();
    let mut attempts = num_holes * HOLE_ATTEMPTS_PER_HOLE;

    while placed.len() < num_holes && attempts > 0 {
        attempts -= 1;

        let hw = rng.gen_range(w / 10..=w / 4).max(1);
        let hh = rng.gen_range(h / 10..=h / 4).max(1);
        let x = rng.gen_range(0..=(w - hw));
        let y = rng.gen_range(0..=(h - hh));
        let hole = Rect::new(Point::new(x, y), Point::new(x + hw, y + hh));

        let padded = Rect::new(
            Point::new(x - margin, y - margin),
            Point::new(x + hw + margin, y + hh + margin),
        );
        if !shell_polygon.contains(&padded.to_polygon()) {
            continue;
        }
        if placed.iter().any(|other| other.overlaps(&padded)) {
            continue;
        }
        placed.push(hole);
    }

    if placed.len() < num_holes {
        log::warn!(
            "Only {} of {} requested holes fit the room",
            placed.len(),
            num_holes
        );
    }

    let entry = shell[rng.gen_range(0..shell.len())];

    RoomSpec {
        units: "CM".to_string(),
        shell,
        holes: placed
            .iter()
            .map(|r| r.to_polygon().points().to_vec())
            .collect(),
        entry: Some(entry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generated_rooms_are_valid_regions() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut l_shapes = 0;
        let mut u_shapes = 0;
        for _ in 0..40 {
            let room = generate_random_room(&mut rng, 600, 400, 3);
            match room.shell.len() {
                6 => l_shapes += 1,
                8 => u_shapes += 1,
                n => panic!("unexpected shell with {} vertices", n),
            }
            let region = room.region().expect("generated room must be valid");
            assert!(region.area() > 0.0);
            let entry = room.entry.unwrap();
            assert!(room.shell.contains(&entry));
        }
        assert!(l_shapes > 0 && u_shapes > 0);
    }

    #[test]
    fn tiny_request_is_clamped() {
        let mut rng = StdRng::seed_from_u64(1);
        let room = generate_random_room(&mut rng, 1, 1, 0);
        let bounds = Rect::bounding(&room.shell).unwrap();
        assert_eq!(bounds.width(), MIN_SIDE);
        assert_eq!(bounds.height(), MIN_SIDE);
    }
}
