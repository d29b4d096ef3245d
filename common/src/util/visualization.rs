use crate::db::core::Shape;
use crate::db::region::Region;
use crate::geom::polygon::Polygon;
use image::{ImageResult, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point as ImagePoint;
use imageproc::rect::Rect as ImageRect;
use std::path::Path;

const MARGIN: f64 = 10.0;

pub fn fill_color(name: &str) -> Rgb<u8> {
    match name.to_ascii_lowercase().as_str() {
        "green" => Rgb([60, 170, 80]),
        "blue" => Rgb([60, 110, 210]),
        "yellow" => Rgb([230, 200, 50]),
        "red" => Rgb([210, 40, 40]),
        "orange" => Rgb([240, 140, 40]),
        "purple" => Rgb([140, 70, 180]),
        _ => Rgb([150, 150, 150]),
    }
}

/// Screen-space mapping: y grows downwards as in the room coordinates.
struct Viewport {
    min_x: f64,
    min_y: f64,
    scale: f64,
}

impl Viewport {
    fn new(region: &Region, width: u32, height: u32) -> Option<Self> {
        let bounds = region.bounds();
        if bounds.width() <= 0 || bounds.height() <= 0 {
            return None;
        }
        let scale_x = (width as f64 - 2.0 * MARGIN) / bounds.width() as f64;
        let scale_y = (height as f64 - 2.0 * MARGIN) / bounds.height() as f64;
        Some(Self {
            min_x: bounds.min.x as f64,
            min_y: bounds.min.y as f64,
            scale: scale_x.min(scale_y),
        })
    }

    fn map(&self, x: i64, y: i64) -> (f32, f32) {
        (
            ((x as f64 - self.min_x) * self.scale + MARGIN) as f32,
            ((y as f64 - self.min_y) * self.scale + MARGIN) as f32,
        )
    }
}

fn fill_polygon(img: &mut RgbImage, view: &Viewport, polygon: &Polygon, color: Rgb<u8>) {
    let mut pts: Vec<ImagePoint<i32>> = polygon
        .points()
        .iter()
        .map(|p| {
            let (x, y) = view.map(p.x, p.y);
            ImagePoint::new(x.round() as i32, y.round() as i32)
        })
        .collect();
    pts.dedup();
    while pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    if pts.len() >= 3 {
        draw_polygon_mut(img, &pts, color);
    }
}

fn outline_polygon(img: &mut RgbImage, view: &Viewport, polygon: &Polygon, color: Rgb<u8>) {
    for (a, b) in polygon.edges() {
        draw_line_segment_mut(img, view.map(a.x, a.y), view.map(b.x, b.y), color);
    }
}

pub fn draw_layout<'a, I>(
    region: &Region,
    shapes: I,
    filename: &str,
    width: u32,
    height: u32,
) -> ImageResult<()>
where
    I: IntoIterator<Item = &'a Shape>,
{
    let background = Rgb([255, 255, 255]);
    let mut img = RgbImage::from_pixel(width, height, background);

    let Some(view) = Viewport::new(region, width, height) else {
        log::warn!("Region has an empty bounding box; writing a blank image");
        return img.save(Path::new(filename));
    };

    fill_polygon(&mut img, &view, region.shell(), Rgb([235, 235, 235]));
    for hole in region.holes() {
        fill_polygon(&mut img, &view, hole, background);
    }

    let outline = Rgb([0, 0, 0]);
    for shape in shapes {
        let bounds = shape.bounds();
        let (x0, y0) = view.map(bounds.min.x, bounds.min.y);
        let (x1, y1) = view.map(bounds.max.x, bounds.max.y);
        let w = ((x1 - x0).round() as u32).max(1);
        let h = ((y1 - y0).round() as u32).max(1);
        let rect = ImageRect::at(x0.round() as i32, y0.round() as i32).of_size(w, h);
        draw_filled_rect_mut(&mut img, rect, fill_color(shape.fill()));
        if shape.is_mat() {
            outline_polygon(&mut img, &view, &shape.polygon(), outline);
        }
    }

    outline_polygon(&mut img, &view, region.shell(), outline);
    for hole in region.holes() {
        outline_polygon(&mut img, &view, hole, outline);
    }

    img.save(Path::new(filename))
}
