use crate::db::core::{Layout, LayoutStats, Shape};
use crate::db::indices::PassId;
use crate::geom::point::Point;
use anyhow::{Context, Result, bail};
use std::io::Write;

pub fn write(layout: &Layout, stats: &LayoutStats, filename: &str) -> std::io::Result<()> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(filename)?);

    writeln!(file, "LAYOUT heatfloor ;")?;
    writeln!(file, "UNITS CM ;")?;
    writeln!(file, "PASSES {} ;", layout.passes)?;
    writeln!(
        file,
        "SHAPES {} MATS {} WIRES {} ;",
        stats.shapes, stats.mats, stats.wires
    )?;
    writeln!(file, "AREA {:.2} ;", stats.covered_area)?;
    writeln!(file, "LENGTH {} ;", stats.total_length)?;
    writeln!(file, "FILL {:.2} ;", stats.fill_ratio * 100.0)?;

    for placed in &layout.shapes {
        let shape = &placed.shape;
        if shape.is_mat() {
            write!(file, "- MAT {} {} ", placed.pass, shape.fill())?;
        } else {
            write!(file, "- WIRE {} ", placed.pass)?;
        }
        for p in &shape.points {
            write!(file, "( {} {} ) ", p.x, p.y)?;
        }
        writeln!(file, ";")?;
    }
    writeln!(file, "END LAYOUT")?;
    file.flush()
}

pub fn parse(filename: &str) -> Result<Layout> {
    let text = std::fs::read_to_string(filename)?;
    parse_str(&text)
}

pub fn parse_str(text: &str) -> Result<Layout> {
    let mut layout = Layout::new();
    let mut declared_passes = 0;

    for (n, stmt) in super::statements(text).into_iter().enumerate() {
        if stmt[0] == "PASSES" {
            declared_passes = stmt
                .get(1)
                .context("missing pass count")?
                .parse()
                .with_context(|| format!("statement {}: bad pass count", n))?;
            continue;
        }
        if stmt[0] != "-" {
            continue;
        }
        let (kind, rest) = match stmt.get(1) {
            Some(&k) => (k, &stmt[2..]),
            None => bail!("statement {}: empty shape entry", n),
        };
        let pass: usize = rest
            .first()
            .context("missing pass index")?
            .parse()
            .with_context(|| format!("statement {}: bad pass index", n))?;

        let (fill, coords) = match kind {
            "MAT" => (Some(*rest.get(1).context("missing mat fill")?), &rest[2..]),
            "WIRE" => (None, &rest[1..]),
            other => bail!("statement {}: unknown shape kind '{}'", n, other),
        };

        let pts = super::points(coords).with_context(|| format!("statement {}", n))?;
        let points: [Point; 4] = match pts.as_slice() {
            &[a, b, c, d] => [a, b, c, d],
            _ => bail!("statement {}: expected 4 corners, got {}", n, pts.len()),
        };

        let shape = match fill {
            Some(fill) => Shape::mat(points, fill),
            None => Shape::wire(points),
        };
        layout.push(PassId::new(pass), shape);
    }
    layout.passes = layout.passes.max(declared_passes);
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_shape_lines() {
        let text = "\
LAYOUT heatfloor ;
PASSES 2 ;
- MAT 0 green ( 0 0 ) ( 8 0 ) ( 8 55 ) ( 0 55 ) ;
- WIRE 1 ( 8 0 ) ( 16 0 ) ( 16 8 ) ( 8 8 ) ;
END LAYOUT
";
        let layout = parse_str(text).unwrap();
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.passes, 2);
        assert_eq!(layout.shapes[0].shape.fill(), "green");
        assert!(!layout.shapes[1].shape.is_mat());
        assert_eq!(layout.shapes[1].pass, PassId::new(1));
    }

    #[test]
    fn header_keeps_trailing_empty_passes() {
        let text = "\
PASSES 3 ;
- MAT 0 green ( 0 0 ) ( 8 0 ) ( 8 55 ) ( 0 55 ) ;
END LAYOUT
";
        let layout = parse_str(text).unwrap();
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.passes, 3);
        assert!(parse_str("PASSES x ;").is_err());
    }

    #[test]
    fn rejects_short_shape() {
        assert!(parse_str("- WIRE 0 ( 0 0 ) ( 1 0 ) ( 1 1 ) ;").is_err());
        assert!(parse_str("- BLOB 0 ( 0 0 ) ;").is_err());
    }

    #[test]
    fn written_report_reads_back() {
        let mut layout = Layout::new();
        layout.push(
            PassId::new(0),
            Shape::mat(
                [Point::new(0, 0), Point::new(8, 0), Point::new(8, 55), Point::new(0, 55)],
                "yellow",
            ),
        );
        let stats = layout.stats(1000.0);
        let path = std::env::temp_dir().join(format!("heatfloor-report-{}.txt", std::process::id()));
        let path = path.to_str().unwrap();
        write(&layout, &stats, path).unwrap();
        let again = parse(path).unwrap();
        let _ = std::fs::remove_file(path);
        assert_eq!(again.shapes, layout.shapes);
    }
}
