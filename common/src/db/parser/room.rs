use crate::db::region::Region;
use crate::geom::point::Point;
use anyhow::{Context, Result, bail};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoomSpec {
    pub units: String,
    pub shell: Vec<Point>,
    pub holes: Vec<Vec<Point>>,
    pub entry: Option<Point>,
}

impl RoomSpec {
    pub fn region(&self) -> Result<Region> {
        Region::new(self.shell.clone(), self.holes.clone()).context("Invalid room geometry")
    }
}

pub fn parse(filename: &str) -> Result<RoomSpec> {
    let text = std::fs::read_to_string(filename)?;
    parse_str(&text)
}

pub fn parse_str(text: &str) -> Result<RoomSpec> {
    let mut room = RoomSpec {
        units: "CM".to_string(),
        ..Default::default()
    };
    let mut has_shell = false;

    for stmt in super::statements(text) {
        match stmt[0] {
            "UNITS" => {
                if let Some(unit) = stmt.get(1) {
                    room.units = unit.to_string();
                    log::debug!("Room units: {}", room.units);
                }
            }
            "SHELL" => {
                if has_shell {
                    bail!("room defines more than one SHELL");
                }
                room.shell = super::points(&stmt[1..]).context("SHELL")?;
                has_shell = true;
            }
            "HOLE" => {
                let hole = super::points(&stmt[1..])
                    .with_context(|| format!("HOLE {}", room.holes.len()))?;
                room.holes.push(hole);
            }
            "ENTRY" => {
                let pts = super::points(&stmt[1..]).context("ENTRY")?;
                match pts.as_slice() {
                    [p] => room.entry = Some(*p),
                    _ => bail!("ENTRY takes exactly one point, got {}", pts.len()),
                }
            }
            other => {
                log::warn!("Ignoring unknown room statement '{}'", other);
            }
        }
    }

    if !has_shell {
        bail!("room file has no SHELL statement");
    }
    Ok(room)
}

pub fn write(room: &RoomSpec, filename: &str) -> std::io::Result<()> {
    use std::io::Write;
    let mut file = std::fs::File::create(filename)?;

    let ring = |pts: &[Point]| {
        pts.iter()
            .map(|p| format!("( {} {} )", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ")
    };

    writeln!(file, "UNITS {} ;", room.units)?;
    writeln!(file, "SHELL {} ;", ring(&room.shell))?;
    for hole in &room.holes {
        writeln!(file, "HOLE {} ;", ring(hole))?;
    }
    if let Some(entry) = room.entry {
        writeln!(file, "ENTRY ( {} {} ) ;", entry.x, entry.y)?;
    }
    Ok(())
}
