//! Placement methods and the sign priority used when searching for a route.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    Forward,
    Backward,
}

impl Sign {
    #[inline]
    pub fn factor(self) -> i64 {
        match self {
            Sign::Forward => 1,
            Sign::Backward => -1,
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Sign::Forward => Sign::Backward,
            Sign::Backward => Sign::Forward,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SignPair {
    pub x: Sign,
    pub y: Sign,
}

impl SignPair {
    pub const fn new(x: Sign, y: Sign) -> Self {
        Self { x, y }
    }
}

const BASE_ORDER: [SignPair; 4] = [
    SignPair::new(Sign::Forward, Sign::Forward),
    SignPair::new(Sign::Backward, Sign::Forward),
    SignPair::new(Sign::Backward, Sign::Backward),
    SignPair::new(Sign::Forward, Sign::Backward),
];

/// Fixed priority of sign pairs, derived once from the mirror flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignOrder([SignPair; 4]);

impl SignOrder {
    pub fn new(mirror_horizontal: bool, mirror_vertical: bool, favor_vertical: bool) -> Self {
        let mut order = BASE_ORDER;
        for pair in &mut order {
            if mirror_horizontal {
                pair.x = pair.x.flip();
            }
            if mirror_vertical {
                pair.y = pair.y.flip();
            }
        }
        if favor_vertical {
            order.reverse();
        }
        Self(order)
    }

    pub fn first(&self) -> SignPair {
        self.0[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = SignPair> + '_ {
        self.0.iter().copied()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementMethod {
    MatHorizontal,
    MatVertical,
    WireHorizontal,
    WireVertical,
}

impl PlacementMethod {
    /// Search order.
    pub const ALL: [PlacementMethod; 4] = [
        PlacementMethod::MatHorizontal,
        PlacementMethod::MatVertical,
        PlacementMethod::WireHorizontal,
        PlacementMethod::WireVertical,
    ];

    pub fn axis(self) -> Axis {
        match self {
            PlacementMethod::MatHorizontal | PlacementMethod::WireHorizontal => Axis::Horizontal,
            PlacementMethod::MatVertical | PlacementMethod::WireVertical => Axis::Vertical,
        }
    }

    pub fn is_mat(self) -> bool {
        matches!(self, PlacementMethod::MatHorizontal | PlacementMethod::MatVertical)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extent {
    pub width: i64,
    pub height: i64,
}

impl Extent {
    pub const fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug)]
struct MethodEntry {
    method: PlacementMethod,
    probe: Extent,
    footprint: Extent,
}

/// Probe and footprint extents per method. A wire probes twice its length
/// ahead but only claims one radius square.
#[derive(Clone, Debug)]
pub struct MethodTable {
    entries: [MethodEntry; 4],
    step: i64,
}

impl MethodTable {
    pub fn new(wire_radius: i64, mat_width: i64) -> Self {
        let r = wire_radius;
        let m = mat_width;
        let entry = |method, probe, footprint| MethodEntry {
            method,
            probe,
            footprint,
        };
        Self {
            entries: [
                entry(PlacementMethod::MatHorizontal, Extent::new(r, m), Extent::new(r, m)),
                entry(PlacementMethod::MatVertical, Extent::new(m, r), Extent::new(m, r)),
                entry(PlacementMethod::WireHorizontal, Extent::new(2 * r, r), Extent::new(r, r)),
                entry(PlacementMethod::WireVertical, Extent::new(r, 2 * r), Extent::new(r, r)),
            ],
            step: r,
        }
    }

    fn entry(&self, method: PlacementMethod) -> &MethodEntry {
        // Entries are stored in `PlacementMethod::ALL` order.
        &self.entries[method as usize]
    }

    pub fn probe(&self, method: PlacementMethod) -> Extent {
        self.entry(method).probe
    }

    pub fn footprint(&self, method: PlacementMethod) -> Extent {
        self.entry(method).footprint
    }

    /// Distance the cursor moves along the advance axis after a placement.
    pub fn step(&self) -> i64 {
        self.step
    }

    /// `(method, probe)` pairs in search order.
    pub fn probes(&self) -> impl Iterator<Item = (PlacementMethod, Extent)> + '_ {
        self.entries.iter().map(|e| (e.method, e.probe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Sign::{Backward as B, Forward as F};
    use test_case::test_case;

    fn pairs(order: SignOrder) -> Vec<(Sign, Sign)> {
        order.iter().map(|p| (p.x, p.y)).collect()
    }

    #[test_case(false, false, false, [(F, F), (B, F), (B, B), (F, B)]; "base")]
    #[test_case(true, false, false, [(B, F), (F, F), (F, B), (B, B)]; "mirror horizontal")]
    #[test_case(false, true, false, [(F, B), (B, B), (B, F), (F, F)]; "mirror vertical")]
    #[test_case(true, true, false, [(B, B), (F, B), (F, F), (B, F)]; "mirror both")]
    #[test_case(false, false, true, [(F, B), (B, B), (B, F), (F, F)]; "favor vertical")]
    fn sign_priority(h: bool, v: bool, fv: bool, expected: [(Sign, Sign); 4]) {
        assert_eq!(pairs(SignOrder::new(h, v, fv)), expected.to_vec());
    }

    #[test]
    fn method_extents() {
        let table = MethodTable::new(8, 55);
        assert_eq!(table.probe(PlacementMethod::MatHorizontal), Extent::new(8, 55));
        assert_eq!(table.probe(PlacementMethod::MatVertical), Extent::new(55, 8));
        assert_eq!(table.probe(PlacementMethod::WireHorizontal), Extent::new(16, 8));
        assert_eq!(table.footprint(PlacementMethod::WireHorizontal), Extent::new(8, 8));
        assert_eq!(table.probe(PlacementMethod::WireVertical), Extent::new(8, 16));
        assert_eq!(table.footprint(PlacementMethod::WireVertical), Extent::new(8, 8));
        assert_eq!(table.step(), 8);

        let order: Vec<_> = table.probes().map(|(m, _)| m).collect();
        assert_eq!(order, PlacementMethod::ALL.to_vec());
    }

    #[test]
    fn axes() {
        assert_eq!(PlacementMethod::MatHorizontal.axis(), Axis::Horizontal);
        assert_eq!(PlacementMethod::WireVertical.axis(), Axis::Vertical);
        assert!(PlacementMethod::MatVertical.is_mat());
        assert!(!PlacementMethod::WireHorizontal.is_mat());
    }
}
