//! Named patterns that can be stamped onto a grid.
//!
//! Offsets are `(row, col)` relative to the anchor cell passed to
//! [`Grid::stamp`](crate::grid::Grid::stamp) and may be negative.

pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i32, i32)],
}

impl Pattern {
    /// Height and width of the pattern's bounding box.
    pub fn extent(&self) -> (u32, u32) {
        if self.cells.is_empty() {
            return (0, 0);
        }
        let (mut min_r, mut max_r) = (i32::MAX, i32::MIN);
        let (mut min_c, mut max_c) = (i32::MAX, i32::MIN);
        for &(r, c) in self.cells {
            min_r = min_r.min(r);
            max_r = max_r.max(r);
            min_c = min_c.min(c);
            max_c = max_c.max(c);
        }
        ((max_r - min_r + 1) as u32, (max_c - min_c + 1) as u32)
    }
}

/// Glider heading down and to the right.
pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    cells: &[(-1, 1), (0, 1), (1, 1), (1, 0), (0, -1)],
};

/// Vertical blinker, period 2.
pub const BLINKER: Pattern = Pattern {
    name: "Blinker",
    cells: &[(-1, 0), (0, 0), (1, 0)],
};

pub const BLOCK: Pattern = Pattern {
    name: "Block",
    cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
};

pub const TOAD: Pattern = Pattern {
    name: "Toad",
    cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
};

pub const BEACON: Pattern = Pattern {
    name: "Beacon",
    cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
};

pub const PATTERNS: &[Pattern] = &[GLIDER, BLINKER, BLOCK, TOAD, BEACON];

/// Look up a built-in pattern by name, ignoring case.
pub fn find_pattern(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
