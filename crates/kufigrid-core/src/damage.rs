//! Damage tracking for incremental re-rounding.
//!
//! A single occupancy change can alter the corner decision of any element
//! that shares a corner point with it. Every such element lies inside the
//! 3x3 cell-coordinate box centred on the change, so a `Damage` rectangle
//! in cell coordinates is a sound over-approximation for all four planes.

use smallvec::SmallVec;

use crate::lattice::{Lattice, SlotKind};

/// One element address: a plane plus in-plane coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotRef {
    pub kind: SlotKind,
    pub x: u16,
    pub y: u16,
}

impl SlotRef {
    pub const fn new(kind: SlotKind, x: u16, y: u16) -> Self {
        Self { kind, x, y }
    }
}

/// An inclusive rectangle of cell coordinates whose elements may need
/// re-rounding. Signed so a change on the rim can extend past the lattice;
/// off-lattice portions clip away when enumerating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Damage {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Damage {
    /// The 3x3 box around a changed element.
    pub fn around(x: u16, y: u16) -> Self {
        Self {
            min_x: i32::from(x) - 1,
            min_y: i32::from(y) - 1,
            max_x: i32::from(x) + 1,
            max_y: i32::from(y) + 1,
        }
    }

    /// A region covering the whole lattice.
    pub fn full(cols: u16, rows: u16) -> Self {
        Self {
            min_x: 0,
            min_y: 0,
            max_x: i32::from(cols) - 1,
            max_y: i32::from(rows) - 1,
        }
    }

    /// Smallest rectangle containing both regions.
    pub fn union(self, other: Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Whether a cell coordinate lies inside the region.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Every in-bounds element of every plane inside the region. A 3x3
    /// region touches at most 9 cells, 9 horizontal gaps, 9 vertical gaps
    /// and 9 diagonal gaps, hence the inline capacity.
    pub fn slots(&self, lat: &Lattice) -> SmallVec<[SlotRef; 36]> {
        let mut out = SmallVec::new();
        for kind in SlotKind::ALL {
            let (cols, rows) = lat.kind_dims(kind);
            let x0 = self.min_x.max(0);
            let y0 = self.min_y.max(0);
            let x1 = self.max_x.min(i32::from(cols) - 1);
            let y1 = self.max_y.min(i32::from(rows) - 1);
            for y in y0..=y1 {
                for x in x0..=x1 {
                    out.push(SlotRef::new(kind, x as u16, y as u16));
                }
            }
        }
        out
    }
}
