//! Reusable letter stamps.
//!
//! A letter is a small standalone lattice (cells plus the three gap
//! planes, no colors) edited on its own and later stamped onto the main
//! lattice as a block. Letter planes mirror the main lattice layout at
//! mini scale.

use crate::grid::SlotGrid;
use crate::lattice::SlotKind;
use crate::radius::SlotProbe;

/// Smallest legal letter edge, in cells.
pub const MIN_LETTER_DIM: u16 = 1;
/// Largest legal letter edge, in cells.
pub const MAX_LETTER_DIM: u16 = 20;

/// A named mini-lattice used as a stamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letter {
    name: String,
    cells: SlotGrid,
    gap_h: SlotGrid,
    gap_v: SlotGrid,
    gap_d: SlotGrid,
}

impl Letter {
    /// Create an empty letter, clamping dimensions to the legal range.
    pub fn new(name: impl Into<String>, cols: u16, rows: u16) -> Self {
        let cols = cols.clamp(MIN_LETTER_DIM, MAX_LETTER_DIM);
        let rows = rows.clamp(MIN_LETTER_DIM, MAX_LETTER_DIM);
        Self {
            name: name.into(),
            cells: SlotGrid::new(cols, rows),
            gap_h: SlotGrid::new(cols, rows.saturating_sub(1)),
            gap_v: SlotGrid::new(cols.saturating_sub(1), rows),
            gap_d: SlotGrid::new(cols.saturating_sub(1), rows.saturating_sub(1)),
        }
    }

    /// Build a letter's cell plane from rows of `#` (filled) and anything
    /// else (vacant). Row count and the longest row fix the dimensions.
    pub fn from_pattern(name: impl Into<String>, rows: &[&str]) -> Self {
        let height = rows.len() as u16;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u16;
        let mut letter = Self::new(name, width.max(1), height.max(1));
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    letter.cells.set(x as u16, y as u16, true);
                }
            }
        }
        letter
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[inline]
    pub fn cols(&self) -> u16 {
        self.cells.cols()
    }

    #[inline]
    pub fn rows(&self) -> u16 {
        self.cells.rows()
    }

    fn plane(&self, kind: SlotKind) -> &SlotGrid {
        match kind {
            SlotKind::Cell => &self.cells,
            SlotKind::GapH => &self.gap_h,
            SlotKind::GapV => &self.gap_v,
            SlotKind::GapD => &self.gap_d,
        }
    }

    fn plane_mut(&mut self, kind: SlotKind) -> &mut SlotGrid {
        match kind {
            SlotKind::Cell => &mut self.cells,
            SlotKind::GapH => &mut self.gap_h,
            SlotKind::GapV => &mut self.gap_v,
            SlotKind::GapD => &mut self.gap_d,
        }
    }

    /// Whether the element at `(x, y)` on the `kind` plane is filled.
    /// Out of bounds answers `false`.
    pub fn filled(&self, kind: SlotKind, x: u16, y: u16) -> bool {
        self.plane(kind).get(i32::from(x), i32::from(y))
    }

    /// Write an element. Returns `false` when out of bounds.
    pub fn set_slot(&mut self, kind: SlotKind, x: u16, y: u16, filled: bool) -> bool {
        self.plane_mut(kind).set(x, y, filled)
    }

    /// Flip an element. Returns the new state, or `None` when out of
    /// bounds.
    pub fn toggle_slot(&mut self, kind: SlotKind, x: u16, y: u16) -> Option<bool> {
        let next = !self.filled(kind, x, y);
        self.set_slot(kind, x, y, next).then_some(next)
    }

    /// Resize to new (clamped) dimensions, keeping content that still
    /// fits. Each plane keeps its own overlap, so gaps survive alongside
    /// their cells.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        let cols = cols.clamp(MIN_LETTER_DIM, MAX_LETTER_DIM);
        let rows = rows.clamp(MIN_LETTER_DIM, MAX_LETTER_DIM);
        self.cells.resize_preserving(cols, rows);
        self.gap_h.resize_preserving(cols, rows.saturating_sub(1));
        self.gap_v.resize_preserving(cols.saturating_sub(1), rows);
        self.gap_d
            .resize_preserving(cols.saturating_sub(1), rows.saturating_sub(1));
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.gap_h.clear();
        self.gap_v.clear();
        self.gap_d.clear();
    }

    /// Whether every plane is vacant.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
            && self.gap_h.is_empty()
            && self.gap_v.is_empty()
            && self.gap_d.is_empty()
    }

    /// Filled coordinates of one plane, row-major.
    pub fn iter_filled(&self, kind: SlotKind) -> impl Iterator<Item = (u16, u16)> + '_ {
        self.plane(kind).iter_filled()
    }
}

impl SlotProbe for Letter {
    #[inline]
    fn cell_filled(&self, x: i32, y: i32) -> bool {
        self.cells.get(x, y)
    }

    #[inline]
    fn gap_h_filled(&self, x: i32, y: i32) -> bool {
        self.gap_h.get(x, y)
    }

    #[inline]
    fn gap_v_filled(&self, x: i32, y: i32) -> bool {
        self.gap_v.get(x, y)
    }

    #[inline]
    fn gap_d_filled(&self, x: i32, y: i32) -> bool {
        self.gap_d.get(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radius::{corner_radii, CornerRadii, RadiusParams};

    #[test]
    fn new_clamps_dimensions() {
        let l = Letter::new("alif", 0, 99);
        assert_eq!((l.cols(), l.rows()), (MIN_LETTER_DIM, MAX_LETTER_DIM));
    }

    #[test]
    fn one_by_one_letter_has_empty_gap_planes() {
        let mut l = Letter::new("dot", 1, 1);
        assert!(l.set_slot(SlotKind::Cell, 0, 0, true));
        assert!(!l.set_slot(SlotKind::GapH, 0, 0, true));
        assert!(!l.set_slot(SlotKind::GapV, 0, 0, true));
        assert!(!l.set_slot(SlotKind::GapD, 0, 0, true));
    }

    #[test]
    fn from_pattern_fills_hash_cells() {
        let l = Letter::from_pattern("lam", &["#.", "#.", "##"]);
        assert_eq!((l.cols(), l.rows()), (2, 3));
        assert!(l.filled(SlotKind::Cell, 0, 0));
        assert!(!l.filled(SlotKind::Cell, 1, 0));
        assert!(l.filled(SlotKind::Cell, 1, 2));
    }

    #[test]
    fn resize_preserves_surviving_content() {
        let mut l = Letter::from_pattern("ba", &["###", "#.#"]);
        l.set_slot(SlotKind::GapV, 0, 0, true);
        l.resize(2, 2);
        assert!(l.filled(SlotKind::Cell, 0, 0));
        assert!(l.filled(SlotKind::GapV, 0, 0));
        assert!(!l.filled(SlotKind::Cell, 2, 0));
        l.resize(4, 4);
        assert!(l.filled(SlotKind::Cell, 0, 0));
        assert!(l.filled(SlotKind::GapV, 0, 0));
        assert!(!l.filled(SlotKind::Cell, 3, 3));
    }

    #[test]
    fn rounding_applies_inside_a_letter() {
        let mut l = Letter::new("ha", 3, 3);
        l.set_slot(SlotKind::Cell, 1, 1, true);
        l.set_slot(SlotKind::GapV, 1, 1, true);
        let r = corner_radii(&l, SlotKind::Cell, 1, 1, RadiusParams::default());
        assert_eq!(r, CornerRadii { tl: 5, tr: 0, br: 0, bl: 5 });
    }
}
