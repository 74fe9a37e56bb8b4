//! Placed letter instances.
//!
//! A block is a letter stamped onto the main lattice that stays movable
//! until it is merged or removed. Its cells are tracked in absolute
//! lattice coordinates, its gaps as offsets from the stamp origin.
//! Elements clipped away at the rim are dropped at placement and never
//! resurrect, however the block moves afterwards.

use smallvec::SmallVec;

use crate::color::Color;
use crate::damage::Damage;
use crate::lattice::{Lattice, SlotKind};
use crate::letter::Letter;

/// A gap element of a block, relative to the stamp origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapOffset {
    pub kind: SlotKind,
    pub dx: u16,
    pub dy: u16,
}

/// A letter stamped onto the lattice, still movable as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    cells: Vec<(u16, u16)>,
    gap_offsets: SmallVec<[GapOffset; 8]>,
    color: Color,
    origin: (i32, i32),
}

impl Block {
    /// Stamp `letter` onto the lattice with its top-left cell at
    /// `(sx, sy)` and return the block tracking it. Cells and gaps that
    /// land outside the lattice are dropped from the block.
    pub fn place(lat: &mut Lattice, letter: &Letter, sx: i32, sy: i32, color: Color) -> Self {
        let mut cells = Vec::new();
        for (lx, ly) in letter.iter_filled(SlotKind::Cell) {
            let ax = sx + i32::from(lx);
            let ay = sy + i32::from(ly);
            if ax >= 0 && ay >= 0 && ax < i32::from(lat.cols()) && ay < i32::from(lat.rows()) {
                cells.push((ax as u16, ay as u16));
            }
        }
        let mut gap_offsets = SmallVec::new();
        for kind in [SlotKind::GapH, SlotKind::GapV, SlotKind::GapD] {
            let (cols, rows) = lat.kind_dims(kind);
            for (dx, dy) in letter.iter_filled(kind) {
                let ax = sx + i32::from(dx);
                let ay = sy + i32::from(dy);
                if ax >= 0 && ay >= 0 && ax < i32::from(cols) && ay < i32::from(rows) {
                    gap_offsets.push(GapOffset { kind, dx, dy });
                }
            }
        }
        let block = Self {
            cells,
            gap_offsets,
            color,
            origin: (sx, sy),
        };
        block.stamp(lat);
        block
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn origin(&self) -> (i32, i32) {
        self.origin
    }

    /// Absolute coordinates of the block's cells.
    pub fn cells(&self) -> &[(u16, u16)] {
        &self.cells
    }

    /// Whether `(x, y)` is one of the block's cells.
    pub fn contains_cell(&self, x: u16, y: u16) -> bool {
        self.cells.contains(&(x, y))
    }

    fn stamp(&self, lat: &mut Lattice) {
        for &(x, y) in &self.cells {
            lat.set_slot(SlotKind::Cell, x, y, true, Some(self.color));
        }
        for off in &self.gap_offsets {
            if let Some((x, y)) = self.gap_pos(lat, off) {
                lat.set_slot(off.kind, x, y, true, Some(self.color));
            }
        }
    }

    fn erase(&self, lat: &mut Lattice) {
        for &(x, y) in &self.cells {
            lat.set_slot(SlotKind::Cell, x, y, false, None);
        }
        for off in &self.gap_offsets {
            if let Some((x, y)) = self.gap_pos(lat, off) {
                lat.set_slot(off.kind, x, y, false, None);
            }
        }
    }

    fn gap_pos(&self, lat: &Lattice, off: &GapOffset) -> Option<(u16, u16)> {
        let x = self.origin.0 + i32::from(off.dx);
        let y = self.origin.1 + i32::from(off.dy);
        let (cols, rows) = lat.kind_dims(off.kind);
        (x >= 0 && y >= 0 && x < i32::from(cols) && y < i32::from(rows))
            .then(|| (x as u16, y as u16))
    }

    /// Move the block by `(dx, dy)` cells. The move is rejected, leaving
    /// the lattice untouched, when any block cell would land outside.
    pub fn translate(&mut self, lat: &mut Lattice, dx: i32, dy: i32) -> bool {
        let mut moved = Vec::with_capacity(self.cells.len());
        for &(x, y) in &self.cells {
            let nx = i32::from(x) + dx;
            let ny = i32::from(y) + dy;
            if nx < 0 || ny < 0 || nx >= i32::from(lat.cols()) || ny >= i32::from(lat.rows()) {
                return false;
            }
            moved.push((nx as u16, ny as u16));
        }
        self.erase(lat);
        self.cells = moved;
        self.origin = (self.origin.0 + dx, self.origin.1 + dy);
        self.stamp(lat);
        true
    }

    /// Commit the block's content to the lattice and dissolve the block.
    pub fn merge(self, lat: &mut Lattice) {
        self.stamp(lat);
    }

    /// Erase the block's content from the lattice and dissolve the block.
    pub fn remove(self, lat: &mut Lattice) {
        self.erase(lat);
    }

    /// Region whose rounding the block's content can influence, or `None`
    /// for a block with no surviving cells or gaps on the lattice.
    pub fn damage(&self, lat: &Lattice) -> Option<Damage> {
        let mut acc: Option<Damage> = None;
        let mut extend = |x: u16, y: u16| {
            let d = Damage::around(x, y);
            acc = Some(match acc {
                Some(a) => a.union(d),
                None => d,
            });
        };
        for &(x, y) in &self.cells {
            extend(x, y);
        }
        for off in &self.gap_offsets {
            if let Some((x, y)) = self.gap_pos(lat, off) {
                extend(x, y);
            }
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar_letter() -> Letter {
        // Two cells side by side joined by a vertical gap.
        let mut l = Letter::from_pattern("bar", &["##"]);
        l.set_slot(SlotKind::GapV, 0, 0, true);
        l
    }

    #[test]
    fn place_stamps_cells_and_gaps() {
        let mut lat = Lattice::new(8, 8);
        let b = Block::place(&mut lat, &bar_letter(), 2, 3, Color::rgb(1, 2, 3));
        assert!(lat.slot(SlotKind::Cell, 2, 3).filled);
        assert!(lat.slot(SlotKind::Cell, 3, 3).filled);
        assert!(lat.slot(SlotKind::GapV, 2, 3).filled);
        assert_eq!(lat.slot(SlotKind::Cell, 2, 3).color, Some(Color::rgb(1, 2, 3)));
        assert_eq!(b.cells(), &[(2, 3), (3, 3)]);
    }

    #[test]
    fn translate_moves_content() {
        let mut lat = Lattice::new(8, 8);
        let mut b = Block::place(&mut lat, &bar_letter(), 2, 3, Color::default());
        assert!(b.translate(&mut lat, 1, 0));
        assert!(!lat.slot(SlotKind::Cell, 2, 3).filled);
        assert!(lat.slot(SlotKind::Cell, 3, 3).filled);
        assert!(lat.slot(SlotKind::Cell, 4, 3).filled);
        assert!(lat.slot(SlotKind::GapV, 3, 3).filled);
        assert!(!lat.slot(SlotKind::GapV, 2, 3).filled);
    }

    #[test]
    fn translate_rejects_out_of_bounds_moves() {
        let mut lat = Lattice::new(8, 8);
        let mut b = Block::place(&mut lat, &bar_letter(), 6, 0, Color::default());
        assert!(!b.translate(&mut lat, 1, 0));
        // Rejected move leaves everything as it was.
        assert!(lat.slot(SlotKind::Cell, 6, 0).filled);
        assert!(lat.slot(SlotKind::Cell, 7, 0).filled);
        assert!(lat.slot(SlotKind::GapV, 6, 0).filled);
        assert!(!b.translate(&mut lat, 0, -1));
        assert!(b.translate(&mut lat, 0, 1));
    }

    #[test]
    fn remove_erases_all_content() {
        let mut lat = Lattice::new(8, 8);
        let mut b = Block::place(&mut lat, &bar_letter(), 2, 3, Color::default());
        assert!(b.translate(&mut lat, 1, 0));
        b.remove(&mut lat);
        assert!(lat.is_empty());
    }

    #[test]
    fn merge_keeps_content() {
        let mut lat = Lattice::new(8, 8);
        let b = Block::place(&mut lat, &bar_letter(), 2, 3, Color::default());
        b.merge(&mut lat);
        assert!(lat.slot(SlotKind::Cell, 2, 3).filled);
        assert!(lat.slot(SlotKind::GapV, 2, 3).filled);
        assert_eq!(lat.filled_cell_count(), 2);
    }

    #[test]
    fn clipped_elements_stay_dropped_after_moving_back() {
        let mut lat = Lattice::new(8, 8);
        // Right cell of the pair starts past the rim, and its joining gap
        // starts past the gap plane's rim.
        let mut b = Block::place(&mut lat, &bar_letter(), 7, 0, Color::default());
        assert_eq!(b.cells(), &[(7, 0)]);
        assert!(!lat.slot(SlotKind::GapV, 6, 0).filled);
        assert!(b.translate(&mut lat, -1, 0));
        assert!(lat.slot(SlotKind::Cell, 6, 0).filled);
        assert!(!lat.slot(SlotKind::Cell, 7, 0).filled);
        // The clipped gap does not resurrect now that its offset would be
        // in bounds again.
        assert!(!lat.slot(SlotKind::GapV, 6, 0).filled);
        b.remove(&mut lat);
        assert!(lat.is_empty());
    }

    #[test]
    fn damage_covers_the_block() {
        let mut lat = Lattice::new(8, 8);
        let b = Block::place(&mut lat, &bar_letter(), 2, 3, Color::default());
        let d = b.damage(&lat).unwrap();
        assert!(d.contains(2, 3));
        assert!(d.contains(3, 3));
        assert!(d.contains(1, 2));
        assert!(d.contains(4, 4));
    }
}
