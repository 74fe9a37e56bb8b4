//! Dense occupancy grid.
//!
//! `SlotGrid` stores the on/off state of one element plane as a flat
//! row-major `Vec<bool>`. Out-of-bounds reads answer `false` instead of
//! panicking, because the corner-rounding predicates probe one step past
//! every edge of the lattice.

/// A fixed-size boolean grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGrid {
    cols: u16,
    rows: u16,
    bits: Vec<bool>,
}

impl SlotGrid {
    /// Create an empty grid. Zero-size grids are legal (a 1-row lattice has
    /// a 0-row horizontal gap plane).
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            bits: vec![false; cols as usize * rows as usize],
        }
    }

    #[inline]
    pub fn cols(&self) -> u16 {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> u16 {
        self.rows
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.cols as usize + x as usize
    }

    /// Whether the slot at signed coordinates is filled. Anything outside
    /// the grid is vacant.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= i32::from(self.cols) || y >= i32::from(self.rows) {
            return false;
        }
        self.bits[self.index(x as u16, y as u16)]
    }

    /// Set a slot. Returns `false` without writing when out of bounds.
    pub fn set(&mut self, x: u16, y: u16, filled: bool) -> bool {
        if x >= self.cols || y >= self.rows {
            return false;
        }
        let idx = self.index(x, y);
        self.bits[idx] = filled;
        true
    }

    /// Clear every slot, keeping dimensions.
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Resize to new dimensions, discarding all content.
    pub fn resize_reset(&mut self, cols: u16, rows: u16) {
        *self = Self::new(cols, rows);
    }

    /// Resize to new dimensions, keeping the overlapping region's content.
    pub fn resize_preserving(&mut self, cols: u16, rows: u16) {
        let mut next = Self::new(cols, rows);
        let keep_cols = self.cols.min(cols);
        let keep_rows = self.rows.min(rows);
        for y in 0..keep_rows {
            for x in 0..keep_cols {
                let bit = self.bits[self.index(x, y)];
                let idx = next.index(x, y);
                next.bits[idx] = bit;
            }
        }
        *self = next;
    }

    /// Number of filled slots.
    pub fn count_filled(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Whether no slot is filled.
    pub fn is_empty(&self) -> bool {
        !self.bits.iter().any(|&b| b)
    }

    /// Coordinates of every filled slot, in row-major order.
    pub fn iter_filled(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        let cols = self.cols;
        self.bits
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b)
            .map(move |(i, _)| ((i % cols as usize) as u16, (i / cols as usize) as u16))
    }
}
