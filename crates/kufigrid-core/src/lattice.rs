//! The lattice model.
//!
//! Role: single source of truth for the pattern being edited. Four boolean
//! planes (cells plus three gap kinds) hold occupancy, and per-plane color
//! maps hold the color of elements painted in something other than the
//! current draw color's era.
//!
//! Primary responsibilities:
//! - Plane layout: for a `cols x rows` cell grid, horizontal gaps form a
//!   `cols x (rows-1)` plane, vertical gaps `(cols-1) x rows`, diagonal
//!   gaps `(cols-1) x (rows-1)`.
//! - Mutation entry points (`set_slot`, `toggle_slot`, paint/erase steps)
//!   that report the damaged region so hosts can re-round incrementally.
//! - The `SlotProbe` view that the rounding predicates consume.

use ahash::AHashMap;

use crate::color::Color;
use crate::damage::Damage;
use crate::grid::SlotGrid;
use crate::radius::SlotProbe;

/// Smallest legal lattice edge, in cells.
pub const MIN_DIM: u16 = 5;
/// Largest legal lattice edge, in cells.
pub const MAX_DIM: u16 = 120;
/// Default lattice width, in cells.
pub const DEFAULT_COLS: u16 = 24;
/// Default lattice height, in cells.
pub const DEFAULT_ROWS: u16 = 24;

/// The four element planes of a lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotKind {
    /// Full cell at `(x, y)`.
    Cell,
    /// Horizontal gap between cell `(x, y)` and cell `(x, y+1)`.
    GapH,
    /// Vertical gap between cell `(x, y)` and cell `(x+1, y)`.
    GapV,
    /// Diagonal gap at the shared corner of cells `(x, y)` through
    /// `(x+1, y+1)`.
    GapD,
}

impl SlotKind {
    /// All four planes, cells first.
    pub const ALL: [SlotKind; 4] = [SlotKind::Cell, SlotKind::GapH, SlotKind::GapV, SlotKind::GapD];
}

/// Occupancy and color of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slot {
    pub filled: bool,
    /// `None` for vacant elements and for filled elements that follow the
    /// current draw color.
    pub color: Option<Color>,
}

/// A boolean lattice of cells and gaps with per-element colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    cols: u16,
    rows: u16,
    cells: SlotGrid,
    gap_h: SlotGrid,
    gap_v: SlotGrid,
    gap_d: SlotGrid,
    cell_colors: AHashMap<(u16, u16), Color>,
    gap_h_colors: AHashMap<(u16, u16), Color>,
    gap_v_colors: AHashMap<(u16, u16), Color>,
    gap_d_colors: AHashMap<(u16, u16), Color>,
    draw_color: Color,
}

impl Default for Lattice {
    fn default() -> Self {
        Self::new(DEFAULT_COLS, DEFAULT_ROWS)
    }
}

impl Lattice {
    /// Create an empty lattice, clamping dimensions to the legal range.
    pub fn new(cols: u16, rows: u16) -> Self {
        let cols = cols.clamp(MIN_DIM, MAX_DIM);
        let rows = rows.clamp(MIN_DIM, MAX_DIM);
        Self {
            cols,
            rows,
            cells: SlotGrid::new(cols, rows),
            gap_h: SlotGrid::new(cols, rows - 1),
            gap_v: SlotGrid::new(cols - 1, rows),
            gap_d: SlotGrid::new(cols - 1, rows - 1),
            cell_colors: AHashMap::new(),
            gap_h_colors: AHashMap::new(),
            gap_v_colors: AHashMap::new(),
            gap_d_colors: AHashMap::new(),
            draw_color: Color::default(),
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

    /// Dimensions of the given plane.
    pub fn kind_dims(&self, kind: SlotKind) -> (u16, u16) {
        match kind {
            SlotKind::Cell => (self.cols, self.rows),
            SlotKind::GapH => (self.cols, self.rows - 1),
            SlotKind::GapV => (self.cols - 1, self.rows),
            SlotKind::GapD => (self.cols - 1, self.rows - 1),
        }
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

    fn colors(&self, kind: SlotKind) -> &AHashMap<(u16, u16), Color> {
        match kind {
            SlotKind::Cell => &self.cell_colors,
            SlotKind::GapH => &self.gap_h_colors,
            SlotKind::GapV => &self.gap_v_colors,
            SlotKind::GapD => &self.gap_d_colors,
        }
    }

    fn colors_mut(&mut self, kind: SlotKind) -> &mut AHashMap<(u16, u16), Color> {
        match kind {
            SlotKind::Cell => &mut self.cell_colors,
            SlotKind::GapH => &mut self.gap_h_colors,
            SlotKind::GapV => &mut self.gap_v_colors,
            SlotKind::GapD => &mut self.gap_d_colors,
        }
    }

    /// Read an element. Out-of-bounds reads answer a vacant slot.
    pub fn slot(&self, kind: SlotKind, x: u16, y: u16) -> Slot {
        if !self.plane(kind).get(i32::from(x), i32::from(y)) {
            return Slot::default();
        }
        Slot {
            filled: true,
            color: self.colors(kind).get(&(x, y)).copied(),
        }
    }

    /// Color an element renders in: its own color if it has one, otherwise
    /// the current draw color. Vacant elements answer `None`.
    pub fn effective_color(&self, kind: SlotKind, x: u16, y: u16) -> Option<Color> {
        let slot = self.slot(kind, x, y);
        slot.filled.then(|| slot.color.unwrap_or(self.draw_color))
    }

    /// Write an element. Filling without an explicit color records the
    /// current draw color; clearing drops any per-element color. Returns
    /// the damaged region, or `None` when the write was out of bounds.
    pub fn set_slot(
        &mut self,
        kind: SlotKind,
        x: u16,
        y: u16,
        filled: bool,
        color: Option<Color>,
    ) -> Option<Damage> {
        let draw = self.draw_color;
        if !self.plane_mut(kind).set(x, y, filled) {
            return None;
        }
        if filled {
            self.colors_mut(kind).insert((x, y), color.unwrap_or(draw));
        } else {
            self.colors_mut(kind).remove(&(x, y));
        }
        Some(Damage::around(x, y))
    }

    /// Flip an element's occupancy. Returns the new state and the damaged
    /// region, or `None` when out of bounds.
    pub fn toggle_slot(&mut self, kind: SlotKind, x: u16, y: u16) -> Option<(bool, Damage)> {
        let (cols, rows) = self.kind_dims(kind);
        if x >= cols || y >= rows {
            return None;
        }
        let next = !self.plane(kind).get(i32::from(x), i32::from(y));
        let damage = self.set_slot(kind, x, y, next, None)?;
        Some((next, damage))
    }

    /// One step of a paint drag over an element: fill it unless it already
    /// is. Returns the damage only when something changed.
    pub fn paint_step(&mut self, kind: SlotKind, x: u16, y: u16, color: Color) -> Option<Damage> {
        if self.plane(kind).get(i32::from(x), i32::from(y)) {
            return None;
        }
        self.set_slot(kind, x, y, true, Some(color))
    }

    /// One step of an erase drag: clear the element unless it already is
    /// vacant.
    pub fn erase_step(&mut self, kind: SlotKind, x: u16, y: u16) -> Option<Damage> {
        if !self.plane(kind).get(i32::from(x), i32::from(y)) {
            return None;
        }
        self.set_slot(kind, x, y, false, None)
    }

    /// Clear every plane and every color, keeping dimensions.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.gap_h.clear();
        self.gap_v.clear();
        self.gap_d.clear();
        self.cell_colors.clear();
        self.gap_h_colors.clear();
        self.gap_v_colors.clear();
        self.gap_d_colors.clear();
    }

    /// Resize to new (clamped) dimensions, discarding all content.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        *self = Self::new(cols, rows).with_draw_color(self.draw_color);
    }

    fn with_draw_color(mut self, color: Color) -> Self {
        self.draw_color = color;
        self
    }

    /// Number of filled cells (gaps not counted).
    pub fn filled_cell_count(&self) -> usize {
        self.cells.count_filled()
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

    pub fn draw_color(&self) -> Color {
        self.draw_color
    }

    pub fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }
}

impl SlotProbe for Lattice {
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
