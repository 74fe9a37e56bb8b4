//! Adjacency-aware corner rounding.
//!
//! Role: decide, for every filled element, which of its four corners stay
//! square and which are rounded, purely from the occupancy of neighbours
//! that physically share that corner point.
//!
//! Primary responsibilities:
//! - `SlotProbe`: read-only occupancy view the predicates run against, so
//!   the same rules serve the lattice and letter mini-lattices.
//! - `square_corners`: the per-corner neighbour predicates for each of the
//!   four element kinds.
//! - `corner_radii`: map the square/round decision to pixel radii under a
//!   given base radius and gap thickness.
//!
//! The predicates are shape rules, not graph adjacency: a corner is square
//! exactly when some other filled element touches that corner point. Cells
//! never touch cells (a gap plane always separates them), so a cell's
//! corners only ever consult gaps.

use bitflags::bitflags;

use crate::lattice::SlotKind;

/// Default base corner radius, in pixels.
pub const DEFAULT_RADIUS: u16 = 5;
/// Default gap thickness, in pixels.
pub const DEFAULT_GAP_THICKNESS: u16 = 15;
/// Default cell edge length, in pixels.
pub const DEFAULT_CELL_SIZE: u16 = 30;

/// Read-only occupancy probe over the four element planes.
///
/// Coordinates are signed; implementations must answer `false` for any
/// coordinate outside their plane.
pub trait SlotProbe {
    fn cell_filled(&self, x: i32, y: i32) -> bool;
    fn gap_h_filled(&self, x: i32, y: i32) -> bool;
    fn gap_v_filled(&self, x: i32, y: i32) -> bool;
    fn gap_d_filled(&self, x: i32, y: i32) -> bool;
}

bitflags! {
    /// Which corners of an element are square (not rounded).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Corners: u8 {
        const TOP_LEFT = 1 << 0;
        const TOP_RIGHT = 1 << 1;
        const BOTTOM_RIGHT = 1 << 2;
        const BOTTOM_LEFT = 1 << 3;
    }
}

/// Per-corner radii in pixels, clockwise from top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CornerRadii {
    pub tl: u16,
    pub tr: u16,
    pub br: u16,
    pub bl: u16,
}

impl CornerRadii {
    pub const ZERO: Self = Self { tl: 0, tr: 0, br: 0, bl: 0 };

    /// Radii where every corner NOT in `square` gets `radius`.
    pub fn from_mask(square: Corners, radius: u16) -> Self {
        let r = |c| if square.contains(c) { 0 } else { radius };
        Self {
            tl: r(Corners::TOP_LEFT),
            tr: r(Corners::TOP_RIGHT),
            br: r(Corners::BOTTOM_RIGHT),
            bl: r(Corners::BOTTOM_LEFT),
        }
    }
}

/// Geometry knobs the rounding depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadiusParams {
    /// Base corner radius. Zero disables rounding everywhere.
    pub radius: u16,
    /// Gap thickness; caps the radius of diagonal gap squares.
    pub gap_thickness: u16,
}

impl Default for RadiusParams {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            gap_thickness: DEFAULT_GAP_THICKNESS,
        }
    }
}

/// Which corners of the element at `(x, y)` on the `kind` plane are square.
///
/// Each corner consults exactly the elements whose area touches that corner
/// point. The probe answers `false` off-plane, so elements on the lattice
/// rim simply see fewer neighbours.
pub fn square_corners(probe: &impl SlotProbe, kind: SlotKind, x: i32, y: i32) -> Corners {
    let c = |x, y| probe.cell_filled(x, y);
    let h = |x, y| probe.gap_h_filled(x, y);
    let v = |x, y| probe.gap_v_filled(x, y);
    let d = |x, y| probe.gap_d_filled(x, y);

    let (tl, tr, bl, br) = match kind {
        SlotKind::Cell => (
            v(x - 1, y) || h(x, y - 1) || d(x - 1, y - 1),
            v(x, y) || h(x, y - 1) || d(x, y - 1),
            v(x - 1, y) || h(x, y) || d(x - 1, y),
            v(x, y) || h(x, y) || d(x, y),
        ),
        SlotKind::GapH => (
            c(x, y) || v(x - 1, y) || d(x - 1, y),
            c(x, y) || v(x, y) || d(x, y),
            c(x, y + 1) || v(x - 1, y + 1) || d(x - 1, y),
            c(x, y + 1) || v(x, y + 1) || d(x, y),
        ),
        SlotKind::GapV => (
            c(x, y) || h(x, y - 1) || d(x, y - 1),
            c(x + 1, y) || h(x + 1, y - 1) || d(x, y - 1),
            c(x, y) || h(x, y) || d(x, y),
            c(x + 1, y) || h(x + 1, y) || d(x, y),
        ),
        SlotKind::GapD => (
            c(x, y) || h(x, y) || v(x, y),
            c(x + 1, y) || h(x + 1, y) || v(x, y),
            c(x, y + 1) || h(x, y) || v(x, y + 1),
            c(x + 1, y + 1) || h(x + 1, y) || v(x, y + 1),
        ),
    };

    let mut out = Corners::empty();
    out.set(Corners::TOP_LEFT, tl);
    out.set(Corners::TOP_RIGHT, tr);
    out.set(Corners::BOTTOM_LEFT, bl);
    out.set(Corners::BOTTOM_RIGHT, br);
    out
}

/// Pixel radii for the element at `(x, y)` on the `kind` plane.
///
/// Diagonal gap squares cap the base radius at half the gap thickness,
/// since their side length is the gap thickness itself.
pub fn corner_radii(
    probe: &impl SlotProbe,
    kind: SlotKind,
    x: i32,
    y: i32,
    params: RadiusParams,
) -> CornerRadii {
    if params.radius == 0 {
        return CornerRadii::ZERO;
    }
    let radius = match kind {
        SlotKind::GapD => params.radius.min(params.gap_thickness / 2),
        _ => params.radius,
    };
    CornerRadii::from_mask(square_corners(probe, kind, x, y), radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Lattice;

    fn radii(lat: &Lattice, kind: SlotKind, x: i32, y: i32) -> CornerRadii {
        corner_radii(lat, kind, x, y, RadiusParams::default())
    }

    #[test]
    fn lone_cell_rounds_all_corners() {
        let mut lat = Lattice::new(8, 8);
        lat.set_slot(SlotKind::Cell, 2, 2, true, None);
        let r = radii(&lat, SlotKind::Cell, 2, 2);
        assert_eq!(r, CornerRadii { tl: 5, tr: 5, br: 5, bl: 5 });
    }

    #[test]
    fn vertical_gap_squares_right_corners_of_cell() {
        let mut lat = Lattice::new(8, 8);
        lat.set_slot(SlotKind::Cell, 2, 2, true, None);
        lat.set_slot(SlotKind::GapV, 2, 2, true, None);
        let r = radii(&lat, SlotKind::Cell, 2, 2);
        assert_eq!(r, CornerRadii { tl: 5, tr: 0, br: 0, bl: 5 });
    }

    #[test]
    fn gap_v_sees_cells_on_both_sides() {
        let mut lat = Lattice::new(8, 8);
        lat.set_slot(SlotKind::Cell, 2, 2, true, None);
        lat.set_slot(SlotKind::GapV, 2, 2, true, None);
        // Left cell squares tl and bl of the gap.
        let r = radii(&lat, SlotKind::GapV, 2, 2);
        assert_eq!(r, CornerRadii { tl: 0, tr: 5, br: 5, bl: 0 });

        lat.set_slot(SlotKind::Cell, 3, 2, true, None);
        let r = radii(&lat, SlotKind::GapV, 2, 2);
        assert_eq!(r, CornerRadii::ZERO);
    }

    #[test]
    fn adjacent_cells_do_not_square_each_other() {
        // Two cells side by side with the joining gap vacant stay fully
        // rounded: cells never touch cells.
        let mut lat = Lattice::new(8, 8);
        lat.set_slot(SlotKind::Cell, 2, 2, true, None);
        lat.set_slot(SlotKind::Cell, 3, 2, true, None);
        assert_eq!(radii(&lat, SlotKind::Cell, 2, 2), CornerRadii { tl: 5, tr: 5, br: 5, bl: 5 });
        assert_eq!(radii(&lat, SlotKind::Cell, 3, 2), CornerRadii { tl: 5, tr: 5, br: 5, bl: 5 });
    }

    #[test]
    fn diagonal_gap_squares_one_corner_of_each_touching_cell() {
        let mut lat = Lattice::new(8, 8);
        lat.set_slot(SlotKind::GapD, 1, 1, true, None);
        lat.set_slot(SlotKind::Cell, 1, 1, true, None);
        lat.set_slot(SlotKind::Cell, 2, 2, true, None);
        // GapD(1,1) sits at the shared corner of cells (1,1)/(2,1)/(1,2)/(2,2).
        assert_eq!(radii(&lat, SlotKind::Cell, 1, 1), CornerRadii { tl: 5, tr: 5, br: 0, bl: 5 });
        assert_eq!(radii(&lat, SlotKind::Cell, 2, 2), CornerRadii { tl: 0, tr: 5, br: 5, bl: 5 });
    }

    #[test]
    fn diagonal_gap_radius_capped_by_gap_thickness() {
        let mut lat = Lattice::new(8, 8);
        lat.set_slot(SlotKind::GapD, 1, 1, true, None);
        let params = RadiusParams { radius: 12, gap_thickness: 15 };
        let r = corner_radii(&lat, SlotKind::GapD, 1, 1, params);
        // min(12, 15 / 2) = 7
        assert_eq!(r, CornerRadii { tl: 7, tr: 7, br: 7, bl: 7 });
        // Other kinds keep the full base radius.
        lat.set_slot(SlotKind::Cell, 4, 4, true, None);
        let r = corner_radii(&lat, SlotKind::Cell, 4, 4, params);
        assert_eq!(r, CornerRadii { tl: 12, tr: 12, br: 12, bl: 12 });
    }

    #[test]
    fn zero_radius_disables_rounding() {
        let mut lat = Lattice::new(8, 8);
        lat.set_slot(SlotKind::Cell, 2, 2, true, None);
        let params = RadiusParams { radius: 0, gap_thickness: 15 };
        assert_eq!(corner_radii(&lat, SlotKind::Cell, 2, 2, params), CornerRadii::ZERO);
    }

    #[test]
    fn rim_cell_sees_no_phantom_neighbours() {
        let mut lat = Lattice::new(8, 8);
        lat.set_slot(SlotKind::Cell, 0, 0, true, None);
        let r = radii(&lat, SlotKind::Cell, 0, 0);
        assert_eq!(r, CornerRadii { tl: 5, tr: 5, br: 5, bl: 5 });
    }

    #[test]
    fn horizontal_gap_between_stacked_cells() {
        let mut lat = Lattice::new(8, 8);
        lat.set_slot(SlotKind::Cell, 3, 2, true, None);
        lat.set_slot(SlotKind::Cell, 3, 3, true, None);
        lat.set_slot(SlotKind::GapH, 3, 2, true, None);
        // Gap touches the cell above (tl, tr) and below (bl, br).
        assert_eq!(radii(&lat, SlotKind::GapH, 3, 2), CornerRadii::ZERO);
        // Each cell in turn squares the two corners facing the gap.
        assert_eq!(radii(&lat, SlotKind::Cell, 3, 2), CornerRadii { tl: 5, tr: 5, br: 0, bl: 0 });
        assert_eq!(radii(&lat, SlotKind::Cell, 3, 3), CornerRadii { tl: 0, tr: 0, br: 5, bl: 5 });
    }
}
