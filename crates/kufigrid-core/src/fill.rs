//! Flood fill over the cell plane.
//!
//! Fill is cell-only and 4-connected; gaps neither spread the fill nor
//! block it. Seeding on a vacant cell fills its vacant component, seeding
//! on a filled cell erases its filled component.

use ahash::AHashSet;

use crate::color::Color;
use crate::lattice::{Lattice, SlotKind};

impl Lattice {
    /// Flood fill from `(x, y)`: every cell 4-connected to the seed with
    /// the seed's occupancy flips to the opposite state. Filled cells take
    /// `color`; erased cells drop theirs. Returns the set of changed
    /// coordinates (empty when the seed is out of bounds).
    pub fn flood_fill(&mut self, x: u16, y: u16, color: Color) -> AHashSet<(u16, u16)> {
        let mut changed = AHashSet::new();
        if x >= self.cols() || y >= self.rows() {
            return changed;
        }
        let target = self.slot(SlotKind::Cell, x, y).filled;
        let replacement = !target;

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("flood_fill", x, y, filling = replacement).entered();

        let mut stack: Vec<(u16, u16)> = vec![(x, y)];
        while let Some((cx, cy)) = stack.pop() {
            if !changed.insert((cx, cy)) {
                continue;
            }
            let slot_color = replacement.then_some(color);
            self.set_slot(SlotKind::Cell, cx, cy, replacement, slot_color);
            let mut push = |nx: i32, ny: i32| {
                if nx < 0 || ny < 0 || nx >= i32::from(self.cols()) || ny >= i32::from(self.rows())
                {
                    return;
                }
                let n = (nx as u16, ny as u16);
                if !changed.contains(&n) && self.slot(SlotKind::Cell, n.0, n.1).filled == target {
                    stack.push(n);
                }
            };
            push(i32::from(cx) - 1, i32::from(cy));
            push(i32::from(cx) + 1, i32::from(cy));
            push(i32::from(cx), i32::from(cy) - 1);
            push(i32::from(cx), i32::from(cy) + 1);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(changed = changed.len(), "flood fill complete");

        changed
    }
}
