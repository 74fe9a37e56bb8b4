//! Host-agnostic square-Kufic lattice engine.
//!
//! Role: the model and rules behind a grid-pattern editor in the square
//! Kufic style, with no rendering or host assumptions. A [`Lattice`] holds
//! cells and the three gap planes between them; the [`radius`] module
//! decides which corners of each filled element stay square from the
//! occupancy of its corner-sharing neighbours.
//!
//! Primary responsibilities:
//! - [`lattice`]: the four occupancy planes, per-element colors, and the
//!   mutation entry points with damage reporting.
//! - [`radius`]: adjacency-aware corner rounding over any [`SlotProbe`].
//! - [`fill`]: 4-connected flood fill over the cell plane.
//! - [`letter`] / [`block`]: reusable stamps and their placed, movable
//!   instances.
//! - [`history`]: bounded snapshot undo/redo.
//! - [`codec`]: versioned, validated save-file documents.
//!
//! Hosts own the event loop and the pixels; this crate owns the state and
//! the geometry decisions.

#![forbid(unsafe_code)]

pub mod block;
pub mod codec;
pub mod color;
pub mod damage;
mod fill;
pub mod grid;
pub mod history;
pub mod lattice;
pub mod letter;
pub mod radius;

pub use block::{Block, GapOffset};
pub use codec::{Document, ImportError, FORMAT_VERSION};
pub use color::{Color, ColorParseError, DEFAULT_DRAW_COLOR};
pub use damage::{Damage, SlotRef};
pub use grid::SlotGrid;
pub use history::{History, Snapshot, HISTORY_CAP};
pub use lattice::{
    Lattice, Slot, SlotKind, DEFAULT_COLS, DEFAULT_ROWS, MAX_DIM, MIN_DIM,
};
pub use letter::{Letter, MAX_LETTER_DIM, MIN_LETTER_DIM};
pub use radius::{
    corner_radii, square_corners, CornerRadii, Corners, RadiusParams, SlotProbe,
    DEFAULT_CELL_SIZE, DEFAULT_GAP_THICKNESS, DEFAULT_RADIUS,
};
