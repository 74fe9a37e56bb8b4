//! Save-file codec.
//!
//! Role: lossless export/import of a lattice as a versioned, host-neutral
//! document. The document mirrors the on-disk JSON layout: occupancy as
//! row-major arrays of 0/1, colors as sparse maps keyed `"x,y"`.
//!
//! Import never trusts the input. Dimensions, array shapes, element
//! values and color keys are all validated before a lattice is built, so
//! a malformed document yields an error instead of a half-loaded state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::lattice::{Lattice, SlotKind, MAX_DIM, MIN_DIM};

/// Current document format version.
pub const FORMAT_VERSION: u32 = 7;

/// A lattice serialized for storage or transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "v")]
    pub version: u32,
    pub cols: u16,
    pub rows: u16,
    /// Cell occupancy, `grid[y][x]`, 0 or 1.
    pub grid: Vec<Vec<u8>>,
    #[serde(rename = "gapH")]
    pub gap_h: Vec<Vec<u8>>,
    #[serde(rename = "gapV")]
    pub gap_v: Vec<Vec<u8>>,
    #[serde(rename = "gapD")]
    pub gap_d: Vec<Vec<u8>>,
    /// Sparse per-element colors keyed `"x,y"`.
    #[serde(rename = "cellColors", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub cell_colors: BTreeMap<String, Color>,
    #[serde(rename = "gapHColors", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub gap_h_colors: BTreeMap<String, Color>,
    #[serde(rename = "gapVColors", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub gap_v_colors: BTreeMap<String, Color>,
    #[serde(rename = "gapDColors", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub gap_d_colors: BTreeMap<String, Color>,
    #[serde(rename = "drawColor", default, skip_serializing_if = "Option::is_none")]
    pub draw_color: Option<Color>,
}

/// Errors from validating an imported document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The document's format version is not one this codec reads.
    UnsupportedVersion { version: u32 },
    /// Declared dimensions fall outside the legal lattice range.
    DimensionOutOfRange { cols: u16, rows: u16 },
    /// An occupancy array does not match the declared dimensions.
    ShapeMismatch {
        array: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// An occupancy element is neither 0 nor 1.
    BadCellValue {
        array: &'static str,
        x: usize,
        y: usize,
        value: u8,
    },
    /// A color map key is not of the form `"x,y"`.
    BadColorKey { map: &'static str, key: String },
    /// A color map key addresses an element outside its plane.
    ColorKeyOutOfBounds { map: &'static str, x: u16, y: u16 },
}

impl core::fmt::Display for ImportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedVersion { version } => {
                write!(f, "unsupported document version {version} (expected {FORMAT_VERSION})")
            }
            Self::DimensionOutOfRange { cols, rows } => write!(
                f,
                "dimensions {cols}x{rows} outside legal range {MIN_DIM}..={MAX_DIM}"
            ),
            Self::ShapeMismatch { array, expected, actual } => write!(
                f,
                "array {array:?} has shape {}x{}, expected {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Self::BadCellValue { array, x, y, value } => {
                write!(f, "array {array:?} holds {value} at ({x}, {y}), expected 0 or 1")
            }
            Self::BadColorKey { map, key } => {
                write!(f, "color map {map:?} has malformed key {key:?}")
            }
            Self::ColorKeyOutOfBounds { map, x, y } => {
                write!(f, "color map {map:?} addresses out-of-bounds element ({x}, {y})")
            }
        }
    }
}

impl std::error::Error for ImportError {}

impl Document {
    /// Capture a lattice as a document at the current format version.
    pub fn from_lattice(lat: &Lattice) -> Self {
        let plane = |kind: SlotKind| {
            let (cols, rows) = lat.kind_dims(kind);
            let mut out = vec![vec![0u8; cols as usize]; rows as usize];
            for (x, y) in lat.iter_filled(kind) {
                out[y as usize][x as usize] = 1;
            }
            out
        };
        let colors = |kind: SlotKind| {
            let (cols, rows) = lat.kind_dims(kind);
            let mut out = BTreeMap::new();
            for y in 0..rows {
                for x in 0..cols {
                    if let Some(color) = lat.slot(kind, x, y).color {
                        out.insert(format!("{x},{y}"), color);
                    }
                }
            }
            out
        };
        Self {
            version: FORMAT_VERSION,
            cols: lat.cols(),
            rows: lat.rows(),
            grid: plane(SlotKind::Cell),
            gap_h: plane(SlotKind::GapH),
            gap_v: plane(SlotKind::GapV),
            gap_d: plane(SlotKind::GapD),
            cell_colors: colors(SlotKind::Cell),
            gap_h_colors: colors(SlotKind::GapH),
            gap_v_colors: colors(SlotKind::GapV),
            gap_d_colors: colors(SlotKind::GapD),
            draw_color: Some(lat.draw_color()),
        }
    }

    /// Validate the document and build the lattice it describes.
    pub fn into_lattice(self) -> Result<Lattice, ImportError> {
        if self.version != FORMAT_VERSION {
            return Err(ImportError::UnsupportedVersion { version: self.version });
        }
        if self.cols < MIN_DIM
            || self.cols > MAX_DIM
            || self.rows < MIN_DIM
            || self.rows > MAX_DIM
        {
            return Err(ImportError::DimensionOutOfRange {
                cols: self.cols,
                rows: self.rows,
            });
        }

        let mut lat = Lattice::new(self.cols, self.rows);
        if let Some(color) = self.draw_color {
            lat.set_draw_color(color);
        }

        let planes: [(&'static str, SlotKind, &Vec<Vec<u8>>); 4] = [
            ("grid", SlotKind::Cell, &self.grid),
            ("gapH", SlotKind::GapH, &self.gap_h),
            ("gapV", SlotKind::GapV, &self.gap_v),
            ("gapD", SlotKind::GapD, &self.gap_d),
        ];
        for (name, kind, array) in planes {
            let (cols, rows) = lat.kind_dims(kind);
            let expected = (cols as usize, rows as usize);
            if array.len() != expected.1 {
                return Err(ImportError::ShapeMismatch {
                    array: name,
                    expected,
                    actual: (array.first().map_or(0, Vec::len), array.len()),
                });
            }
            for (y, row) in array.iter().enumerate() {
                if row.len() != expected.0 {
                    return Err(ImportError::ShapeMismatch {
                        array: name,
                        expected,
                        actual: (row.len(), array.len()),
                    });
                }
                for (x, &value) in row.iter().enumerate() {
                    match value {
                        0 => {}
                        1 => {
                            lat.set_slot(kind, x as u16, y as u16, true, None);
                        }
                        _ => {
                            return Err(ImportError::BadCellValue { array: name, x, y, value });
                        }
                    }
                }
            }
        }

        let maps: [(&'static str, SlotKind, &BTreeMap<String, Color>); 4] = [
            ("cellColors", SlotKind::Cell, &self.cell_colors),
            ("gapHColors", SlotKind::GapH, &self.gap_h_colors),
            ("gapVColors", SlotKind::GapV, &self.gap_v_colors),
            ("gapDColors", SlotKind::GapD, &self.gap_d_colors),
        ];
        for (name, kind, map) in maps {
            let (cols, rows) = lat.kind_dims(kind);
            for (key, &color) in map {
                let (x, y) = parse_key(key).ok_or_else(|| ImportError::BadColorKey {
                    map: name,
                    key: key.clone(),
                })?;
                if x >= cols || y >= rows {
                    return Err(ImportError::ColorKeyOutOfBounds { map: name, x, y });
                }
                // Colors only attach to filled elements.
                if lat.slot(kind, x, y).filled {
                    lat.set_slot(kind, x, y, true, Some(color));
                }
            }
        }

        Ok(lat)
    }
}

fn parse_key(key: &str) -> Option<(u16, u16)> {
    let (x, y) = key.split_once(',')?;
    Some((x.parse().ok()?, y.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_lattice() -> Lattice {
        let mut lat = Lattice::new(6, 5);
        lat.set_draw_color(Color::rgb(0x7C, 0x3A, 0xED));
        lat.set_slot(SlotKind::Cell, 1, 1, true, Some(Color::rgb(1, 2, 3)));
        lat.set_slot(SlotKind::Cell, 2, 1, true, None);
        lat.set_slot(SlotKind::GapV, 1, 1, true, None);
        lat.set_slot(SlotKind::GapD, 4, 3, true, Some(Color::rgb(9, 9, 9)));
        lat
    }

    #[test]
    fn document_round_trip_preserves_lattice() {
        let lat = sample_lattice();
        let doc = Document::from_lattice(&lat);
        let back = doc.into_lattice().unwrap();
        assert_eq!(back, lat);
    }

    #[test]
    fn json_round_trip_preserves_lattice() {
        let lat = sample_lattice();
        let json = serde_json::to_string(&Document::from_lattice(&lat)).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back.into_lattice().unwrap(), lat);
    }

    #[test]
    fn json_uses_wire_key_names() {
        let doc = Document::from_lattice(&sample_lattice());
        let value: serde_json::Value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["v"], 7);
        assert!(value.get("gapH").is_some());
        assert!(value.get("cellColors").is_some());
        assert_eq!(value["cellColors"]["1,1"], "#010203");
        assert_eq!(value["drawColor"], "#7C3AED");
    }

    #[test]
    fn missing_color_maps_default_to_empty() {
        let json = r#"{
            "v": 7, "cols": 5, "rows": 5,
            "grid": [[0,0,0,0,0],[0,0,0,0,0],[0,0,0,0,0],[0,0,0,0,0],[0,0,0,0,0]],
            "gapH": [[0,0,0,0,0],[0,0,0,0,0],[0,0,0,0,0],[0,0,0,0,0]],
            "gapV": [[0,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]],
            "gapD": [[0,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        let lat = doc.into_lattice().unwrap();
        assert!(lat.is_empty());
        assert_eq!(lat.draw_color(), Color::default());
    }

    #[test]
    fn wrong_version_rejected() {
        let mut doc = Document::from_lattice(&sample_lattice());
        doc.version = 6;
        assert_eq!(
            doc.into_lattice(),
            Err(ImportError::UnsupportedVersion { version: 6 })
        );
    }

    #[test]
    fn out_of_range_dimensions_rejected() {
        let mut doc = Document::from_lattice(&sample_lattice());
        doc.cols = 4;
        assert!(matches!(
            doc.into_lattice(),
            Err(ImportError::DimensionOutOfRange { cols: 4, .. })
        ));
    }

    #[test]
    fn shape_mismatch_rejected() {
        let mut doc = Document::from_lattice(&sample_lattice());
        doc.gap_h.pop();
        assert!(matches!(
            doc.into_lattice(),
            Err(ImportError::ShapeMismatch { array: "gapH", .. })
        ));

        let mut doc = Document::from_lattice(&sample_lattice());
        doc.grid[2].push(0);
        assert!(matches!(
            doc.into_lattice(),
            Err(ImportError::ShapeMismatch { array: "grid", .. })
        ));
    }

    #[test]
    fn non_binary_values_rejected() {
        let mut doc = Document::from_lattice(&sample_lattice());
        doc.gap_d[0][0] = 2;
        assert_eq!(
            doc.into_lattice(),
            Err(ImportError::BadCellValue { array: "gapD", x: 0, y: 0, value: 2 })
        );
    }

    #[test]
    fn malformed_color_key_rejected() {
        let mut doc = Document::from_lattice(&sample_lattice());
        doc.cell_colors.insert("1;1".into(), Color::default());
        assert!(matches!(
            doc.into_lattice(),
            Err(ImportError::BadColorKey { map: "cellColors", .. })
        ));
    }

    #[test]
    fn out_of_bounds_color_key_rejected() {
        let mut doc = Document::from_lattice(&sample_lattice());
        doc.gap_v_colors.insert("5,0".into(), Color::default());
        assert_eq!(
            doc.into_lattice(),
            Err(ImportError::ColorKeyOutOfBounds { map: "gapVColors", x: 5, y: 0 })
        );
    }

    #[test]
    fn color_on_vacant_element_is_dropped() {
        let mut doc = Document::from_lattice(&sample_lattice());
        doc.cell_colors.insert("0,0".into(), Color::rgb(5, 5, 5));
        let lat = doc.into_lattice().unwrap();
        assert_eq!(lat.slot(SlotKind::Cell, 0, 0), crate::lattice::Slot::default());
    }
}
