//! Element colors.
//!
//! Every filled element may own a color; elements without an entry render in
//! the lattice's current draw color. On the wire colors are `#RRGGBB` hex
//! strings, matching the save-file format, so `Color` serializes as a string
//! rather than a struct.

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::{Serialize, Serializer};

/// Draw color assigned to new elements when none is given explicitly.
pub const DEFAULT_DRAW_COLOR: Color = Color::rgb(0xF5, 0xA6, 0x23);

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a color from its channels.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` hex string (case-insensitive digits).
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s
            .strip_prefix('#')
            .ok_or(ColorParseError::MissingHash)?;
        // Hex digits are ASCII, so fixed byte offsets are safe below.
        if !digits.is_ascii() {
            return Err(ColorParseError::BadDigit);
        }
        if digits.len() != 6 {
            return Err(ColorParseError::BadLength { len: s.chars().count() });
        }
        let channel = |range: core::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorParseError::BadDigit)
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Format as a `#RRGGBB` hex string.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        DEFAULT_DRAW_COLOR
    }
}

impl core::fmt::Display for Color {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Errors from parsing a hex color string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorParseError {
    /// The string does not start with `#`.
    MissingHash,
    /// The string is not exactly 7 characters (`#` + 6 digits). `len` is
    /// the character count of the whole string.
    BadLength { len: usize },
    /// A channel is not valid hexadecimal.
    BadDigit,
}

impl core::fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingHash => write!(f, "color must start with '#'"),
            Self::BadLength { len } => {
                write!(f, "color must be 7 characters (#RRGGBB), got {len}")
            }
            Self::BadDigit => write!(f, "color contains a non-hex digit"),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HexVisitor;

        impl Visitor<'_> for HexVisitor {
            type Value = Color;

            fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str("a #RRGGBB hex color string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Color, E> {
                Color::from_hex(v).map_err(|e| E::custom(format!("{e}: {v:?}")))
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}
