//! Tile values and their presentation attributes.
//!
//! A `Tile` is just a value: 0 for an empty cell, otherwise a power of two.
//! Colors and font sizes are derived from the value so any renderer can paint
//! the board the same way without owning a lookup table of its own.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Packed `0xRRGGBB` color.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl Rgb {
    #[inline]
    pub fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub fn b(self) -> u8 {
        self.0 as u8
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgb({self})")
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0 & 0xff_ffff)
    }
}

/// Color behind the grid of tiles.
pub const BOARD_BACKGROUND: Rgb = Rgb(0xBBADA0);

const DARK_TEXT: Rgb = Rgb(0x776E65);
const LIGHT_TEXT: Rgb = Rgb(0xF9F6F2);

/// A single cell value. 0 means empty.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tile(u32);

impl Tile {
    /// The empty cell.
    pub const EMPTY: Tile = Tile(0);

    #[inline]
    pub const fn new(value: u32) -> Self {
        Tile(value)
    }

    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Tile with twice this value; used when two equal tiles merge.
    #[inline]
    pub(crate) fn doubled(self) -> Self {
        Tile(self.0 * 2)
    }

    /// Fill color for this value. Values above 2048 and the empty cell share
    /// the default color.
    pub fn background(self) -> Rgb {
        match self.0 {
            2 => Rgb(0xEEE4DA),
            4 => Rgb(0xEDE0C8),
            8 => Rgb(0xF2B179),
            16 => Rgb(0xF59563),
            32 => Rgb(0xF67C5F),
            64 => Rgb(0xF65E3B),
            128 => Rgb(0xEDCF72),
            256 => Rgb(0xEDCC61),
            512 => Rgb(0xEDC850),
            1024 => Rgb(0xEDC53F),
            2048 => Rgb(0xEDC22E),
            _ => Rgb(0xCDC1B4),
        }
    }

    /// Text color: dark on the two pale tiles (and below 16), light otherwise.
    pub fn foreground(self) -> Rgb {
        if self.0 < 16 { DARK_TEXT } else { LIGHT_TEXT }
    }

    /// Point size for the tile label, shrinking as the number grows wider.
    pub fn font_size(self) -> u16 {
        match self.0 {
            0..100 => 36,
            100..1000 => 32,
            _ => 24,
        }
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Tile {
    fn from(v: u32) -> Self {
        Tile::new(v)
    }
}

impl From<Tile> for u32 {
    fn from(t: Tile) -> Self {
        t.value()
    }
}
