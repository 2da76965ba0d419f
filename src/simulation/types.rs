//! Core types for the highway simulation
//!
//! These are standalone types that don't depend on Bevy.

use anyhow::{bail, Context, Result};

/// Index of a vehicle in the world's vehicle list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleId(pub usize);

/// Index of a lane, counted from the top edge of the roadway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LaneIndex(pub usize);

/// A 2D position in canvas pixels (origin top-left, y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn midpoint(&self, other: &Position) -> Position {
        Position {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// An sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `[0, 1]`
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgba = Rgba::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a `#RRGGBB` hex string
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            bail!("expected a #RRGGBB color, got {hex:?}");
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .with_context(|| format!("invalid hex digits in color {hex:?}"))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Format as `#RRGGBB`, dropping alpha
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Palette used by the renderer
pub mod palette {
    use super::Rgba;

    pub const GRASS: Rgba = Rgba::rgb(0x10, 0xB9, 0x81);
    pub const ASPHALT: Rgba = Rgba::rgb(0x37, 0x41, 0x51);
    pub const LANE_DIVIDER: Rgba = Rgba::rgb(0xFB, 0xBF, 0x24);
    pub const ROAD_BORDER: Rgba = Rgba::WHITE;
    pub const WINDOW: Rgba = Rgba::rgb(0x1F, 0x29, 0x37);
    pub const WHEEL: Rgba = Rgba::BLACK;
    pub const COLLISION_TEXT: Rgba = Rgba::rgb(0xFF, 0x00, 0x00);
    pub const TRUCK_BLUE: Rgba = Rgba::rgb(0x3B, 0x82, 0xF6);
    pub const CAR_RED: Rgba = Rgba::rgb(0xEF, 0x44, 0x44);
    pub const CAR_GREEN: Rgba = Rgba::rgb(0x10, 0xB9, 0x81);
}

/// Edge length of a rendered explosion fragment
pub const PARTICLE_SIZE: f32 = 4.0;

/// Edge length of a rendered wheel
pub const WHEEL_SIZE: f32 = 8.0;

/// Inset of the window rectangle inside a vehicle body
pub const WINDOW_INSET: f32 = 5.0;

/// Dash pattern (on, off) of the lane dividers
pub const LANE_DASH: [f32; 2] = [20.0, 15.0];
