//! Colours and backgrounds.
//!
//! Colours are stored as straight (non-premultiplied) sRGB components in
//! `0.0..=1.0`, which is what hex strings like `#5cbdaa` describe. The GPU
//! renderer converts to linear space when the swapchain is sRGB.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ColorParseError;

/// RGBA colour with sRGB-encoded components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Opaque colour from components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`. The `#` is optional.
    ///
    /// ```
    /// use particlebg::Color;
    ///
    /// let teal = Color::from_hex("#5cbdaa").unwrap();
    /// assert_eq!(teal.to_hex(), "#5cbdaa");
    /// ```
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s.trim().trim_start_matches('#');

        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(bad));
        }

        // Every char is an ASCII hex digit here, so byte indexing is safe.
        let nibble = |i: usize| -> u8 {
            (digits.as_bytes()[i] as char).to_digit(16).unwrap_or(0) as u8
        };
        let byte = |i: usize| -> u8 { nibble(i) * 16 + nibble(i + 1) };

        match digits.len() {
            3 => Ok(Self::from_rgb8(nibble(0) * 17, nibble(1) * 17, nibble(2) * 17)),
            6 => Ok(Self::from_rgb8(byte(0), byte(2), byte(4))),
            8 => Ok(Self::from_rgb8(byte(0), byte(2), byte(4)).with_alpha(byte(6) as f32 / 255.0)),
            len => Err(ColorParseError::InvalidLength(len)),
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let to_byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (to_byte(self.r), to_byte(self.g), to_byte(self.b), to_byte(self.a));
        if a == 255 {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }

    /// Same colour with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Convert colour channels from sRGB to linear. Alpha is unchanged.
    pub fn to_linear(self) -> Self {
        fn channel(c: f32) -> f32 {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        Self {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
            a: self.a,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

/// What is painted behind the particles.
///
/// The simulation never looks at this; it travels with the configuration so
/// the renderer can paint it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Background {
    /// Single flat colour.
    Solid { color: Color },
    /// Two-stop linear gradient. `angle_deg` follows CSS: 0° points up,
    /// 90° right, 180° down.
    LinearGradient {
        angle_deg: f32,
        from: Color,
        to: Color,
    },
}

impl Background {
    pub fn solid(color: Color) -> Self {
        Background::Solid { color }
    }

    pub fn gradient(angle_deg: f32, from: Color, to: Color) -> Self {
        Background::LinearGradient { angle_deg, from, to }
    }

    /// Colour at the start of the gradient (or the solid colour).
    pub fn first_color(&self) -> Color {
        match *self {
            Background::Solid { color } => color,
            Background::LinearGradient { from, .. } => from,
        }
    }

    /// Gradient stops and direction. A solid fill is a gradient with equal stops.
    pub fn stops(&self) -> (f32, Color, Color) {
        match *self {
            Background::Solid { color } => (0.0, color, color),
            Background::LinearGradient { angle_deg, from, to } => (angle_deg, from, to),
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::gradient(
            135.0,
            Color::from_rgb8(0x39, 0x90, 0xe6),
            Color::from_rgb8(0x14, 0x9f, 0x7c),
        )
    }
}
