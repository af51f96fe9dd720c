use std::fmt;

use crate::foundation::error::{VizError, VizResult};

pub use kurbo::{Point, Rect, Vec2};

/// Margin box in logical canvas units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 40.0,
            left: 40.0,
        }
    }
}

/// Logical drawing surface: fixed size plus the margin box renderers lay out inside.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            margins: Margins::default(),
        }
    }
}

impl Canvas {
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Drawable area inside the margins. Never inverted, even for oversized margins.
    pub fn content_box(&self) -> Rect {
        let x0 = self.margins.left.min(self.width);
        let y0 = self.margins.top.min(self.height);
        let x1 = (self.width - self.margins.right).max(x0);
        let y1 = (self.height - self.margins.bottom).max(y0);
        Rect::new(x0, y0, x1, y1)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    pub fn validate(&self) -> VizResult<()> {
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err(VizError::validation("canvas size must be finite"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(VizError::validation("canvas size must be > 0"));
        }
        Ok(())
    }
}

/// Straight-alpha RGBA8 color. Serialized as `#RRGGBB` / `#RRGGBBAA`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// `#rrggbb` without alpha, the form SVG paint attributes accept everywhere.
    pub fn to_hex_rgb(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn parse_hex(s: &str) -> VizResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> VizResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| VizError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        if !s.is_ascii() {
            return Err(VizError::validation("hex color must be ASCII"));
        }
        match s.len() {
            6 => Ok(Self::rgb(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            8 => Ok(Self::rgba(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
                hex_byte(&s[6..8])?,
            )),
            _ => Err(VizError::validation(
                "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
            )),
        }
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "{}", self.to_hex_rgb())
        } else {
            write!(f, "{}{:02x}", self.to_hex_rgb(), self.a)
        }
    }
}

impl serde::Serialize for Rgba8 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
