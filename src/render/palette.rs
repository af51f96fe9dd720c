use crate::foundation::core::Rgba8;

/// Fill and text colors shared by every render strategy.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgba8,
    /// Resting fill for bars, nodes and cells.
    pub fill: Rgba8,
    /// Highlight tint for most actions.
    pub active: Rgba8,
    /// Highlight tint when the step action is `swap`.
    pub complete: Rgba8,
    pub visited: Rgba8,
    pub text: Rgba8,
    pub muted_text: Rgba8,
    pub stroke: Rgba8,
    pub grid_line: Rgba8,
    pub cell_true: Rgba8,
    pub cell_false: Rgba8,
    pub bit_on: Rgba8,
    pub bit_off: Rgba8,
    pub header: Rgba8,
    pub row_even: Rgba8,
    pub row_odd: Rgba8,
    pub board_light: Rgba8,
    pub board_dark: Rgba8,
    pub error: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgba8::rgb(0x0f, 0x17, 0x2a),
            fill: Rgba8::rgb(0x63, 0x66, 0xf1),
            active: Rgba8::rgb(0xf5, 0x9e, 0x0b),
            complete: Rgba8::rgb(0x10, 0xb9, 0x81),
            visited: Rgba8::rgb(0x8b, 0x5c, 0xf6),
            text: Rgba8::rgb(0xf8, 0xfa, 0xfc),
            muted_text: Rgba8::rgb(0x94, 0xa3, 0xb8),
            stroke: Rgba8::rgb(0x33, 0x41, 0x55),
            grid_line: Rgba8::rgb(0x47, 0x55, 0x69),
            cell_true: Rgba8::rgb(0x16, 0x65, 0x34),
            cell_false: Rgba8::rgb(0x99, 0x1b, 0x1b),
            bit_on: Rgba8::rgb(0x22, 0xd3, 0xee),
            bit_off: Rgba8::rgb(0x1e, 0x29, 0x3b),
            header: Rgba8::rgb(0x33, 0x41, 0x55),
            row_even: Rgba8::rgb(0x1e, 0x29, 0x3b),
            row_odd: Rgba8::rgb(0x0f, 0x17, 0x2a),
            board_light: Rgba8::rgb(0xe2, 0xe8, 0xf0),
            board_dark: Rgba8::rgb(0x64, 0x74, 0x8b),
            error: Rgba8::rgb(0xf8, 0x71, 0x71),
        }
    }
}

impl Palette {
    /// Tint for highlighted elements under `action`.
    pub fn highlight_for(&self, action: Option<&str>) -> Rgba8 {
        match action.map(str::trim) {
            Some(a) if a.eq_ignore_ascii_case("swap") => self.complete,
            _ => self.active,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/palette.rs"]
mod tests;
