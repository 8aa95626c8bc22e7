//! sRGB colours parsed from `#RRGGBB` literals
//!
//! Every colour in the floor plan is authored as a hex literal. [`Color::hex`] is a
//! `const fn` so palettes can live in `const` items and a typo fails at compile time.

/// An opaque sRGB colour with 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#RRGGBB` literal (case-insensitive)
    ///
    /// # Panics
    /// Panics on malformed input. In a `const` context this is a compile error.
    pub const fn hex(literal: &str) -> Self {
        let bytes = literal.as_bytes();
        assert!(
            bytes.len() == 7 && bytes[0] == b'#',
            "colour literal must look like #RRGGBB"
        );
        Self {
            r: hex_byte(bytes[1], bytes[2]),
            g: hex_byte(bytes[3], bytes[4]),
            b: hex_byte(bytes[5], bytes[6]),
        }
    }

    /// Channels as 0.0..=1.0 in sRGB space (what imgui expects)
    pub fn to_srgb_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Channels converted to linear space for shading
    pub fn to_linear_f32(self) -> [f32; 3] {
        let [r, g, b] = self.to_srgb_f32();
        [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b)]
    }

    /// sRGB channels with an alpha component appended
    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        let [r, g, b] = self.to_srgb_f32();
        [r, g, b, alpha]
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

const fn hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("invalid hex digit in colour literal"),
    }
}

const fn hex_byte(hi: u8, lo: u8) -> u8 {
    hex_digit(hi) * 16 + hex_digit(lo)
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
