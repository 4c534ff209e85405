//! Color utilities for the background.
//!
//! Terminal cells have no alpha channel, so translucency is emulated by
//! blending toward the background color.

use ratatui::style::Color;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Build from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// Linear interpolation toward `other`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

/// Canvas background.
pub const BACKGROUND: Rgb = Rgb::hex(0x1b1b1b);

pub const WHITE: Rgb = Rgb::hex(0xffffff);

/// Layer colors for the planar layout.
pub const PLANAR_PALETTE: [Rgb; 2] = [
    Rgb::hex(0xb76cfd), // purple
    Rgb::hex(0x24b0b7), // teal
];

/// Layer colors for the orbit layout.
pub const ORBIT_PALETTE: [Rgb; 4] = [
    Rgb::hex(0x00ffff), // cyan
    Rgb::hex(0xff00ff), // magenta
    Rgb::hex(0x00ff99), // neon green
    Rgb::hex(0xff3366), // neon pink
];

/// Paint `color` at the given opacity over the background.
pub fn blend(color: Rgb, alpha: f32) -> Color {
    BACKGROUND.lerp(color, alpha).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(Rgb::hex(0xb76cfd), Rgb(0xb7, 0x6c, 0xfd));
    }

    #[test]
    fn test_blend_extremes() {
        assert_eq!(blend(WHITE, 0.0), Color::Rgb(0x1b, 0x1b, 0x1b));
        assert_eq!(blend(WHITE, 1.0), Color::Rgb(255, 255, 255));
        assert_eq!(blend(WHITE, 4.0), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_lerp_midpoint() {
        assert_eq!(Rgb(0, 0, 0).lerp(Rgb(200, 100, 50), 0.5), Rgb(100, 50, 25));
    }
}
