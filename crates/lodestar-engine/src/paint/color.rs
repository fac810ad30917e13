/// Straight-alpha RGBA tint, each channel in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Identity tint: leaves texels unchanged.
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    /// Creates a color from straight components; each channel is clamped to `[0, 1]`.
    ///
    /// NaN channels become `0`.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r: unit(r), g: unit(g), b: unit(b), a: unit(a) }
    }

    /// Creates a color from sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: f32::from(a) / 255.0,
        }
    }

    /// Creates an opaque color from a packed `0xRRGGBB` value.
    ///
    /// Bits above the low 24 are ignored.
    #[inline]
    pub fn from_rgb_hex(rgb: u32) -> Self {
        let rgb = rgb & 0x00FF_FFFF;
        Self::from_srgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255)
    }

    /// Returns the packed `0xRRGGBB` value (alpha dropped).
    #[inline]
    pub fn to_rgb_hex(self) -> u32 {
        let c = |v: f32| (unit(v) * 255.0).round() as u32;
        (c(self.r) << 16) | (c(self.g) << 8) | c(self.b)
    }

    /// Same RGB, alpha replaced (clamped to `[0, 1]`).
    #[inline]
    #[must_use]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: unit(a), ..self }
    }

    #[inline]
    pub fn is_white(self) -> bool {
        self == Self::WHITE
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[inline]
fn unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_through_channels() {
        let c = Color::from_rgb_hex(0x3366FF);
        assert_eq!(c.a, 1.0);
        assert_eq!(c.to_rgb_hex(), 0x3366FF);
    }

    #[test]
    fn hex_ignores_high_bits() {
        assert_eq!(Color::from_rgb_hex(0xAB_FFFFFF), Color::WHITE);
    }

    #[test]
    fn straight_clamps_and_scrubs_nan() {
        let c = Color::from_straight(2.0, -1.0, f32::NAN, 0.5);
        assert_eq!(c, Color { r: 1.0, g: 0.0, b: 0.0, a: 0.5 });
    }
}
