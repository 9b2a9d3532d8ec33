use once_cell::sync::Lazy;

mod hex_color;

use hex_color::parse_hex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_rgba_u8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn alpha(self) -> u8 {
        self.a
    }

    /// Parses `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`. Invalid input yields
    /// a transparent color.
    pub fn hex(raw: &str) -> Self {
        match parse_hex(raw) {
            Some(color) => color,
            None => {
                tracing::debug!(raw, "invalid hex color, using transparent");
                Self::TRANSPARENT
            }
        }
    }

    pub fn from_hex(raw: &str) -> Option<Self> {
        parse_hex(raw)
    }

    /// Scales alpha by `opacity` (clamped to 0..=1).
    pub fn with_opacity(self, opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        Self {
            a: (self.a as f32 * opacity).round() as u8,
            ..self
        }
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Linear-light RGBA for renderers that blend in linear space.
    pub fn to_rgba_f32(self) -> [f32; 4] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
            self.a as f32 / 255.0,
        ]
    }
}

static SRGB8_TO_LINEAR: Lazy<[f32; 256]> = Lazy::new(|| {
    let mut t = [0.0f32; 256];
    for (i, slot) in t.iter_mut().enumerate() {
        *slot = srgb_to_linear_f32(i as f32 / 255.0);
    }
    t
});

pub fn srgb_to_linear(c: u8) -> f32 {
    SRGB8_TO_LINEAR[c as usize]
}

pub fn srgb_to_linear_f32(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn hex_accepts_short_and_long_forms() {
        assert_eq!(Color::hex("#fff"), Color::WHITE);
        assert_eq!(Color::hex("#ffffac"), Color::rgb(255, 255, 172));
        assert_eq!(Color::hex("#0000ff80"), Color::rgba(0, 0, 255, 128));
        assert_eq!(Color::hex("#f008"), Color::rgba(255, 0, 0, 136));
    }

    #[test]
    fn invalid_hex_is_transparent() {
        assert_eq!(Color::hex("fff"), Color::TRANSPARENT);
        assert_eq!(Color::hex("#ggg"), Color::TRANSPARENT);
        assert!(Color::from_hex("#12345").is_none());
    }

    #[test]
    fn opacity_scales_alpha() {
        assert_eq!(Color::WHITE.with_opacity(0.5).alpha(), 128);
        assert_eq!(Color::WHITE.with_opacity(2.0).alpha(), 255);
        assert!(Color::WHITE.with_opacity(0.0).is_transparent());
    }

    #[test]
    fn linear_conversion_keeps_extremes() {
        assert_eq!(Color::BLACK.to_rgba_f32(), [0.0, 0.0, 0.0, 1.0]);
        let [r, _, _, _] = Color::WHITE.to_rgba_f32();
        assert!((r - 1.0).abs() < 1e-6);
    }
}
