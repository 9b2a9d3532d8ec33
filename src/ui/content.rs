use crate::error::{LayoutError, LayoutResult};
use crate::style::FontStyle;
use crate::types::Size;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle {
    pub id: u64,
    pub style: FontStyle,
    pub size: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureHandle {
    pub id: u64,
    pub name: SmolStr,
    /// Natural pixel size.
    pub size: Size,
}

/// Asset source used by `Manager::load`.
pub trait ContentLoader {
    fn load_font(&mut self, style: FontStyle, size: u16) -> LayoutResult<FontHandle>;
    fn load_texture(&mut self, name: &str) -> LayoutResult<TextureHandle>;
}

pub trait TextMeasure {
    fn measure_text(&self, text: &str, style: FontStyle, size: f32) -> Size;
}

/// Fixed advance metrics used when the host supplies no text measurer:
/// each char is half the font size wide, each line 1.2 font sizes tall.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedAdvanceMeasure;

impl FixedAdvanceMeasure {
    pub const ADVANCE: f32 = 0.5;
    pub const LINE_HEIGHT: f32 = 1.2;
}

impl TextMeasure for FixedAdvanceMeasure {
    fn measure_text(&self, text: &str, _style: FontStyle, size: f32) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let size = size.max(0.0);
        let mut lines = 0usize;
        let mut widest = 0usize;
        for line in text.lines() {
            lines += 1;
            widest = widest.max(line.chars().count());
        }
        // "a\n" still occupies the trailing line
        if text.ends_with('\n') {
            lines += 1;
        }
        Size::new(
            widest as f32 * size * Self::ADVANCE,
            lines as f32 * size * Self::LINE_HEIGHT,
        )
    }
}

/// Loaded fonts and textures, keyed the way elements ask for them.
#[derive(Debug, Clone, Default)]
pub struct Skin {
    fonts: FxHashMap<(FontStyle, u16), FontHandle>,
    textures: FxHashMap<SmolStr, TextureHandle>,
}

impl Skin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_font(&mut self, font: FontHandle) {
        self.fonts.insert((font.style, font.size), font);
    }

    pub fn insert_texture(&mut self, texture: TextureHandle) {
        self.textures.insert(texture.name.clone(), texture);
    }

    /// Font of `style` whose size is closest to `size`.
    pub fn font(&self, style: FontStyle, size: f32) -> Option<FontHandle> {
        self.fonts
            .values()
            .filter(|font| font.style == style)
            .min_by(|a, b| {
                let da = (a.size as f32 - size).abs();
                let db = (b.size as f32 - size).abs();
                da.total_cmp(&db).then(a.size.cmp(&b.size))
            })
            .copied()
    }

    pub fn texture(&self, name: &str) -> Option<&TextureHandle> {
        self.textures.get(name)
    }

    pub fn require_texture(&self, name: &str) -> LayoutResult<&TextureHandle> {
        self.texture(name)
            .ok_or_else(|| LayoutError::content(format!("texture `{name}` is not loaded")))
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty() && self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{FixedAdvanceMeasure, FontHandle, Skin, TextMeasure, TextureHandle};
    use crate::style::FontStyle;
    use crate::types::Size;

    fn font(id: u64, style: FontStyle, size: u16) -> FontHandle {
        FontHandle { id, style, size }
    }

    #[test]
    fn fixed_advance_counts_chars_and_lines() {
        let measure = FixedAdvanceMeasure;
        let single = measure.measure_text("abcd", FontStyle::Regular, 10.0);
        assert!(single.is_close(Size::new(20.0, 12.0)), "{single:?}");
        let multi = measure.measure_text("ab\nabcdef", FontStyle::Bold, 10.0);
        assert!(multi.is_close(Size::new(30.0, 24.0)), "{multi:?}");
        assert_eq!(measure.measure_text("", FontStyle::Regular, 10.0), Size::ZERO);
    }

    #[test]
    fn skin_picks_nearest_font_size_of_the_same_style() {
        let mut skin = Skin::new();
        skin.insert_font(font(1, FontStyle::Regular, 10));
        skin.insert_font(font(2, FontStyle::Regular, 14));
        skin.insert_font(font(3, FontStyle::Bold, 12));

        assert_eq!(skin.font(FontStyle::Regular, 13.0).map(|f| f.id), Some(2));
        assert_eq!(skin.font(FontStyle::Regular, 12.0).map(|f| f.id), Some(1));
        assert_eq!(skin.font(FontStyle::Bold, 64.0).map(|f| f.id), Some(3));
        assert_eq!(skin.font(FontStyle::Italic, 12.0), None);
    }

    #[test]
    fn missing_texture_is_a_content_error() {
        let mut skin = Skin::new();
        skin.insert_texture(TextureHandle {
            id: 7,
            name: "Shapes/circle16".into(),
            size: Size::new(16.0, 16.0),
        });
        assert!(skin.require_texture("Shapes/circle16").is_ok());
        assert!(skin.require_texture("Shapes/circle64").is_err());
    }
}
