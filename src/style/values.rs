/// Explicit size preference of an element along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SizeValue {
    #[default]
    Auto,
    Px(f32),
}

impl SizeValue {
    pub fn px(self) -> Option<f32> {
        match self {
            Self::Auto => None,
            Self::Px(value) => Some(value.max(0.0)),
        }
    }
}

impl From<f32> for SizeValue {
    fn from(value: f32) -> Self {
        Self::Px(value)
    }
}

/// Flow discipline an element applies to its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoxModel {
    /// Children stack along the element's orientation without overlap.
    #[default]
    Block,
    /// Children flow left to right and wrap onto new lines.
    Inline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Visible,
    /// Takes part in layout but is not drawn.
    Hidden,
    /// Neither laid out nor drawn.
    Collapsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
}

impl FontStyle {
    pub const ALL: [FontStyle; 3] = [FontStyle::Regular, FontStyle::Bold, FontStyle::Italic];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Bold => "Bold",
            Self::Italic => "Italic",
        }
    }
}
