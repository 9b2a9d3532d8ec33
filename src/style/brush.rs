use super::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientDirection {
    Horizontal,
    Vertical,
}

/// How a shape is painted. Renderers receive brushes by reference and decide
/// how to rasterize them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Brush {
    Solid(Color),
    LinearGradient {
        start: Color,
        end: Color,
        direction: GradientDirection,
    },
}

impl Brush {
    pub const TRANSPARENT: Self = Self::Solid(Color::TRANSPARENT);

    pub const fn solid(color: Color) -> Self {
        Self::Solid(color)
    }

    pub fn is_transparent(&self) -> bool {
        match self {
            Self::Solid(color) => color.is_transparent(),
            Self::LinearGradient { start, end, .. } => {
                start.is_transparent() && end.is_transparent()
            }
        }
    }

    pub fn with_opacity(self, opacity: f32) -> Self {
        match self {
            Self::Solid(color) => Self::Solid(color.with_opacity(opacity)),
            Self::LinearGradient {
                start,
                end,
                direction,
            } => Self::LinearGradient {
                start: start.with_opacity(opacity),
                end: end.with_opacity(opacity),
                direction,
            },
        }
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Self::Solid(color)
    }
}
