use super::approx_eq;
use std::ops::Add;

/// Per-edge lengths used for margins, padding and border strokes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Thickness {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Thickness {
    pub const ZERO: Self = Self::uniform(0.0);

    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self::new(horizontal, vertical, horizontal, vertical)
    }

    /// Left + right.
    pub fn horizontal(self) -> f32 {
        self.left + self.right
    }

    /// Top + bottom.
    pub fn vertical(self) -> f32 {
        self.top + self.bottom
    }

    pub fn min(self) -> f32 {
        self.left.min(self.top).min(self.right).min(self.bottom)
    }

    pub fn max(self) -> f32 {
        self.left.max(self.top).max(self.right).max(self.bottom)
    }

    pub fn is_empty(self) -> bool {
        self.left == 0.0 && self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0
    }

    pub fn is_uniform(self) -> bool {
        approx_eq(self.min(), self.max())
    }
}

impl Add for Thickness {
    type Output = Thickness;

    fn add(self, rhs: Thickness) -> Thickness {
        Thickness::new(
            self.left + rhs.left,
            self.top + rhs.top,
            self.right + rhs.right,
            self.bottom + rhs.bottom,
        )
    }
}
