use super::{Thickness, approx_eq};
use std::ops::Add;

/// A width/height pair. Components may be `f32::INFINITY` when used as a
/// measure constraint, meaning "unconstrained along that axis".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const INFINITY: Self = Self::new(f32::INFINITY, f32::INFINITY);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_finite(self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Shrinks by the thickness on every side, never below zero.
    /// Infinite components stay infinite.
    pub fn deflate(self, thickness: Thickness) -> Size {
        Size::new(
            (self.width - thickness.horizontal()).max(0.0),
            (self.height - thickness.vertical()).max(0.0),
        )
    }

    pub fn inflate(self, thickness: Thickness) -> Size {
        Size::new(
            self.width + thickness.horizontal(),
            self.height + thickness.vertical(),
        )
    }

    pub fn min(self, other: Size) -> Size {
        Size::new(self.width.min(other.width), self.height.min(other.height))
    }

    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Replaces NaN, infinite and negative components with zero.
    pub fn finite_or_zero(self) -> Size {
        fn fix(v: f32) -> f32 {
            if v.is_finite() { v.max(0.0) } else { 0.0 }
        }
        Size::new(fix(self.width), fix(self.height))
    }

    pub fn is_close(self, other: Size) -> bool {
        approx_eq(self.width, other.width) && approx_eq(self.height, other.height)
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        Size::new(self.width + rhs.width, self.height + rhs.height)
    }
}
