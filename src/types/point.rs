use super::approx_eq;
use std::ops::{Add, Neg, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn is_close(self, other: Point) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::Point;

    #[test]
    fn arithmetic_is_componentwise() {
        let a = Point::new(1.5, -2.0);
        let b = Point::new(0.5, 4.0);
        assert_eq!(a + b, Point::new(2.0, 2.0));
        assert_eq!(a - b, Point::new(1.0, -6.0));
        assert_eq!(-a, Point::new(-1.5, 2.0));
    }

    #[test]
    fn is_close_tolerates_float_noise() {
        let a = Point::new(0.1 + 0.2, 1.0);
        assert!(a.is_close(Point::new(0.3, 1.0)));
        assert!(!a.is_close(Point::new(0.31, 1.0)));
    }
}
