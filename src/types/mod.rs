mod point;
mod rect;
mod size;
mod thickness;

pub use point::*;
pub use rect::*;
pub use size::*;
pub use thickness::*;

pub(crate) const EPSILON: f32 = 0.0001;

/// Floating point comparison used by every geometric `is_close` helper.
pub fn approx_eq(a: f32, b: f32) -> bool {
    if a == b {
        return true;
    }
    (a - b).abs() < EPSILON
}
