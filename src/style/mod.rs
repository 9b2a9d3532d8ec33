mod brush;
mod color;
mod values;

pub use brush::*;
pub use color::*;
pub use values::*;
