mod base_component;
mod draw;

pub use base_component::*;
pub use draw::*;
