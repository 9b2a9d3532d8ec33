mod content;
mod input;
mod manager;
mod render_backend;

pub use content::*;
pub use input::*;
pub use manager::*;
pub use render_backend::*;
