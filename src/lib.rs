//! Retained-mode UI layout engine: an element tree laid out by a measure
//! and arrange pass, driven by dependency properties with inheritance,
//! change notification and invalidation metadata.

pub mod config;
pub mod error;
pub mod property;
pub mod style;
pub mod types;
pub mod ui;
pub mod view;

pub use config::ManagerConfig;
pub use error::{LayoutError, LayoutResult};
pub use types::{Point, Rect, Size, Thickness};
pub use ui::Manager;
pub use view::{ElementTree, NodeId};
