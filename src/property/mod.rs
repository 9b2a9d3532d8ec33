//! Dependency properties: typed, registered attributes whose metadata
//! controls inheritance and layout invalidation.

mod builtin;
mod metadata;
mod registry;
mod store;
mod value;

pub use builtin::*;
pub use metadata::*;
pub use registry::*;
pub use store::*;
pub use value::*;

use std::fmt;

/// Tag naming the element kind a property is declared on.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerKind(&'static str);

impl OwnerKind {
    pub const ELEMENT: Self = Self("Element");
    pub const VISUAL: Self = Self("Visual");
    pub const DECORATOR: Self = Self("Decorator");
    pub const BORDER: Self = Self("Border");
    pub const LABEL: Self = Self("Label");
    pub const IMAGE: Self = Self("Image");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
