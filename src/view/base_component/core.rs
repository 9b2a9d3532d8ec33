use super::ElementTrait;
use crate::property::{OwnerKind, PropertyStore};
use crate::types::{Rect, Size};
use bitflags::bitflags;

slotmap::new_key_type! {
    pub struct NodeId;
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LayoutFlags: u8 {
        const MEASURE_DIRTY = 1 << 0;
        const ARRANGE_DIRTY = 1 << 1;
    }
}

/// Cached results of the last measure and arrange of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSlot {
    pub desired: Size,
    /// Parent-local, margin included.
    pub bounds: Rect,
    pub last_available: Option<Size>,
    pub last_final: Option<Rect>,
    pub flags: LayoutFlags,
}

impl Default for LayoutSlot {
    fn default() -> Self {
        Self {
            desired: Size::ZERO,
            bounds: Rect::EMPTY,
            last_available: None,
            last_final: None,
            flags: LayoutFlags::MEASURE_DIRTY | LayoutFlags::ARRANGE_DIRTY,
        }
    }
}

impl LayoutSlot {
    pub fn is_measure_dirty(&self) -> bool {
        self.flags.contains(LayoutFlags::MEASURE_DIRTY)
    }

    pub fn is_arrange_dirty(&self) -> bool {
        self.flags.contains(LayoutFlags::ARRANGE_DIRTY)
    }

    pub fn is_clean(&self) -> bool {
        self.flags.is_empty()
    }
}

pub(crate) struct Node {
    /// Taken out while the node's own measure or arrange runs.
    pub behavior: Option<Box<dyn ElementTrait>>,
    pub kind: OwnerKind,
    pub is_visual: bool,
    pub child_limit: Option<usize>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub store: PropertyStore,
    pub layout: LayoutSlot,
}

impl Node {
    pub fn new(behavior: Box<dyn ElementTrait>) -> Self {
        Self {
            kind: behavior.kind(),
            is_visual: behavior.is_visual(),
            child_limit: behavior.child_limit(),
            behavior: Some(behavior),
            parent: None,
            children: Vec::new(),
            store: PropertyStore::new(),
            layout: LayoutSlot::default(),
        }
    }
}
