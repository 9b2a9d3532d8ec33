use crate::property::OwnerKind;
use crate::types::Size;
use crate::view::NodeId;
use smol_str::SmolStr;

pub type LayoutResult<T> = Result<T, LayoutError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("property {owner}.{name} is already registered")]
    DuplicateRegistration { owner: OwnerKind, name: SmolStr },

    #[error("invalid metadata for {owner}.{name}: {reason}")]
    InvalidMetadataCombination {
        owner: OwnerKind,
        name: SmolStr,
        reason: &'static str,
    },

    #[error("{kind} element {node:?} reported unresolved desired size {size:?}")]
    UnresolvedInfinity {
        node: NodeId,
        kind: OwnerKind,
        size: Size,
    },

    #[error("layout did not settle after {passes} passes, {pending} mutations deferred")]
    ReentrantLayoutOverflow { passes: usize, pending: usize },

    #[error("property {name} expects {expected} values")]
    TypeMismatch {
        name: SmolStr,
        expected: &'static str,
    },

    #[error("unknown element {0:?}")]
    UnknownNode(NodeId),

    #[error("{kind} element {node:?} accepts at most {limit} children")]
    ChildLimitExceeded {
        node: NodeId,
        kind: OwnerKind,
        limit: usize,
    },

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    CyclicAttach { parent: NodeId, child: NodeId },

    #[error("content error: {0}")]
    Content(String),
}

impl LayoutError {
    pub fn content(msg: impl Into<String>) -> Self {
        Self::Content(msg.into())
    }

    /// Registration errors abort startup; everything else is recovered
    /// locally by the tree or manager.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::DuplicateRegistration { .. } | Self::InvalidMetadataCombination { .. }
        )
    }
}
