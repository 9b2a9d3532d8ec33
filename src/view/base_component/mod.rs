use crate::property::{CORNER_RADIUS, IS_MOUSE_OVER, MARGIN, OwnerKind};
use crate::style::Visibility;
use crate::types::{Point, Rect};
use rustc_hash::FxHashSet;

mod core;
mod decorator;
mod element;
mod image;
mod label;
mod layout;
mod tree;

pub use self::core::*;
pub use decorator::*;
pub use element::*;
pub use image::*;
pub use label::*;
pub use layout::*;
pub use tree::*;

/// Absolute geometry of one node, for debugging and host-side queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxModelSnapshot {
    pub node_id: NodeId,
    pub parent_id: Option<NodeId>,
    pub kind: OwnerKind,
    /// Absolute, margin included.
    pub bounds: Rect,
    pub corner_radius: f32,
    pub visible: bool,
}

impl ElementTree {
    pub fn box_model_snapshot(&self, id: NodeId) -> Option<BoxModelSnapshot> {
        let node = self.nodes.get(id)?;
        Some(BoxModelSnapshot {
            node_id: id,
            parent_id: node.parent,
            kind: node.kind,
            bounds: self.absolute_bounds(id),
            corner_radius: self.get_value(id, CORNER_RADIUS),
            visible: self.visibility(id) == Visibility::Visible,
        })
    }

    /// Snapshots in pre-order from the root.
    pub fn collect_box_models(&self) -> Vec<BoxModelSnapshot> {
        let mut out = Vec::new();
        let Some(root) = self.root else {
            return out;
        };
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(snapshot) = self.box_model_snapshot(id) {
                out.push(snapshot);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Deepest visible node under `point`. Later siblings win, matching
    /// paint order.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        fn find(tree: &ElementTree, id: NodeId, origin: Point, point: Point) -> Option<NodeId> {
            if tree.visibility(id) != Visibility::Visible {
                return None;
            }
            let bounds = tree.bounds(id).offset(origin);
            let border_box = bounds.deflate(tree.get_value(id, MARGIN));
            if !point_in_rounded_rect(border_box, tree.get_value(id, CORNER_RADIUS), point) {
                return None;
            }

            for child in tree.children(id).iter().rev() {
                if let Some(hit) = find(tree, *child, bounds.location(), point) {
                    return Some(hit);
                }
            }

            Some(id)
        }

        find(self, self.root?, Point::ZERO, point)
    }

    /// Sets `IsMouseOver` on the hit node and its ancestors and clears it
    /// everywhere else. Returns whether any value changed.
    pub fn update_hover(&mut self, point: Option<Point>) -> bool {
        let target = point.and_then(|point| self.hit_test(point));
        let mut hovered = FxHashSet::default();
        if let Some(target) = target {
            hovered.insert(target);
            hovered.extend(self.ancestors(target));
        }

        let ids: Vec<NodeId> = self.nodes.keys().collect();
        let mut changed = false;
        for id in ids {
            match self.set_value(id, IS_MOUSE_OVER, hovered.contains(&id)) {
                Ok(value_changed) => changed |= value_changed,
                Err(err) => self.push_diagnostic(err),
            }
        }
        changed
    }
}

fn point_in_rounded_rect(rect: Rect, corner_radius: f32, point: Point) -> bool {
    if rect.width <= 0.0 || rect.height <= 0.0 || !rect.contains(point) {
        return false;
    }

    let r = corner_radius
        .max(0.0)
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    if r <= 0.0 {
        return true;
    }

    let (left, top, right, bottom) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    let corner = if point.x < left + r && point.y < top + r {
        Some(Point::new(left + r, top + r))
    } else if point.x > right - r && point.y < top + r {
        Some(Point::new(right - r, top + r))
    } else if point.x < left + r && point.y > bottom - r {
        Some(Point::new(left + r, bottom - r))
    } else if point.x > right - r && point.y > bottom - r {
        Some(Point::new(right - r, bottom - r))
    } else {
        None
    };

    match corner {
        Some(center) => {
            let d = point - center;
            d.x * d.x + d.y * d.y <= r * r
        }
        None => true,
    }
}
