use super::{ElementTree, LayoutFlags, NodeId};
use crate::error::LayoutError;
use crate::property::{
    HEIGHT, MARGIN, MIN_HEIGHT, MIN_WIDTH, Property, PropertyType, VISIBILITY, WIDTH,
};
use crate::style::Visibility;
use crate::types::{Rect, Size};
use crate::ui::{Skin, TextMeasure};

pub const DEFAULT_MAX_LAYOUT_PASSES: usize = 64;

/// Handle a behaviour gets while its element is being measured or
/// arranged. Children are laid out through it; property writes are queued
/// and applied after the pass.
pub struct LayoutContext<'a> {
    tree: &'a mut ElementTree,
    node: NodeId,
}

impl<'a> LayoutContext<'a> {
    pub(crate) fn new(tree: &'a mut ElementTree, node: NodeId) -> Self {
        Self { tree, node }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn get<T: PropertyType>(&self, property: Property<T>) -> T {
        self.tree.get_value(self.node, property)
    }

    pub fn get_of<T: PropertyType>(&self, node: NodeId, property: Property<T>) -> T {
        self.tree.get_value(node, property)
    }

    pub fn children(&self) -> Vec<NodeId> {
        self.tree.children(self.node).to_vec()
    }

    pub fn measure_child(&mut self, child: NodeId, available: Size) -> Size {
        self.tree.measure(child, available)
    }

    pub fn arrange_child(&mut self, child: NodeId, rect: Rect) {
        self.tree.arrange(child, rect.clamp_non_negative());
    }

    pub fn desired_size(&self, child: NodeId) -> Size {
        self.tree.desired_size(child)
    }

    /// Queues a property write. It is applied once the current pass has
    /// finished, which may trigger another pass.
    pub fn set_deferred<T: PropertyType>(&mut self, node: NodeId, property: Property<T>, value: T) {
        self.tree
            .queue_deferred(node, property.id(), value.into_value());
    }

    pub fn text_measure(&self) -> &dyn TextMeasure {
        self.tree.text_measure()
    }

    pub fn skin(&self) -> &Skin {
        self.tree.skin()
    }
}

/// Outcome of one settle loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutReport {
    pub passes: usize,
    pub applied_mutations: usize,
    pub overflowed: bool,
}

impl ElementTree {
    /// Computes the desired size of `id` under `available`, margin
    /// included. May be called with infinite components.
    pub fn measure(&mut self, id: NodeId, available: Size) -> Size {
        let Some(node) = self.nodes.get(id) else {
            self.push_diagnostic(LayoutError::UnknownNode(id));
            return Size::ZERO;
        };
        if !node.layout.is_measure_dirty() && node.layout.last_available == Some(available) {
            return node.layout.desired;
        }

        let desired = if self.visibility(id) == Visibility::Collapsed {
            Size::ZERO
        } else {
            self.measure_core(id, available)
        };

        if self.trace_layout {
            tracing::trace!(node = ?id, kind = ?self.kind(id), ?available, ?desired, "measure");
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.layout.desired = desired;
            node.layout.last_available = Some(available);
            node.layout.flags.remove(LayoutFlags::MEASURE_DIRTY);
            node.layout.flags.insert(LayoutFlags::ARRANGE_DIRTY);
        }
        desired
    }

    fn measure_core(&mut self, id: NodeId, available: Size) -> Size {
        let margin = self.get_value(id, MARGIN);
        let width = self.get_value(id, WIDTH).px();
        let height = self.get_value(id, HEIGHT).px();

        let mut constraint = available.deflate(margin);
        if let Some(width) = width {
            constraint.width = width.min(constraint.width);
        }
        if let Some(height) = height {
            constraint.height = height.min(constraint.height);
        }

        let mut size = self.measure_behavior(id, constraint);
        if width.is_some() {
            size.width = constraint.width;
        }
        if height.is_some() {
            size.height = constraint.height;
        }
        size.width = size.width.max(self.get_value(id, MIN_WIDTH));
        size.height = size.height.max(self.get_value(id, MIN_HEIGHT));

        let desired = size.inflate(margin);
        if desired.is_finite() {
            return desired;
        }
        let kind = self.kind(id).unwrap_or(crate::property::OwnerKind::ELEMENT);
        self.push_diagnostic(LayoutError::UnresolvedInfinity {
            node: id,
            kind,
            size: desired,
        });
        desired.finite_or_zero()
    }

    fn measure_behavior(&mut self, id: NodeId, available: Size) -> Size {
        let Some(mut behavior) = self.nodes.get_mut(id).and_then(|node| node.behavior.take())
        else {
            return Size::ZERO;
        };
        let size = {
            let mut cx = LayoutContext::new(self, id);
            behavior.measure_override(&mut cx, available)
        };
        if let Some(node) = self.nodes.get_mut(id) {
            node.behavior = Some(behavior);
        }
        // NaN and negative sizes collapse to zero, infinity is reported by the caller
        Size::new(size.width.max(0.0), size.height.max(0.0))
    }

    /// Places `id` at `rect`, given in its parent's coordinates. Bounds
    /// become exactly `rect`.
    pub fn arrange(&mut self, id: NodeId, rect: Rect) {
        let Some(node) = self.nodes.get(id) else {
            self.push_diagnostic(LayoutError::UnknownNode(id));
            return;
        };
        if node.layout.is_measure_dirty() {
            let available = node.layout.last_available.unwrap_or(rect.size());
            self.measure(id, available);
        }

        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if !node.layout.is_arrange_dirty() && node.layout.last_final == Some(rect) {
            return;
        }
        node.layout.bounds = rect;
        node.layout.last_final = Some(rect);

        if self.trace_layout {
            tracing::trace!(node = ?id, kind = ?self.kind(id), ?rect, "arrange");
        }

        if self.get_value(id, VISIBILITY) != Visibility::Collapsed {
            let content = Rect::from_size(rect.size())
                .deflate(self.get_value(id, MARGIN))
                .clamp_non_negative();
            self.arrange_behavior(id, content);
        }

        if let Some(node) = self.nodes.get_mut(id) {
            node.layout.flags.remove(LayoutFlags::ARRANGE_DIRTY);
        }
    }

    fn arrange_behavior(&mut self, id: NodeId, content: Rect) {
        let Some(mut behavior) = self.nodes.get_mut(id).and_then(|node| node.behavior.take())
        else {
            return;
        };
        {
            let mut cx = LayoutContext::new(self, id);
            behavior.arrange_override(&mut cx, content);
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.behavior = Some(behavior);
        }
    }

    /// One measure and arrange pass from the root.
    pub fn update_layout(&mut self, available: Size) {
        let Some(root) = self.root else {
            return;
        };
        let desired = self.measure(root, available);
        let width = if available.width.is_finite() {
            available.width
        } else {
            desired.width
        };
        let height = if available.height.is_finite() {
            available.height
        } else {
            desired.height
        };
        self.arrange(root, Rect::new(0.0, 0.0, width, height));
    }

    /// Applies queued mutations and re-runs layout until the tree is clean
    /// or `max_passes` passes ran. Mutations still queued at the bound stay
    /// queued for the next call.
    pub fn run_layout(&mut self, available: Size, max_passes: usize) -> LayoutReport {
        let max_passes = max_passes.max(1);
        let mut report = LayoutReport {
            applied_mutations: self.apply_deferred(),
            ..LayoutReport::default()
        };

        while self.is_layout_dirty() {
            self.update_layout(available);
            report.passes += 1;
            if self.deferred.is_empty() {
                break;
            }
            if report.passes >= max_passes {
                let err = LayoutError::ReentrantLayoutOverflow {
                    passes: report.passes,
                    pending: self.deferred.len(),
                };
                self.push_diagnostic(err);
                report.overflowed = true;
                break;
            }
            report.applied_mutations += self.apply_deferred();
        }

        if report.passes > 0 {
            tracing::debug!(
                passes = report.passes,
                applied = report.applied_mutations,
                "layout settled"
            );
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_MAX_LAYOUT_PASSES, LayoutContext};
    use crate::error::LayoutError;
    use crate::property::{
        BORDER_THICKNESS, BOX, HEIGHT, MARGIN, MIN_WIDTH, ORIENTATION, OwnerKind, PADDING,
        SOURCE, VISIBILITY, WIDTH,
    };
    use crate::style::{BoxModel, Orientation, SizeValue, Visibility};
    use crate::types::{Rect, Size, Thickness};
    use crate::ui::TextureHandle;
    use crate::view::{
        Border, Element, ElementTrait, ElementTree, Image, Layoutable, NodeId, Renderable, Visual,
    };
    use std::any::Any;

    fn sized(tree: &mut ElementTree, width: f32, height: f32) -> NodeId {
        let node = tree.create(Visual);
        tree.set_value(node, WIDTH, SizeValue::Px(width)).expect("width");
        tree.set_value(node, HEIGHT, SizeValue::Px(height)).expect("height");
        node
    }

    #[test]
    fn arrange_sets_bounds_to_the_given_rect() {
        let mut tree = ElementTree::new();
        let node = sized(&mut tree, 10.0, 10.0);
        tree.set_value(node, MARGIN, Thickness::uniform(3.0)).expect("margin");
        tree.measure(node, Size::new(100.0, 100.0));
        let rect = Rect::new(5.0, 7.0, 40.0, 25.0);
        tree.arrange(node, rect);
        assert_eq!(tree.bounds(node), rect);
        assert!(tree.layout(node).expect("slot").is_clean());
    }

    #[test]
    fn measure_is_idempotent() {
        let mut tree = ElementTree::new();
        let parent = tree.create(Visual);
        let child = sized(&mut tree, 30.0, 12.0);
        tree.add_child(parent, child).expect("attach");
        tree.set_value(parent, PADDING, Thickness::uniform(2.0)).expect("padding");

        let first = tree.measure(parent, Size::new(100.0, 100.0));
        let second = tree.measure(parent, Size::new(100.0, 100.0));
        assert_eq!(first, second);
        assert_eq!(first, Size::new(34.0, 16.0));
    }

    #[test]
    fn block_stacks_children_vertically() {
        let mut tree = ElementTree::new();
        let root = tree.create(Visual);
        let children = [
            sized(&mut tree, 50.0, 10.0),
            sized(&mut tree, 50.0, 20.0),
            sized(&mut tree, 50.0, 30.0),
        ];
        tree.set_root(root).expect("root");
        for child in children {
            tree.add_child(root, child).expect("attach");
        }

        let desired = tree.measure(root, Size::INFINITY);
        assert_eq!(desired.height, 60.0);
        tree.update_layout(Size::new(80.0, 100.0));

        let offsets: Vec<f32> = children.iter().map(|c| tree.bounds(*c).y).collect();
        assert_eq!(offsets, vec![0.0, 10.0, 30.0]);
        // stretched across the stacking axis
        assert_eq!(tree.bounds(children[0]).width, 80.0);
    }

    #[test]
    fn horizontal_block_stacks_along_x() {
        let mut tree = ElementTree::new();
        let root = tree.create(Element);
        tree.set_value(root, ORIENTATION, Orientation::Horizontal).expect("orientation");
        let a = sized(&mut tree, 10.0, 5.0);
        let b = sized(&mut tree, 15.0, 8.0);
        tree.set_root(root).expect("root");
        tree.add_child(root, a).expect("attach");
        tree.add_child(root, b).expect("attach");

        assert_eq!(tree.measure(root, Size::INFINITY), Size::new(25.0, 8.0));
        tree.update_layout(Size::INFINITY);
        assert_eq!(tree.bounds(b), Rect::new(10.0, 0.0, 15.0, 8.0));
    }

    #[test]
    fn inline_wraps_children_onto_lines() {
        let mut tree = ElementTree::new();
        let root = tree.create(Visual);
        tree.set_value(root, BOX, BoxModel::Inline).expect("box");
        let items = [
            sized(&mut tree, 40.0, 10.0),
            sized(&mut tree, 40.0, 20.0),
            sized(&mut tree, 40.0, 15.0),
        ];
        tree.set_root(root).expect("root");
        for item in items {
            tree.add_child(root, item).expect("attach");
        }

        assert_eq!(tree.measure(root, Size::new(100.0, 100.0)), Size::new(80.0, 35.0));
        tree.update_layout(Size::new(100.0, 100.0));
        assert_eq!(tree.bounds(items[1]), Rect::new(40.0, 0.0, 40.0, 20.0));
        assert_eq!(tree.bounds(items[2]), Rect::new(0.0, 20.0, 40.0, 15.0));
    }

    #[test]
    fn border_and_padding_wrap_the_child() {
        let mut tree = ElementTree::new();
        let border = tree.create(Border);
        tree.set_value(border, BORDER_THICKNESS, Thickness::uniform(2.0)).expect("border");
        tree.set_value(border, PADDING, Thickness::uniform(1.0)).expect("padding");
        let child = sized(&mut tree, 10.0, 10.0);
        tree.add_child(border, child).expect("attach");

        assert_eq!(tree.measure(border, Size::INFINITY), Size::new(16.0, 16.0));
        tree.arrange(border, Rect::new(0.0, 0.0, 16.0, 16.0));
        assert_eq!(tree.bounds(child), Rect::new(3.0, 3.0, 10.0, 10.0));
    }

    #[test]
    fn infinite_constraint_with_finite_children_is_finite() {
        let mut tree = ElementTree::new();
        let root = tree.create(Visual);
        let child = sized(&mut tree, 25.0, 40.0);
        tree.add_child(root, child).expect("attach");
        let desired = tree.measure(root, Size::INFINITY);
        assert!(desired.is_finite());
        assert_eq!(desired, Size::new(25.0, 40.0));
        assert!(tree.diagnostics().is_empty());
    }

    struct Greedy;

    impl Layoutable for Greedy {
        fn measure_override(&mut self, _cx: &mut LayoutContext<'_>, available: Size) -> Size {
            available
        }
    }

    impl Renderable for Greedy {}

    impl ElementTrait for Greedy {
        fn kind(&self) -> OwnerKind {
            OwnerKind::new("Greedy")
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn unresolved_infinity_is_clamped_and_reported() {
        let mut tree = ElementTree::new();
        let node = tree.create(Greedy);
        let desired = tree.measure(node, Size::new(50.0, f32::INFINITY));
        assert_eq!(desired, Size::new(50.0, 0.0));
        let diagnostics = tree.take_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(diagnostics[0], LayoutError::UnresolvedInfinity { .. }));
    }

    #[test]
    fn explicit_size_is_clamped_to_available_and_min_size_applies() {
        let mut tree = ElementTree::new();
        let node = sized(&mut tree, 200.0, 10.0);
        assert_eq!(tree.measure(node, Size::new(120.0, 100.0)), Size::new(120.0, 10.0));

        let small = tree.create(Visual);
        tree.set_value(small, MIN_WIDTH, 8.0).expect("min");
        tree.set_value(small, MARGIN, Thickness::uniform(1.0)).expect("margin");
        assert_eq!(tree.measure(small, Size::INFINITY), Size::new(10.0, 2.0));
    }

    #[test]
    fn collapsed_elements_measure_to_zero() {
        let mut tree = ElementTree::new();
        let root = tree.create(Visual);
        let hidden = sized(&mut tree, 10.0, 10.0);
        let collapsed = sized(&mut tree, 10.0, 10.0);
        tree.add_child(root, hidden).expect("attach");
        tree.add_child(root, collapsed).expect("attach");
        tree.set_value(hidden, VISIBILITY, Visibility::Hidden).expect("hide");
        tree.set_value(collapsed, VISIBILITY, Visibility::Collapsed).expect("collapse");

        assert_eq!(tree.measure(root, Size::INFINITY), Size::new(10.0, 10.0));
        assert_eq!(tree.desired_size(collapsed), Size::ZERO);
    }

    #[test]
    fn arrange_change_does_not_dirty_measure() {
        let mut tree = ElementTree::new();
        let root = tree.create(Visual);
        let child = sized(&mut tree, 10.0, 10.0);
        tree.set_root(root).expect("root");
        tree.add_child(root, child).expect("attach");
        tree.update_layout(Size::new(50.0, 50.0));

        tree.invalidate_arrange(child);
        assert!(!tree.layout(root).expect("root").is_measure_dirty());
        assert!(tree.layout(root).expect("root").is_arrange_dirty());
        tree.update_layout(Size::new(50.0, 50.0));
        assert!(!tree.is_layout_dirty());
    }

    /// Grows its own width on every measure, so layout never settles.
    #[derive(Default)]
    struct Restless {
        measures: u32,
    }

    impl Layoutable for Restless {
        fn measure_override(&mut self, cx: &mut LayoutContext<'_>, _available: Size) -> Size {
            self.measures += 1;
            let node = cx.node();
            cx.set_deferred(node, WIDTH, SizeValue::Px(self.measures as f32));
            Size::ZERO
        }
    }

    impl Renderable for Restless {}

    impl ElementTrait for Restless {
        fn kind(&self) -> OwnerKind {
            OwnerKind::new("Restless")
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn reentrant_mutations_stop_at_the_pass_bound() {
        let mut tree = ElementTree::new();
        let root = tree.create(Restless::default());
        tree.set_root(root).expect("root");

        let report = tree.run_layout(Size::new(100.0, 100.0), DEFAULT_MAX_LAYOUT_PASSES);
        assert!(report.overflowed);
        assert_eq!(report.passes, DEFAULT_MAX_LAYOUT_PASSES);
        assert_eq!(tree.pending_mutations(), 1);
        let diagnostics = tree.take_diagnostics();
        assert!(matches!(
            diagnostics.as_slice(),
            [LayoutError::ReentrantLayoutOverflow { passes: 64, pending: 1 }]
        ));
        let measures = tree.behavior::<Restless>(root).expect("restless").measures;
        assert_eq!(measures, 64);
    }

    /// Writes the same NaN on every measure.
    struct NanWriter;

    impl Layoutable for NanWriter {
        fn measure_override(&mut self, cx: &mut LayoutContext<'_>, _available: Size) -> Size {
            let node = cx.node();
            cx.set_deferred(node, MIN_WIDTH, f32::NAN);
            Size::ZERO
        }
    }

    impl Renderable for NanWriter {}

    impl ElementTrait for NanWriter {
        fn kind(&self) -> OwnerKind {
            OwnerKind::new("NanWriter")
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn repeated_nan_writes_settle() {
        let mut tree = ElementTree::new();
        let root = tree.create(NanWriter);
        tree.set_root(root).expect("root");

        let report = tree.run_layout(Size::new(100.0, 100.0), DEFAULT_MAX_LAYOUT_PASSES);
        assert!(!report.overflowed);
        assert_eq!(report.passes, 2);
        assert_eq!(report.applied_mutations, 1);
        assert!(tree.take_diagnostics().is_empty());
    }

    #[test]
    fn loading_a_texture_remeasures_images() {
        let mut tree = ElementTree::new();
        let image = tree.create(Image);
        tree.set_value(image, SOURCE, "tex".into()).expect("source");
        tree.set_root(image).expect("root");
        tree.run_layout(Size::new(100.0, 100.0), DEFAULT_MAX_LAYOUT_PASSES);
        assert_eq!(tree.desired_size(image), Size::ZERO);

        tree.skin_mut().insert_texture(TextureHandle {
            id: 1,
            name: "tex".into(),
            size: Size::new(16.0, 16.0),
        });
        let report = tree.run_layout(Size::new(100.0, 100.0), DEFAULT_MAX_LAYOUT_PASSES);
        assert_eq!(report.passes, 1);
        assert_eq!(tree.desired_size(image), Size::new(16.0, 16.0));
    }

    #[test]
    fn deferred_mutation_settles_in_a_second_pass() {
        #[derive(Default)]
        struct Once {
            done: bool,
        }
        impl Layoutable for Once {
            fn measure_override(&mut self, cx: &mut LayoutContext<'_>, _available: Size) -> Size {
                if !self.done {
                    self.done = true;
                    let node = cx.node();
                    cx.set_deferred(node, HEIGHT, SizeValue::Px(42.0));
                }
                Size::ZERO
            }
        }
        impl Renderable for Once {}
        impl ElementTrait for Once {
            fn kind(&self) -> OwnerKind {
                OwnerKind::new("Once")
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }
        }

        let mut tree = ElementTree::new();
        let root = tree.create(Once::default());
        tree.set_root(root).expect("root");
        let report = tree.run_layout(Size::new(100.0, f32::INFINITY), DEFAULT_MAX_LAYOUT_PASSES);
        assert_eq!(report.passes, 2);
        assert_eq!(report.applied_mutations, 1);
        assert!(!report.overflowed);
        assert_eq!(tree.bounds(root).height, 42.0);
        assert!(tree.take_diagnostics().is_empty());
    }
}
