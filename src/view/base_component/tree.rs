use super::{ElementTrait, LayoutFlags, LayoutSlot, Node, NodeId};
use crate::error::{LayoutError, LayoutResult};
use crate::property::{
    OwnerKind, Property, PropertyDefinition, PropertyId, PropertyType, PropertyValue, VISIBILITY,
    definition,
};
use crate::style::Visibility;
use crate::types::{Point, Rect, Size};
use crate::ui::{FixedAdvanceMeasure, Skin, TextMeasure};
use slotmap::SlotMap;
use smol_str::SmolStr;
use std::sync::Arc;

/// Fired after a property's effective value changed.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChanged {
    pub node: NodeId,
    pub property: PropertyId,
    pub old: PropertyValue,
    pub new: PropertyValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&PropertyChanged)>;

/// A property mutation queued during layout and applied between passes.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DeferredMutation {
    pub node: NodeId,
    pub property: PropertyId,
    pub value: PropertyValue,
}

pub struct ElementTree {
    pub(crate) nodes: SlotMap<NodeId, Node>,
    pub(crate) root: Option<NodeId>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
    pub(crate) deferred: Vec<DeferredMutation>,
    diagnostics: Vec<LayoutError>,
    needs_redraw: bool,
    text_measure: Box<dyn TextMeasure>,
    skin: Skin,
    pub(crate) trace_layout: bool,
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
            listeners: Vec::new(),
            next_listener_id: 1,
            deferred: Vec::new(),
            diagnostics: Vec::new(),
            needs_redraw: true,
            text_measure: Box::new(FixedAdvanceMeasure),
            skin: Skin::new(),
            trace_layout: false,
        }
    }

    pub fn create<E: ElementTrait>(&mut self, behavior: E) -> NodeId {
        self.create_boxed(Box::new(behavior))
    }

    pub fn create_boxed(&mut self, behavior: Box<dyn ElementTrait>) -> NodeId {
        let id = self.nodes.insert(Node::new(behavior));
        tracing::trace!(node = ?id, kind = %self.nodes[id].kind, "created element");
        id
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn kind(&self, id: NodeId) -> Option<OwnerKind> {
        self.nodes.get(id).map(|node| node.kind)
    }

    pub fn is_visual(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.is_visual)
    }

    pub fn behavior<E: ElementTrait>(&self, id: NodeId) -> Option<&E> {
        self.nodes
            .get(id)?
            .behavior
            .as_deref()?
            .as_any()
            .downcast_ref::<E>()
    }

    pub fn behavior_mut<E: ElementTrait>(&mut self, id: NodeId) -> Option<&mut E> {
        self.nodes
            .get_mut(id)?
            .behavior
            .as_deref_mut()?
            .as_any_mut()
            .downcast_mut::<E>()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, id: NodeId) -> LayoutResult<()> {
        self.node(id)?;
        if self.parent(id).is_some() {
            self.detach(id)?;
        }
        self.root = Some(id);
        self.invalidate_measure(id);
        Ok(())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> LayoutResult<()> {
        let index = self.children(parent).len();
        self.insert_child(parent, index, child)
    }

    /// Attaches `child` under `parent` at `index` (clamped), detaching it
    /// from its previous parent first.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> LayoutResult<()> {
        let parent_node = self.node(parent)?;
        let limit = parent_node.child_limit;
        let kind = parent_node.kind;
        let existing = parent_node.children.iter().filter(|id| **id != child).count();
        self.node(child)?;

        if parent == child || self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(LayoutError::CyclicAttach { parent, child });
        }
        if let Some(limit) = limit {
            if existing >= limit {
                return Err(LayoutError::ChildLimitExceeded {
                    node: parent,
                    kind,
                    limit,
                });
            }
        }

        if self.parent(child).is_some() {
            self.detach(child)?;
        }
        if self.root == Some(child) {
            self.root = None;
        }

        let parent_node = self.node_mut(parent)?;
        let index = index.min(parent_node.children.len());
        parent_node.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);

        self.inherit_visibility(child)?;
        self.invalidate_measure(child);
        self.needs_redraw = true;
        Ok(())
    }

    /// A visual attached below another visual starts with that visual's
    /// visibility.
    fn inherit_visibility(&mut self, child: NodeId) -> LayoutResult<()> {
        if !self.is_visual(child) {
            return Ok(());
        }
        let Some(source) = self.ancestors(child).find(|id| self.is_visual(*id)) else {
            return Ok(());
        };
        let visibility = self.get_value(source, VISIBILITY);
        self.set_value(child, VISIBILITY, visibility)?;
        Ok(())
    }

    pub fn detach(&mut self, child: NodeId) -> LayoutResult<()> {
        let Some(parent) = self.node(child)?.parent else {
            return Ok(());
        };
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.retain(|id| *id != child);
        }
        let node = self.node_mut(child)?;
        node.parent = None;
        node.layout.flags = LayoutFlags::all();
        self.invalidate_measure(parent);
        self.needs_redraw = true;
        Ok(())
    }

    /// Detaches `id` and frees it together with its whole subtree.
    pub fn remove(&mut self, id: NodeId) -> LayoutResult<()> {
        self.detach(id)?;
        if self.root == Some(id) {
            self.root = None;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children);
            }
        }
        self.deferred.retain(|mutation| self.nodes.contains_key(mutation.node));
        Ok(())
    }

    pub fn layout(&self, id: NodeId) -> Option<&LayoutSlot> {
        self.nodes.get(id).map(|node| &node.layout)
    }

    pub fn desired_size(&self, id: NodeId) -> Size {
        self.layout(id).map(|slot| slot.desired).unwrap_or(Size::ZERO)
    }

    /// Parent-local bounds from the last arrange.
    pub fn bounds(&self, id: NodeId) -> Rect {
        self.layout(id).map(|slot| slot.bounds).unwrap_or(Rect::EMPTY)
    }

    pub fn absolute_bounds(&self, id: NodeId) -> Rect {
        let origin = self
            .ancestors(id)
            .fold(Point::ZERO, |origin, ancestor| {
                origin + self.bounds(ancestor).location()
            });
        self.bounds(id).offset(origin)
    }

    /// Dirtiness propagates upward, so the root's flags cover the tree.
    pub fn is_layout_dirty(&self) -> bool {
        self.root
            .and_then(|root| self.layout(root))
            .is_some_and(|slot| !slot.is_clean())
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&PropertyChanged) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        before != self.listeners.len()
    }

    pub fn get_value<T: PropertyType>(&self, id: NodeId, property: Property<T>) -> T {
        match self.effective_value(id, property.id()) {
            Some(value) => T::from_value(&value).unwrap_or_else(|| {
                tracing::warn!(?property, actual = value.type_name(), "property value has the wrong type");
                T::default()
            }),
            None => T::default(),
        }
    }

    pub fn get_value_raw(&self, id: NodeId, property: PropertyId) -> LayoutResult<PropertyValue> {
        self.node(id)?;
        let def = definition_of(property)?;
        Ok(self.resolve(id, &def))
    }

    pub fn has_local_value(&self, id: NodeId, property: PropertyId) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|node| node.store.contains(property))
    }

    /// Stores a local value. Returns `Ok(false)` without notifying or
    /// invalidating when the effective value is unchanged.
    pub fn set_value<T: PropertyType>(
        &mut self,
        id: NodeId,
        property: Property<T>,
        value: T,
    ) -> LayoutResult<bool> {
        self.set_value_raw(id, property.id(), value.into_value())
    }

    pub fn set_value_raw(
        &mut self,
        id: NodeId,
        property: PropertyId,
        value: PropertyValue,
    ) -> LayoutResult<bool> {
        self.node(id)?;
        let def = definition_of(property)?;
        if !value.same_type(&def.default) {
            return Err(LayoutError::TypeMismatch {
                name: def.name.clone(),
                expected: def.value_type(),
            });
        }

        let old = self.resolve(id, &def);
        if old.same_value(&value) {
            return Ok(false);
        }
        self.node_mut(id)?.store.set(property, value.clone());
        self.property_changed(id, &def, old, value);
        Ok(true)
    }

    /// Removes the local value so the property resolves through
    /// inheritance or its default again.
    pub fn clear_value<T: PropertyType>(
        &mut self,
        id: NodeId,
        property: Property<T>,
    ) -> LayoutResult<bool> {
        self.clear_value_raw(id, property.id())
    }

    pub fn clear_value_raw(&mut self, id: NodeId, property: PropertyId) -> LayoutResult<bool> {
        let def = definition_of(property)?;
        let old = self.resolve(id, &def);
        if self.node_mut(id)?.store.remove(property).is_none() {
            return Ok(false);
        }
        let new = self.resolve(id, &def);
        if old.same_value(&new) {
            return Ok(false);
        }
        self.property_changed(id, &def, old, new);
        Ok(true)
    }

    fn effective_value(&self, id: NodeId, property: PropertyId) -> Option<PropertyValue> {
        let def = definition(property)?;
        Some(self.resolve(id, &def))
    }

    /// Local value, then (for inheritable properties) the nearest ancestor
    /// holding a local value, then the default.
    fn resolve(&self, id: NodeId, def: &PropertyDefinition) -> PropertyValue {
        if let Some(value) = self.nodes.get(id).and_then(|node| node.store.get(def.id)) {
            return value.clone();
        }
        if def.inherits() {
            let inherited = self
                .ancestors(id)
                .find_map(|ancestor| self.nodes.get(ancestor)?.store.get(def.id));
            if let Some(value) = inherited {
                return value.clone();
            }
        }
        def.default.clone()
    }

    fn property_changed(
        &mut self,
        id: NodeId,
        def: &PropertyDefinition,
        old: PropertyValue,
        new: PropertyValue,
    ) {
        let options = def.options;
        if options.affects_measure() {
            self.invalidate_measure(id);
            if def.inherits() {
                self.invalidate_inheriting_descendants(id, def.id);
            }
        } else if options.affects_arrange() {
            self.invalidate_arrange(id);
        }
        if options.affects_render() {
            self.needs_redraw = true;
        }

        let change = PropertyChanged {
            node: id,
            property: def.id,
            old,
            new,
        };
        self.notify(&change);
    }

    fn notify(&mut self, change: &PropertyChanged) {
        // listeners registered while notifying are kept for the next change
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in listeners.iter_mut() {
            listener(change);
        }
        listeners.append(&mut self.listeners);
        self.listeners = listeners;
    }

    /// Marks `id` and every ancestor measure- and arrange-dirty.
    pub fn invalidate_measure(&mut self, id: NodeId) {
        self.mark_upward(id, LayoutFlags::MEASURE_DIRTY | LayoutFlags::ARRANGE_DIRTY);
    }

    pub fn invalidate_arrange(&mut self, id: NodeId) {
        self.mark_upward(id, LayoutFlags::ARRANGE_DIRTY);
    }

    fn mark_upward(&mut self, id: NodeId, flags: LayoutFlags) {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(node) = self.nodes.get_mut(node_id) else {
                break;
            };
            node.layout.flags |= flags;
            current = node.parent;
        }
    }

    fn invalidate_inheriting_descendants(&mut self, id: NodeId, property: PropertyId) {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get_mut(current) else {
                continue;
            };
            // a local value shadows the change for the whole subtree
            if node.store.contains(property) {
                continue;
            }
            node.layout.flags |= LayoutFlags::MEASURE_DIRTY | LayoutFlags::ARRANGE_DIRTY;
            stack.extend(node.children.iter().copied());
        }
    }

    pub(crate) fn queue_deferred(&mut self, node: NodeId, property: PropertyId, value: PropertyValue) {
        self.deferred.push(DeferredMutation {
            node,
            property,
            value,
        });
    }

    pub fn pending_mutations(&self) -> usize {
        self.deferred.len()
    }

    /// Applies queued mutations in order. Returns how many changed a value.
    pub fn apply_deferred(&mut self) -> usize {
        let mut changed = 0;
        for mutation in std::mem::take(&mut self.deferred) {
            match self.set_value_raw(mutation.node, mutation.property, mutation.value) {
                Ok(true) => changed += 1,
                Ok(false) => {}
                Err(err) => self.push_diagnostic(err),
            }
        }
        changed
    }

    pub fn push_diagnostic(&mut self, err: LayoutError) {
        tracing::warn!(error = %err, "layout diagnostic");
        self.diagnostics.push(err);
    }

    pub fn diagnostics(&self) -> &[LayoutError] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<LayoutError> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn text_measure(&self) -> &dyn TextMeasure {
        self.text_measure.as_ref()
    }

    pub fn set_text_measure(&mut self, measure: impl TextMeasure + 'static) {
        self.text_measure = Box::new(measure);
        self.invalidate_all();
    }

    pub fn skin(&self) -> &Skin {
        &self.skin
    }

    /// Fonts and textures decide the natural size of labels and images, so
    /// every node is re-measured after the skin is touched.
    pub fn skin_mut(&mut self) -> &mut Skin {
        self.invalidate_all();
        &mut self.skin
    }

    pub fn set_trace_layout(&mut self, enabled: bool) {
        self.trace_layout = enabled;
    }

    fn invalidate_all(&mut self) {
        for node in self.nodes.values_mut() {
            node.layout.flags = LayoutFlags::all();
        }
    }

    pub fn visibility(&self, id: NodeId) -> Visibility {
        self.get_value(id, VISIBILITY)
    }

    pub(crate) fn node(&self, id: NodeId) -> LayoutResult<&Node> {
        self.nodes.get(id).ok_or(LayoutError::UnknownNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> LayoutResult<&mut Node> {
        self.nodes.get_mut(id).ok_or(LayoutError::UnknownNode(id))
    }
}

fn definition_of(property: PropertyId) -> LayoutResult<Arc<PropertyDefinition>> {
    definition(property).ok_or_else(|| LayoutError::TypeMismatch {
        name: SmolStr::new(format!("#{}", property.index())),
        expected: "registered",
    })
}
