use super::{LayoutContext, NodeId};
use crate::property::{BACKGROUND, BOX, OPACITY, ORIENTATION, OwnerKind, PADDING};
use crate::style::{BoxModel, Orientation};
use crate::types::{Rect, Size};
use crate::view::DrawContext;
use std::any::Any;

pub trait Layoutable {
    /// Desired size of the element's content, padding included, margin
    /// excluded. `available` is already margin-deflated and constrained by
    /// explicit Width/Height; it may be infinite.
    fn measure_override(&mut self, cx: &mut LayoutContext<'_>, available: Size) -> Size {
        measure_flow(cx, available)
    }

    /// Places children inside `content`, the margin-deflated rect in the
    /// element's own coordinates.
    fn arrange_override(&mut self, cx: &mut LayoutContext<'_>, content: Rect) {
        arrange_flow(cx, content);
    }
}

pub trait Renderable {
    fn draw(&self, _cx: &mut DrawContext<'_>) {}
}

pub trait ElementTrait: Layoutable + Renderable + Any {
    fn kind(&self) -> OwnerKind;

    /// Visuals paint and take part in visibility inheritance.
    fn is_visual(&self) -> bool {
        false
    }

    fn child_limit(&self) -> Option<usize> {
        None
    }

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Plain layout container. Does not paint.
#[derive(Debug, Clone, Copy, Default)]
pub struct Element;

impl Layoutable for Element {}
impl Renderable for Element {}

impl ElementTrait for Element {
    fn kind(&self) -> OwnerKind {
        OwnerKind::ELEMENT
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Container that paints its background.
#[derive(Debug, Clone, Copy, Default)]
pub struct Visual;

impl Layoutable for Visual {}

impl Renderable for Visual {
    fn draw(&self, cx: &mut DrawContext<'_>) {
        paint_background(cx, 0.0);
    }
}

impl ElementTrait for Visual {
    fn kind(&self) -> OwnerKind {
        OwnerKind::VISUAL
    }

    fn is_visual(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub(crate) fn paint_background(cx: &mut DrawContext<'_>, corner_radius: f32) {
    let brush = cx.get(BACKGROUND).with_opacity(cx.get(OPACITY));
    if brush.is_transparent() {
        return;
    }
    let bounds = cx.border_box();
    cx.fill_rectangle(bounds, &brush, corner_radius);
}

/// Default container measure: padding around the children, laid out by
/// the element's box model.
pub fn measure_flow(cx: &mut LayoutContext<'_>, available: Size) -> Size {
    let padding = cx.get(PADDING);
    let inner = available.deflate(padding);
    let orientation = cx.get(ORIENTATION);
    let content = match cx.get(BOX) {
        BoxModel::Block => measure_block(cx, inner, orientation),
        BoxModel::Inline => measure_inline(cx, inner),
    };
    content.inflate(padding)
}

pub fn arrange_flow(cx: &mut LayoutContext<'_>, content: Rect) {
    let inner = content.deflate(cx.get(PADDING));
    let orientation = cx.get(ORIENTATION);
    match cx.get(BOX) {
        BoxModel::Block => arrange_block(cx, inner, orientation),
        BoxModel::Inline => arrange_inline(cx, inner),
    }
}

fn measure_block(cx: &mut LayoutContext<'_>, inner: Size, orientation: Orientation) -> Size {
    let child_available = match orientation {
        Orientation::Vertical => Size::new(inner.width, f32::INFINITY),
        Orientation::Horizontal => Size::new(f32::INFINITY, inner.height),
    };

    let mut size = Size::ZERO;
    for child in cx.children() {
        let desired = cx.measure_child(child, child_available);
        match orientation {
            Orientation::Vertical => {
                size.width = size.width.max(desired.width);
                size.height += desired.height;
            }
            Orientation::Horizontal => {
                size.width += desired.width;
                size.height = size.height.max(desired.height);
            }
        }
    }
    size
}

fn arrange_block(cx: &mut LayoutContext<'_>, inner: Rect, orientation: Orientation) {
    let mut offset = 0.0;
    for child in cx.children() {
        let desired = cx.desired_size(child);
        let rect = match orientation {
            Orientation::Vertical => {
                Rect::new(inner.x, inner.y + offset, inner.width, desired.height)
            }
            Orientation::Horizontal => {
                Rect::new(inner.x + offset, inner.y, desired.width, inner.height)
            }
        };
        cx.arrange_child(child, rect);
        offset += match orientation {
            Orientation::Vertical => desired.height,
            Orientation::Horizontal => desired.width,
        };
    }
}

fn measure_inline(cx: &mut LayoutContext<'_>, inner: Size) -> Size {
    let children = cx.children();
    let sizes: Vec<Size> = children
        .iter()
        .map(|child| cx.measure_child(*child, inner))
        .collect();
    let lines = flow_lines(&sizes, inner.width);
    let width = lines.iter().fold(0.0f32, |acc, line| acc.max(line.width));
    let height = lines.iter().map(|line| line.height).sum::<f32>();
    Size::new(width, height)
}

fn arrange_inline(cx: &mut LayoutContext<'_>, inner: Rect) {
    let children = cx.children();
    let sizes: Vec<Size> = children.iter().map(|child| cx.desired_size(*child)).collect();
    let lines = flow_lines(&sizes, inner.width);

    let mut y = inner.y;
    for line in &lines {
        let mut x = inner.x;
        for &index in &line.items {
            let size = sizes[index];
            cx.arrange_child(children[index], Rect::new(x, y, size.width, size.height));
            x += size.width;
        }
        y += line.height;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FlowLine {
    pub items: Vec<usize>,
    pub width: f32,
    pub height: f32,
}

/// Splits items into left-to-right lines. A line breaks before an item that
/// would push it past `limit`; an item wider than `limit` gets its own line.
pub(crate) fn flow_lines(sizes: &[Size], limit: f32) -> Vec<FlowLine> {
    let mut lines = Vec::new();
    let mut current = FlowLine {
        items: Vec::new(),
        width: 0.0,
        height: 0.0,
    };

    for (index, size) in sizes.iter().enumerate() {
        if !current.items.is_empty() && current.width + size.width > limit {
            let full = std::mem::replace(
                &mut current,
                FlowLine {
                    items: Vec::new(),
                    width: 0.0,
                    height: 0.0,
                },
            );
            lines.push(full);
        }
        current.items.push(index);
        current.width += size.width;
        current.height = current.height.max(size.height);
    }
    if !current.items.is_empty() {
        lines.push(current);
    }
    lines
}

/// Returns the first child, if any. Decorators lay out at most one.
pub(crate) fn single_child(cx: &LayoutContext<'_>) -> Option<NodeId> {
    cx.children().first().copied()
}

#[cfg(test)]
mod tests {
    use super::flow_lines;
    use crate::types::Size;

    #[test]
    fn flow_lines_wrap_on_overflow() {
        let sizes = [
            Size::new(40.0, 10.0),
            Size::new(40.0, 20.0),
            Size::new(40.0, 15.0),
        ];
        let lines = flow_lines(&sizes, 100.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].items, vec![0, 1]);
        assert_eq!(lines[0].width, 80.0);
        assert_eq!(lines[0].height, 20.0);
        assert_eq!(lines[1].items, vec![2]);
    }

    #[test]
    fn oversized_item_gets_its_own_line() {
        let sizes = [Size::new(150.0, 10.0), Size::new(10.0, 10.0)];
        let lines = flow_lines(&sizes, 100.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].items, vec![0]);
    }

    #[test]
    fn infinite_limit_keeps_one_line() {
        let sizes = [Size::new(500.0, 10.0), Size::new(500.0, 12.0)];
        let lines = flow_lines(&sizes, f32::INFINITY);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].height, 12.0);
    }
}
