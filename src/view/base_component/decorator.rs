use super::{LayoutContext, Layoutable, Renderable, paint_background, single_child};
use crate::property::{
    BACKGROUND, BORDER_BRUSH, BORDER_THICKNESS, CORNER_RADIUS, OPACITY, OwnerKind, PADDING,
};
use crate::types::{Rect, Size, Thickness};
use crate::view::{DrawContext, ElementTrait};
use std::any::Any;

fn measure_single(cx: &mut LayoutContext<'_>, available: Size, chrome: Thickness) -> Size {
    let inner = available.deflate(chrome);
    let content = match single_child(cx) {
        Some(child) => cx.measure_child(child, inner),
        None => Size::ZERO,
    };
    content.inflate(chrome)
}

fn arrange_single(cx: &mut LayoutContext<'_>, content: Rect, chrome: Thickness) {
    if let Some(child) = single_child(cx) {
        cx.arrange_child(child, content.deflate(chrome));
    }
}

/// Visual wrapping exactly one child with padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decorator;

impl Layoutable for Decorator {
    fn measure_override(&mut self, cx: &mut LayoutContext<'_>, available: Size) -> Size {
        let padding = cx.get(PADDING);
        measure_single(cx, available, padding)
    }

    fn arrange_override(&mut self, cx: &mut LayoutContext<'_>, content: Rect) {
        let padding = cx.get(PADDING);
        arrange_single(cx, content, padding);
    }
}

impl Renderable for Decorator {
    fn draw(&self, cx: &mut DrawContext<'_>) {
        paint_background(cx, 0.0);
    }
}

impl ElementTrait for Decorator {
    fn kind(&self) -> OwnerKind {
        OwnerKind::DECORATOR
    }

    fn is_visual(&self) -> bool {
        true
    }

    fn child_limit(&self) -> Option<usize> {
        Some(1)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Decorator that strokes a border and fills its background inside it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Border;

impl Border {
    fn chrome(cx: &LayoutContext<'_>) -> Thickness {
        cx.get(BORDER_THICKNESS) + cx.get(PADDING)
    }
}

impl Layoutable for Border {
    fn measure_override(&mut self, cx: &mut LayoutContext<'_>, available: Size) -> Size {
        let chrome = Self::chrome(cx);
        measure_single(cx, available, chrome)
    }

    fn arrange_override(&mut self, cx: &mut LayoutContext<'_>, content: Rect) {
        let chrome = Self::chrome(cx);
        arrange_single(cx, content, chrome);
    }
}

impl Renderable for Border {
    fn draw(&self, cx: &mut DrawContext<'_>) {
        let opacity = cx.get(OPACITY);
        let bounds = cx.border_box();
        let thickness = cx.get(BORDER_THICKNESS);
        let radius = cx.get(CORNER_RADIUS).max(0.0);
        let background = cx.get(BACKGROUND).with_opacity(opacity);

        if thickness.is_empty() {
            if !background.is_transparent() {
                cx.fill_rectangle(bounds, &background, radius);
            }
            return;
        }

        let stroke = cx.get(BORDER_BRUSH).with_opacity(opacity);
        if !stroke.is_transparent() {
            cx.draw_rectangle(bounds, &stroke, thickness, radius);
        }
        if !background.is_transparent() {
            let inner_radius = inner_corner_radius(radius, thickness);
            cx.fill_rectangle(bounds.deflate(thickness), &background, inner_radius);
        }
    }
}

impl ElementTrait for Border {
    fn kind(&self) -> OwnerKind {
        OwnerKind::BORDER
    }

    fn is_visual(&self) -> bool {
        true
    }

    fn child_limit(&self) -> Option<usize> {
        Some(1)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Radius of the fill inside a border, reduced by the thinnest edge.
/// Uniform and mixed thicknesses are treated alike: no extra pixel is
/// taken off for uniform borders and mixed ones still shrink the radius.
pub(crate) fn inner_corner_radius(radius: f32, thickness: Thickness) -> f32 {
    let inset = thickness.top.min(thickness.bottom).min(thickness.left.min(thickness.right));
    (radius - inset).max(0.0)
}
