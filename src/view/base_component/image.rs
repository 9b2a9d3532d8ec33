use super::{LayoutContext, Layoutable, Renderable, paint_background};
use crate::property::{OPACITY, OwnerKind, PADDING, SOURCE};
use crate::style::Color;
use crate::types::Size;
use crate::view::{DrawContext, ElementTrait};
use std::any::Any;

/// Visual leaf showing a texture from the skin at its natural size.
#[derive(Debug, Clone, Copy, Default)]
pub struct Image;

impl Layoutable for Image {
    fn measure_override(&mut self, cx: &mut LayoutContext<'_>, _available: Size) -> Size {
        let source = cx.get(SOURCE);
        let natural = cx
            .skin()
            .texture(&source)
            .map(|texture| texture.size)
            .unwrap_or(Size::ZERO);
        natural.inflate(cx.get(PADDING))
    }
}

impl Renderable for Image {
    fn draw(&self, cx: &mut DrawContext<'_>) {
        paint_background(cx, 0.0);

        let source = cx.get(SOURCE);
        if source.is_empty() {
            return;
        }
        let Some(texture) = cx.skin().texture(&source).cloned() else {
            tracing::debug!(%source, "texture not loaded");
            return;
        };
        let tint = Color::WHITE.with_opacity(cx.get(OPACITY));
        let bounds = cx.content_box();
        cx.draw_texture(&texture, bounds, tint);
    }
}

impl ElementTrait for Image {
    fn kind(&self) -> OwnerKind {
        OwnerKind::IMAGE
    }

    fn is_visual(&self) -> bool {
        true
    }

    fn child_limit(&self) -> Option<usize> {
        Some(0)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
