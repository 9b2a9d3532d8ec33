use super::{LayoutContext, Layoutable, Renderable, paint_background};
use crate::property::{FONT_SIZE, FONT_STYLE, FOREGROUND, OPACITY, OwnerKind, PADDING, TEXT};
use crate::types::Size;
use crate::view::{DrawContext, ElementTrait};
use std::any::Any;

/// Visual leaf showing a line of text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Label;

impl Layoutable for Label {
    fn measure_override(&mut self, cx: &mut LayoutContext<'_>, _available: Size) -> Size {
        let text = cx.get(TEXT);
        let measured = cx
            .text_measure()
            .measure_text(&text, cx.get(FONT_STYLE), cx.get(FONT_SIZE));
        measured.inflate(cx.get(PADDING))
    }
}

impl Renderable for Label {
    fn draw(&self, cx: &mut DrawContext<'_>) {
        paint_background(cx, 0.0);

        let text = cx.get(TEXT);
        if text.is_empty() {
            return;
        }
        let style = cx.get(FONT_STYLE);
        let size = cx.get(FONT_SIZE);
        let Some(font) = cx.skin().font(style, size) else {
            tracing::debug!(style = style.as_str(), size, "no font loaded for label");
            return;
        };
        let color = cx.get(FOREGROUND).with_opacity(cx.get(OPACITY));
        let position = cx.content_box().location();
        cx.draw_text(&text, font, position, color);
    }
}

impl ElementTrait for Label {
    fn kind(&self) -> OwnerKind {
        OwnerKind::LABEL
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
