use crate::style::{Brush, Color};
use crate::types::{Point, Rect, Thickness};
use crate::ui::{FontHandle, TextureHandle};

/// Drawing backend the paint traversal talks to. All coordinates are
/// absolute; implementations must not paint outside `clip`.
pub trait Renderer {
    fn fill_rectangle(&mut self, bounds: Rect, brush: &Brush, corner_radius: f32, clip: Rect);

    fn draw_rectangle(
        &mut self,
        bounds: Rect,
        brush: &Brush,
        thickness: Thickness,
        corner_radius: f32,
        clip: Rect,
    );

    fn draw_text(&mut self, text: &str, font: FontHandle, position: Point, color: Color, clip: Rect);

    fn draw_texture(&mut self, texture: &TextureHandle, bounds: Rect, tint: Color, clip: Rect);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn fill_rectangle(&mut self, bounds: Rect, brush: &Brush, corner_radius: f32, clip: Rect) {
        (**self).fill_rectangle(bounds, brush, corner_radius, clip);
    }

    fn draw_rectangle(
        &mut self,
        bounds: Rect,
        brush: &Brush,
        thickness: Thickness,
        corner_radius: f32,
        clip: Rect,
    ) {
        (**self).draw_rectangle(bounds, brush, thickness, corner_radius, clip);
    }

    fn draw_text(&mut self, text: &str, font: FontHandle, position: Point, color: Color, clip: Rect) {
        (**self).draw_text(text, font, position, color, clip);
    }

    fn draw_texture(&mut self, texture: &TextureHandle, bounds: Rect, tint: Color, clip: Rect) {
        (**self).draw_texture(texture, bounds, tint, clip);
    }
}

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        bounds: Rect,
        brush: Brush,
        corner_radius: f32,
        clip: Rect,
    },
    Stroke {
        bounds: Rect,
        brush: Brush,
        thickness: Thickness,
        corner_radius: f32,
        clip: Rect,
    },
    Text {
        text: String,
        font: FontHandle,
        position: Point,
        color: Color,
        clip: Rect,
    },
    Texture {
        name: String,
        bounds: Rect,
        tint: Color,
        clip: Rect,
    },
}

impl DrawCommand {
    pub fn clip(&self) -> Rect {
        match self {
            Self::Fill { clip, .. }
            | Self::Stroke { clip, .. }
            | Self::Text { clip, .. }
            | Self::Texture { clip, .. } => *clip,
        }
    }
}

/// Renderer that records every call, for headless hosts and tests.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Renderer for RecordingRenderer {
    fn fill_rectangle(&mut self, bounds: Rect, brush: &Brush, corner_radius: f32, clip: Rect) {
        self.commands.push(DrawCommand::Fill {
            bounds,
            brush: *brush,
            corner_radius,
            clip,
        });
    }

    fn draw_rectangle(
        &mut self,
        bounds: Rect,
        brush: &Brush,
        thickness: Thickness,
        corner_radius: f32,
        clip: Rect,
    ) {
        self.commands.push(DrawCommand::Stroke {
            bounds,
            brush: *brush,
            thickness,
            corner_radius,
            clip,
        });
    }

    fn draw_text(&mut self, text: &str, font: FontHandle, position: Point, color: Color, clip: Rect) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            font,
            position,
            color,
            clip,
        });
    }

    fn draw_texture(&mut self, texture: &TextureHandle, bounds: Rect, tint: Color, clip: Rect) {
        self.commands.push(DrawCommand::Texture {
            name: texture.name.to_string(),
            bounds,
            tint,
            clip,
        });
    }
}
