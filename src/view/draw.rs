use crate::property::{BORDER_THICKNESS, BOX, MARGIN, PADDING, Property, PropertyType, VISIBILITY};
use crate::style::{BoxModel, Brush, Color, Visibility};
use crate::types::{Point, Rect, Thickness};
use crate::ui::{FontHandle, Renderer, Skin, TextureHandle};
use crate::view::{ElementTree, NodeId};

const DEBUG_MARGIN: Color = Color::RED;
const DEBUG_BORDER: Color = Color::BLUE;
const DEBUG_BLOCK: Color = Color::rgb(255, 255, 172);
const DEBUG_INLINE: Color = Color::rgb(172, 255, 255);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawOptions {
    /// Outline margin, border and content boxes of every visual.
    pub debug: bool,
}

/// What a visual sees while painting: its absolute bounds, the clip
/// inherited from its ancestors and the renderer.
pub struct DrawContext<'a> {
    tree: &'a ElementTree,
    renderer: &'a mut dyn Renderer,
    node: NodeId,
    bounds: Rect,
    clip: Rect,
}

impl<'a> DrawContext<'a> {
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn get<T: PropertyType>(&self, property: Property<T>) -> T {
        self.tree.get_value(self.node, property)
    }

    /// Absolute bounds, margin included.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn border_box(&self) -> Rect {
        self.bounds.deflate(self.get(MARGIN))
    }

    pub fn content_box(&self) -> Rect {
        self.border_box()
            .deflate(self.get(BORDER_THICKNESS) + self.get(PADDING))
    }

    pub fn clip(&self) -> Rect {
        self.clip
    }

    pub fn skin(&self) -> &Skin {
        self.tree.skin()
    }

    pub fn fill_rectangle(&mut self, bounds: Rect, brush: &Brush, corner_radius: f32) {
        self.renderer
            .fill_rectangle(bounds, brush, corner_radius, self.clip);
    }

    pub fn draw_rectangle(
        &mut self,
        bounds: Rect,
        brush: &Brush,
        thickness: Thickness,
        corner_radius: f32,
    ) {
        self.renderer
            .draw_rectangle(bounds, brush, thickness, corner_radius, self.clip);
    }

    pub fn draw_text(&mut self, text: &str, font: FontHandle, position: Point, color: Color) {
        self.renderer.draw_text(text, font, position, color, self.clip);
    }

    pub fn draw_texture(&mut self, texture: &TextureHandle, bounds: Rect, tint: Color) {
        self.renderer.draw_texture(texture, bounds, tint, self.clip);
    }

    fn draw_debug_overlay(&mut self) {
        let outline = Thickness::uniform(1.0);
        let content_color = match self.get(BOX) {
            BoxModel::Block => DEBUG_BLOCK,
            BoxModel::Inline => DEBUG_INLINE,
        };
        let (margin_box, border_box, content_box) =
            (self.bounds, self.border_box(), self.content_box());
        self.draw_rectangle(margin_box, &Brush::solid(DEBUG_MARGIN), outline, 0.0);
        self.draw_rectangle(border_box, &Brush::solid(DEBUG_BORDER), outline, 0.0);
        self.draw_rectangle(content_box, &Brush::solid(content_color), outline, 0.0);
    }
}

impl ElementTree {
    /// Paints the tree with the bounds of the last layout pass. Returns the
    /// number of visuals painted.
    pub fn draw(&self, renderer: &mut dyn Renderer, options: DrawOptions) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        if self.is_layout_dirty() {
            tracing::warn!("drawing a tree with pending layout, bounds are stale");
        }

        let clip = self.bounds(root);
        let mut painted = 0;
        self.draw_node(root, Point::ZERO, clip, renderer, options, &mut painted);
        painted
    }

    fn draw_node(
        &self,
        id: NodeId,
        origin: Point,
        clip: Rect,
        renderer: &mut dyn Renderer,
        options: DrawOptions,
        painted: &mut usize,
    ) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if self.get_value(id, VISIBILITY) != Visibility::Visible {
            return;
        }

        let bounds = node.layout.bounds.offset(origin);
        if node.is_visual {
            if let Some(behavior) = node.behavior.as_deref() {
                let mut cx = DrawContext {
                    tree: self,
                    renderer: &mut *renderer,
                    node: id,
                    bounds,
                    clip,
                };
                behavior.draw(&mut cx);
                if options.debug {
                    cx.draw_debug_overlay();
                }
                *painted += 1;
            }
        }

        let child_clip = clip.intersect(bounds);
        for child in &node.children {
            self.draw_node(*child, bounds.location(), child_clip, renderer, options, painted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DrawOptions;
    use crate::property::{
        BACKGROUND, BORDER_BRUSH, BORDER_THICKNESS, CORNER_RADIUS, FONT_SIZE, HEIGHT, MARGIN,
        PADDING, SOURCE, TEXT, VISIBILITY, WIDTH,
    };
    use crate::style::{Brush, Color, FontStyle, SizeValue, Visibility};
    use crate::types::{Point, Rect, Size, Thickness};
    use crate::ui::{DrawCommand, FontHandle, RecordingRenderer, TextureHandle};
    use crate::view::{Border, Element, ElementTree, Image, Label, Visual};

    fn filled(tree: &mut ElementTree, width: f32, height: f32, color: Color) -> crate::view::NodeId {
        let node = tree.create(Visual);
        tree.set_value(node, WIDTH, SizeValue::Px(width)).expect("width");
        tree.set_value(node, HEIGHT, SizeValue::Px(height)).expect("height");
        tree.set_value(node, BACKGROUND, Brush::solid(color)).expect("background");
        node
    }

    fn fills(commands: &[DrawCommand]) -> Vec<(Rect, Rect)> {
        commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Fill { bounds, clip, .. } => Some((*bounds, *clip)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn paints_pre_order_with_absolute_bounds_and_ancestor_clip() {
        let mut tree = ElementTree::new();
        let root = filled(&mut tree, 100.0, 100.0, Color::WHITE);
        let panel = tree.create(Element);
        tree.set_value(panel, MARGIN, Thickness::new(10.0, 5.0, 0.0, 0.0)).expect("margin");
        let child = filled(&mut tree, 200.0, 20.0, Color::RED);
        tree.set_root(root).expect("root");
        tree.add_child(root, panel).expect("attach");
        tree.add_child(panel, child).expect("attach");
        tree.update_layout(Size::new(100.0, 100.0));

        let mut renderer = RecordingRenderer::new();
        let painted = tree.draw(&mut renderer, DrawOptions::default());
        assert_eq!(painted, 2);

        let fills = fills(&renderer.commands);
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0], (Rect::new(0.0, 0.0, 100.0, 100.0), Rect::new(0.0, 0.0, 100.0, 100.0)));
        // placed at the panel's content origin, clipped to the panel's bounds
        assert_eq!(fills[1].0, Rect::new(10.0, 5.0, 90.0, 20.0));
        assert_eq!(fills[1].1, Rect::new(0.0, 0.0, 100.0, 25.0));
    }

    #[test]
    fn child_of_collapsed_visual_is_skipped() {
        let mut tree = ElementTree::new();
        let root = filled(&mut tree, 50.0, 50.0, Color::WHITE);
        let parent = filled(&mut tree, 50.0, 20.0, Color::BLUE);
        tree.set_root(root).expect("root");
        tree.add_child(root, parent).expect("attach");
        tree.set_value(parent, VISIBILITY, Visibility::Collapsed).expect("collapse");
        let child = filled(&mut tree, 10.0, 10.0, Color::RED);
        tree.add_child(parent, child).expect("attach");
        assert_eq!(tree.visibility(child), Visibility::Collapsed);

        // even when the parent comes back, the child keeps its copied state
        tree.set_value(parent, VISIBILITY, Visibility::Visible).expect("show");
        tree.update_layout(Size::new(50.0, 50.0));
        let mut renderer = RecordingRenderer::new();
        tree.draw(&mut renderer, DrawOptions::default());
        let colors: Vec<Brush> = renderer
            .commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Fill { brush, .. } => Some(*brush),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![Brush::solid(Color::WHITE), Brush::solid(Color::BLUE)]);
    }

    #[test]
    fn hidden_subtree_is_skipped_but_keeps_its_space() {
        let mut tree = ElementTree::new();
        let root = tree.create(Visual);
        let hidden = filled(&mut tree, 10.0, 10.0, Color::RED);
        let after = filled(&mut tree, 10.0, 10.0, Color::BLUE);
        tree.set_root(root).expect("root");
        tree.add_child(root, hidden).expect("attach");
        tree.add_child(root, after).expect("attach");
        tree.set_value(hidden, VISIBILITY, Visibility::Hidden).expect("hide");
        tree.update_layout(Size::new(40.0, 40.0));

        let mut renderer = RecordingRenderer::new();
        tree.draw(&mut renderer, DrawOptions::default());
        let fills = fills(&renderer.commands);
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].0, Rect::new(0.0, 10.0, 40.0, 10.0));
    }

    #[test]
    fn border_strokes_then_fills_with_reduced_radius() {
        let mut tree = ElementTree::new();
        let border = tree.create(Border);
        tree.set_root(border).expect("root");
        tree.set_value(border, BORDER_THICKNESS, Thickness::uniform(2.0)).expect("thickness");
        tree.set_value(border, BORDER_BRUSH, Brush::solid(Color::BLACK)).expect("brush");
        tree.set_value(border, BACKGROUND, Brush::solid(Color::WHITE)).expect("background");
        tree.set_value(border, CORNER_RADIUS, 6.0).expect("radius");
        tree.update_layout(Size::new(30.0, 20.0));

        let mut renderer = RecordingRenderer::new();
        tree.draw(&mut renderer, DrawOptions::default());
        assert_eq!(
            renderer.commands,
            vec![
                DrawCommand::Stroke {
                    bounds: Rect::new(0.0, 0.0, 30.0, 20.0),
                    brush: Brush::solid(Color::BLACK),
                    thickness: Thickness::uniform(2.0),
                    corner_radius: 6.0,
                    clip: Rect::new(0.0, 0.0, 30.0, 20.0),
                },
                DrawCommand::Fill {
                    bounds: Rect::new(2.0, 2.0, 26.0, 16.0),
                    brush: Brush::solid(Color::WHITE),
                    corner_radius: 4.0,
                    clip: Rect::new(0.0, 0.0, 30.0, 20.0),
                },
            ]
        );
    }

    #[test]
    fn borderless_border_fills_bounds_with_full_radius() {
        let mut tree = ElementTree::new();
        let border = tree.create(Border);
        tree.set_root(border).expect("root");
        tree.set_value(border, BACKGROUND, Brush::solid(Color::WHITE)).expect("background");
        tree.set_value(border, CORNER_RADIUS, 6.0).expect("radius");
        tree.update_layout(Size::new(30.0, 20.0));

        let mut renderer = RecordingRenderer::new();
        tree.draw(&mut renderer, DrawOptions::default());
        assert!(matches!(
            renderer.commands.as_slice(),
            [DrawCommand::Fill { corner_radius, .. }] if *corner_radius == 6.0
        ));
    }

    #[test]
    fn debug_overlay_outlines_each_box() {
        let mut tree = ElementTree::new();
        let root = tree.create(Visual);
        tree.set_root(root).expect("root");
        tree.set_value(root, MARGIN, Thickness::uniform(4.0)).expect("margin");
        tree.set_value(root, PADDING, Thickness::uniform(2.0)).expect("padding");
        tree.update_layout(Size::new(40.0, 40.0));

        let mut renderer = RecordingRenderer::new();
        tree.draw(&mut renderer, DrawOptions { debug: true });
        let strokes: Vec<(Rect, Brush)> = renderer
            .commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Stroke { bounds, brush, .. } => Some((*bounds, *brush)),
                _ => None,
            })
            .collect();
        assert_eq!(
            strokes,
            vec![
                (Rect::new(0.0, 0.0, 40.0, 40.0), Brush::solid(Color::RED)),
                (Rect::new(4.0, 4.0, 32.0, 32.0), Brush::solid(Color::BLUE)),
                (Rect::new(6.0, 6.0, 28.0, 28.0), Brush::solid(Color::rgb(255, 255, 172))),
            ]
        );
    }

    #[test]
    fn label_and_image_draw_through_the_skin() {
        let mut tree = ElementTree::new();
        let root = tree.create(Visual);
        let label = tree.create(Label);
        let image = tree.create(Image);
        tree.set_root(root).expect("root");
        tree.add_child(root, label).expect("attach");
        tree.add_child(root, image).expect("attach");
        tree.set_value(root, FONT_SIZE, 10.0).expect("font size");
        tree.set_value(label, TEXT, "hello".into()).expect("text");
        tree.set_value(image, SOURCE, "Shapes/circle16".into()).expect("source");

        let font = FontHandle {
            id: 1,
            style: FontStyle::Regular,
            size: 10,
        };
        tree.skin_mut().insert_font(font);
        tree.skin_mut().insert_texture(TextureHandle {
            id: 2,
            name: "Shapes/circle16".into(),
            size: Size::new(16.0, 16.0),
        });
        tree.update_layout(Size::new(100.0, 100.0));

        assert!(tree.desired_size(label).is_close(Size::new(25.0, 12.0)));
        assert_eq!(tree.desired_size(image), Size::new(16.0, 16.0));

        let mut renderer = RecordingRenderer::new();
        tree.draw(&mut renderer, DrawOptions::default());
        assert!(renderer.commands.iter().any(|command| matches!(
            command,
            DrawCommand::Text { text, font: f, position, color, .. }
                if text == "hello" && *f == font && *position == Point::ZERO && *color == Color::BLACK
        )));
        let image_top = tree.absolute_bounds(image).y;
        assert!(renderer.commands.iter().any(|command| matches!(
            command,
            DrawCommand::Texture { name, bounds, .. }
                if name == "Shapes/circle16" && bounds.y == image_top
        )));
    }
}
