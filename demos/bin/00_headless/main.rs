use pyra_ui::property::{
    BACKGROUND, BORDER_BRUSH, BORDER_THICKNESS, BOX, CORNER_RADIUS, FONT_SIZE, FOREGROUND, MARGIN,
    PADDING, SOURCE, TEXT, WIDTH,
};
use pyra_ui::style::{BoxModel, Brush, Color, FontStyle, SizeValue};
use pyra_ui::ui::{
    ContentLoader, FontHandle, InputSource, InputState, Key, Renderer, TextureHandle,
};
use pyra_ui::{LayoutResult, Manager, ManagerConfig, Point, Rect, Size, Thickness};
use tracing_subscriber::EnvFilter;

/// Renderer that only logs what it would paint.
#[derive(Default)]
struct LogRenderer {
    calls: usize,
}

impl Renderer for LogRenderer {
    fn fill_rectangle(&mut self, bounds: Rect, brush: &Brush, corner_radius: f32, clip: Rect) {
        self.calls += 1;
        tracing::debug!(?bounds, ?brush, corner_radius, ?clip, "fill");
    }

    fn draw_rectangle(
        &mut self,
        bounds: Rect,
        brush: &Brush,
        thickness: Thickness,
        corner_radius: f32,
        clip: Rect,
    ) {
        self.calls += 1;
        tracing::debug!(?bounds, ?brush, ?thickness, corner_radius, ?clip, "stroke");
    }

    fn draw_text(&mut self, text: &str, font: FontHandle, position: Point, color: Color, clip: Rect) {
        self.calls += 1;
        tracing::debug!(text, ?font, ?position, ?color, ?clip, "text");
    }

    fn draw_texture(&mut self, texture: &TextureHandle, bounds: Rect, tint: Color, clip: Rect) {
        self.calls += 1;
        tracing::debug!(texture = %texture.name, ?bounds, ?tint, ?clip, "texture");
    }
}

/// Hands out synthetic handles instead of reading files.
#[derive(Default)]
struct SyntheticContent {
    next_id: u64,
}

impl ContentLoader for SyntheticContent {
    fn load_font(&mut self, style: FontStyle, size: u16) -> LayoutResult<FontHandle> {
        self.next_id += 1;
        Ok(FontHandle {
            id: self.next_id,
            style,
            size,
        })
    }

    fn load_texture(&mut self, name: &str) -> LayoutResult<TextureHandle> {
        self.next_id += 1;
        let side = name
            .trim_start_matches("Shapes/circle")
            .parse::<f32>()
            .unwrap_or(16.0);
        Ok(TextureHandle {
            id: self.next_id,
            name: name.into(),
            size: Size::new(side, side),
        })
    }
}

/// Moves the mouse diagonally and taps F2 on frame 3.
#[derive(Default)]
struct ScriptedInput {
    frame: u32,
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputState {
        self.frame += 1;
        let position = Point::new(self.frame as f32 * 40.0, self.frame as f32 * 30.0);
        let mut state = InputState::default().with_mouse_position(position);
        state.set_key_pressed(Key::F(2), self.frame == 3);
        state
    }
}

fn main() -> LayoutResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ManagerConfig::from_env().with_viewport(Size::new(640.0, 480.0));
    let mut ui = Manager::new(
        LogRenderer::default(),
        SyntheticContent::default(),
        ScriptedInput::default(),
        config,
    );
    ui.load();
    let root = ui.init()?;

    let tree = ui.tree_mut();
    tree.set_value(root, PADDING, Thickness::uniform(8.0))?;
    tree.set_value(root, FONT_SIZE, 14.0)?;
    tree.set_value(root, FOREGROUND, Color::hex("#1f2933"))?;

    let card = tree.create(pyra_ui::view::Border);
    tree.set_value(card, BORDER_THICKNESS, Thickness::uniform(2.0))?;
    tree.set_value(card, BORDER_BRUSH, Brush::solid(Color::hex("#3e4c59")))?;
    tree.set_value(card, BACKGROUND, Brush::solid(Color::hex("#f5f7fa")))?;
    tree.set_value(card, CORNER_RADIUS, 6.0)?;
    tree.set_value(card, PADDING, Thickness::symmetric(12.0, 6.0))?;
    tree.add_child(root, card)?;

    let title = tree.create(pyra_ui::view::Label);
    tree.set_value(title, TEXT, "Hello from the layout engine".into())?;
    tree.add_child(card, title)?;

    let strip = tree.create(pyra_ui::view::Visual);
    tree.set_value(strip, BOX, BoxModel::Inline)?;
    tree.set_value(strip, WIDTH, SizeValue::Px(200.0))?;
    tree.set_value(strip, MARGIN, Thickness::new(0.0, 8.0, 0.0, 0.0))?;
    tree.add_child(root, strip)?;
    for index in 0..6 {
        let dot = tree.create(pyra_ui::view::Image);
        let source = if index % 2 == 0 { "Shapes/circle16" } else { "Shapes/circle64" };
        tree.set_value(dot, SOURCE, source.into())?;
        tree.add_child(strip, dot)?;
    }

    let mut total = 0.0;
    for frame in 1..=5 {
        let elapsed = 1.0 / 60.0;
        total += elapsed;
        let report = ui.update(elapsed, total);
        let painted = ui.draw(elapsed);
        tracing::info!(
            frame,
            passes = report.passes,
            painted,
            debug = ui.draw_debug(),
            "frame"
        );
    }

    for snapshot in ui.tree().collect_box_models() {
        tracing::info!(kind = %snapshot.kind, bounds = ?snapshot.bounds, "box");
    }
    for diagnostic in ui.take_diagnostics() {
        tracing::warn!(%diagnostic, "diagnostic");
    }
    tracing::info!(calls = ui.renderer().calls, "renderer calls");
    Ok(())
}
