use crate::config::ManagerConfig;
use crate::error::{LayoutError, LayoutResult};
use crate::property::{HEIGHT, WIDTH};
use crate::style::{FontStyle, SizeValue};
use crate::types::Size;
use crate::ui::{ContentLoader, InputSource, InputState, Key, Renderer, TextMeasure};
use crate::view::{DrawOptions, ElementTree, LayoutReport, NodeId, Visual};
use std::time::Duration;

/// Host surface: owns the element tree and the collaborators, and runs
/// the load, init, update and draw cycle.
pub struct Manager<R: Renderer, C: ContentLoader, I: InputSource> {
    config: ManagerConfig,
    tree: ElementTree,
    renderer: R,
    content: C,
    input: I,
    input_state: InputState,
    previous_input: InputState,
    loaded: bool,
    draw_debug: bool,
    frame_stats: FrameStats,
}

impl<R: Renderer, C: ContentLoader, I: InputSource> Manager<R, C, I> {
    pub fn new(renderer: R, content: C, input: I, config: ManagerConfig) -> Self {
        let mut tree = ElementTree::new();
        tree.set_trace_layout(config.trace_layout);
        Self {
            frame_stats: FrameStats::new(config.trace_frames),
            config,
            tree,
            renderer,
            content,
            input,
            input_state: InputState::default(),
            previous_input: InputState::default(),
            loaded: false,
            draw_debug: false,
        }
    }

    pub fn with_text_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.tree.set_text_measure(measure);
        self
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ElementTree {
        &mut self.tree
    }

    pub fn root(&self) -> Option<NodeId> {
        self.tree.root()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn input_state(&self) -> &InputState {
        &self.input_state
    }

    /// Whether `key` went down during the last update.
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.input_state.is_key_pressed(key) && !self.previous_input.is_key_pressed(key)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn draw_debug(&self) -> bool {
        self.draw_debug
    }

    pub fn set_draw_debug(&mut self, enabled: bool) {
        self.draw_debug = enabled;
    }

    /// Loads fonts for every configured size and style and the shape
    /// textures into the skin. Failures are recorded as diagnostics.
    pub fn load(&mut self) {
        if self.loaded {
            return;
        }

        for &size in &self.config.font_sizes {
            for style in FontStyle::ALL {
                match self.content.load_font(style, size) {
                    Ok(font) => self.tree.skin_mut().insert_font(font),
                    Err(err) => self.tree.push_diagnostic(err),
                }
            }
        }
        let names: Vec<String> = self.config.texture_names().collect();
        for name in names {
            match self.content.load_texture(&name) {
                Ok(texture) => self.tree.skin_mut().insert_texture(texture),
                Err(err) => self.tree.push_diagnostic(err),
            }
        }

        let skin = self.tree.skin();
        tracing::debug!(
            fonts = skin.font_count(),
            textures = skin.texture_count(),
            "content loaded"
        );
        self.loaded = true;
    }

    /// Creates the root visual sized to the viewport. Loads content first
    /// if that has not happened yet.
    pub fn init(&mut self) -> LayoutResult<NodeId> {
        if !self.loaded {
            self.load();
        }
        if let Some(root) = self.tree.root() {
            return Ok(root);
        }

        let root = self.tree.create(Visual);
        self.tree.set_root(root)?;
        self.apply_viewport(root)?;
        tracing::debug!(viewport = ?self.config.viewport, "initialized root");
        Ok(root)
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub fn update(&mut self, elapsed: f32, total: f32) -> LayoutReport {
        let polled = self.input.poll();
        self.previous_input = std::mem::replace(&mut self.input_state, polled);

        if self.is_key_pressed(self.config.debug_key) {
            self.draw_debug = !self.draw_debug;
            tracing::debug!(enabled = self.draw_debug, "debug drawing toggled");
        }

        self.tree.update_hover(self.input_state.mouse_position);
        let report = self
            .tree
            .run_layout(self.config.viewport, self.config.max_layout_passes);
        self.frame_stats.record_frame(elapsed);
        report
    }

    /// Paints the tree. Returns the number of visuals painted.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn draw(&mut self, elapsed: f32) -> usize {
        let options = DrawOptions {
            debug: self.draw_debug,
        };
        let painted = self.tree.draw(&mut self.renderer, options);
        self.tree.take_redraw();
        painted
    }

    pub fn resize(&mut self, viewport: Size) {
        if self.config.viewport == viewport {
            return;
        }
        self.config.viewport = viewport;
        if let Some(root) = self.tree.root() {
            if let Err(err) = self.apply_viewport(root) {
                self.tree.push_diagnostic(err);
            }
        }
    }

    fn apply_viewport(&mut self, root: NodeId) -> LayoutResult<()> {
        let viewport = self.config.viewport;
        self.tree
            .set_value(root, WIDTH, SizeValue::Px(viewport.width))?;
        self.tree
            .set_value(root, HEIGHT, SizeValue::Px(viewport.height))?;
        Ok(())
    }

    pub fn take_diagnostics(&mut self) -> Vec<LayoutError> {
        self.tree.take_diagnostics()
    }
}

/// Aggregated frame timing, reported once per second when enabled.
struct FrameStats {
    enabled: bool,
    since_report: Duration,
    frames: u32,
}

impl FrameStats {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            since_report: Duration::ZERO,
            frames: 0,
        }
    }

    fn record_frame(&mut self, elapsed: f32) {
        if !self.enabled {
            return;
        }

        self.frames += 1;
        self.since_report += Duration::try_from_secs_f32(elapsed).unwrap_or_default();
        if self.since_report < Duration::from_secs(1) {
            return;
        }

        let secs = self.since_report.as_secs_f64().max(f64::EPSILON);
        let fps = self.frames as f64 / secs;
        let avg_ms = secs * 1000.0 / self.frames as f64;
        tracing::info!(fps, frame_avg_ms = avg_ms, frames = self.frames, "perf");

        self.since_report = Duration::ZERO;
        self.frames = 0;
    }
}
