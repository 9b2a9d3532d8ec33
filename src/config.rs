use crate::types::Size;
use crate::ui::Key;
use crate::view::DEFAULT_MAX_LAYOUT_PASSES;

pub const TRACE_LAYOUT_ENV: &str = "PYRA_TRACE_LAYOUT";
pub const TRACE_FPS_ENV: &str = "PYRA_TRACE_FPS";

#[derive(Debug, Clone, PartialEq)]
pub struct ManagerConfig {
    pub viewport: Size,
    /// Upper bound on layout passes per frame when behaviours keep
    /// queueing mutations.
    pub max_layout_passes: usize,
    /// Font sizes loaded for every font style.
    pub font_sizes: Vec<u16>,
    /// Sizes of the `Shapes/circle{n}` textures.
    pub circle_sizes: Vec<u16>,
    pub debug_key: Key,
    pub trace_layout: bool,
    pub trace_frames: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(1366.0, 800.0),
            max_layout_passes: DEFAULT_MAX_LAYOUT_PASSES,
            font_sizes: vec![6, 7, 8, 9, 10, 12, 14, 16, 20, 64],
            circle_sizes: vec![16, 64],
            debug_key: Key::F(2),
            trace_layout: false,
            trace_frames: false,
        }
    }
}

impl ManagerConfig {
    /// Defaults, with tracing switched on by `PYRA_TRACE_LAYOUT` and
    /// `PYRA_TRACE_FPS`.
    pub fn from_env() -> Self {
        Self {
            trace_layout: std::env::var(TRACE_LAYOUT_ENV).is_ok(),
            trace_frames: std::env::var(TRACE_FPS_ENV).is_ok(),
            ..Self::default()
        }
    }

    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn texture_names(&self) -> impl Iterator<Item = String> + '_ {
        self.circle_sizes
            .iter()
            .map(|size| format!("Shapes/circle{size}"))
    }
}
