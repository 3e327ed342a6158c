use crate::animation::{AnimationLoop, MAX_FPS, MIN_FPS};
use crate::braille::BrailleSurface;
use crate::config::AppConfig;
use crate::simulation::ParticleField;
use crate::theme::{Palette, SharedPalette, ThemeSource};
use crate::ui;
use ratatui::layout::Rect;
use std::time::Instant;

/// Focus state for parameter editing in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Focus {
    #[default]
    None,
    Radius,
    Push,
    Relaxation,
    Fps,
}

impl Focus {
    /// Tab cycles through parameters
    pub fn next(&self) -> Focus {
        match self {
            Focus::None => Focus::Radius,
            Focus::Radius => Focus::Push,
            Focus::Push => Focus::Relaxation,
            Focus::Relaxation => Focus::Fps,
            Focus::Fps => Focus::Radius,
        }
    }

    /// Shift+Tab cycles in reverse
    pub fn prev(&self) -> Focus {
        match self {
            Focus::None => Focus::Fps,
            Focus::Radius => Focus::Fps,
            Focus::Push => Focus::Radius,
            Focus::Relaxation => Focus::Push,
            Focus::Fps => Focus::Relaxation,
        }
    }

    pub fn is_param(&self) -> bool {
        !matches!(self, Focus::None)
    }
}

/// Main application state
pub struct App {
    pub field: ParticleField,
    pub surface: BrailleSurface,
    pub palette: SharedPalette,
    pub animation: AnimationLoop,
    pub focus: Focus,
    pub fps: u32,
    pub fullscreen_mode: bool,
    pub show_help: bool,
    pub help_scroll: u16,
    /// Whole terminal area
    screen: Rect,
    /// Canvas area inside its border, in terminal cells
    canvas: Rect,
}

impl App {
    pub fn new(screen: Rect, config: &AppConfig) -> Self {
        let canvas = ui::canvas_area(screen, false);
        let surface = BrailleSurface::new(canvas.width, canvas.height, config.pixel_scale);
        let field = ParticleField::new(config.settings.clone(), &surface);

        Self {
            field,
            surface,
            palette: SharedPalette::new(config.palette),
            animation: AnimationLoop::new(config.fps),
            focus: Focus::None,
            fps: config.fps,
            fullscreen_mode: false,
            show_help: false,
            help_scroll: 0,
            screen,
            canvas,
        }
    }

    /// Produce a frame if one is due
    pub fn frame(&mut self, now: Instant) -> bool {
        let field = &mut self.field;
        let surface = &mut self.surface;
        let palette = &self.palette;
        self.animation.frame(now, || field.tick(surface, palette))
    }

    /// Terminal resized: resize the surface and rebuild the field
    pub fn resize(&mut self, width: u16, height: u16) {
        self.screen = Rect::new(0, 0, width, height);
        self.relayout();
    }

    fn relayout(&mut self) {
        self.canvas = ui::canvas_area(self.screen, self.fullscreen_mode);
        self.surface.resize(self.canvas.width, self.canvas.height);
        self.field.on_resize(&self.surface);
        self.field.on_pointer_leave();
    }

    /// Mouse moved to terminal cell (column, row)
    pub fn pointer_moved(&mut self, column: u16, row: u16) {
        let canvas = self.canvas;
        let inside = column >= canvas.x
            && column < canvas.x + canvas.width
            && row >= canvas.y
            && row < canvas.y + canvas.height;

        if inside {
            let (x, y) = self.surface.cell_to_local(column - canvas.x, row - canvas.y);
            self.field.on_pointer_move(x, y);
        } else {
            self.field.on_pointer_leave();
        }
    }

    pub fn pointer_left(&mut self) {
        self.field.on_pointer_leave();
    }

    /// Start or stop the animation
    pub fn toggle_running(&mut self) {
        self.animation.toggle();
        log::debug!("animation {}", self.animation.state().name());
    }

    pub fn toggle_palette(&mut self) -> Palette {
        let palette = self.palette.toggle();
        log::info!("palette switched to {}", palette.name());
        palette
    }

    /// Throw away the current particles and seed new ones
    pub fn rebuild(&mut self) {
        self.field.rebuild();
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen_mode = !self.fullscreen_mode;
        self.relayout();
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0; // Reset scroll when opening
        }
    }

    /// Scroll help content up
    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    /// Scroll help content down
    pub fn scroll_help_down(&mut self, max_scroll: u16) {
        self.help_scroll = (self.help_scroll + 1).min(max_scroll);
    }

    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_focus(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn adjust_focused_up(&mut self) {
        self.adjust_focused(1.0);
    }

    pub fn adjust_focused_down(&mut self) {
        self.adjust_focused(-1.0);
    }

    fn adjust_focused(&mut self, sign: f32) {
        let settings = &mut self.field.settings;
        match self.focus {
            Focus::None => {}
            Focus::Radius => settings.adjust_interaction_radius(10.0 * sign),
            Focus::Push => settings.adjust_push_strength(0.5 * sign),
            Focus::Relaxation => settings.adjust_relaxation(0.01 * sign),
            Focus::Fps => {
                let fps = self.fps as i64 + 5 * sign as i64;
                self.fps = fps.clamp(MIN_FPS as i64, MAX_FPS as i64) as u32;
                self.animation.set_fps(self.fps);
            }
        }
    }

    /// Snapshot of the state worth persisting
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            settings: self.field.settings.clone(),
            palette: self.palette.palette(),
            pixel_scale: self.surface.pixel_scale(),
            fps: self.fps,
            ..Default::default()
        }
    }

    pub fn canvas(&self) -> Rect {
        self.canvas
    }
}
