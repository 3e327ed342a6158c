mod animation;
mod app;
mod braille;
mod config;
mod settings;
mod simulation;
mod surface;
mod theme;
mod ui;
mod vector2;

use app::App;
use clap::Parser;
use config::AppConfig;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
        KeyCode, KeyEventKind, KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use theme::{Palette, ThemeSource};

#[derive(Parser, Debug)]
#[command(name = "particle-field")]
#[command(about = "Pointer-reactive particle field in the terminal")]
struct Args {
    /// Logical pixels per Braille dot (0.5-32); larger values mean fewer particles fit
    #[arg(long)]
    scale: Option<f32>,

    /// Target frames per second (1-240)
    #[arg(long)]
    fps: Option<u32>,

    /// Pointer interaction radius in logical pixels (10-400)
    #[arg(long)]
    radius: Option<f32>,

    /// Palette (urban, elegant)
    #[arg(long)]
    theme: Option<String>,

    /// Config file (default: <config dir>/particle-field/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG, default info)
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Do not write settings back to the config file on exit
    #[arg(long = "no-save", default_value = "false")]
    no_save: bool,
}

/// Logging goes to a file only; the terminal belongs to the UI
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config_path = match args.config.clone() {
        Some(path) => Some(path),
        None => match AppConfig::default_path() {
            Ok(path) => Some(path),
            Err(err) => {
                log::warn!("{}", err);
                None
            }
        },
    };
    let mut config = config_path
        .as_deref()
        .map(AppConfig::load_or_default)
        .unwrap_or_default();

    // Apply CLI args over the loaded config
    if let Some(scale) = args.scale {
        config.pixel_scale = scale.clamp(0.5, 32.0);
    }
    if let Some(fps) = args.fps {
        config.fps = fps.clamp(animation::MIN_FPS, animation::MAX_FPS);
    }
    if let Some(radius) = args.radius {
        config.settings.interaction_radius = radius.clamp(10.0, 400.0);
    }
    if let Some(theme) = &args.theme {
        config.palette = Palette::from_attribute(&theme.to_lowercase());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut app = App::new(Rect::new(0, 0, size.width, size.height), &config);
    log::info!(
        "particle field started: {} particles, palette {}",
        app.field.particles().len(),
        app.palette.palette().name()
    );
    app.animation.start();

    // Run the app
    let res = run_app(&mut terminal, &mut app);
    app.animation.stop();

    // Cleanup
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if !args.no_save {
        if let Some(path) = &config_path {
            if let Err(err) = app.to_config().save_to_file(path) {
                log::warn!("{}", err);
            }
        }
    }

    if let Err(err) = res {
        log::error!("{}", err);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    let mut dirty = true;

    loop {
        if dirty {
            terminal.draw(|frame| ui::render(frame, app))?;
            dirty = false;
        }

        // Wait for input until the next frame is due
        let timeout = app.animation.time_until_next(Instant::now());
        if event::poll(timeout)? {
            dirty = true;
            match event::read()? {
                Event::Key(key) => {
                    // Only process Press events
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }

                    // Handle Ctrl+C
                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }

                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char(' ') => app.toggle_running(),
                        KeyCode::Char('t') | KeyCode::Char('T') => {
                            app.toggle_palette();
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => app.rebuild(),
                        KeyCode::Char('v') | KeyCode::Char('V') => app.toggle_fullscreen(),
                        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => app.toggle_help(),

                        // Navigation
                        KeyCode::Tab => app.next_focus(),
                        KeyCode::BackTab => app.prev_focus(),
                        KeyCode::Up => {
                            if !app.show_help && app.focus.is_param() {
                                app.adjust_focused_up();
                            }
                        }
                        KeyCode::Down => {
                            if !app.show_help && app.focus.is_param() {
                                app.adjust_focused_down();
                            }
                        }
                        KeyCode::Esc => {
                            if app.show_help {
                                app.toggle_help();
                            } else {
                                app.focus = app::Focus::None;
                            }
                        }
                        KeyCode::Char('j') | KeyCode::Char('J') => {
                            if app.show_help {
                                app.scroll_help_down(ui::HELP_CONTENT_LINES);
                            }
                        }
                        KeyCode::Char('k') | KeyCode::Char('K') => {
                            if app.show_help {
                                app.scroll_help_up();
                            }
                        }
                        _ => {}
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        app.pointer_moved(mouse.column, mouse.row);
                    }
                    _ => {}
                },
                Event::FocusLost => app.pointer_left(),
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }

        // Run simulation tick
        if app.frame(Instant::now()) {
            dirty = true;
        }
    }
}
