use crate::app::{App, Focus};
use crate::theme::ThemeSource;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 22;

/// Max scroll for help content (generous to account for text wrapping on small screens)
pub const HELP_CONTENT_LINES: u16 = 30;

// UI color scheme
const BORDER_COLOR: Color = Color::Cyan;
const HIGHLIGHT_COLOR: Color = Color::Yellow;
const TEXT_COLOR: Color = Color::White;
const DIM_TEXT_COLOR: Color = Color::Gray;

/// Creates a standard styled block with rounded borders
fn styled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(title)
}

/// Split the screen into (sidebar, canvas block). Sidebar is None in fullscreen.
fn split(area: Rect, fullscreen: bool) -> (Option<Rect>, Rect) {
    if fullscreen {
        (None, area)
    } else {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);
        (Some(layout[0]), layout[1])
    }
}

/// Drawable canvas area (inside its border) for a given screen
pub fn canvas_area(area: Rect, fullscreen: bool) -> Rect {
    let (_, canvas) = split(area, fullscreen);
    styled_block("").inner(canvas)
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let (sidebar, canvas) = split(area, app.fullscreen_mode);

    if let Some(sidebar) = sidebar {
        render_sidebar(frame, sidebar, app);
    }
    render_canvas(frame, canvas, app);

    if app.show_help {
        render_help_overlay(frame, area, app);
    }
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Status
            Constraint::Length(6), // Parameters
            Constraint::Min(5),    // Controls
        ])
        .split(area);

    render_status_box(frame, sections[0], app);
    render_params_box(frame, sections[1], app);
    render_controls_box(frame, sections[2]);
}

fn render_status_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Particle Field ");

    let state = app.animation.state();
    let status_color = if app.animation.is_running() {
        Color::Green
    } else {
        HIGHLIGHT_COLOR
    };

    let pointer = match app.field.pointer() {
        Some(p) => format!("{:.0}, {:.0}", p.x, p.y),
        None => "-".to_string(),
    };

    let content = vec![
        Line::from(Span::styled(state.name(), Style::default().fg(status_color))),
        Line::from(Span::styled(
            format!("{} particles", app.field.particles().len()),
            Style::default().fg(TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("Theme: {}", app.palette.palette().label()),
            Style::default().fg(TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("{:.0}x{:.0} px", app.field.width(), app.field.height()),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("Frame: {}", app.animation.frames()),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("Ptr: {}", pointer),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
    ];

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_params_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Parameters ");

    let make_line = |label: &str, value: String, focused: bool| {
        let prefix = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().fg(HIGHLIGHT_COLOR)
        } else {
            Style::default().fg(TEXT_COLOR)
        };
        Line::from(Span::styled(format!("{}{}: {}", prefix, label, value), style))
    };

    let settings = &app.field.settings;

    let content = vec![
        make_line(
            "Radius",
            format!("{:.0}", settings.interaction_radius),
            app.focus == Focus::Radius,
        ),
        make_line(
            "Push",
            format!("{:.1}", settings.push_strength),
            app.focus == Focus::Push,
        ),
        make_line(
            "Relax",
            format!("{:.2}", settings.relaxation),
            app.focus == Focus::Relaxation,
        ),
        make_line("FPS", format!("{}", app.fps), app.focus == Focus::Fps),
    ];

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_controls_box(frame: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(HIGHLIGHT_COLOR);
    let desc_style = Style::default().fg(DIM_TEXT_COLOR);

    let make_control = |key: &str, desc: &str| {
        Line::from(vec![
            Span::styled(format!("{:>5}", key), key_style),
            Span::styled(format!(" {}", desc), desc_style),
        ])
    };

    let content = vec![
        make_control("Space", "start/stop"),
        make_control("T", "toggle theme"),
        make_control("R", "rebuild field"),
        make_control("V", "fullscreen"),
        make_control("Tab", "select param"),
        make_control("↑/↓", "adjust param"),
        make_control("H", "help"),
        make_control("Q", "quit"),
    ];

    let paragraph = Paragraph::new(content).block(styled_block(" Controls "));
    frame.render_widget(paragraph, area);
}

fn render_canvas(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette.palette();
    let (r, g, b) = palette.background();
    let background = Color::Rgb(r, g, b);

    let block = styled_block("").style(Style::default().bg(background));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let buffer = frame.buffer_mut();
    for cell in app.surface.cells(palette.background()) {
        let x = inner.x + cell.x;
        let y = inner.y + cell.y;

        // The surface may lag a resize by one frame
        if x < inner.x + inner.width && y < inner.y + inner.height {
            if let Some(target) = buffer.cell_mut((x, y)) {
                target.set_char(cell.char).set_fg(cell.color).set_bg(background);
            }
        }
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect, app: &App) {
    // Center the help dialog within the canvas
    let canvas = app.canvas();
    let canvas_x = canvas.x.saturating_sub(area.x);
    let canvas_width = canvas.width;

    let help_width = 56.min(canvas_width.saturating_sub(4));
    let help_height = area.height.saturating_sub(4).min(24);
    let x = canvas_x + (canvas_width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: help_width,
        height: help_height,
    };

    frame.render_widget(Clear, help_area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled("PARTICLE FIELD", Style::default().fg(BORDER_COLOR))),
        Line::from(""),
        Line::from("Particles drift around their rest positions. Move the mouse over the canvas to push them away; they spring back once it leaves."),
        Line::from(""),
        Line::from(Span::styled("PARAMETERS (Tab, then ↑/↓):", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Radius - how far the pointer reaches"),
        Line::from("Push - how hard it pushes"),
        Line::from("Relax - how quickly particles return"),
        Line::from("FPS - animation frame rate"),
        Line::from(""),
        Line::from(Span::styled("BASIC CONTROLS:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Space=Start/Stop, T=Theme, R=Rebuild, V=Fullscreen, J/K=Scroll help, Q=Quit"),
        Line::from(""),
    ];

    let content_height = content.len() as u16;
    let visible_height = help_height.saturating_sub(2); // minus borders
    let is_scrollable = content_height > visible_height;

    let title = if is_scrollable {
        " Help (J/K scroll, H to close) "
    } else {
        " Help (H to close) "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(HIGHLIGHT_COLOR))
        .title(title);

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll, 0));

    frame.render_widget(paragraph, help_area);
}
