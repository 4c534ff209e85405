//! Collapsible control panel.

use neurofolio_core::Settings;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Clear, Paragraph},
};

const PANEL_WIDTH: u16 = 32;
const PANEL_HEIGHT: u16 = 9;

/// Bottom-right rectangle of at most `width` x `height` inside `area`,
/// one cell away from the edges when there is room.
fn corner(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let margin_x = u16::from(area.width > width);
    let margin_y = u16::from(area.height > height);
    Rect {
        x: area.x + area.width - width - margin_x,
        y: area.y + area.height - height - margin_y,
        width,
        height,
    }
}

fn row(label: &str, value: String, keys: &str) -> Line<'static> {
    Line::from(vec![
        format!("{label:<10}").dark_gray(),
        format!("{value:<8}").fg(Color::Cyan).bold(),
        format!(" {keys}").dark_gray(),
    ])
}

/// Paint the panel, or just its toggle hint when collapsed.
pub fn render(frame: &mut Frame, area: Rect, settings: &Settings, open: bool) {
    if !open {
        let hint = Line::from(vec!["p".bold().fg(Color::Cyan), " controls".dark_gray()]);
        frame.render_widget(hint, corner(area, 10, 1));
        return;
    }

    let rect = corner(area, PANEL_WIDTH, PANEL_HEIGHT);
    let lines = vec![
        row("Speed", format!("{:.1}x", settings.speed), "+/-"),
        row("Layers", settings.layers.to_string(), "]/["),
        row("Density", format!("{:.1}", settings.density), "./,"),
        row("Animation", settings.style.label().to_string(), "a"),
        row("Layout", settings.layout.label().to_string(), "o"),
        Line::default(),
        Line::from(vec![
            "h".bold().fg(Color::Cyan),
            " hero  ".dark_gray(),
            "p".bold().fg(Color::Cyan),
            " hide  ".dark_gray(),
            "q".bold().fg(Color::Cyan),
            " quit".dark_gray(),
        ]),
    ];

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(Color::Cyan))
        .title(" Network ");

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}
