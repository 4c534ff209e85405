//! Hero overlay: title, typed-out tagline and summary.

use neurofolio_background::Rgb;
use neurofolio_config::PageConfig;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

/// Time to type one tagline character.
const TYPE_INTERVAL_MS: u64 = 100;

/// Cursor blink half-period.
const BLINK_MS: u64 = 500;

const MAX_WIDTH: u16 = 80;

const BADGE: &str = "PORTFOLIO v2.0";

const CYAN: Rgb = Rgb::hex(0x22d3ee);
const FUCHSIA: Rgb = Rgb::hex(0xd946ef);

/// The part of `text` typed after `elapsed_ms`.
pub fn typed(text: &str, elapsed_ms: u64) -> &str {
    let count = (elapsed_ms / TYPE_INTERVAL_MS) as usize;
    match text.char_indices().nth(count) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn cursor_visible(elapsed_ms: u64) -> bool {
    (elapsed_ms / BLINK_MS) % 2 == 0
}

/// Title with a horizontal cyan to fuchsia gradient.
fn gradient_title(title: &str) -> Line<'static> {
    let count = title.chars().count().max(2) - 1;
    let spans: Vec<Span> = title
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let color: Color = CYAN.lerp(FUCHSIA, i as f32 / count as f32).into();
            Span::styled(c.to_string(), Style::new().fg(color).bold())
        })
        .collect();
    Line::from(spans)
}

/// Paint the hero overlay, left-aligned in a centered column.
pub fn render(frame: &mut Frame, area: Rect, page: &PageConfig, elapsed_ms: u64) {
    let width = area.width.min(MAX_WIDTH);
    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);

    let [_, badge, _, title, _, tagline, _, summary, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(column);

    frame.render_widget(Line::from(BADGE).fg(Color::Cyan), badge);
    frame.render_widget(gradient_title(&page.title), title);

    let mut typed_line = vec![Span::raw(typed(&page.tagline, elapsed_ms)).gray()];
    if cursor_visible(elapsed_ms) {
        typed_line.push(Span::raw("|").cyan());
    }
    frame.render_widget(Line::from(typed_line), tagline);

    let summary_widget = Paragraph::new(page.summary.as_str())
        .dark_gray()
        .wrap(Wrap { trim: true });
    frame.render_widget(summary_widget, summary);
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    #[test]
    fn test_typed_prefix() {
        assert_eq!(typed("Network", 0), "");
        assert_eq!(typed("Network", 99), "");
        assert_eq!(typed("Network", 300), "Net");
        assert_eq!(typed("Network", 10_000), "Network");
    }

    #[test]
    fn test_typed_respects_char_boundaries() {
        assert_eq!(typed("héllo", 200), "hé");
    }

    #[test]
    fn test_cursor_blinks() {
        assert!(cursor_visible(0));
        assert!(!cursor_visible(600));
        assert!(cursor_visible(1_100));
    }

    #[test]
    fn test_gradient_endpoints() {
        let line = gradient_title("AB");
        assert_eq!(line.spans[0].style.fg, Some(Color::from(CYAN)));
        assert_eq!(line.spans[1].style.fg, Some(Color::from(FUCHSIA)));
        assert_eq!(gradient_title("X").spans.len(), 1);
    }

    #[test]
    fn test_render_shows_page_text() {
        let mut terminal = Terminal::new(TestBackend::new(90, 20)).unwrap();
        let page = PageConfig::default();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, area, &page, 60_000)
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("PORTFOLIO v2.0"));
        assert!(text.contains("ALEX NEURAL"));
        assert!(text.contains("Cybersecurity Specialist & Network Engineer"));
    }
}
