pub mod banner;
pub mod form;
pub mod help;
pub mod results;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, KeyMode, Screen};

/// Spinner frames for animated progress indication.
const SPINNER_FRAMES: &[char] = &[
    '\u{280B}', '\u{2819}', '\u{2839}', '\u{2838}', '\u{283C}', '\u{2834}', '\u{2826}', '\u{2827}',
    '\u{2807}', '\u{280F}',
];

/// Get the current spinner character based on a tick counter.
pub fn spinner_char(tick: usize) -> char {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Truncate a string to fit in `max_width` chars, appending "\u{2026}" if truncated.
pub fn truncate(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    let mut truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    truncated.push('\u{2026}');
    truncated
}

/// A `width` x `height` rect centered in `area`, shrunk to fit when `area` is smaller.
pub fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Title bar with a breadcrumb for the current screen.
pub fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mut spans = vec![
        Span::styled(" JDMATCH ", theme.header_style()),
        Span::styled(" Resume \u{2194} JD Interactive Matcher", Style::default().fg(theme.text)),
    ];
    if app.screen == Screen::Results {
        spans.push(Span::styled(" > ", Style::default().fg(theme.dim)));
        spans.push(Span::styled(
            "Resume Match Analysis",
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Key hints on the left, request state on the right.
pub fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let hints = match (app.screen, app.key_mode) {
        (_, KeyMode::Editing) => " Esc:done  Tab:next field  Ctrl+s:match",
        (Screen::Results, _) => " j/k:scroll  Esc:back to form  s:resubmit  ?:help  q:quit",
        _ => " Tab:focus  Enter:edit  t:toggle upload/paste  s:match  r:results  ?:help  q:quit",
    };

    let status = if app.form.is_submitting() {
        Span::styled(
            format!("{} {} ", spinner_char(app.tick), app.form.submit_label()),
            Style::default().fg(theme.spinner).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            format!("{} ", app.form.input_mode().label()),
            Style::default().fg(theme.phase_color(app.form.phase())),
        )
    };

    let hint_width = (area.width as usize).saturating_sub(status.width());
    let line = Line::from(vec![
        Span::styled(
            format!("{:<width$}", truncate(hints, hint_width), width = hint_width),
            theme.footer_style(),
        ),
        status,
    ]);
    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("héllo", 10), "héllo");
        assert_eq!(truncate("héllo", 3), "hé\u{2026}");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn popup_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(popup_area(area, 50, 10), Rect::new(25, 15, 50, 10));

        let small = Rect::new(2, 1, 30, 8);
        assert_eq!(popup_area(small, 64, 28), small);
    }

    #[test]
    fn spinner_wraps() {
        assert_eq!(spinner_char(0), spinner_char(SPINNER_FRAMES.len()));
    }
}
