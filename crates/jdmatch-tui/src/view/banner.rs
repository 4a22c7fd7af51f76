use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, LineGauge, Paragraph};

use crate::theme::Theme;
use crate::view::popup_area;

const LOGO: &[&str] = &[
    r"     _     _                 _       _      ",
    r"    (_) __| |_ __ ___   __ _| |_ ___| |__   ",
    r"    | |/ _` | '_ ` _ \ / _` | __/ __| '_ \  ",
    r"    | | (_| | | | | | | (_| | || (__| | | | ",
    r"   _/ |\__,_|_| |_| |_|\__,_|\__\___|_| |_| ",
    r"  |__/                                      ",
];

/// Splash card shown until `elapsed` reaches `total` ticks or a key is pressed.
/// The gauge along the bottom counts down to the form.
pub fn render(f: &mut Frame, theme: &Theme, elapsed: usize, total: usize) {
    let card = popup_area(f.area(), 52, 13);
    if card.width < 46 || card.height < 12 {
        return;
    }

    let frame = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.active))
        .title(Line::from(" resume \u{2194} job description ").alignment(Alignment::Center));
    let inner = frame.inner(card);
    f.render_widget(Clear, card);
    f.render_widget(frame, card);

    let [logo_area, tagline_area, gauge_area, hint_area] = Layout::vertical([
        Constraint::Length(LOGO.len() as u16 + 1),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let logo: Vec<Line> = LOGO
        .iter()
        .map(|row| {
            Line::from(Span::styled(
                *row,
                Style::default().fg(theme.active).add_modifier(Modifier::BOLD),
            ))
        })
        .collect();
    f.render_widget(Paragraph::new(logo), logo_area);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Score a resume against a job description",
            Style::default().fg(theme.text),
        )))
        .alignment(Alignment::Center),
        tagline_area,
    );

    let remaining = 1.0 - (elapsed.min(total) as f64 / total.max(1) as f64);
    f.render_widget(
        LineGauge::default()
            .filled_style(Style::default().fg(theme.spinner))
            .unfilled_style(Style::default().fg(theme.dim))
            .line_set(symbols::line::THICK)
            .label("")
            .ratio(remaining),
        gauge_area,
    );

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "press any key",
            Style::default().fg(theme.dim).add_modifier(Modifier::ITALIC),
        )))
        .alignment(Alignment::Center),
        hint_area,
    );
}
