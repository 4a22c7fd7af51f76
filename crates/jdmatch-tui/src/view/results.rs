use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use jdmatch_core::{RenderedGroup, ResultView};

use crate::app::App;
use crate::theme::Theme;

/// Render the results screen: score cards on top, summary and rewrites below.
pub fn render_in(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let Some(result) = app.form.result() else {
        let text = if app.form.is_submitting() {
            format!("  {}", app.form.submit_label())
        } else {
            "  No results yet. Press Esc to return to the form.".to_string()
        };
        let msg = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(theme.dim),
        )));
        f.render_widget(msg, area);
        return;
    };
    let view = ResultView::new(result);

    let chunks = Layout::vertical([
        Constraint::Length(4), // cards
        Constraint::Min(5),    // summary + rewrites
    ])
    .split(area);

    // --- Cards ---
    let cards = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(chunks[0]);
    card(f, cards[0], "Similarity Score", &view.similarity, theme.score, theme);
    card(f, cards[1], "Match Status", &view.match_status, theme.success, theme);
    card(f, cards[2], "Missing Skills", &view.missing_skills, theme.warning, theme);

    // --- Summary and rewrites, scrolled together ---
    let mut lines: Vec<Line> = Vec::new();
    section_header(&mut lines, "SUMMARY", theme);
    for l in view.summary.lines() {
        lines.push(Line::from(Span::styled(
            format!("  {l}"),
            Style::default().fg(theme.text),
        )));
    }
    lines.push(Line::from(""));

    for group in &view.groups {
        group_lines(&mut lines, group, theme);
    }

    let body = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(false))
                .title(" Resume Match Analysis "),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.results_scroll, 0));
    f.render_widget(body, chunks[1]);
}

fn card(f: &mut Frame, area: Rect, label: &str, value: &str, color: ratatui::style::Color, theme: &Theme) {
    let lines = vec![
        Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(theme.dim),
        )),
        Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn section_header(lines: &mut Vec<Line<'static>>, title: &str, theme: &Theme) {
    lines.push(Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD),
    )));
}

fn group_lines(lines: &mut Vec<Line<'static>>, group: &RenderedGroup, theme: &Theme) {
    section_header(lines, &group.title.to_uppercase(), theme);

    if let Some(fallback) = group.fallback {
        lines.push(Line::from(Span::styled(
            format!("  {fallback}"),
            Style::default().fg(theme.dim).add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(""));
        return;
    }

    for block in &group.blocks {
        lines.push(Line::from(Span::styled(
            format!("  {}", block.heading),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )));
        labeled_text(lines, block.original_label, &block.original, theme.error, theme);
        labeled_text(lines, block.suggested_label, &block.suggested, theme.success, theme);
        lines.push(Line::from(""));
    }
}

/// Label on its own line, then the text indented below it, one line per source line.
fn labeled_text(
    lines: &mut Vec<Line<'static>>,
    label: &str,
    text: &str,
    color: ratatui::style::Color,
    theme: &Theme,
) {
    lines.push(Line::from(Span::styled(
        format!("    {label}"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));
    if text.trim().is_empty() {
        lines.push(Line::from(Span::styled(
            format!("      {}", jdmatch_core::render::PLACEHOLDER),
            Style::default().fg(theme.dim),
        )));
        return;
    }
    for l in text.lines() {
        lines.push(Line::from(Span::styled(
            format!("      {l}"),
            Style::default().fg(theme.text),
        )));
    }
}
