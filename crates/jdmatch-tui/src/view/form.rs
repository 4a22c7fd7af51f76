use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use jdmatch_core::InputMode;

use crate::app::{App, Focus, KeyMode};
use crate::model::field::TextField;
use crate::theme::Theme;

const CURSOR: char = '\u{258F}';

/// Render the input form into the given area.
pub fn render_in(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mode = app.form.input_mode();

    let resume_height = match mode {
        InputMode::File => Constraint::Length(4),
        InputMode::Text => Constraint::Percentage(45),
    };
    let chunks = Layout::vertical([
        Constraint::Length(1), // mode toggle
        resume_height,         // resume source
        Constraint::Min(5),    // job description
        Constraint::Length(1), // submit
        Constraint::Length(2), // error / notice
    ])
    .split(area);

    // --- Mode toggle ---
    let tab = |m: InputMode| {
        let style = if m == mode {
            theme.highlight_style().fg(theme.active)
        } else {
            Style::default().fg(theme.dim)
        };
        Span::styled(format!(" {} ", m.label()), style)
    };
    let toggle = Line::from(vec![
        tab(InputMode::File),
        Span::raw("  "),
        tab(InputMode::Text),
        Span::styled("   (t to switch)", Style::default().fg(theme.dim)),
    ]);
    f.render_widget(
        Paragraph::new(toggle).alignment(Alignment::Center),
        chunks[0],
    );

    // --- Resume source ---
    let resume_focused = app.focus == Focus::Resume;
    let editing_resume = resume_focused && app.key_mode == KeyMode::Editing;
    match mode {
        InputMode::File => {
            let mut lines = vec![field_line(
                &app.resume_path,
                editing_resume,
                "Path to a resume PDF...",
                theme,
            )];
            lines.push(file_status_line(app, theme));
            let block = form_block(" Upload Resume (PDF) ", resume_focused, theme);
            f.render_widget(Paragraph::new(lines).block(block), chunks[1]);
        }
        InputMode::Text => {
            let block = form_block(" Paste Resume Text ", resume_focused, theme);
            let text = field_text(
                &app.resume_text,
                editing_resume,
                "Paste your resume text here...",
                theme,
            );
            f.render_widget(
                Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
                chunks[1],
            );
        }
    }

    // --- Job description ---
    let jd_focused = app.focus == Focus::JobDescription;
    let block = form_block(" Job Description ", jd_focused, theme);
    let text = field_text(
        &app.job_description,
        jd_focused && app.key_mode == KeyMode::Editing,
        "Paste the job description here...",
        theme,
    );
    f.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        chunks[2],
    );

    // --- Submit ---
    let button_style = if app.form.is_submitting() {
        Style::default().fg(theme.dim).add_modifier(Modifier::BOLD)
    } else {
        theme.header_style()
    };
    let button = Line::from(Span::styled(
        format!("  {}  ", app.form.submit_label()),
        button_style,
    ));
    f.render_widget(
        Paragraph::new(button).alignment(Alignment::Center),
        chunks[3],
    );

    // --- Error / notice ---
    let mut status: Vec<Line> = Vec::new();
    if let Some(message) = app.form.error_message() {
        status.push(Line::from(Span::styled(
            message,
            Style::default().fg(theme.error),
        )));
    }
    if let Some(notice) = &app.notice {
        status.push(Line::from(Span::styled(
            notice.as_str(),
            Style::default().fg(theme.dim),
        )));
    }
    f.render_widget(
        Paragraph::new(status)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[4],
    );
}

fn form_block<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title(title)
}

/// Which file, if any, the form will upload.
fn file_status_line<'a>(app: &App, theme: &Theme) -> Line<'a> {
    match app.form.resume_file() {
        Some(file) => Line::from(Span::styled(
            format!("\u{2713} {} ({} bytes)", file.file_name, file.bytes.len()),
            Style::default().fg(theme.success),
        )),
        None => Line::from(Span::styled(
            "No file selected",
            Style::default().fg(theme.dim).add_modifier(Modifier::ITALIC),
        )),
    }
}

fn field_line<'a>(
    field: &TextField,
    editing: bool,
    placeholder: &'a str,
    theme: &Theme,
) -> Line<'a> {
    if editing {
        Line::from(Span::styled(
            field.with_cursor(CURSOR),
            Style::default().fg(theme.text),
        ))
    } else if field.as_str().is_empty() {
        Line::from(Span::styled(placeholder, Style::default().fg(theme.dim)))
    } else {
        Line::from(Span::styled(
            field.as_str().to_string(),
            Style::default().fg(theme.text),
        ))
    }
}

fn field_text<'a>(
    field: &TextField,
    editing: bool,
    placeholder: &'a str,
    theme: &Theme,
) -> Vec<Line<'a>> {
    let content = if editing {
        field.with_cursor(CURSOR)
    } else if field.as_str().is_empty() {
        return vec![Line::from(Span::styled(
            placeholder,
            Style::default().fg(theme.dim),
        ))];
    } else {
        field.as_str().to_string()
    };
    content
        .split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(theme.text))))
        .collect()
}
