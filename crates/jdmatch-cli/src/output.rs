use std::io::Write;

use jdmatch_core::{RenderedGroup, ResultView};
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

fn heading(w: &mut dyn Write, title: &str, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", title.bold().cyan())
    } else {
        writeln!(w, "{title}")
    }
}

fn field(
    w: &mut dyn Write,
    label: &str,
    value: &str,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{:<18} {}", label.dimmed(), value.bold())
    } else {
        writeln!(w, "{:<18} {}", label, value)
    }
}

/// Print the match report: scores, summary, then every rewrite group.
pub fn print_result(w: &mut dyn Write, view: &ResultView, color: ColorMode) -> std::io::Result<()> {
    heading(w, "Resume Match Analysis", color)?;
    writeln!(w)?;
    field(w, "Similarity Score", &view.similarity, color)?;
    field(w, "Match Status", &view.match_status, color)?;
    field(w, "Missing Skills", &view.missing_skills, color)?;
    writeln!(w)?;

    heading(w, "Summary", color)?;
    writeln!(w, "{}", view.summary)?;

    for group in &view.groups {
        writeln!(w)?;
        print_group(w, group, color)?;
    }
    Ok(())
}

fn print_group(w: &mut dyn Write, group: &RenderedGroup, color: ColorMode) -> std::io::Result<()> {
    heading(w, group.title, color)?;
    if let Some(fallback) = group.fallback {
        if color.enabled() {
            writeln!(w, "{}", fallback.dimmed())?;
        } else {
            writeln!(w, "{fallback}")?;
        }
        return Ok(());
    }

    for block in &group.blocks {
        if color.enabled() {
            writeln!(w, "  {}", block.heading.bold())?;
            writeln!(w, "    {}: {}", block.original_label.red(), block.original)?;
            writeln!(w, "    {}: {}", block.suggested_label.green(), block.suggested)?;
        } else {
            writeln!(w, "  {}", block.heading)?;
            writeln!(w, "    {}: {}", block.original_label, block.original)?;
            writeln!(w, "    {}: {}", block.suggested_label, block.suggested)?;
        }
    }
    Ok(())
}

/// Print the user-facing failure message.
pub fn print_error(w: &mut dyn Write, message: &str, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", message.red())
    } else {
        writeln!(w, "{message}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jdmatch_core::MatchResult;
    use jdmatch_core::render::{NO_MISSING_SKILLS, NO_SECTIONS, NO_SUMMARY, PLACEHOLDER};

    fn render(json: &str) -> String {
        let result = MatchResult::from_json(json).unwrap();
        let mut buf = Vec::new();
        print_result(&mut buf, &ResultView::new(&result), ColorMode(false)).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn empty_result_prints_placeholders() {
        let out = render("{}");
        assert!(out.contains(&format!("Similarity Score   {PLACEHOLDER}")));
        assert!(out.contains(NO_MISSING_SKILLS));
        assert!(out.contains(NO_SUMMARY));
        assert!(out.contains(NO_SECTIONS));
    }

    #[test]
    fn sections_are_listed_with_labels() {
        let out = render(
            r#"{"similarity": 81.5, "match_status": "Strong Match",
                "sections": [{"section_name": "Experience",
                              "original_text": "Wrote code",
                              "rewritten_text": "Shipped Rust services"}]}"#,
        );
        assert!(out.contains("81.5%"));
        assert!(out.contains("Section Rewrites"));
        assert!(out.contains("  Experience"));
        assert!(out.contains("Original: Wrote code"));
        assert!(out.contains("JD-Aligned Rewrite: Shipped Rust services"));
        assert!(!out.contains(NO_SECTIONS));
    }

    #[test]
    fn plain_mode_has_no_escape_codes() {
        let out = render(r#"{"missing_skills": ["SQL"]}"#);
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn colored_error_wraps_message() {
        let mut buf = Vec::new();
        print_error(&mut buf, "boom", ColorMode(true)).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.contains("boom"));
        assert!(s.contains('\u{1b}'));
    }
}
