//! Presentation model for a [`MatchResult`].
//!
//! Every field resolves to display text here, including its placeholder when
//! the service left it out, so front-ends only lay out strings.

use crate::response::{MatchResult, Rewrites};

pub const PLACEHOLDER: &str = "\u{2014}";
pub const NO_MISSING_SKILLS: &str = "None \u{1F389}";
pub const NO_SUMMARY: &str = "No summary provided.";
pub const NO_SECTIONS: &str = "No rewritten sections found.";
pub const NO_REPLACEMENTS: &str = "No specific replacements found.";

/// One original/suggested pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    pub heading: String,
    pub original_label: &'static str,
    pub original: String,
    pub suggested_label: &'static str,
    pub suggested: String,
}

/// A titled list of blocks, or the fallback line when there are none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedGroup {
    pub title: &'static str,
    pub blocks: Vec<RenderedBlock>,
    pub fallback: Option<&'static str>,
}

/// Display strings for one result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub similarity: String,
    pub match_status: String,
    pub missing_skills: String,
    pub summary: String,
    pub groups: Vec<RenderedGroup>,
}

impl ResultView {
    pub fn new(result: &MatchResult) -> Self {
        Self {
            similarity: format_similarity(result.similarity),
            match_status: non_blank(result.match_status.as_deref())
                .unwrap_or(PLACEHOLDER)
                .to_string(),
            missing_skills: format_missing_skills(&result.missing_skills),
            summary: non_blank(result.summary.as_deref())
                .unwrap_or(NO_SUMMARY)
                .to_string(),
            groups: rewrite_groups(&result.rewrites),
        }
    }
}

/// Zero and non-finite scores read as "no score", like an absent one.
pub fn format_similarity(similarity: Option<f64>) -> String {
    match similarity {
        Some(s) if s.is_finite() && s != 0.0 => format!("{s}%"),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn format_missing_skills(skills: &[String]) -> String {
    if skills.is_empty() {
        NO_MISSING_SKILLS.to_string()
    } else {
        skills.join(", ")
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

fn rewrite_groups(rewrites: &Rewrites) -> Vec<RenderedGroup> {
    match rewrites {
        Rewrites::None => vec![RenderedGroup {
            title: SECTIONS_TITLE,
            blocks: Vec::new(),
            fallback: Some(NO_SECTIONS),
        }],
        Rewrites::Sections { .. } => vec![section_group(rewrites)],
        Rewrites::Replacements { .. } => vec![replacement_group(rewrites)],
        Rewrites::Both { .. } => vec![section_group(rewrites), replacement_group(rewrites)],
    }
}

const SECTIONS_TITLE: &str = "Section Rewrites";
const REPLACEMENTS_TITLE: &str = "Phrase Replacements";

fn section_group(rewrites: &Rewrites) -> RenderedGroup {
    let blocks: Vec<RenderedBlock> = rewrites
        .sections()
        .iter()
        .map(|s| RenderedBlock {
            heading: non_blank(Some(&s.section_name))
                .unwrap_or(PLACEHOLDER)
                .to_string(),
            original_label: "Original",
            original: s.original_text.clone(),
            suggested_label: "JD-Aligned Rewrite",
            suggested: s.rewritten_text.clone(),
        })
        .collect();
    RenderedGroup {
        title: SECTIONS_TITLE,
        fallback: blocks.is_empty().then_some(NO_SECTIONS),
        blocks,
    }
}

fn replacement_group(rewrites: &Rewrites) -> RenderedGroup {
    let blocks: Vec<RenderedBlock> = rewrites
        .replacements()
        .iter()
        .map(|r| RenderedBlock {
            heading: non_blank(r.section.as_deref())
                .unwrap_or("Suggested Replacement")
                .to_string(),
            original_label: "Original",
            original: r.original_phrase.clone(),
            suggested_label: "Suggested",
            suggested: r.suggested_phrase.clone(),
        })
        .collect();
    RenderedGroup {
        title: REPLACEMENTS_TITLE,
        fallback: blocks.is_empty().then_some(NO_REPLACEMENTS),
        blocks,
    }
}
