//! Parsed response of the matching service.
//!
//! The service returns a loosely-typed JSON object. Everything is optional,
//! and rewrite suggestions arrive either as whole-section rewrites or as
//! phrase replacements. The shape is decided once here and carried as
//! [`Rewrites`], so nothing downstream has to probe for fields.

use serde::{Deserialize, Deserializer, Serialize};

/// A suggested replacement of a whole resume section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionRewrite {
    #[serde(deserialize_with = "null_as_empty")]
    pub section_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub original_text: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub rewritten_text: String,
}

/// A suggested replacement of a single phrase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhraseReplacement {
    pub section: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub original_phrase: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub suggested_phrase: String,
}

/// Generated suggestions sometimes carry `null` where text is expected.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Discriminant of [`Rewrites`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteKind {
    None,
    Sections,
    Replacements,
    Both,
}

impl RewriteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RewriteKind::None => "none",
            RewriteKind::Sections => "sections",
            RewriteKind::Replacements => "replacements",
            RewriteKind::Both => "both",
        }
    }
}

/// Rewrite suggestions in whichever shape the service returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rewrites {
    #[default]
    None,
    Sections { sections: Vec<SectionRewrite> },
    Replacements { replacements: Vec<PhraseReplacement> },
    Both {
        sections: Vec<SectionRewrite>,
        replacements: Vec<PhraseReplacement>,
    },
}

impl Rewrites {
    /// Decide the shape from the raw optional fields.
    ///
    /// Sections count only when non-empty. Replacements count whenever the
    /// field is present, since an empty replacement list has its own
    /// "nothing found" rendering.
    fn from_parts(
        sections: Option<Vec<SectionRewrite>>,
        replacements: Option<Vec<PhraseReplacement>>,
    ) -> Self {
        let sections = sections.filter(|s| !s.is_empty());
        match (sections, replacements) {
            (None, None) => Rewrites::None,
            (Some(sections), None) => Rewrites::Sections { sections },
            (None, Some(replacements)) => Rewrites::Replacements { replacements },
            (Some(sections), Some(replacements)) => Rewrites::Both {
                sections,
                replacements,
            },
        }
    }

    pub fn kind(&self) -> RewriteKind {
        match self {
            Rewrites::None => RewriteKind::None,
            Rewrites::Sections { .. } => RewriteKind::Sections,
            Rewrites::Replacements { .. } => RewriteKind::Replacements,
            Rewrites::Both { .. } => RewriteKind::Both,
        }
    }

    pub fn sections(&self) -> &[SectionRewrite] {
        match self {
            Rewrites::Sections { sections } | Rewrites::Both { sections, .. } => sections,
            _ => &[],
        }
    }

    pub fn replacements(&self) -> &[PhraseReplacement] {
        match self {
            Rewrites::Replacements { replacements } | Rewrites::Both { replacements, .. } => {
                replacements
            }
            _ => &[],
        }
    }
}

/// Wire shape, exactly as loose as the service.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawResponse {
    #[serde(deserialize_with = "lenient_number")]
    similarity: Option<f64>,
    match_status: Option<String>,
    missing_skills: Option<Vec<String>>,
    summary: Option<String>,
    sections: Option<Vec<SectionRewrite>>,
    replacements: Option<Vec<PhraseReplacement>>,
}

/// Accepts a JSON number or a numeric string; anything else reads as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().trim_end_matches('%').parse().ok(),
        _ => None,
    })
}

/// The result of one successful match request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchResult {
    pub similarity: Option<f64>,
    pub match_status: Option<String>,
    pub missing_skills: Vec<String>,
    pub summary: Option<String>,
    pub rewrites: Rewrites,
}

impl MatchResult {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let raw: RawResponse = serde_json::from_str(body)?;
        Ok(Self::from_raw(raw))
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let raw: RawResponse = serde_json::from_value(value)?;
        Ok(Self::from_raw(raw))
    }

    pub fn rewrite_kind(&self) -> RewriteKind {
        self.rewrites.kind()
    }

    fn from_raw(raw: RawResponse) -> Self {
        Self {
            similarity: raw.similarity,
            match_status: raw.match_status,
            missing_skills: raw.missing_skills.unwrap_or_default(),
            summary: raw.summary,
            rewrites: Rewrites::from_parts(raw.sections, raw.replacements),
        }
    }
}
