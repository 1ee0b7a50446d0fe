// Student domain types
//
// A student declares skills; an admin flips a skill's `verified` flag after
// the interview scheduled through the verification workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A skill declared by a student.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Skill {
    /// Skill name as entered by the student.
    #[cfg_attr(feature = "openapi", schema(example = "Rust"))]
    pub name: String,
    /// Whether an admin has confirmed this skill.
    #[serde(default)]
    pub verified: bool,
}

impl Skill {
    pub fn unverified(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            verified: false,
        }
    }

    /// Case-insensitive name comparison.
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}

/// Student - a registered user who can request skill verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Unique identifier for the student.
    pub id: Uuid,
    /// Display name.
    #[cfg_attr(feature = "openapi", schema(example = "Asha Raman"))]
    pub name: String,
    /// Login email, stored lowercased.
    #[cfg_attr(feature = "openapi", schema(example = "asha@example.com"))]
    pub email: String,
    /// Declared skills in the order the student listed them.
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Timestamp when the student registered.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last profile change.
    pub updated_at: DateTime<Utc>,
}

impl Student {
    pub fn find_skill(&self, name: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.matches(name))
    }
}

/// Trim names, drop blanks and remove case-insensitive duplicates.
/// The first spelling of a duplicated name wins.
pub fn normalize_skill_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() {
            continue;
        }
        if out.iter().any(|existing| existing.eq_ignore_ascii_case(name)) {
            continue;
        }
        out.push(name.to_string());
    }
    out
}

/// Replace a student's declared skills with `names`.
///
/// Skills that survive the replacement keep their `verified` flag; new names
/// start unverified; names no longer listed are dropped.
pub fn merge_skills<S: AsRef<str>>(existing: &[Skill], names: &[S]) -> Vec<Skill> {
    normalize_skill_names(names.iter().map(|n| n.as_ref()))
        .into_iter()
        .map(|name| {
            let verified = existing
                .iter()
                .find(|s| s.matches(&name))
                .map(|s| s.verified)
                .unwrap_or(false);
            Skill { name, verified }
        })
        .collect()
}
