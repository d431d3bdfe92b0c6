//! Categorical code to display label resolution
//!
//! Resolution is a total function: a code that cannot be mapped falls
//! back to the original input instead of failing, and the outcome is
//! carried as a [`Resolution`] until the render boundary collapses it
//! to a display string.

/// Outcome of a code lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The code was found and mapped to a display name
    Resolved(String),
    /// No mapping exists; the original code is passed through
    Unresolved(String),
}

impl Resolution {
    /// Collapse to the display string
    pub fn into_display(self) -> String {
        match self {
            Resolution::Resolved(name) | Resolution::Unresolved(name) => name,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// Experience level codes in canonical display order
pub const EXPERIENCE_ORDER: [(&str, &str); 4] = [
    ("EN", "Entry-Level"),
    ("MI", "Mid-Level"),
    ("SE", "Senior-Level"),
    ("EX", "Executive-Level"),
];

/// Resolve an experience-level code to its display label
///
/// Codes outside the four known ones pass through unchanged, the same
/// total-function contract the country resolver follows.
pub fn experience_label(code: &str) -> Resolution {
    EXPERIENCE_ORDER
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| Resolution::Resolved((*label).to_string()))
        .unwrap_or_else(|| Resolution::Unresolved(code.to_string()))
}

/// Canonical experience level labels, in display order
pub fn experience_display_order() -> Vec<String> {
    EXPERIENCE_ORDER
        .iter()
        .map(|(_, label)| (*label).to_string())
        .collect()
}

/// Display aliases for long job titles
const JOB_TITLE_ALIASES: [(&str, &str); 2] = [
    ("Machine Learning Engineer", "ML Engineer"),
    ("Data Science Manager", "Manager"),
];

/// Shorten a job title for axis display; unknown titles pass through
pub fn job_title_alias(title: &str) -> String {
    JOB_TITLE_ALIASES
        .iter()
        .find(|(long, _)| *long == title)
        .map(|(_, short)| (*short).to_string())
        .unwrap_or_else(|| title.to_string())
}
