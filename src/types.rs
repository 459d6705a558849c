use serde::{Deserialize, Serialize};
use std::fmt;

//==============================================================================
// Author identity
//==============================================================================

/// Author identity: surname followed by the first character of the given name.
///
/// Surnames alone are not unique in the consortium list, so the first initial is
/// appended (`Smith` + `John` → `SmithJ`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorKey(String);

impl AuthorKey {
    /// Build a key from a surname and a given name. Returns `None` when either is blank.
    pub fn from_names(last_name: &str, first_name: &str) -> Option<Self> {
        let last = last_name.trim();
        let initial = first_name.trim().chars().next()?;
        if last.is_empty() {
            return None;
        }
        Some(AuthorKey(format!("{}{}", last, initial)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AuthorKey {
    fn from(s: &str) -> Self {
        AuthorKey(s.to_string())
    }
}

impl fmt::Display for AuthorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//==============================================================================
// Master table
//==============================================================================

/// One author from the master ("Template") sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub last_name: String,
    pub first_name: String,
    #[serde(default)]
    pub first_initials: String,
    #[serde(default)]
    pub affiliation: Option<String>,
    #[serde(default)]
    pub orcid: Option<String>,
}

impl AuthorRecord {
    pub fn new(
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        first_initials: impl Into<String>,
    ) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
            first_initials: first_initials.into(),
            affiliation: None,
            orcid: None,
        }
    }

    /// Identity key, `None` if a name part is blank
    pub fn key(&self) -> Option<AuthorKey> {
        AuthorKey::from_names(&self.last_name, &self.first_name)
    }

    /// Individual affiliations. A cell with line breaks holds one affiliation per line.
    pub fn affiliations(&self) -> Vec<&str> {
        self.affiliation
            .as_deref()
            .map(|a| {
                a.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `"Last, First"` as the deposit metadata expects it
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    /// `"Last, Initials"` as used in the author strings
    pub fn citation_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_initials)
    }
}

//==============================================================================
// Ordering table
//==============================================================================

/// Authorship categories, in the column order of the ordering sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorCategory {
    FirstAuthor,
    Contrib1,
    Contrib2,
    ConsortiumCoord,
    ScientificDirector,
    Contrib3,
}

impl AuthorCategory {
    /// Traversal order used when placing authors
    pub const PRIORITY: [AuthorCategory; 6] = [
        AuthorCategory::FirstAuthor,
        AuthorCategory::Contrib1,
        AuthorCategory::Contrib2,
        AuthorCategory::ConsortiumCoord,
        AuthorCategory::ScientificDirector,
        AuthorCategory::Contrib3,
    ];

    /// Column header in the ordering sheet
    pub fn header(self) -> &'static str {
        match self {
            AuthorCategory::FirstAuthor => "First author(s)",
            AuthorCategory::Contrib1 => "Contributing authors list #1",
            AuthorCategory::Contrib2 => "Contributing authors list #2",
            AuthorCategory::ConsortiumCoord => "Consortium Coordinators",
            AuthorCategory::ScientificDirector => "Scientific Directors",
            AuthorCategory::Contrib3 => "Contributing authors list #3",
        }
    }

    /// Membership in an override category defers placement to that category's pass
    pub fn is_override(self) -> bool {
        matches!(
            self,
            AuthorCategory::ScientificDirector | AuthorCategory::Contrib3
        )
    }

    fn index(self) -> usize {
        match self {
            AuthorCategory::FirstAuthor => 0,
            AuthorCategory::Contrib1 => 1,
            AuthorCategory::Contrib2 => 2,
            AuthorCategory::ConsortiumCoord => 3,
            AuthorCategory::ScientificDirector => 4,
            AuthorCategory::Contrib3 => 5,
        }
    }
}

impl fmt::Display for AuthorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// One row of the ordering sheet
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMembership {
    pub key: AuthorKey,
    weights: [f64; 6],
    pub sum: f64,
}

impl CategoryMembership {
    pub fn new(key: AuthorKey, sum: f64) -> Self {
        Self {
            key,
            weights: [0.0; 6],
            sum,
        }
    }

    pub fn with_weight(mut self, category: AuthorCategory, weight: f64) -> Self {
        self.set_weight(category, weight);
        self
    }

    pub fn set_weight(&mut self, category: AuthorCategory, weight: f64) {
        self.weights[category.index()] = weight;
    }

    pub fn weight(&self, category: AuthorCategory) -> f64 {
        self.weights[category.index()]
    }

    /// True if the author has any weight in an override category
    pub fn in_override_category(&self) -> bool {
        AuthorCategory::PRIORITY
            .iter()
            .filter(|c| c.is_override())
            .any(|c| self.weight(*c) != 0.0)
    }
}

//==============================================================================
// Deposit creators
//==============================================================================

/// Creator entry for the deposit metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatorEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,
}

impl From<&AuthorRecord> for CreatorEntry {
    fn from(record: &AuthorRecord) -> Self {
        let affiliations = record.affiliations();
        Self {
            name: record.display_name(),
            affiliation: if affiliations.is_empty() {
                None
            } else {
                Some(affiliations.join("; "))
            },
            orcid: record.orcid.clone(),
        }
    }
}

#[cfg(test)]
impl AuthorRecord {
    pub(crate) fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = Some(affiliation.into());
        self
    }

    pub(crate) fn with_orcid(mut self, orcid: impl Into<String>) -> Self {
        self.orcid = Some(orcid.into());
        self
    }
}
