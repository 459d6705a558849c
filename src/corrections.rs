//! Versioned data corrections applied to the master table after loading
//!
//! The authors-lists workbook is shared and edited by many people; known gaps are
//! patched here rather than in the spreadsheet. Extra corrections can be supplied
//! in a YAML file:
//!
//! ```yaml
//! version: 2
//! corrections:
//!   - action: set_field
//!     key: SmithJ
//!     field: affiliation
//!     value: "Department of Biology, Example University"
//!   - action: add_author
//!     record:
//!       last_name: Doe
//!       first_name: Anna
//!       first_initials: A.
//! ```

use crate::core::AuthorDirectory;
use crate::error::{RosterError, RosterResult};
use crate::types::{AuthorKey, AuthorRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Version of the built-in correction list
pub const BUILTIN_VERSION: u32 = 1;

/// Field of an [`AuthorRecord`] a correction may overwrite.
///
/// Name fields are excluded: changing them would change the author key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorField {
    FirstInitials,
    Affiliation,
    Orcid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Correction {
    SetField {
        key: AuthorKey,
        field: AuthorField,
        value: String,
    },
    AddAuthor {
        record: AuthorRecord,
    },
}

/// A versioned list of corrections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionSet {
    pub version: u32,
    #[serde(default)]
    pub corrections: Vec<Correction>,
}

impl CorrectionSet {
    /// Corrections for the consortium workbook
    pub fn builtin() -> Self {
        Self {
            version: BUILTIN_VERSION,
            corrections: vec![
                Correction::SetField {
                    key: AuthorKey::from("PogoreutzC"),
                    field: AuthorField::Affiliation,
                    value: "Department of Biology, University of Konstanz, 78457 Konstanz, Germany"
                        .to_string(),
                },
                Correction::AddAuthor {
                    record: AuthorRecord::new("Clayssen", "Quentin", "C."),
                },
            ],
        }
    }

    pub fn from_yaml(content: &str) -> RosterResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn load(path: &Path) -> RosterResult<Self> {
        if !path.is_file() {
            return Err(RosterError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Apply every correction in order, returning how many took effect.
    ///
    /// Patching an unknown author or adding one that already exists is skipped with
    /// a warning; the sheet may have been fixed in the meantime.
    pub fn apply(&self, directory: &mut AuthorDirectory) -> RosterResult<usize> {
        let mut applied = 0;
        for correction in &self.corrections {
            if apply_one(correction, directory)? {
                applied += 1;
            }
        }
        info!(
            version = self.version,
            applied,
            total = self.corrections.len(),
            "Applied author corrections"
        );
        Ok(applied)
    }
}

fn apply_one(correction: &Correction, directory: &mut AuthorDirectory) -> RosterResult<bool> {
    match correction {
        Correction::SetField { key, field, value } => {
            let Some(record) = directory.get_mut(key) else {
                warn!(author = %key, "Correction skipped: author not in master table");
                return Ok(false);
            };
            let value = value.trim();
            let value = (!value.is_empty()).then(|| value.to_string());
            match field {
                AuthorField::FirstInitials => record.first_initials = value.unwrap_or_default(),
                AuthorField::Affiliation => record.affiliation = value,
                AuthorField::Orcid => record.orcid = value,
            }
            Ok(true)
        }
        Correction::AddAuthor { record } => {
            let key = record.key().ok_or_else(|| {
                RosterError::Correction(format!(
                    "cannot add author '{}': first and last name are required",
                    record.display_name()
                ))
            })?;
            if directory.contains(&key) {
                warn!(author = %key, "Correction skipped: author already in master table");
                return Ok(false);
            }
            directory.insert(key, record.clone())?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> AuthorDirectory {
        let records = vec![
            AuthorRecord::new("Pogoreutz", "Claudia", "C."),
            AuthorRecord::new("Smith", "John", "J.").with_affiliation("Lab1"),
        ];
        AuthorDirectory::from_records(
            "Template",
            records.into_iter().map(|r| (r.key().unwrap(), r)),
        )
        .unwrap()
    }

    #[test]
    fn test_builtin_corrections() {
        let mut dir = directory();
        let applied = CorrectionSet::builtin().apply(&mut dir).unwrap();

        assert_eq!(applied, 2);
        assert_eq!(
            dir.get(&"PogoreutzC".into()).unwrap().affiliation.as_deref(),
            Some("Department of Biology, University of Konstanz, 78457 Konstanz, Germany")
        );
        let clayssen = dir.get(&"ClayssenQ".into()).unwrap();
        assert_eq!(clayssen.first_initials, "C.");
        assert!(clayssen.affiliation.is_none());
        assert!(clayssen.orcid.is_none());
    }

    #[test]
    fn test_unknown_key_is_skipped() {
        let mut dir = AuthorDirectory::new("Template");
        let applied = CorrectionSet::builtin().apply(&mut dir).unwrap();
        // only the insertion takes effect
        assert_eq!(applied, 1);
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn test_existing_author_is_not_replaced() {
        let mut dir = directory();
        dir.insert(
            "ClayssenQ".into(),
            AuthorRecord::new("Clayssen", "Quentin", "Q.").with_affiliation("Lab9"),
        )
        .unwrap();

        CorrectionSet::builtin().apply(&mut dir).unwrap();
        let clayssen = dir.get(&"ClayssenQ".into()).unwrap();
        assert_eq!(clayssen.affiliation.as_deref(), Some("Lab9"));
    }

    #[test]
    fn test_empty_value_clears_field() {
        let mut dir = directory();
        let set = CorrectionSet {
            version: 2,
            corrections: vec![Correction::SetField {
                key: "SmithJ".into(),
                field: AuthorField::Affiliation,
                value: "  ".to_string(),
            }],
        };
        set.apply(&mut dir).unwrap();
        assert!(dir.get(&"SmithJ".into()).unwrap().affiliation.is_none());
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
version: 2
corrections:
  - action: set_field
    key: SmithJ
    field: orcid
    value: "0000-0002-1825-0097"
  - action: add_author
    record:
      last_name: Doe
      first_name: Anna
      first_initials: A.
      affiliation: Lab2
"#;
        let set = CorrectionSet::from_yaml(yaml).unwrap();
        assert_eq!(set.version, 2);
        assert_eq!(set.corrections.len(), 2);

        let mut dir = directory();
        assert_eq!(set.apply(&mut dir).unwrap(), 2);
        assert_eq!(
            dir.get(&"SmithJ".into()).unwrap().orcid.as_deref(),
            Some("0000-0002-1825-0097")
        );
        assert_eq!(
            dir.get(&"DoeA".into()).unwrap().affiliation.as_deref(),
            Some("Lab2")
        );
    }

    #[test]
    fn test_from_yaml_rejects_unknown_field() {
        let yaml = r#"
version: 2
corrections:
  - action: set_field
    key: SmithJ
    field: last_name
    value: Smyth
"#;
        assert!(matches!(
            CorrectionSet::from_yaml(yaml),
            Err(RosterError::Yaml(_))
        ));
    }

    #[test]
    fn test_add_author_without_first_name_fails() {
        let mut dir = directory();
        let set = CorrectionSet {
            version: 2,
            corrections: vec![Correction::AddAuthor {
                record: AuthorRecord::new("Nameless", "", ""),
            }],
        };
        assert!(matches!(
            set.apply(&mut dir),
            Err(RosterError::Correction(_))
        ));
    }
}
