//! Roster building: author directory, ordering and affiliation numbering

pub mod affiliations;
pub mod directory;
pub mod ordering;

pub use affiliations::AffiliationRegistry;
pub use directory::AuthorDirectory;
pub use ordering::{filter_memberships, make_author_order, AuthorOrder};

use crate::error::{RosterError, RosterResult};
use crate::types::{AuthorRecord, CategoryMembership, CreatorEntry};
use std::collections::HashSet;

/// Ordered authors with their affiliation numbering
#[derive(Debug, Clone)]
pub struct Roster {
    pub directory: AuthorDirectory,
    pub order: AuthorOrder,
    pub registry: AffiliationRegistry,
}

impl Roster {
    /// Author records in author order
    pub fn ordered_records(&self) -> impl Iterator<Item = &AuthorRecord> {
        self.order
            .iter()
            .filter_map(move |key| self.directory.get(key))
    }

    /// Creator list for the deposit metadata, in author order
    pub fn creator_entries(&self) -> Vec<CreatorEntry> {
        self.ordered_records().map(CreatorEntry::from).collect()
    }
}

/// Build the roster from a corrected master directory and the raw membership rows.
///
/// Rows with `sum <= 0` are dropped before ordering. Every ordered author must have
/// a directory entry.
pub fn build_roster(
    directory: AuthorDirectory,
    memberships: Vec<CategoryMembership>,
    membership_sheet: &str,
) -> RosterResult<Roster> {
    let rows = filter_memberships(memberships);

    let mut seen = HashSet::with_capacity(rows.len());
    for row in &rows {
        if !seen.insert(&row.key) {
            return Err(RosterError::DuplicateAuthorKey {
                sheet: membership_sheet.to_string(),
                key: row.key.clone(),
            });
        }
    }

    let order = make_author_order(&rows)?;

    if let Some(missing) = order.iter().find(|key| !directory.contains(key)) {
        return Err(RosterError::UnknownAuthorKey(missing.clone()));
    }

    let registry = AffiliationRegistry::build(&order, &directory);

    Ok(Roster {
        directory,
        order,
        registry,
    })
}
