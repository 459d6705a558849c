use crate::error::{RosterError, RosterResult};
use crate::types::{AuthorKey, AuthorRecord};
use std::collections::HashMap;

/// Master author table keyed by [`AuthorKey`]
#[derive(Debug, Clone, Default)]
pub struct AuthorDirectory {
    sheet: String,
    records: Vec<AuthorRecord>,
    by_key: HashMap<AuthorKey, usize>,
}

impl AuthorDirectory {
    #[must_use]
    pub fn new(sheet: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            ..Self::default()
        }
    }

    /// Build a directory from loaded rows, rejecting key collisions
    pub fn from_records(
        sheet: impl Into<String>,
        records: impl IntoIterator<Item = (AuthorKey, AuthorRecord)>,
    ) -> RosterResult<Self> {
        let mut directory = Self::new(sheet);
        for (key, record) in records {
            directory.insert(key, record)?;
        }
        Ok(directory)
    }

    pub fn insert(&mut self, key: AuthorKey, record: AuthorRecord) -> RosterResult<()> {
        if self.by_key.contains_key(&key) {
            return Err(RosterError::DuplicateAuthorKey {
                sheet: self.sheet.clone(),
                key,
            });
        }
        self.by_key.insert(key, self.records.len());
        self.records.push(record);
        Ok(())
    }

    pub fn get(&self, key: &AuthorKey) -> Option<&AuthorRecord> {
        self.by_key.get(key).map(|&idx| &self.records[idx])
    }

    pub fn get_mut(&mut self, key: &AuthorKey) -> Option<&mut AuthorRecord> {
        self.by_key.get(key).map(|&idx| &mut self.records[idx])
    }

    pub fn contains(&self, key: &AuthorKey) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
