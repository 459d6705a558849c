use super::directory::AuthorDirectory;
use super::ordering::AuthorOrder;
use crate::types::AuthorKey;
use std::collections::HashMap;
use tracing::warn;

/// Affiliation numbering, assigned in first-seen order along the author order
#[derive(Debug, Clone, Default)]
pub struct AffiliationRegistry {
    affiliations: Vec<String>,
    numbers: HashMap<String, usize>,
    author_numbers: HashMap<AuthorKey, Vec<usize>>,
    unaffiliated: Vec<AuthorKey>,
}

impl AffiliationRegistry {
    /// Walk `order` and number each distinct affiliation the first time it is met.
    ///
    /// Authors without an affiliation (or without a directory entry) are logged and
    /// skipped; numbering continues with the next author.
    pub fn build(order: &AuthorOrder, directory: &AuthorDirectory) -> Self {
        let mut registry = Self::default();

        for key in order.iter() {
            let affiliations = directory
                .get(key)
                .map(|record| record.affiliations())
                .unwrap_or_default();

            if affiliations.is_empty() {
                warn!(
                    author = %key,
                    "An affiliation could not be found for {}; no affiliation will be associated",
                    key
                );
                registry.unaffiliated.push(key.clone());
                continue;
            }

            for affiliation in affiliations {
                let number = registry.number_or_insert(affiliation);
                let numbers = registry.author_numbers.entry(key.clone()).or_default();
                if !numbers.contains(&number) {
                    numbers.push(number);
                }
            }
        }

        registry
    }

    fn number_or_insert(&mut self, affiliation: &str) -> usize {
        if let Some(&number) = self.numbers.get(affiliation) {
            return number;
        }
        self.affiliations.push(affiliation.to_string());
        let number = self.affiliations.len();
        self.numbers.insert(affiliation.to_string(), number);
        number
    }

    /// Distinct affiliations; entry `i` carries number `i + 1`
    pub fn affiliations(&self) -> &[String] {
        &self.affiliations
    }

    pub fn len(&self) -> usize {
        self.affiliations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.affiliations.is_empty()
    }

    /// 1-based number of an affiliation string
    pub fn number_of(&self, affiliation: &str) -> Option<usize> {
        self.numbers.get(affiliation).copied()
    }

    /// Affiliation string for a 1-based number
    pub fn affiliation(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|idx| self.affiliations.get(idx))
            .map(String::as_str)
    }

    /// Affiliation numbers of an author, in encounter order
    pub fn author_numbers(&self, key: &AuthorKey) -> &[usize] {
        self.author_numbers
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Authors that were placed without an affiliation
    pub fn unaffiliated_authors(&self) -> &[AuthorKey] {
        &self.unaffiliated
    }

    /// `(number, affiliation)` pairs in numbering order
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &str)> {
        self.affiliations
            .iter()
            .enumerate()
            .map(|(idx, a)| (idx + 1, a.as_str()))
    }
}
