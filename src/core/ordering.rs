//! Author ordering over the category-membership table
//!
//! Categories are walked in [`AuthorCategory::PRIORITY`] order and, within a
//! category, rows are walked top to bottom. An author is placed once, at the first
//! ordinary category where they carry weight, unless they carry weight in an
//! override category (Scientific Directors, Contributing authors list #3). Those
//! authors are only placed when their override category is reached.

use crate::error::{RosterError, RosterResult};
use crate::types::{AuthorCategory, AuthorKey, CategoryMembership};
use std::collections::HashSet;

/// Ordered author keys, each appearing once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorOrder(Vec<AuthorKey>);

impl AuthorOrder {
    pub fn keys(&self) -> &[AuthorKey] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &AuthorKey> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 0-based position of an author in the order
    pub fn position(&self, key: &AuthorKey) -> Option<usize> {
        self.0.iter().position(|k| k == key)
    }
}

/// Keep only rows that take part in ordering (`sum > 0`)
pub fn filter_memberships(rows: Vec<CategoryMembership>) -> Vec<CategoryMembership> {
    rows.into_iter().filter(|row| row.sum > 0.0).collect()
}

/// Compute the author order for rows that passed [`filter_memberships`].
///
/// Fails with [`RosterError::OrderCountMismatch`] if any row is left unplaced,
/// which happens when a row has a positive sum but no positive category weight.
pub fn make_author_order(rows: &[CategoryMembership]) -> RosterResult<AuthorOrder> {
    let mut placed: HashSet<&AuthorKey> = HashSet::with_capacity(rows.len());
    let mut order = Vec::with_capacity(rows.len());

    for category in AuthorCategory::PRIORITY {
        for row in rows {
            if placed.contains(&row.key) || row.weight(category) <= 0.0 {
                continue;
            }
            if !category.is_override() && row.in_override_category() {
                continue;
            }
            placed.insert(&row.key);
            order.push(row.key.clone());
        }
    }

    if order.len() != rows.len() {
        return Err(RosterError::OrderCountMismatch {
            placed: order.len(),
            expected: rows.len(),
        });
    }

    Ok(AuthorOrder(order))
}
