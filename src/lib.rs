//! Tara Authors - ordered author and affiliation lists from the consortium workbook
//!
//! This library reads the authors-lists workbook, orders the contributing authors
//! by category, numbers their affiliations and formats the strings used in
//! publications. It can also file the result as a draft Zenodo deposition.
//!
//! # Example
//!
//! ```no_run
//! use tara_authors::config::ExtractConfig;
//! use tara_authors::writer::AuthorStrings;
//!
//! let config = ExtractConfig::new("authors_list.xlsx", "Paper", "out");
//! let roster = tara_authors::cli::load_roster(&config, false)?;
//!
//! let strings = AuthorStrings::from_roster(&roster);
//! println!("{}", strings.authors_with_affiliations);
//! # Ok::<(), tara_authors::error::RosterError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod corrections;
pub mod error;
pub mod excel;
pub mod submission;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use crate::core::{build_roster, Roster};
pub use error::{RosterError, RosterResult};
pub use types::{AuthorCategory, AuthorKey, AuthorRecord, CategoryMembership, CreatorEntry};
