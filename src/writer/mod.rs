//! Author and affiliation strings, and their output files

use crate::core::Roster;
use crate::error::RosterResult;
use std::fs;
use std::path::{Path, PathBuf};

/// Joins several superscript affiliation numbers (U+02D2 MODIFIER LETTER CENTRED RIGHT HALF RING)
pub const SUPERSCRIPT_SEPARATOR: &str = "˒";

pub const AUTHORS_PLAIN_FILE: &str = "author_string_w_o_affiliation_numbers.txt";
pub const AUTHORS_NUMBERED_FILE: &str = "author_string_w_affiliation_numbers.txt";
pub const AFFILIATIONS_ONE_LINE_FILE: &str = "affiliations_one_line.txt";
pub const AFFILIATIONS_NEW_LINES_FILE: &str = "affiliations_new_lines.txt";

/// Convert a number to Unicode superscript digits, e.g. `12` → `¹²`
pub fn superscript(number: usize) -> String {
    number
        .to_string()
        .chars()
        .map(|c| match c {
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            '9' => '⁹',
            other => other,
        })
        .collect()
}

/// The four publication strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorStrings {
    /// `Last, Initials; Last, Initials`
    pub authors: String,
    /// `Last, Initials¹˒²; Last, Initials³`
    pub authors_with_affiliations: String,
    /// `1-Affiliation; 2-Affiliation`
    pub affiliations_one_line: String,
    /// `1-Affiliation;\n2-Affiliation`
    pub affiliations_new_lines: String,
}

impl AuthorStrings {
    pub fn from_roster(roster: &Roster) -> Self {
        let mut plain = Vec::with_capacity(roster.order.len());
        let mut numbered = Vec::with_capacity(roster.order.len());

        for key in roster.order.iter() {
            let Some(record) = roster.directory.get(key) else {
                continue;
            };
            let name = record.citation_name();
            let markers = roster
                .registry
                .author_numbers(key)
                .iter()
                .map(|n| superscript(*n))
                .collect::<Vec<_>>()
                .join(SUPERSCRIPT_SEPARATOR);
            numbered.push(format!("{}{}", name, markers));
            plain.push(name);
        }

        let affiliations: Vec<String> = roster
            .registry
            .numbered()
            .map(|(number, affiliation)| format!("{}-{}", number, affiliation))
            .collect();

        Self {
            authors: plain.join("; "),
            authors_with_affiliations: numbered.join("; "),
            affiliations_one_line: affiliations.join("; "),
            affiliations_new_lines: affiliations.join(";\n"),
        }
    }

    /// (file name, content) pairs in output order
    pub fn files(&self) -> [(&'static str, &str); 4] {
        [
            (AUTHORS_PLAIN_FILE, self.authors.as_str()),
            (AUTHORS_NUMBERED_FILE, self.authors_with_affiliations.as_str()),
            (AFFILIATIONS_ONE_LINE_FILE, self.affiliations_one_line.as_str()),
            (AFFILIATIONS_NEW_LINES_FILE, self.affiliations_new_lines.as_str()),
        ]
    }
}

/// Write each string to its fixed file name in `output_dir`, returning the paths written.
///
/// Files hold the string exactly, without a trailing newline.
pub fn write_outputs(output_dir: &Path, strings: &AuthorStrings) -> RosterResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(4);
    for (file_name, content) in strings.files() {
        let path = output_dir.join(file_name);
        fs::write(&path, content)?;
        written.push(path);
    }
    Ok(written)
}
