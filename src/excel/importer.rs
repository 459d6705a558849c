//! Workbook importer: authors-lists workbook (.xlsx/.xls/.ods) → author tables

use crate::core::AuthorDirectory;
use crate::error::{RosterError, RosterResult};
use crate::types::{AuthorCategory, AuthorKey, AuthorRecord, CategoryMembership};
use calamine::{open_workbook_auto, Data, Range, Reader};
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Sheet holding names, affiliations and ORCIDs
pub const MASTER_SHEET: &str = "Template";

/// Placeholder the workbook uses for a blank affiliation or ORCID
const NOT_PROVIDED: &str = "not-provided";

const LAST_NAME: &str = "last name";
const FIRST_NAME: &str = "first name";
const FIRST_INITIALS: &str = "first name initial(s)";
const AFFILIATION: &str = "affiliation";
const ORCID: &str = "ORCID";
const SUM: &str = "sum";

/// A worksheet as a header row plus data rows.
///
/// Rows that are entirely empty (Excel's filter rows, trailing blanks) are dropped.
#[derive(Debug, Clone)]
pub struct SheetTable {
    pub name: String,
    headers: Vec<String>,
    /// (Excel row number, cells)
    rows: Vec<(usize, Vec<Data>)>,
}

impl SheetTable {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<Data>>) -> Self {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(idx, cells)| (idx + 2, cells))
            .filter(|(_, cells)| !is_empty_row(cells))
            .collect();
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// First row of the used range is the header
    pub fn from_range(name: &str, range: &Range<Data>) -> Self {
        let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
        let mut rows = range.rows();

        let headers = rows
            .next()
            .map(|header| header.iter().map(cell_text).collect())
            .unwrap_or_default();

        let rows = rows
            .enumerate()
            // +1 for 1-based rows, +1 for the header
            .map(|(idx, cells)| (first_row + idx + 2, cells.to_vec()))
            .filter(|(_, cells)| !is_empty_row(cells))
            .collect();

        Self {
            name: name.to_string(),
            headers,
            rows,
        }
    }

    /// Index of a header, compared after trimming
    pub fn column(&self, header: &str) -> RosterResult<usize> {
        self.headers
            .iter()
            .position(|h| h.trim() == header)
            .ok_or_else(|| RosterError::MissingColumn {
                sheet: self.name.clone(),
                column: header.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn cell<'a>(cells: &'a [Data], col: usize) -> &'a Data {
        cells.get(col).unwrap_or(&Data::Empty)
    }

    fn number(&self, row: usize, cells: &[Data], col: usize) -> RosterResult<f64> {
        cell_number(Self::cell(cells, col)).map_err(|value| RosterError::InvalidCell {
            sheet: self.name.clone(),
            row,
            column: self.headers[col].trim().to_string(),
            value,
        })
    }

    fn key(&self, row: usize, cells: &[Data], last: usize, first: usize) -> RosterResult<AuthorKey> {
        let last_name = cell_text(Self::cell(cells, last));
        let first_name = cell_text(Self::cell(cells, first));
        AuthorKey::from_names(&last_name, &first_name).ok_or_else(|| RosterError::InvalidRow {
            sheet: self.name.clone(),
            row,
            reason: format!(
                "both '{}' and '{}' are required (got '{}', '{}')",
                LAST_NAME, FIRST_NAME, last_name, first_name
            ),
        })
    }
}

/// Importer for the consortium authors-lists workbook
pub struct WorkbookImporter {
    path: PathBuf,
    orcid_pattern: Regex,
}

impl WorkbookImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> RosterResult<Self> {
        let orcid_pattern = Regex::new(
            r"(?i)^(?:(?:https?://)?(?:www\.)?orcid\.org/)?(\d{4}-\d{4}-\d{4}-\d{3}[\dX])/?$",
        )
        .map_err(|e| RosterError::Workbook(format!("Regex error: {}", e)))?;
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            orcid_pattern,
        })
    }

    /// Read the master sheet and the named ordering sheet
    pub fn import(&self, target_sheet: &str) -> RosterResult<(SheetTable, SheetTable)> {
        if !self.path.is_file() {
            return Err(RosterError::FileNotFound(self.path.clone()));
        }
        let mut workbook = open_workbook_auto(&self.path)?;
        let sheet_names = workbook.sheet_names();

        let mut read = |name: &str| -> RosterResult<SheetTable> {
            if !sheet_names.iter().any(|s| s == name) {
                return Err(RosterError::MissingSheet {
                    sheet: name.to_string(),
                    available: sheet_names.join(", "),
                });
            }
            let range = workbook.worksheet_range(name)?;
            let table = SheetTable::from_range(name, &range);
            debug!(sheet = name, rows = table.len(), "Read worksheet");
            Ok(table)
        };

        let master = read(MASTER_SHEET)?;
        let ordering = read(target_sheet)?;
        Ok((master, ordering))
    }

    /// Build the author directory from the master sheet
    pub fn master_directory(&self, table: &SheetTable) -> RosterResult<AuthorDirectory> {
        let last = table.column(LAST_NAME)?;
        let first = table.column(FIRST_NAME)?;
        let initials = table.column(FIRST_INITIALS)?;
        let affiliation = table.column(AFFILIATION)?;
        let orcid = table.column(ORCID)?;

        let records = table
            .rows
            .iter()
            .map(|(row, cells)| {
                let key = table.key(*row, cells, last, first)?;
                let record = AuthorRecord {
                    last_name: cell_text(SheetTable::cell(cells, last)),
                    first_name: cell_text(SheetTable::cell(cells, first)),
                    first_initials: cell_text(SheetTable::cell(cells, initials)),
                    affiliation: optional_text(SheetTable::cell(cells, affiliation)),
                    orcid: optional_text(SheetTable::cell(cells, orcid))
                        .and_then(|raw| self.normalize_orcid(&key, &raw)),
                };
                Ok((key, record))
            })
            .collect::<RosterResult<Vec<_>>>()?;
        AuthorDirectory::from_records(table.name.clone(), records)
    }

    /// Parse the ordering sheet, keeping only rows with `sum > 0`.
    ///
    /// Blank weights count as zero. Key and uniqueness checks happen on kept rows only.
    pub fn memberships(&self, table: &SheetTable) -> RosterResult<Vec<CategoryMembership>> {
        let last = table.column(LAST_NAME)?;
        let first = table.column(FIRST_NAME)?;
        let sum = table.column(SUM)?;
        let categories = AuthorCategory::PRIORITY
            .iter()
            .map(|c| table.column(c.header()).map(|col| (*c, col)))
            .collect::<RosterResult<Vec<_>>>()?;

        let mut memberships = Vec::new();
        for (row, cells) in &table.rows {
            let total = table.number(*row, cells, sum)?;
            if total <= 0.0 {
                debug!(sheet = %table.name, row, "Skipping row with non-positive sum");
                continue;
            }

            let key = table.key(*row, cells, last, first)?;
            let mut membership = CategoryMembership::new(key, total);
            for (category, col) in &categories {
                membership.set_weight(*category, table.number(*row, cells, *col)?);
            }
            memberships.push(membership);
        }
        Ok(memberships)
    }

    /// Accepts a bare ORCID iD or an orcid.org link to one (with or without scheme,
    /// `www.` or a trailing slash) and returns the bare iD with an upper-case check
    /// digit. Anything else is dropped with a warning.
    fn normalize_orcid(&self, author: &AuthorKey, raw: &str) -> Option<String> {
        match self.orcid_pattern.captures(raw.trim()) {
            Some(caps) => caps.get(1).map(|m| m.as_str().to_ascii_uppercase()),
            None => {
                warn!(author = %author, orcid = raw, "Ignoring malformed ORCID");
                None
            }
        }
    }
}

fn is_empty_row(cells: &[Data]) -> bool {
    cells.iter().all(|cell| cell_text(cell).is_empty())
}

/// Cell as trimmed text; whole floats lose their `.0`
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Empty | Data::Error(_) => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

/// Text cell with blanks and the `not-provided` placeholder mapped to `None`
fn optional_text(cell: &Data) -> Option<String> {
    let text = cell_text(cell);
    if text.is_empty() || text.eq_ignore_ascii_case(NOT_PROVIDED) {
        None
    } else {
        Some(text)
    }
}

/// Numeric cell; blanks and error cells count as zero
fn cell_number(cell: &Data) -> Result<f64, String> {
    match cell {
        Data::Float(f) if f.is_nan() => Ok(0.0),
        Data::Float(f) => Ok(*f),
        Data::Int(i) => Ok(*i as f64),
        Data::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Data::Empty | Data::Error(_) => Ok(0.0),
        Data::String(s) if s.trim().is_empty() => Ok(0.0),
        Data::String(s) => s.trim().parse::<f64>().map_err(|_| s.clone()),
        other => Err(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    fn importer() -> WorkbookImporter {
        WorkbookImporter::new("authors.xlsx").unwrap()
    }

    fn master(rows: Vec<Vec<Data>>) -> SheetTable {
        SheetTable::new(
            MASTER_SHEET,
            [LAST_NAME, FIRST_NAME, FIRST_INITIALS, AFFILIATION, ORCID]
                .iter()
                .map(|h| h.to_string())
                .collect(),
            rows,
        )
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&s("  Smith ")), "Smith");
        assert_eq!(cell_text(&Data::Float(42.0)), "42");
        assert_eq!(cell_text(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::Empty), "");
    }

    #[test]
    fn test_cell_number() {
        assert_eq!(cell_number(&Data::Float(2.0)), Ok(2.0));
        assert_eq!(cell_number(&Data::Int(3)), Ok(3.0));
        assert_eq!(cell_number(&Data::Empty), Ok(0.0));
        assert_eq!(cell_number(&s(" ")), Ok(0.0));
        assert_eq!(cell_number(&s("1")), Ok(1.0));
        assert_eq!(cell_number(&s("yes")), Err("yes".to_string()));
    }

    #[test]
    fn test_sentinel_becomes_none() {
        assert_eq!(optional_text(&s("not-provided")), None);
        assert_eq!(optional_text(&Data::Empty), None);
        assert_eq!(optional_text(&s("Lab1")), Some("Lab1".to_string()));
    }

    #[test]
    fn test_empty_rows_are_dropped() {
        let table = master(vec![
            vec![s("Smith"), s("John"), s("J."), s("Lab1"), Data::Empty],
            vec![Data::Empty, s(" "), Data::Empty],
            vec![s("Doe"), s("Anna"), s("A."), s("Lab2"), Data::Empty],
        ]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_master_directory() {
        let table = master(vec![
            vec![
                s("Smith"),
                s("John"),
                s("J."),
                s("Lab1"),
                s("https://orcid.org/0000-0002-1825-0097"),
            ],
            vec![s("Doe"), s("Anna"), s("A."), s("not-provided"), s("not-provided")],
        ]);
        let directory = importer().master_directory(&table).unwrap();

        let smith = directory.get(&"SmithJ".into()).unwrap();
        assert_eq!(smith.first_initials, "J.");
        assert_eq!(smith.affiliation.as_deref(), Some("Lab1"));
        assert_eq!(smith.orcid.as_deref(), Some("0000-0002-1825-0097"));

        let doe = directory.get(&"DoeA".into()).unwrap();
        assert!(doe.affiliation.is_none());
        assert!(doe.orcid.is_none());
    }

    #[test]
    fn test_malformed_orcid_is_dropped() {
        let table = master(vec![vec![s("Smith"), s("John"), s("J."), s("Lab1"), s("12345")]]);
        let directory = importer().master_directory(&table).unwrap();
        assert!(directory.get(&"SmithJ".into()).unwrap().orcid.is_none());
    }

    #[test]
    fn test_orcid_link_forms() {
        let importer = importer();
        let key = AuthorKey::from("SmithJ");
        for raw in [
            "0000-0002-1825-0097",
            "orcid.org/0000-0002-1825-0097",
            "http://orcid.org/0000-0002-1825-0097",
            "https://www.orcid.org/0000-0002-1825-0097",
            "https://orcid.org/0000-0002-1825-0097/",
            "HTTPS://ORCID.ORG/0000-0002-1825-0097",
            " 0000-0002-1825-0097 ",
        ] {
            assert_eq!(
                importer.normalize_orcid(&key, raw).as_deref(),
                Some("0000-0002-1825-0097"),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_orcid_check_digit_is_upper_cased() {
        let importer = importer();
        let key = AuthorKey::from("SmithJ");
        assert_eq!(
            importer.normalize_orcid(&key, "0000-0002-9079-593x").as_deref(),
            Some("0000-0002-9079-593X")
        );
        assert_eq!(
            importer
                .normalize_orcid(&key, "https://orcid.org/0000-0002-9079-593X")
                .as_deref(),
            Some("0000-0002-9079-593X")
        );
    }

    #[test]
    fn test_orcid_lookalikes_are_rejected() {
        let importer = importer();
        let key = AuthorKey::from("SmithJ");
        for raw in [
            "https://example.org/0000-0002-1825-0097",
            "0000-0002-1825-00977",
            "0000-0002-1825-009Y",
            "orcid.org//0000-0002-1825-0097",
        ] {
            assert_eq!(importer.normalize_orcid(&key, raw), None, "{raw}");
        }
    }

    #[test]
    fn test_master_duplicate_key() {
        let table = master(vec![
            vec![s("Smith"), s("John"), s("J.")],
            vec![s("Smith"), s("Jane"), s("J.")],
        ]);
        assert!(matches!(
            importer().master_directory(&table),
            Err(RosterError::DuplicateAuthorKey { .. })
        ));
    }

    #[test]
    fn test_master_missing_column() {
        let table = SheetTable::new(MASTER_SHEET, vec![LAST_NAME.to_string()], vec![]);
        match importer().master_directory(&table) {
            Err(RosterError::MissingColumn { sheet, column }) => {
                assert_eq!(sheet, MASTER_SHEET);
                assert_eq!(column, FIRST_NAME);
            }
            other => panic!("Expected MissingColumn, got {:?}", other.map(|d| d.len())),
        }
    }

    #[test]
    fn test_master_row_without_first_name() {
        let table = master(vec![vec![s("Smith"), Data::Empty, s("J.")]]);
        match importer().master_directory(&table) {
            Err(RosterError::InvalidRow { row, .. }) => assert_eq!(row, 2),
            other => panic!("Expected InvalidRow, got {:?}", other.map(|d| d.len())),
        }
    }

    fn ordering(rows: Vec<Vec<Data>>) -> SheetTable {
        let mut headers = vec![LAST_NAME.to_string(), FIRST_NAME.to_string()];
        headers.extend(AuthorCategory::PRIORITY.iter().map(|c| c.header().to_string()));
        headers.push(SUM.to_string());
        SheetTable::new("Paper", headers, rows)
    }

    #[test]
    fn test_memberships_filter_and_fill() {
        let table = ordering(vec![
            vec![
                s("Smith"),
                s("John"),
                Data::Float(1.0),
                Data::Empty,
                Data::Empty,
                Data::Empty,
                Data::Empty,
                Data::Empty,
                Data::Float(1.0),
            ],
            // zero sum, and no first name: skipped before key checks
            vec![
                s("Zero"),
                Data::Empty,
                Data::Empty,
                Data::Empty,
                Data::Empty,
                Data::Empty,
                Data::Empty,
                Data::Empty,
                Data::Float(0.0),
            ],
            // blank sum counts as zero
            vec![s("Blank"), s("Bob"), Data::Float(1.0)],
        ]);
        let rows = importer().memberships(&table).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key.as_str(), "SmithJ");
        assert_eq!(rows[0].weight(AuthorCategory::FirstAuthor), 1.0);
        assert_eq!(rows[0].weight(AuthorCategory::Contrib3), 0.0);
    }

    #[test]
    fn test_memberships_reject_text_weight() {
        let table = ordering(vec![vec![
            s("Smith"),
            s("John"),
            s("x"),
            Data::Empty,
            Data::Empty,
            Data::Empty,
            Data::Empty,
            Data::Empty,
            Data::Float(1.0),
        ]]);
        match importer().memberships(&table) {
            Err(RosterError::InvalidCell { column, value, .. }) => {
                assert_eq!(column, "First author(s)");
                assert_eq!(value, "x");
            }
            other => panic!("Expected InvalidCell, got {:?}", other),
        }
    }
}
