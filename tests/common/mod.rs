//! Shared fixtures: authors-lists workbooks written with rust_xlsxwriter

#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tara_authors::AuthorCategory;

pub const MASTER_HEADERS: [&str; 5] = [
    "last name",
    "first name",
    "first name initial(s)",
    "affiliation",
    "ORCID",
];

pub const KONSTANZ: &str = "Department of Biology, University of Konstanz, 78457 Konstanz, Germany";

/// One row of an ordering sheet; weights follow `AuthorCategory::PRIORITY`
#[derive(Clone)]
pub struct OrderRow {
    pub last: &'static str,
    pub first: &'static str,
    pub weights: [f64; 6],
    pub sum: f64,
}

pub fn row(last: &'static str, first: &'static str, weights: [f64; 6]) -> OrderRow {
    OrderRow {
        last,
        first,
        weights,
        sum: weights.iter().sum(),
    }
}

/// Master sheet rows used by most tests
pub fn master_rows() -> Vec<[&'static str; 5]> {
    vec![
        ["Smith", "John", "J.", "Lab1", "https://orcid.org/0000-0002-1825-0097"],
        ["Doe", "Anna", "A.-M.", "Lab2\nLab1", "not-provided"],
        ["Lee", "Kim", "K.", "not-provided", "not-provided"],
        ["Pogoreutz", "Claudia", "C.", "not-provided", "0000-0001-2345-678X"],
        ["Planes", "Serge", "S.", "Lab4", "not-provided"],
        ["Brown", "Bob", "B.", "Lab3", "not-provided"],
    ]
}

/// Ordering rows for the "Paper" sheet.
///
/// Expected order: Smith, Doe, Pogoreutz, Planes, Lee, Clayssen.
pub fn paper_rows() -> Vec<OrderRow> {
    vec![
        row("Smith", "John", [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        // also a Scientific Director, so placed in that pass
        row("Lee", "Kim", [0.0, 1.0, 0.0, 0.0, 1.0, 0.0]),
        row("Doe", "Anna", [0.0, 1.0, 0.0, 0.0, 0.0, 0.0]),
        row("Pogoreutz", "Claudia", [0.0, 0.0, 1.0, 0.0, 0.0, 0.0]),
        row("Brown", "Bob", [0.0; 6]),
        row("Planes", "Serge", [0.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
        row("Clayssen", "Quentin", [0.0, 0.0, 0.0, 0.0, 0.0, 1.0]),
    ]
}

/// Write a workbook with a "Template" sheet and one ordering sheet.
///
/// Zero weights are left blank, as in the consortium workbook.
pub fn write_workbook(
    path: &Path,
    master: &[[&str; 5]],
    sheet_name: &str,
    ordering: &[OrderRow],
) -> PathBuf {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet().set_name("Template").unwrap();
    for (col, header) in MASTER_HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (idx, person) in master.iter().enumerate() {
        for (col, value) in person.iter().enumerate() {
            sheet.write_string(idx as u32 + 1, col as u16, *value).unwrap();
        }
    }

    let sheet = workbook.add_worksheet().set_name(sheet_name).unwrap();
    sheet.write_string(0, 0, "last name").unwrap();
    sheet.write_string(0, 1, "first name").unwrap();
    for (idx, category) in AuthorCategory::PRIORITY.iter().enumerate() {
        sheet.write_string(0, idx as u16 + 2, category.header()).unwrap();
    }
    sheet.write_string(0, 8, "sum").unwrap();
    for (idx, order) in ordering.iter().enumerate() {
        let r = idx as u32 + 1;
        sheet.write_string(r, 0, order.last).unwrap();
        sheet.write_string(r, 1, order.first).unwrap();
        for (col, weight) in order.weights.iter().enumerate() {
            if *weight != 0.0 {
                sheet.write_number(r, col as u16 + 2, *weight).unwrap();
            }
        }
        sheet.write_number(r, 8, order.sum).unwrap();
    }

    workbook.save(path).unwrap();
    path.to_path_buf()
}

/// The standard fixture at `<dir>/authors.xlsx`
pub fn standard_workbook(dir: &Path) -> PathBuf {
    write_workbook(
        &dir.join("authors.xlsx"),
        &master_rows(),
        "Paper",
        &paper_rows(),
    )
}
