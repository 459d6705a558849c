//! Excel import for the authors-lists workbook

mod importer;

pub use importer::{SheetTable, WorkbookImporter, MASTER_SHEET};
