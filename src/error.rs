use crate::types::AuthorKey;
use std::path::PathBuf;
use thiserror::Error;

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Sheet '{sheet}' not found in workbook (available: {available})")]
    MissingSheet { sheet: String, available: String },

    #[error("Sheet '{sheet}' has no '{column}' column")]
    MissingColumn { sheet: String, column: String },

    #[error("Sheet '{sheet}' row {row}: {reason}")]
    InvalidRow {
        sheet: String,
        row: usize,
        reason: String,
    },

    #[error("Sheet '{sheet}' row {row}, column '{column}': '{value}' is not a number")]
    InvalidCell {
        sheet: String,
        row: usize,
        column: String,
        value: String,
    },

    #[error("{} is not a recognized directory", .0.display())]
    InputDirectoryNotFound(PathBuf),

    #[error("Duplicate author key '{key}' in sheet '{sheet}'")]
    DuplicateAuthorKey { sheet: String, key: AuthorKey },

    #[error("Author '{0}' is listed for ordering but has no entry in the master table")]
    UnknownAuthorKey(AuthorKey),

    #[error("Author order placed {placed} authors but {expected} rows passed the sum filter")]
    OrderCountMismatch { placed: usize, expected: usize },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("The following files for upload could not be found:{}", format_paths(.0))]
    FileNotFoundForUpload(Vec<PathBuf>),

    #[error("Remote API error at {endpoint}: HTTP {status}: {body}")]
    RemoteApi {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Remote API request to {endpoint} timed out")]
    RemoteTimeout { endpoint: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Correction error: {0}")]
    Correction(String),
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("\n\t{}", p.display()))
        .collect()
}

impl From<calamine::Error> for RosterError {
    fn from(err: calamine::Error) -> Self {
        RosterError::Workbook(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_error_lists_every_path() {
        let err = RosterError::FileNotFoundForUpload(vec![
            PathBuf::from("a.txt"),
            PathBuf::from("b.txt"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("\n\ta.txt"));
        assert!(msg.contains("\n\tb.txt"));
    }

    #[test]
    fn test_remote_error_shows_status_and_body() {
        let err = RosterError::RemoteApi {
            endpoint: "/api/deposit/depositions".to_string(),
            status: 403,
            body: "{\"message\":\"forbidden\"}".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("forbidden"));
    }
}
