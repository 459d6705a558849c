//! Run configuration resolved from command-line arguments
//!
//! Each component takes only the values it needs: extraction never sees the access
//! token, and the submission settings are resolved (files read, required fields
//! checked) before the workbook is opened.

use crate::error::{RosterError, RosterResult};
use crate::submission::{check_upload_paths, DEFAULT_API_URL, DEFAULT_TIMEOUT};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings for reading the workbook and writing the author strings
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    pub workbook_path: PathBuf,
    pub target_sheet: String,
    pub output_dir: PathBuf,
    /// Extra corrections file, applied after the built-in list
    pub corrections_path: Option<PathBuf>,
    pub builtin_corrections: bool,
}

impl ExtractConfig {
    pub fn new(
        workbook_path: impl Into<PathBuf>,
        target_sheet: impl Into<String>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            workbook_path: workbook_path.into(),
            target_sheet: target_sheet.into(),
            output_dir: output_dir.into(),
            corrections_path: None,
            builtin_corrections: true,
        }
    }

    /// The output directory must already exist
    pub fn validate(&self) -> RosterResult<()> {
        if !self.output_dir.is_dir() {
            return Err(RosterError::InputDirectoryNotFound(self.output_dir.clone()));
        }
        Ok(())
    }
}

/// Raw submission arguments as given on the command line
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionArgs {
    pub access_token_path: Option<PathBuf>,
    /// Comma-separated list of files to upload
    pub data_file_paths: Option<String>,
    pub title: Option<String>,
    /// Literal text, or the path of a text file holding it
    pub description: Option<String>,
    pub references_path: Option<PathBuf>,
    pub api_url: String,
    pub timeout_secs: u64,
    pub dry_run: bool,
}

impl Default for SubmissionArgs {
    fn default() -> Self {
        Self {
            access_token_path: None,
            data_file_paths: None,
            title: None,
            description: None,
            references_path: None,
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            dry_run: false,
        }
    }
}

/// Fully resolved submission settings
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionConfig {
    pub api_url: String,
    pub access_token: String,
    pub title: String,
    pub description: String,
    pub references: Vec<String>,
    pub data_files: Vec<PathBuf>,
    pub timeout: Duration,
    pub dry_run: bool,
}

impl SubmissionConfig {
    /// Read the token, description and references files and check the upload paths
    pub fn resolve(args: SubmissionArgs) -> RosterResult<Self> {
        let data_files = split_data_files(args.data_file_paths.as_deref());
        check_upload_paths(&data_files)?;

        let title = args
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| RosterError::MissingField("title".to_string()))?;

        let description = match args.description {
            Some(text) => read_description(&text)?,
            None => String::new(),
        };

        let token_path = args
            .access_token_path
            .ok_or_else(|| RosterError::MissingField("access token path".to_string()))?;
        let access_token = read_access_token(&token_path)?;

        let references = match args.references_path {
            Some(path) => read_references(&path)?,
            None => Vec::new(),
        };

        Ok(Self {
            api_url: args.api_url,
            access_token,
            title,
            description,
            references,
            data_files,
            timeout: Duration::from_secs(args.timeout_secs),
            dry_run: args.dry_run,
        })
    }
}

fn split_data_files(raw: Option<&str>) -> Vec<PathBuf> {
    raw.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .collect()
    })
    .unwrap_or_default()
}

/// A description naming an existing file is replaced by the file's contents
fn read_description(text: &str) -> RosterResult<String> {
    let path = Path::new(text);
    if !path.is_file() {
        return Ok(text.to_string());
    }
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n"))
}

/// First line of the token file, trimmed
fn read_access_token(path: &Path) -> RosterResult<String> {
    if !path.is_file() {
        return Err(RosterError::FileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let token = content.lines().next().unwrap_or_default().trim();
    if token.is_empty() {
        return Err(RosterError::MissingField("access token".to_string()));
    }
    Ok(token.to_string())
}

/// One reference per line
fn read_references(path: &Path) -> RosterResult<Vec<String>> {
    if !path.exists() {
        return Err(RosterError::FileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    Ok(content.lines().map(|l| l.trim_end().to_string()).collect())
}
