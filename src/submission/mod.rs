//! Dataset submission to the deposit API
//!
//! The sequence is strictly ordered: create an empty deposition, upload each data
//! file into its bucket, then attach the metadata. Nothing is published; the returned
//! URL is for manual review. A failure part-way leaves the draft on the remote side
//! and a re-run starts a new deposition.

mod client;
mod metadata;

pub use client::{
    bucket_file_url, Deposition, DepositApi, DepositClient, DEFAULT_API_URL, DEFAULT_TIMEOUT,
};
pub use metadata::{Community, DepositMetadata, MetadataEnvelope};

use crate::error::{RosterError, RosterResult};
use crate::types::CreatorEntry;
use std::path::PathBuf;
use tracing::{info, warn};

/// Everything the deposit needs besides the API client
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    pub title: String,
    pub description: String,
    pub references: Vec<String>,
    pub creators: Vec<CreatorEntry>,
    pub data_files: Vec<PathBuf>,
}

impl SubmissionRequest {
    pub fn metadata(&self) -> MetadataEnvelope {
        DepositMetadata::new(
            self.title.clone(),
            self.description.clone(),
            self.creators.clone(),
            self.references.clone(),
        )
        .into_envelope()
    }
}

/// Fail with every missing path at once, rather than on the first
pub fn check_upload_paths(paths: &[PathBuf]) -> RosterResult<()> {
    let missing: Vec<PathBuf> = paths.iter().filter(|p| !p.is_file()).cloned().collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(RosterError::FileNotFoundForUpload(missing))
    }
}

/// Run the deposit sequence and return the deposition's web page URL
pub fn assemble_and_submit<A: DepositApi>(
    api: &A,
    request: &SubmissionRequest,
) -> RosterResult<String> {
    check_upload_paths(&request.data_files)?;
    if request.data_files.is_empty() {
        warn!("No data files will be uploaded with this submission");
    }

    let deposition = api.create_deposition()?;
    info!(deposition_id = deposition.id, "Created new deposition");

    for path in &request.data_files {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| RosterError::FileNotFound(path.clone()))?;
        api.upload_file(&deposition.bucket_url, &file_name, path)?;
        info!(file = %path.display(), "Uploaded");
    }

    let html_url = api.update_metadata(deposition.id, &request.metadata())?;
    info!(deposition_id = deposition.id, "Metadata submitted");
    Ok(html_url)
}
