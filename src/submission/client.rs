//! Blocking client for the deposit REST API

use super::metadata::MetadataEnvelope;
use crate::error::{RosterError, RosterResult};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Default host for the deposit API
pub const DEFAULT_API_URL: &str = "https://zenodo.org";

/// Default timeout for connecting and for the JSON requests
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Slowest upload rate tolerated before a file upload is abandoned (bytes per second)
pub const MIN_UPLOAD_RATE: u64 = 32 * 1024;

/// Deadline for uploading `len` bytes: the base timeout plus the time the file
/// takes at [`MIN_UPLOAD_RATE`]
pub fn upload_deadline(timeout: Duration, len: u64) -> Duration {
    timeout + Duration::from_secs(len.div_ceil(MIN_UPLOAD_RATE))
}

/// A freshly created (empty) deposition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deposition {
    pub id: u64,
    pub bucket_url: String,
}

/// The three deposit operations the assembler drives, in order
pub trait DepositApi {
    /// Create an empty draft deposition
    fn create_deposition(&self) -> RosterResult<Deposition>;

    /// Upload one file into the deposition bucket under `file_name`
    fn upload_file(&self, bucket_url: &str, file_name: &str, path: &Path) -> RosterResult<()>;

    /// Attach metadata, returning the deposition's web page
    fn update_metadata(&self, deposition_id: u64, envelope: &MetadataEnvelope)
        -> RosterResult<String>;
}

#[derive(Deserialize)]
struct CreatedDeposition {
    id: u64,
    links: BucketLinks,
}

#[derive(Deserialize)]
struct BucketLinks {
    bucket: String,
}

#[derive(Deserialize)]
struct UpdatedDeposition {
    links: HtmlLinks,
}

#[derive(Deserialize)]
struct HtmlLinks {
    html: String,
}

/// reqwest-backed [`DepositApi`] authenticating with a bearer token
pub struct DepositClient {
    base_url: String,
    access_token: String,
    timeout: Duration,
    http: Client,
}

impl DepositClient {
    pub fn new(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> RosterResult<Self> {
        // Deadlines are set per request; uploads scale with the file size
        let http = Client::builder()
            .connect_timeout(timeout)
            .timeout(None::<Duration>)
            .user_agent(concat!("tara-authors/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            timeout,
            http,
        })
    }

    fn depositions_url(&self) -> String {
        format!("{}/api/deposit/depositions", self.base_url)
    }

    /// Send with auth, mapping timeouts and non-2xx responses to their own errors
    fn send(&self, endpoint: &str, request: RequestBuilder) -> RosterResult<Response> {
        debug!(endpoint, "Sending deposit API request");
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    RosterError::RemoteTimeout {
                        endpoint: endpoint.to_string(),
                    }
                } else {
                    RosterError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(RosterError::RemoteApi {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    fn parse<T: DeserializeOwned>(response: Response) -> RosterResult<T> {
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// `<bucket>/<file_name>` with the file name percent-encoded as one path segment
pub fn bucket_file_url(bucket_url: &str, file_name: &str) -> RosterResult<Url> {
    let invalid = |reason: &str| RosterError::InvalidUrl {
        url: bucket_url.to_string(),
        reason: reason.to_string(),
    };
    let mut url = Url::parse(bucket_url).map_err(|e| invalid(&e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("URL cannot have a path"))?
        .pop_if_empty()
        .push(file_name);
    Ok(url)
}

impl DepositApi for DepositClient {
    fn create_deposition(&self) -> RosterResult<Deposition> {
        let endpoint = self.depositions_url();
        let request = self
            .http
            .post(&endpoint)
            .timeout(self.timeout)
            .json(&serde_json::json!({}));
        let created: CreatedDeposition = Self::parse(self.send(&endpoint, request)?)?;
        Ok(Deposition {
            id: created.id,
            bucket_url: created.links.bucket,
        })
    }

    fn upload_file(&self, bucket_url: &str, file_name: &str, path: &Path) -> RosterResult<()> {
        let url = bucket_file_url(bucket_url, file_name)?;
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        let request = self
            .http
            .put(url.clone())
            .timeout(upload_deadline(self.timeout, len))
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(file);
        self.send(url.as_str(), request)?;
        Ok(())
    }

    fn update_metadata(
        &self,
        deposition_id: u64,
        envelope: &MetadataEnvelope,
    ) -> RosterResult<String> {
        let endpoint = format!("{}/{}", self.depositions_url(), deposition_id);
        let request = self.http.put(&endpoint).timeout(self.timeout).json(envelope);
        let updated: UpdatedDeposition = Self::parse(self.send(&endpoint, request)?)?;
        Ok(updated.links.html)
    }
}
