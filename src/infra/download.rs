//! HTTP download functionality
//!
//! Fetches a remote file and streams the response body straight into the
//! [`Installer`]; the body is never buffered whole in memory.

use futures::TryStreamExt;
use tokio_util::io::StreamReader;

use crate::error::SourceError;
use crate::infra::install::{Artifact, InstalledPlugin, Installer};

/// Downloads direct-file sources
#[derive(Debug, Clone)]
pub struct DownloadManager {
    /// HTTP client
    client: reqwest::Client,
}

impl DownloadManager {
    /// Create a new download manager
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Create a download manager around an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Download `url` and install it under its final path segment
    pub async fn fetch(
        &self,
        url: &str,
        installer: &Installer,
    ) -> Result<InstalledPlugin, SourceError> {
        let file_name = file_name_from_url(url)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Fetch {
                url: url.to_string(),
                error: e.to_string(),
            })?;

        // Dropping the response on this path releases the connection
        if !response.status().is_success() {
            return Err(SourceError::Fetch {
                url: url.to_string(),
                error: format!("bad status: {}", response.status()),
            });
        }

        tracing::debug!(
            "Downloading {} as '{}' ({} bytes advertised)",
            url,
            file_name,
            response
                .content_length()
                .map_or_else(|| "unknown".to_string(), |len| len.to_string())
        );

        let stream = response.bytes_stream().map_err(std::io::Error::other);
        let reader = StreamReader::new(Box::pin(stream));

        installer.install(Artifact::new(file_name, reader)).await
    }
}

impl Default for DownloadManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Destination file name for a URL: its final path segment
///
/// Query strings and fragments are ignored. Strings that do not parse as a
/// URL fall back to the text after the last `/`.
pub fn file_name_from_url(url: &str) -> Result<String, SourceError> {
    let name = match reqwest::Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back().map(str::to_string))
            .unwrap_or_default(),
        Err(_) => url.rsplit('/').next().unwrap_or_default().to_string(),
    };

    if name.is_empty() {
        return Err(SourceError::Fetch {
            url: url.to_string(),
            error: "URL has no file name in its final path segment".to_string(),
        });
    }
    Ok(name)
}
