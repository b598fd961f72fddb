use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use url::Url;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("failed to construct the HTTP client")]
    Build(#[source] reqwest::Error),
    #[error("invalid download url {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to download {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Observer for download progress, implemented by the CLI as a progress bar.
pub trait DownloadReporter: Send + Sync {
    /// Called once, with the response's content length when the server
    /// provides one.
    fn on_length(&self, total: Option<u64>);
    /// Called per body chunk with the chunk size in bytes.
    fn on_chunk(&self, bytes: u64);
    /// Called once the artifact has been renamed into place.
    fn on_complete(&self);
}

/// A reporter that ignores all events.
pub struct NoopReporter;

impl DownloadReporter for NoopReporter {
    fn on_length(&self, _total: Option<u64>) {}
    fn on_chunk(&self, _bytes: u64) {}
    fn on_complete(&self) {}
}

/// HTTP client for fetching tool artifacts.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
}

impl Client {
    pub fn new() -> Result<Self, DownloadError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("kitup/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(DownloadError::Build)?;
        Ok(Self { http })
    }

    /// Download `url` to `dest`, overwriting any existing file.
    ///
    /// The body streams into `<dest>.partial`, which is renamed into place
    /// only once the whole response has been written. A failed or truncated
    /// download therefore never leaves a file at `dest` that could later be
    /// mistaken for a complete artifact.
    pub async fn download_to(
        &self,
        url: &str,
        dest: &Utf8Path,
        reporter: &dyn DownloadReporter,
    ) -> Result<(), DownloadError> {
        let parsed = Url::parse(url).map_err(|source| DownloadError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        debug!("Downloading {url} to {dest}");
        let response =
            self.http
                .get(parsed)
                .send()
                .await
                .map_err(|source| DownloadError::Request {
                    url: url.to_string(),
                    source,
                })?;
        if !response.status().is_success() {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        if let Some(parent) = dest.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let partial = partial_path(dest);
        let result = write_body(response, url, &partial, reporter).await;
        if let Err(err) = result {
            let _ = fs_err::remove_file(&partial);
            return Err(err);
        }
        if let Err(err) = tokio::fs::rename(&partial, dest).await {
            let _ = fs_err::remove_file(&partial);
            return Err(err.into());
        }

        reporter.on_complete();
        Ok(())
    }
}

async fn write_body(
    response: reqwest::Response,
    url: &str,
    partial: &Utf8Path,
    reporter: &dyn DownloadReporter,
) -> Result<(), DownloadError> {
    reporter.on_length(response.content_length());

    let mut file = tokio::fs::File::create(partial).await?;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|source| DownloadError::Request {
            url: url.to_string(),
            source,
        })?;
        file.write_all(&chunk).await?;
        reporter.on_chunk(chunk.len() as u64);
    }
    file.flush().await?;
    file.sync_all().await?;

    Ok(())
}

fn partial_path(dest: &Utf8Path) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{dest}.partial"))
}
