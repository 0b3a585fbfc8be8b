//! Fetching threads from the mailing list archive.

use reqwest::StatusCode;

use crate::error::PrettifyError;

/// Body of an archive response together with its status.
#[derive(Debug, Clone)]
pub struct FetchedThread {
    pub status: StatusCode,
    pub body: String,
}

impl FetchedThread {
    /// Whether the archive answered 2xx. Only these results may be cached.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Fetch the body at `url`.
///
/// Returns `Ok(None)` when the archive answers 404. Any other status is read
/// and returned as-is, including error pages. Transport failures propagate.
pub async fn fetch_thread(
    client: &reqwest::Client,
    url: &str,
) -> Result<Option<FetchedThread>, PrettifyError> {
    let resp = client.get(url).send().await?;
    let status = resp.status();

    if status == StatusCode::NOT_FOUND {
        tracing::debug!(url = %url, "thread not found upstream");
        return Ok(None);
    }

    if !status.is_success() {
        tracing::warn!(url = %url, status = %status, "upstream returned non-success status");
    }

    let body = resp.text().await?;
    tracing::debug!(url = %url, status = %status, bytes = body.len(), "thread fetched");

    Ok(Some(FetchedThread { status, body }))
}
