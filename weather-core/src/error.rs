use reqwest::StatusCode;

/// Failure to obtain a reading. The display treats every variant the same
/// way: it is logged and the view stays on its placeholder.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to send request to {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
    #[error("Failed to parse current weather JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
