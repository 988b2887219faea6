use reqwest::StatusCode;

/// Failure classes a rendering pass can abort with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure, non-2xx response, or an unrequestable snapshot URL
    Fetch,
    /// Body was not valid JSON or lacked expected fields
    Parse,
    /// Requested snapshot has not been published yet
    DataGap,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with {status}")]
    Status { url: String, status: StatusCode },
    #[error("failed to format snapshot time: {0}")]
    Timestamp(#[from] time::error::Format),
    #[error("snapshot {stamp} has not been published yet")]
    SnapshotUnavailable { stamp: String },
    #[error("failed to decode body from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Request { .. } | Error::Status { .. } | Error::Timestamp(_) => {
                ErrorKind::Fetch
            }
            Error::SnapshotUnavailable { .. } => ErrorKind::DataGap,
            Error::Parse { .. } => ErrorKind::Parse,
        }
    }
}
