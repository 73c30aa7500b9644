use thiserror::Error;

/// Errors raised while retrieving or reading a single page.
///
/// Optional movie fields never surface here; they fall back to sentinel
/// values instead. Only transport problems and the mandatory title do.
#[derive(Debug, Error)]
pub enum Error {
    #[error("fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: FetchFailure,
    },

    #[error("parse {url}: missing {field}")]
    Parse { url: String, field: &'static str },
}

#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("empty response body")]
    EmptyBody,
}

impl Error {
    pub fn fetch(url: &str, source: impl Into<FetchFailure>) -> Self {
        Self::Fetch {
            url: url.to_owned(),
            source: source.into(),
        }
    }

    pub fn missing_field(url: &str, field: &'static str) -> Self {
        Self::Parse {
            url: url.to_owned(),
            field,
        }
    }
}
