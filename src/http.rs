use anyhow::Context as _;
use reqwest::header::ACCEPT;

use crate::error::{Error, FetchFailure};

/// Anything that can turn a URL into a page body.
pub trait PageSource {
    fn get(&self, url: &str) -> Result<String, Error>;
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub user_agent: String,
}

impl HttpConfig {
    pub fn from_env() -> Self {
        let user_agent = std::env::var("MOVIEGET_USER_AGENT")
            .unwrap_or_else(|_| format!("movieget/{}", env!("CARGO_PKG_VERSION")));
        Self { user_agent }
    }
}

/// Blocking HTTP source; one client is reused for every request of a run.
pub struct HttpPageSource {
    client: reqwest::blocking::Client,
}

impl HttpPageSource {
    pub fn new(config: &HttpConfig) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .context("build http client")?;
        Ok(Self { client })
    }
}

impl PageSource for HttpPageSource {
    fn get(&self, url: &str) -> Result<String, Error> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
            .send()
            .map_err(|err| Error::fetch(url, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(url, FetchFailure::Status(status.as_u16())));
        }

        response.text().map_err(|err| Error::fetch(url, err))
    }
}

/// Retrieves `url` and rejects an empty body, which the site serves for
/// unknown agenda weeks instead of a 404.
pub fn fetch_page(source: &dyn PageSource, url: &str) -> Result<String, Error> {
    let body = source.get(url)?;
    if body.is_empty() {
        return Err(Error::fetch(url, FetchFailure::EmptyBody));
    }
    Ok(body)
}
