use anyhow::Context as _;
use chrono::NaiveDate;
use url::Url;

pub const DEFAULT_SITE_ROOT: &str = "https://www.allocine.fr";

const AGENDA_PATH: &str = "/film/agenda/sem-";

/// Root of the listing site. Stored without a trailing slash so paths can be
/// appended the way the site's own links are written.
#[derive(Debug, Clone)]
pub struct Site {
    root: String,
}

impl Site {
    pub fn new(root: &str) -> anyhow::Result<Self> {
        let parsed = Url::parse(root).with_context(|| format!("parse site root: {root}"))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            anyhow::bail!("site root must be http/https: {root}");
        }
        if parsed.host_str().is_none() {
            anyhow::bail!("site root must have host: {root}");
        }

        Ok(Self {
            root: root.trim_end_matches('/').to_owned(),
        })
    }

    pub fn listing_url(&self, week_start: NaiveDate) -> String {
        format!(
            "{}{AGENDA_PATH}{}",
            self.root,
            week_start.format("%Y-%m-%d")
        )
    }

    /// Resolves a link found on a listing page. Relative hrefs are joined with
    /// a plain `/`, so root-relative ones come out with a doubled separator
    /// that the movie extractor collapses.
    pub fn absolute_link(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            return href.to_owned();
        }
        format!("{}/{href}", self.root)
    }
}

impl Default for Site {
    fn default() -> Self {
        Self {
            root: DEFAULT_SITE_ROOT.to_owned(),
        }
    }
}
