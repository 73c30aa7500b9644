use std::sync::LazyLock;

use chrono::NaiveDate;
use scraper::{Html, Selector};

use crate::error::Error;
use crate::http::{PageSource, fetch_page};
use crate::site::Site;

static MOVIE_TITLE_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.meta-title-link").expect("valid movie link selector"));

/// Fetches the agenda page of `week_start` and returns the movie links on it.
pub fn fetch_week_links(
    source: &dyn PageSource,
    site: &Site,
    week_start: NaiveDate,
) -> Result<Vec<String>, Error> {
    let url = site.listing_url(week_start);
    tracing::debug!(%week_start, %url, "fetch agenda week");

    let html = fetch_page(source, &url)?;
    Ok(parse_movie_links(&html, site))
}

/// Every `meta-title-link` anchor on the page, in document order.
///
/// Anchors are not checked against their enclosing block, so a title link in
/// a sidebar or a "most viewed" box is returned too.
pub fn parse_movie_links(html: &str, site: &Site) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&MOVIE_TITLE_LINK)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(|href| site.absolute_link(href))
        .collect()
}
