use std::io::Write as _;
use std::sync::LazyLock;

use anyhow::Context as _;
use chrono::NaiveDate;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::cli::MovieArgs;
use crate::error::Error;
use crate::formats::{DATE_FORMAT, MovieRecord, UNKNOWN_DURATION, UNKNOWN_RELEASE_DATE};
use crate::http::{HttpConfig, HttpPageSource, PageSource, fetch_page};

static TITLE_META: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:title"]"#).expect("valid title meta selector")
});
static LD_JSON_SCRIPT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid ld+json selector")
});
static RELEASE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""releaseDate"\s*:\s*"([^"]*)""#).expect("valid releaseDate regex")
});

/// Length of the `PT` marker in front of ISO-8601 durations (`PT1H52M`).
const DURATION_PREFIX_LEN: usize = 2;

/// Part of a URL left untouched when collapsing separators; covers `https://`.
const URL_SCHEME_LEN: usize = 8;

pub fn run(args: MovieArgs) -> anyhow::Result<()> {
    let source = HttpPageSource::new(&HttpConfig::from_env()).context("build page source")?;
    let record = extract_record(&source, &args.url)?;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &record).context("write movie record json")?;
    stdout.write_all(b"\n").context("write movie record newline")?;
    Ok(())
}

/// Downloads one movie page and reads its record.
pub fn extract_record(source: &dyn PageSource, url: &str) -> Result<MovieRecord, Error> {
    let html = fetch_page(source, url)?;
    let record = parse_record(&html, url)?;
    tracing::info!(%record, "movie");
    Ok(record)
}

pub fn parse_record(html: &str, url: &str) -> Result<MovieRecord, Error> {
    let document = Html::parse_document(html);

    let name = title(&document).ok_or_else(|| Error::missing_field(url, "name"))?;
    let details = structured_details(&document, url);
    let release_date = release_date(html).unwrap_or_else(|| UNKNOWN_RELEASE_DATE.to_owned());

    Ok(MovieRecord {
        name,
        release_date,
        genres: details.genres,
        duration: details
            .duration
            .unwrap_or_else(|| UNKNOWN_DURATION.to_owned()),
        url: normalize_url(url),
    })
}

fn title(document: &Html) -> Option<String> {
    document
        .select(&TITLE_META)
        .filter_map(|meta| meta.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(str::to_owned)
}

#[derive(Debug, Default)]
struct StructuredDetails {
    duration: Option<String>,
    genres: Vec<String>,
}

/// Reads duration and genres from the page's linked-data block.
///
/// Pages with several blocks describe more than the movie (trailers, people)
/// and are skipped; so are pages with none.
fn structured_details(document: &Html, url: &str) -> StructuredDetails {
    let blocks = document.select(&LD_JSON_SCRIPT).collect::<Vec<_>>();
    let [block] = blocks.as_slice() else {
        tracing::debug!(%url, blocks = blocks.len(), "no single ld+json block");
        return StructuredDetails::default();
    };

    let raw = block.text().collect::<String>();
    let value: Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(%url, ?err, "ld+json block is not valid json");
            return StructuredDetails::default();
        }
    };

    StructuredDetails {
        duration: value
            .get("duration")
            .and_then(Value::as_str)
            .map(strip_duration_prefix),
        genres: value.get("genre").map(genre_list).unwrap_or_default(),
    }
}

fn strip_duration_prefix(raw: &str) -> String {
    raw.chars().skip(DURATION_PREFIX_LEN).collect()
}

fn genre_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(genre) => vec![genre.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        _ => Vec::new(),
    }
}

/// First `"releaseDate":"…"` anywhere in the markup, as `dd/mm/yyyy`.
///
/// This scan is the only release-date source: the linked-data block's own
/// dates are ignored even when present.
fn release_date(html: &str) -> Option<String> {
    let raw = RELEASE_DATE.captures(html)?.get(1)?.as_str();
    let day = raw.split(['T', ' ']).next().unwrap_or(raw).trim();
    let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()?;
    Some(date.format(DATE_FORMAT).to_string())
}

/// Collapses repeated `/` after the scheme, e.g. the `//film` produced by
/// joining the site root and a root-relative href.
pub fn normalize_url(url: &str) -> String {
    let split = url
        .char_indices()
        .nth(URL_SCHEME_LEN)
        .map_or(url.len(), |(idx, _)| idx);
    let (head, tail) = url.split_at(split);

    let mut out = String::with_capacity(url.len());
    out.push_str(head);
    let mut previous_slash = false;
    for ch in tail.chars() {
        if ch == '/' && previous_slash {
            continue;
        }
        previous_slash = ch == '/';
        out.push(ch);
    }
    out
}
