use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context as _;
use chrono::NaiveDate;

use crate::cli::AgendaArgs;
use crate::formats::{AgendaRow, DATE_FORMAT};
use crate::http::{HttpConfig, HttpPageSource, PageSource};
use crate::site::Site;
use crate::table::AgendaTable;

/// What to do when a single movie page cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the whole run at the first bad page.
    #[default]
    Abort,
    /// Log the failure, leave the movie out and carry on.
    SkipMovie,
}

#[derive(Debug, Clone)]
pub struct AgendaPlan {
    pub start: NaiveDate,
    pub weeks: u32,
    pub on_movie_error: FailurePolicy,
}

impl AgendaPlan {
    /// Week starts in ascending order, seven days apart.
    pub fn week_starts(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_weeks().take(self.weeks as usize)
    }
}

/// Receives rows as they are produced.
pub trait RowSink {
    fn push(&mut self, row: AgendaRow) -> anyhow::Result<()>;

    /// Called once every row of a week has been pushed.
    fn end_week(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl RowSink for Vec<AgendaRow> {
    fn push(&mut self, row: AgendaRow) -> anyhow::Result<()> {
        Vec::push(self, row);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AgendaSummary {
    pub weeks: u32,
    pub rows: usize,
    pub skipped: usize,
}

pub fn run(args: AgendaArgs, site: &Site) -> anyhow::Result<()> {
    let out_path = PathBuf::from(&args.out);
    let plan = AgendaPlan {
        start: args.start,
        weeks: args.count,
        on_movie_error: if args.skip_failed {
            FailurePolicy::SkipMovie
        } else {
            FailurePolicy::Abort
        },
    };

    tracing::info!(
        weeks = plan.weeks,
        start = %plan.start.format(DATE_FORMAT),
        out = %out_path.display(),
        "getting agenda"
    );

    let source = HttpPageSource::new(&HttpConfig::from_env()).context("build page source")?;

    let file = File::create(&out_path)
        .with_context(|| format!("create output: {}", out_path.display()))?;
    let mut table = AgendaTable::create(BufWriter::new(file))
        .with_context(|| format!("write header: {}", out_path.display()))?;

    let summary = collect(&source, site, &plan, &mut table)?;
    table
        .into_inner()
        .with_context(|| format!("flush output: {}", out_path.display()))?;

    tracing::info!(
        weeks = summary.weeks,
        rows = summary.rows,
        skipped = summary.skipped,
        out = %out_path.display(),
        "agenda written"
    );
    Ok(())
}

/// Walks every week of `plan` and hands each movie row to `sink`.
pub fn collect(
    source: &dyn PageSource,
    site: &Site,
    plan: &AgendaPlan,
    sink: &mut dyn RowSink,
) -> anyhow::Result<AgendaSummary> {
    let mut summary = AgendaSummary::default();

    for week_start in plan.week_starts() {
        let links = crate::listing::fetch_week_links(source, site, week_start)
            .with_context(|| format!("agenda week {week_start}"))?;
        tracing::debug!(%week_start, movies = links.len(), "agenda week links");

        for link in links {
            let record = match crate::movie::extract_record(source, &link) {
                Ok(record) => record,
                Err(err) if plan.on_movie_error == FailurePolicy::SkipMovie => {
                    tracing::warn!(%week_start, url = %link, ?err, "skipping movie");
                    summary.skipped += 1;
                    continue;
                }
                Err(err) => {
                    return Err(anyhow::Error::new(err)
                        .context(format!("movie {link} (agenda week {week_start})")));
                }
            };

            sink.push(AgendaRow { week_start, record })
                .context("write agenda row")?;
            summary.rows += 1;
        }

        sink.end_week().context("finish agenda week")?;
        summary.weeks += 1;
    }

    Ok(summary)
}
