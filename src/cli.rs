use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::formats::DATE_FORMAT;
use crate::site::DEFAULT_SITE_ROOT;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Root URL of the listing site.
    #[arg(long, global = true, default_value = DEFAULT_SITE_ROOT)]
    pub site_root: String,

    /// Log at debug level (ignored when RUST_LOG is set).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape consecutive agenda weeks into a CSV file.
    Agenda(AgendaArgs),
    /// Scrape a single movie page and print its record as JSON.
    Movie(MovieArgs),
}

#[derive(Debug, Args)]
pub struct AgendaArgs {
    /// First agenda week (dd/mm/yyyy).
    #[arg(short, long, value_parser = parse_week_start)]
    pub start: NaiveDate,

    /// Number of weeks to scrape.
    #[arg(short, long, default_value_t = 1)]
    pub count: u32,

    /// Output CSV file (overwritten).
    #[arg(short, long, default_value = "movies.csv")]
    pub out: String,

    /// Leave out movies whose page fails instead of stopping the run.
    #[arg(long)]
    pub skip_failed: bool,
}

#[derive(Debug, Args)]
pub struct MovieArgs {
    /// Movie detail page URL.
    #[arg(long)]
    pub url: String,
}

fn parse_week_start(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|err| format!("expected dd/mm/yyyy: {err}"))
}
