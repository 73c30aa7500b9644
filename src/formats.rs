use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Release date written when the movie page carries no usable date.
pub const UNKNOWN_RELEASE_DATE: &str = "FIXME";

pub const UNKNOWN_DURATION: &str = "unknown";

/// Display format used for every date in the output table.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

pub const GENRE_SEPARATOR: &str = ",";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub name: String,
    pub release_date: String,
    pub genres: Vec<String>,
    pub duration: String,
    pub url: String,
}

impl MovieRecord {
    pub fn genres_joined(&self) -> String {
        self.genres.join(GENRE_SEPARATOR)
    }
}

impl fmt::Display for MovieRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\", {}, ({}) {}",
            self.name,
            self.release_date,
            self.genres_joined(),
            self.url
        )
    }
}

/// One output line: a movie and the agenda week whose page linked to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaRow {
    pub week_start: NaiveDate,
    pub record: MovieRecord,
}

impl AgendaRow {
    pub fn cells(&self) -> [String; 5] {
        [
            self.week_start.format(DATE_FORMAT).to_string(),
            self.record.name.clone(),
            self.record.genres_joined(),
            self.record.release_date.clone(),
            self.record.url.clone(),
        ]
    }
}
