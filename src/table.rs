use std::io::Write;

use anyhow::Context as _;

use crate::agenda::RowSink;
use crate::formats::AgendaRow;

pub const HEADER: [&str; 5] = [
    "semaine de sortie",
    "nom",
    "genre",
    "date initiale sortie",
    "url",
];

/// CSV output of an agenda run. The header is written on creation.
pub struct AgendaTable<W: Write> {
    out: csv::Writer<W>,
}

impl<W: Write> AgendaTable<W> {
    pub fn create(out: W) -> csv::Result<Self> {
        let mut out = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(out);
        out.write_record(HEADER)?;
        Ok(Self { out })
    }

    pub fn into_inner(self) -> anyhow::Result<W> {
        self.out
            .into_inner()
            .map_err(|err| err.into_error())
            .context("flush csv writer")
    }
}

impl<W: Write> RowSink for AgendaTable<W> {
    fn push(&mut self, row: AgendaRow) -> anyhow::Result<()> {
        self.out.write_record(row.cells())?;
        Ok(())
    }

    fn end_week(&mut self) -> anyhow::Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
