#![forbid(unsafe_code)]

pub mod agenda;
pub mod cli;
pub mod error;
pub mod formats;
pub mod http;
pub mod listing;
pub mod logging;
pub mod movie;
pub mod site;
pub mod table;

pub use error::{Error, FetchFailure};
pub use formats::{AgendaRow, MovieRecord};
