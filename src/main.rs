use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    let cli = movieget::cli::Cli::parse();
    movieget::logging::init(cli.verbose).context("init logging")?;
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        movieget::cli::Command::Agenda(args) => {
            let site = movieget::site::Site::new(&cli.site_root).context("site root")?;
            movieget::agenda::run(args, &site).context("agenda")?;
        }
        movieget::cli::Command::Movie(args) => {
            movieget::movie::run(args).context("movie")?;
        }
    }

    Ok(())
}
