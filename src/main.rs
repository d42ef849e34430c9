mod aggregator;
mod cli;
mod error;
mod fmt;
mod loader;
mod logger;
mod models;
mod session;
mod settings;

use clap::Parser;

use cli::{Cli, Commands, SelectionArgs};

fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let result = match cli.command {
        Some(Commands::Preview { source, rows }) => cli::preview::run(source.file.as_deref(), rows),
        Some(Commands::Products { source }) => cli::products::run(source.file.as_deref()),
        Some(Commands::Summary {
            source,
            selection,
            json,
        }) => cli::summary::run(source.file.as_deref(), &selection, json),
        Some(Commands::Use { path }) => cli::load::run(&path),
        Some(Commands::Status) => cli::status::run(),
        None => cli::summary::run(None, &SelectionArgs::default(), false),
    };

    if let Err(e) = result {
        tracing::debug!("{e:?}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
