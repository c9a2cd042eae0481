mod auth;
mod cli;
mod db;
mod error;
mod fmt;
mod import;
mod logging;
mod models;
mod reconciler;
mod reports;
mod session;
mod settings;
mod store;
mod transcoder;
#[cfg(feature = "tui")]
mod tui;

use clap::Parser;

use cli::{Cli, Commands, ConfigCommands, ImportCommands, PasscodeCommands};

fn run(command: Commands) -> error::Result<()> {
    if !matches!(command, Commands::Init { .. } | Commands::Status) {
        auth::unlock(&settings::load_settings())?;
    }

    match command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Status => cli::status::run(),
        Commands::Load { path } => cli::load::run(&path),
        Commands::Backup { output } => cli::backup::run(output),
        Commands::Add { fields } => cli::entries::add(fields),
        Commands::Edit { index, fields } => cli::entries::edit(index, fields),
        Commands::Delete { index, yes } => cli::entries::delete(index, yes),
        Commands::List => cli::list::run(),
        #[cfg(feature = "tui")]
        Commands::Form { edit } => cli::form::run(edit),
        #[cfg(feature = "tui")]
        Commands::Chart { year, month } => cli::chart::run(year, month),
        Commands::Export { output } => cli::export::run(output),
        Commands::Import { command } => match command {
            ImportCommands::Stage { file } => cli::import::stage(&file),
            ImportCommands::Show => cli::import::show(),
            ImportCommands::Confirm => cli::import::confirm(),
            ImportCommands::Cancel => cli::import::cancel(),
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::SetPrecision { digits } => cli::config::set_precision(digits),
            ConfigCommands::SetSymbol { symbol } => cli::config::set_symbol(&symbol),
        },
        Commands::Passcode { command } => match command {
            PasscodeCommands::Set => cli::passcode::set(),
            PasscodeCommands::Clear => cli::passcode::clear(),
        },
    }
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
