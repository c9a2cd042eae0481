pub mod backup;
#[cfg(feature = "tui")]
pub mod chart;
pub mod config;
pub mod entries;
pub mod export;
#[cfg(feature = "tui")]
pub mod form;
pub mod import;
pub mod init;
pub mod list;
pub mod load;
pub mod passcode;
pub mod status;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::db::{self, SqliteSlot, DB_FILE};
use crate::error::{Result, TillError};
use crate::settings::get_data_dir;
use crate::store::EntryStore;

/// Open the ledger in the configured data directory.
pub(crate) fn open_store() -> Result<EntryStore<SqliteSlot>> {
    let data_dir = get_data_dir();
    if !data_dir.join(DB_FILE).exists() {
        return Err(TillError::Settings(format!(
            "No ledger found in {}\nRun `tillbook init` to create one.",
            data_dir.display()
        )));
    }
    EntryStore::load(db::open(&data_dir)?)
}

/// Entry numbers on the command line start at 1.
pub(crate) fn to_index(number: usize, len: usize) -> Result<usize> {
    if number == 0 {
        return Err(TillError::Validation("Entry numbers start at 1".into()));
    }
    let index = number - 1;
    if index >= len {
        return Err(TillError::IndexOutOfRange { index, len });
    }
    Ok(index)
}

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[derive(Parser)]
#[command(name = "tillbook", about = "Daily cash-box reconciliation ledger.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Field values for `add` and `edit`. Amounts are typed as shown, with
/// optional thousands separators.
#[derive(Args)]
pub struct EntryFields {
    /// Entry date: YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,
    /// Change carried over from the previous day
    #[arg(long = "prev-change")]
    pub prev_change: Option<String>,
    /// Today's sales
    #[arg(long)]
    pub sales: Option<String>,
    /// Cash counted in the box
    #[arg(long = "box")]
    pub box_actual: Option<String>,
    /// Amount taken out for saving (leftover is derived)
    #[arg(long, conflicts_with = "leftover")]
    pub saving: Option<String>,
    /// Change left in the box (saving is derived)
    #[arg(long)]
    pub leftover: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up tillbook: choose a data directory and initialize the database.
    Init {
        /// Path for tillbook data (default: ~/Documents/tillbook)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Show the current database and ledger summary.
    Status,
    /// Switch to an existing tillbook data directory.
    Load {
        /// Path to data directory containing tillbook.db
        path: String,
    },
    /// Back up the database.
    Backup {
        /// Output path (default: <data_dir>/backups/tillbook-YYYYMMDD-HHMMSS.db)
        #[arg(long)]
        output: Option<String>,
    },
    /// Record a day's reconciliation.
    Add {
        #[command(flatten)]
        fields: EntryFields,
    },
    /// Change an existing entry. Later entries are left as they are.
    Edit {
        /// Entry number as shown by `list`
        index: usize,
        #[command(flatten)]
        fields: EntryFields,
    },
    /// Delete an entry.
    Delete {
        /// Entry number as shown by `list`
        index: usize,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List all entries with totals.
    List,
    /// Fill in a day interactively with live reconciliation.
    #[cfg(feature = "tui")]
    Form {
        /// Entry number to edit instead of adding a new day
        #[arg(long)]
        edit: Option<usize>,
    },
    /// Show sales as a bar chart: monthly for a year, daily for a month.
    #[cfg(feature = "tui")]
    Chart {
        /// Year (default: current year)
        #[arg(long)]
        year: Option<i32>,
        /// Month 1-12 for a daily view
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
    /// Export the ledger to CSV.
    Export {
        /// Output path (default: ./sales_data_YYYY-MM-DD.csv)
        #[arg(long)]
        output: Option<String>,
    },
    /// Replace the ledger from a CSV file, with a preview step.
    Import {
        #[command(subcommand)]
        command: ImportCommands,
    },
    /// View or change settings.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Protect the ledger with a passcode.
    Passcode {
        #[command(subcommand)]
        command: PasscodeCommands,
    },
}

#[derive(Subcommand)]
pub enum ImportCommands {
    /// Read a CSV file and preview it. Nothing is changed yet.
    Stage {
        /// Path to CSV file
        file: String,
    },
    /// Show the staged preview again.
    Show,
    /// Replace every entry with the staged rows.
    Confirm,
    /// Discard the staged rows.
    Cancel,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print current settings.
    Show,
    /// Digits after the decimal point: 0 or 2.
    SetPrecision {
        #[arg(value_parser = clap::value_parser!(u32).range(0..=2))]
        digits: u32,
    },
    /// Currency symbol used in totals.
    SetSymbol { symbol: String },
}

#[derive(Subcommand)]
pub enum PasscodeCommands {
    /// Set or change the passcode.
    Set,
    /// Remove the passcode.
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_to_index() {
        assert_eq!(to_index(1, 3).unwrap(), 0);
        assert_eq!(to_index(3, 3).unwrap(), 2);
        assert!(matches!(to_index(4, 3), Err(TillError::IndexOutOfRange { index: 3, len: 3 })));
        assert!(matches!(to_index(0, 3), Err(TillError::Validation(_))));
    }

    #[test]
    fn test_saving_conflicts_with_leftover() {
        let parsed = Cli::try_parse_from([
            "tillbook", "add", "--sales", "1", "--box", "1", "--saving", "1", "--leftover", "0",
        ]);
        assert!(parsed.is_err());
    }
}
