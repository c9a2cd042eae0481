use crate::db::{self, DB_FILE};
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::import::ImportSession;
use crate::settings::load_settings;
use crate::store::EntryStore;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let codec = settings.codec();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let db_path = data_dir.join(DB_FILE);

    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());
    println!("Precision:  {} decimal digits", codec.decimal_digits());
    println!("Currency:   {}", settings.currency_symbol);
    println!("Passcode:   {}", if settings.passcode_hash.is_some() { "set" } else { "(not set)" });

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        // Ledger figures stay behind the passcode.
        if settings.passcode_hash.is_some() {
            println!();
            println!("Ledger is locked. Any other command prompts for the passcode.");
            return Ok(());
        }

        let store = EntryStore::load(db::open(&data_dir)?)?;
        println!();
        println!("Entries:       {}", store.len());
        if let Some(last) = store.entries().last() {
            println!("Last entry:    {}", last.date);
            println!("Leftover:      {}", codec.money(last.left_over));
        }
        let pending = ImportSession::load(store.slot());
        if let Some(source) = pending.source() {
            println!("Staged import: {} rows from {source}", pending.candidate_len());
        }
    } else {
        println!();
        println!("Database not found. Run `tillbook init` to set up.");
    }

    Ok(())
}
