use colored::Colorize;

use crate::cli::list::entries_table;
use crate::cli::open_store;
use crate::error::{Result, TillError};
use crate::fmt::Codec;
use crate::import::{ImportSession, PREVIEW_ROWS};
use crate::settings::load_settings;

fn print_preview(codec: &Codec, session: &ImportSession) {
    let total = session.candidate_len();
    println!(
        "Preview of {}\n{}",
        session.source().unwrap_or("import"),
        entries_table(codec, session.preview(), 1)
    );
    if total > PREVIEW_ROWS {
        println!("Showing first {PREVIEW_ROWS} of {total} rows.");
    }
    println!(
        "{}",
        "Confirming replaces every existing entry. Run `tillbook import confirm` or `tillbook import cancel`."
            .yellow()
    );
}

pub fn stage(file: &str) -> Result<()> {
    let text = std::fs::read_to_string(file)?;
    let mut store = open_store()?;
    let mut session = ImportSession::load(store.slot());
    session.stage(file, &text)?;
    session.save(store.slot_mut())?;
    print_preview(&load_settings().codec(), &session);
    Ok(())
}

pub fn show() -> Result<()> {
    let store = open_store()?;
    let session = ImportSession::load(store.slot());
    if !session.is_previewing() {
        return Err(TillError::NoPendingImport);
    }
    print_preview(&load_settings().codec(), &session);
    Ok(())
}

pub fn confirm() -> Result<()> {
    let mut store = open_store()?;
    let mut session = ImportSession::load(store.slot());
    let summary = session.confirm(&mut store)?;
    session.save(store.slot_mut())?;
    println!(
        "Imported {} entries ({} previous entries replaced)",
        summary.imported, summary.replaced
    );
    Ok(())
}

pub fn cancel() -> Result<()> {
    let mut store = open_store()?;
    let mut session = ImportSession::load(store.slot());
    session.cancel()?;
    session.save(store.slot_mut())?;
    println!("Import cancelled. The ledger was not changed.");
    Ok(())
}
