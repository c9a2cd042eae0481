use std::path::PathBuf;

use crate::cli::{open_store, today};
use crate::error::Result;
use crate::transcoder::{encode, export_filename};

pub fn run(output: Option<String>) -> Result<()> {
    let store = open_store()?;
    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(export_filename(today())));

    std::fs::write(&path, encode(store.entries())?)?;
    tracing::info!(path = %path.display(), count = store.len(), "ledger exported");
    println!("Exported {} entries to {}", store.len(), path.display());
    Ok(())
}
