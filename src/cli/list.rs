use chrono::Datelike;
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{open_store, today};
use crate::error::Result;
use crate::fmt::Codec;
use crate::models::LedgerEntry;
use crate::reports;
use crate::settings::load_settings;

/// Ledger rows numbered from `first_number`.
pub(crate) fn entries_table(codec: &Codec, entries: &[LedgerEntry], first_number: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "#", "Date", "Prev change", "Sales", "Box", "Saving", "Leftover", "Expected", "Variance",
    ]);
    for (i, e) in entries.iter().enumerate() {
        let variance = codec.format(e.variance);
        let variance = if e.variance < 0 {
            variance.red()
        } else if e.variance > 0 {
            variance.yellow()
        } else {
            variance.green()
        };
        table.add_row(vec![
            Cell::new(first_number + i),
            Cell::new(&e.date),
            Cell::new(codec.format(e.prev_change)),
            Cell::new(codec.format(e.today_sales)),
            Cell::new(codec.format(e.box_actual)),
            Cell::new(codec.format(e.taken_saving)),
            Cell::new(codec.format(e.left_over)),
            Cell::new(codec.format(e.expected_box)),
            Cell::new(variance),
        ]);
    }
    table
}

pub fn run() -> Result<()> {
    let store = open_store()?;
    let codec = load_settings().codec();

    if store.is_empty() {
        println!("No entries yet. Add one with `tillbook add`.");
        return Ok(());
    }

    println!("Sales Ledger\n{}", entries_table(&codec, store.entries(), 1));

    let totals = reports::totals(store.entries());
    let today = today();
    let month = reports::month_total(store.entries(), today.year(), today.month());
    println!();
    println!("{} {}", "Entries:".bold(), totals.count);
    println!("{} {}", "Total sales:".bold(), codec.money(totals.sales));
    println!("{} {}", "Total in box:".bold(), codec.money(totals.box_actual));
    println!(
        "{} {}",
        format!("Sales in {}:", today.format("%B %Y")).bold(),
        codec.money(month)
    );
    Ok(())
}
