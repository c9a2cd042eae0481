use std::io::Write;

use colored::Colorize;

use crate::cli::{open_store, to_index, today, EntryFields};
use crate::db::SqliteSlot;
use crate::error::{Result, TillError};
use crate::fmt::Codec;
use crate::reconciler::{Reconciliation, Tone};
use crate::session::{Field, SaveOutcome, Session};
use crate::settings::load_settings;
use crate::store::EntryStore;

fn apply(session: &mut Session, fields: EntryFields) {
    if let Some(date) = fields.date {
        session.date = date;
    }
    let amounts = [
        (Field::PrevChange, fields.prev_change),
        (Field::TodaySales, fields.sales),
        (Field::BoxActual, fields.box_actual),
        (Field::TakenSaving, fields.saving),
        (Field::LeftOver, fields.leftover),
    ];
    for (field, value) in amounts {
        if let Some(text) = value {
            session.set_field(field, text);
        }
    }
}

fn print_reconciliation(codec: &Codec, r: &Reconciliation) {
    println!("Expected in box:  {}", codec.display(r.expected_box));
    println!("Variance:         {}", codec.display(r.variance));
    println!("Taken for saving: {}", codec.display(r.taken_saving));
    println!("Leftover change:  {}", codec.display(r.left_over));
    let message = r.status.message();
    let message = match r.status.tone() {
        Tone::Ok => message.green(),
        Tone::Warn => message.yellow(),
        Tone::Err => message.red(),
    };
    println!("{message}");
}

fn save(session: &mut Session, codec: &Codec, store: &mut EntryStore<SqliteSlot>) -> Result<()> {
    print_reconciliation(codec, &session.recompute(codec));
    match session.save(store, codec, today())? {
        SaveOutcome::Created(i) => println!("Saved entry #{}", i + 1),
        SaveOutcome::Updated(i) => println!("Updated entry #{}", i + 1),
    }
    Ok(())
}

pub fn add(fields: EntryFields) -> Result<()> {
    if fields.sales.is_none() || fields.box_actual.is_none() {
        return Err(TillError::Validation("--sales and --box are required".into()));
    }
    let mut store = open_store()?;
    let codec = load_settings().codec();
    let mut session = Session::new(&store, &codec, today());
    apply(&mut session, fields);
    save(&mut session, &codec, &mut store)
}

pub fn edit(number: usize, fields: EntryFields) -> Result<()> {
    let mut store = open_store()?;
    let codec = load_settings().codec();
    let index = to_index(number, store.len())?;
    let mut session = Session::new(&store, &codec, today());
    session.begin_edit(&store, &codec, index)?;
    apply(&mut session, fields);
    save(&mut session, &codec, &mut store)
}

pub fn delete(number: usize, yes: bool) -> Result<()> {
    let mut store = open_store()?;
    let codec = load_settings().codec();
    let index = to_index(number, store.len())?;

    if !yes {
        let date = store.get(index).map(|e| e.date.clone()).unwrap_or_default();
        print!("Delete entry #{number} ({date})? [y/N] ");
        std::io::stdout().flush()?;
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        if !matches!(input.trim(), "y" | "Y" | "yes") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let mut session = Session::new(&store, &codec, today());
    let removed = session.delete(&mut store, &codec, index, today())?;
    println!("Deleted entry #{number} ({})", removed.date);
    Ok(())
}
