use crate::error::Result;
use crate::fmt::Codec;
use crate::settings::{load_settings, save_settings};

pub fn show() -> Result<()> {
    let settings = load_settings();
    println!("data_dir:        {}", settings.data_dir);
    println!("decimal_digits:  {}", settings.decimal_digits);
    println!("currency_symbol: {}", settings.currency_symbol);
    println!(
        "passcode:        {}",
        if settings.passcode_hash.is_some() { "set" } else { "(not set)" }
    );
    Ok(())
}

pub fn set_precision(digits: u32) -> Result<()> {
    let mut settings = load_settings();
    Codec::new(digits, &settings.currency_symbol)?;
    let previous = settings.decimal_digits;
    settings.decimal_digits = digits;
    save_settings(&settings)?;
    println!("Precision set to {digits} decimal digits.");
    if previous != digits {
        println!("Stored amounts are kept as-is in minor units and are not rescaled.");
    }
    Ok(())
}

pub fn set_symbol(symbol: &str) -> Result<()> {
    let mut settings = load_settings();
    settings.currency_symbol = symbol.to_string();
    save_settings(&settings)?;
    println!("Currency symbol set to {symbol}");
    Ok(())
}
