use crate::auth;
use crate::error::Result;
use crate::settings::{load_settings, save_settings};

pub fn set() -> Result<()> {
    let mut settings = load_settings();
    settings.passcode_hash = Some(auth::prompt_new_passcode()?);
    save_settings(&settings)?;
    println!("Passcode set. It will be asked for before every command except init and status.");
    Ok(())
}

pub fn clear() -> Result<()> {
    let mut settings = load_settings();
    if settings.passcode_hash.take().is_none() {
        println!("No passcode is set.");
        return Ok(());
    }
    save_settings(&settings)?;
    println!("Passcode removed.");
    Ok(())
}
