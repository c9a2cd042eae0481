use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use zeroize::Zeroize;

use crate::error::{Result, TillError};
use crate::settings::Settings;

const SALT_BYTES: usize = 16;
const MIN_PASSCODE_LEN: usize = 4;

fn digest(salt: &[u8], passcode: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(passcode.as_bytes());
    hex::encode(hasher.finalize())
}

/// Hash with a fresh random salt. Stored as `salt$digest`.
pub fn hash_passcode(passcode: &str) -> String {
    let mut salt = [0u8; SALT_BYTES];
    rand::thread_rng().fill_bytes(&mut salt);
    format!("{}${}", hex::encode(salt), digest(&salt, passcode))
}

pub fn verify_passcode(stored: &str, passcode: &str) -> bool {
    let Some((salt_hex, expected)) = stored.split_once('$') else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    digest(&salt, passcode) == expected
}

pub fn validate_passcode(passcode: &str) -> Result<()> {
    if passcode.chars().count() < MIN_PASSCODE_LEN {
        return Err(TillError::Validation(format!(
            "Passcode must be at least {MIN_PASSCODE_LEN} characters"
        )));
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    Ok(rpassword::prompt_password(label)?)
}

/// Ask for the passcode when one is configured. Does nothing otherwise.
pub fn unlock(settings: &Settings) -> Result<()> {
    let Some(stored) = settings.passcode_hash.as_deref() else {
        return Ok(());
    };
    let mut entered = prompt("Passcode: ")?;
    let ok = verify_passcode(stored, &entered);
    entered.zeroize();
    if ok {
        info!("ledger unlocked");
        Ok(())
    } else {
        warn!("passcode rejected");
        Err(TillError::AuthFailed)
    }
}

/// Prompt twice for a new passcode and return its hash.
pub fn prompt_new_passcode() -> Result<String> {
    let mut first = prompt("New passcode: ")?;
    let mut second = prompt("Confirm passcode: ")?;
    let result = if first != second {
        Err(TillError::Validation("Passcodes do not match".into()))
    } else {
        validate_passcode(&first).map(|()| hash_passcode(&first))
    };
    first.zeroize();
    second.zeroize();
    result
}
