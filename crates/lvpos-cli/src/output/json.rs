use lvpos_core::error::LvError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), LvError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
