//! Selector inspection command.

use anyhow::Result;
use tessera_markup::parse_selector;

/// Run the selector command.
pub fn run(selector: &str) -> Result<()> {
    let parsed = parse_selector(selector)?;

    println!("tag:   {}", parsed.tag);
    println!("id:    {}", parsed.id.as_deref().unwrap_or("-"));
    println!("class: {}", parsed.class.as_deref().unwrap_or("-"));

    Ok(())
}
