pub mod cards;
pub mod decks;
pub mod image;
pub mod import;

use anyhow::Result;
use facecards_lib::study::SessionSummary;

use crate::OutputFormat;

/// Report a finished study session
#[cfg_attr(not(feature = "tui"), allow(dead_code))]
pub fn print_summary(summary: &SessionSummary, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deckId": summary.deck_id,
                "reviewed": summary.reviewed,
                "message": summary.message(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => println!("{}", summary.message()),
    }
    Ok(())
}
