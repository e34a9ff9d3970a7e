//! Source sheet loading.
//!
//! The source of truth is a published spreadsheet, fetched as its CSV export
//! and deserialized row-by-row into [`Card`]s. No decisions happen here
//! beyond the loader contract: every row carries a non-empty, unique uid,
//! blank numeric cells default to 0 and blank booleans to false.

use std::collections::HashSet;
use std::io::Read;

use log::info;

use crate::error::SheetError;
use crate::model::Card;

/// CSV export of the published card sheet.
pub const DEFAULT_SHEET_URL: &str =
    "https://docs.google.com/spreadsheets/d/1w2TuX7u_wdxFXnUWb_KyRS6o_8vxAEjZV5u5BpkOuI0/export?exportFormat=csv";

/// Fetches the sheet and parses every row.
pub async fn fetch_cards(http: &reqwest::Client, url: &str) -> Result<Vec<Card>, SheetError> {
    info!("Fetching card sheet from {url}");
    let body = http
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    parse_cards(body.as_ref())
}

/// Transport-free core of the loader. Row numbers in errors are 1-based and
/// count the header row, matching what a spreadsheet UI shows.
pub fn parse_cards<R: Read>(reader: R) -> Result<Vec<Card>, SheetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut cards = Vec::new();
    let mut seen = HashSet::new();

    for (index, row) in csv_reader.deserialize::<Card>().enumerate() {
        let row_number = index + 2;
        let card = row?;

        if card.uid.is_empty() {
            return Err(SheetError::MissingUid { row: row_number });
        }
        if !seen.insert(card.uid.clone()) {
            return Err(SheetError::DuplicateUid { uid: card.uid });
        }

        cards.push(card);
    }

    Ok(cards)
}
