//! Catalog source — reads `(Techstack, Links)` rows from CSV.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::models::portfolio::{PortfolioEntry, PortfolioError};

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Techstack", alias = "techstack")]
    techstack: String,
    #[serde(rename = "Links", alias = "links")]
    links: String,
}

/// Loads catalog rows from a CSV file on disk.
pub fn load_catalog(path: &Path) -> Result<Vec<PortfolioEntry>, PortfolioError> {
    let file = std::fs::File::open(path)?;
    let entries = read_catalog(file)?;
    info!(
        "Loaded {} portfolio entries from {}",
        entries.len(),
        path.display()
    );
    Ok(entries)
}

/// Parses catalog rows. Rows violating the entry invariant are skipped.
pub fn read_catalog<R: Read>(reader: R) -> Result<Vec<PortfolioEntry>, PortfolioError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    for (i, row) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        let row = row?;
        match PortfolioEntry::new(row.techstack.split(','), &row.links) {
            Ok(entry) => entries.push(entry),
            // +2: one for the header, one for 1-based numbering
            Err(e) => warn!("Skipping catalog row {}: {e}", i + 2),
        }
    }
    Ok(entries)
}
