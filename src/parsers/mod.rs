//! Format-specific decoders.
//!
//! Every parser fully consumes its stream, applies the filters while decoding, and
//! upserts accepted fragments into a [`crate::RegionCollection`]. Each returns the
//! number of accepted records.
//!
//! - [`authority_csv`]: `code,english_name,welsh_name` reference table
//! - [`by_year_csv`]: wide table, one measure per file, one column per year
//! - [`stats_json`]: StatsWales row-oriented JSON

pub mod authority_csv;
pub mod by_year_csv;
pub mod stats_json;

use std::io::Read;

/// CSV reader shared by both CSV formats: header row, no quoting, trimmed fields,
/// variable record lengths (checked by the callers).
pub(crate) fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

/// 1-based line number of a record, for error messages.
pub(crate) fn line_of(record: &csv::StringRecord, fallback: usize) -> usize {
    record
        .position()
        .map(|p| p.line() as usize)
        .unwrap_or(fallback)
}
