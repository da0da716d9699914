use super::{csv_reader, line_of};
use crate::collection::RegionCollection;
use crate::datasets::{ColumnMapping, SourceColumn};
use crate::error::{Error, Result};
use crate::filters::Filters;
use crate::models::{Measure, Region};
use std::io::Read;

/// Parse a wide table holding a single measure: `code,<year1>,...,<yearN>` header,
/// then one row per region with one value per year.
///
/// The measure code and label come from the mapping's single-measure roles. Names
/// are not part of this format, so the region filter matches against names already
/// stored in `regions` and otherwise against the code alone. Years outside the year
/// filter and empty cells are skipped; an accepted row is upserted even when that
/// leaves its measure without values.
pub fn parse<R: Read>(
    reader: R,
    cols: &ColumnMapping,
    filters: &Filters,
    regions: &mut RegionCollection,
) -> Result<usize> {
    let measure_code = cols.require(SourceColumn::SingleMeasureCode)?.to_string();
    let measure_label = cols.require(SourceColumn::SingleMeasureName)?.to_string();

    let mut rdr = csv_reader(reader);
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(Error::parse(1, "missing header line"));
    }
    let years = headers
        .iter()
        .skip(1)
        .map(|label| {
            label
                .parse::<i32>()
                .map_err(|_| Error::parse(1, format!("invalid year label '{label}'")))
        })
        .collect::<Result<Vec<i32>>>()?;

    let measure_wanted = filters.measures.matches(&measure_code);
    let mut accepted = 0;
    for (idx0, result) in rdr.records().enumerate() {
        let record = result?;
        let line = line_of(&record, idx0 + 2);
        if record.len() != years.len() + 1 {
            return Err(Error::parse(
                line,
                format!(
                    "expected {} values, found {}",
                    years.len(),
                    record.len().saturating_sub(1)
                ),
            ));
        }

        let code = &record[0];
        let mut measure = Measure::new(&measure_code, measure_label.as_str());
        for (&year, raw) in years.iter().zip(record.iter().skip(1)) {
            if raw.is_empty() {
                continue;
            }
            let value = raw.parse::<f64>().map_err(|e| {
                Error::parse(line, format!("invalid value '{raw}' for year {year}: {e}"))
            })?;
            if filters.years.contains(year) {
                measure.set_value(year, value);
            }
        }

        let region_wanted = match regions.region(code) {
            Ok(known) => filters
                .regions
                .matches(code, known.names().values().map(String::as_str)),
            Err(_) => filters.regions.matches(code, std::iter::empty()),
        };
        if !(measure_wanted && region_wanted) {
            continue;
        }

        let mut region = Region::new(code);
        region.set_measure(measure);
        regions.upsert(region);
        accepted += 1;
    }

    log::debug!("{measure_code}: {accepted} rows accepted");
    Ok(accepted)
}
