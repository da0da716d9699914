use super::{csv_reader, line_of};
use crate::collection::RegionCollection;
use crate::error::{Error, Result};
use crate::filters::RegionFilter;
use crate::models::{LANG_CYM, LANG_ENG, Region};
use std::io::Read;

/// Parse the reference table of region codes and names.
///
/// The header line is discarded; every following line must have exactly three
/// fields: code, English name, Welsh name. A line is kept when the filter is empty
/// or matches the code or either name.
pub fn parse<R: Read>(
    reader: R,
    filter: &RegionFilter,
    regions: &mut RegionCollection,
) -> Result<usize> {
    let mut rdr = csv_reader(reader);
    if rdr.headers()?.is_empty() {
        return Err(Error::parse(1, "missing header line"));
    }

    let mut accepted = 0;
    for (idx0, result) in rdr.records().enumerate() {
        let record = result?;
        let line = line_of(&record, idx0 + 2);
        if record.len() != 3 {
            return Err(Error::parse(
                line,
                format!("expected 3 fields, found {}", record.len()),
            ));
        }
        let (code, eng, cym) = (&record[0], &record[1], &record[2]);
        if code.is_empty() {
            return Err(Error::parse(line, "empty region code"));
        }
        if !filter.matches(code, [eng, cym]) {
            continue;
        }

        let mut region = Region::new(code);
        region.set_name(LANG_ENG, eng)?;
        region.set_name(LANG_CYM, cym)?;
        regions.upsert(region);
        accepted += 1;
    }

    log::debug!("reference table: {accepted} regions accepted");
    Ok(accepted)
}
