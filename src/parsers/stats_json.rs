//! StatsWales JSON tables.
//!
//! The document is an object whose `value` key holds an array of flat records; all
//! other top-level keys (`odata.metadata`, `odata.nextLink`, ...) are ignored. Each
//! record is one (region, measure, year, value) observation.

use crate::collection::RegionCollection;
use crate::datasets::{ColumnMapping, SourceColumn};
use crate::error::{Error, Result};
use crate::filters::Filters;
use crate::models::{LANG_ENG, Measure, Region};
use serde_json::{Map, Value};
use std::io::Read;

type Row = Map<String, Value>;

/// Where a measure's code or label comes from: a record field or a constant.
enum Source<'a> {
    Field(&'a str),
    Constant(&'a str),
}

impl<'a> Source<'a> {
    fn resolve(
        cols: &'a ColumnMapping,
        field: SourceColumn,
        constant: SourceColumn,
    ) -> Result<Self> {
        if let Some(name) = cols.get(field) {
            Ok(Source::Field(name))
        } else if let Some(value) = cols.get(constant) {
            Ok(Source::Constant(value))
        } else {
            Err(Error::MissingColumn(field))
        }
    }

    fn extract(&self, row: &Row, idx: usize) -> Result<String> {
        match self {
            Source::Field(name) => field_str(row, idx, name),
            Source::Constant(value) => Ok((*value).to_string()),
        }
    }
}

/// Parse a StatsWales JSON document.
///
/// Only the English name is stored on the region; the Welsh name, when mapped, is
/// used for filter matching only.
pub fn parse<R: Read>(
    reader: R,
    cols: &ColumnMapping,
    filters: &Filters,
    regions: &mut RegionCollection,
) -> Result<usize> {
    let code_col = cols.require(SourceColumn::AuthCode)?;
    let year_col = cols.require(SourceColumn::Year)?;
    let value_col = cols.require(SourceColumn::Value)?;
    let measure_code = Source::resolve(
        cols,
        SourceColumn::MeasureCode,
        SourceColumn::SingleMeasureCode,
    )?;
    let measure_label = Source::resolve(
        cols,
        SourceColumn::MeasureName,
        SourceColumn::SingleMeasureName,
    )?;
    let eng_col = cols.get(SourceColumn::AuthNameEng);
    let cym_col = cols.get(SourceColumn::AuthNameCym);

    let doc: Value = serde_json::from_reader(reader)?;
    let rows = doc
        .get("value")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::parse(0, "expected an object with a 'value' array"))?;

    let mut accepted = 0;
    for (idx0, item) in rows.iter().enumerate() {
        let idx = idx0 + 1;
        let row = item
            .as_object()
            .ok_or_else(|| Error::parse(idx, "record is not a json object"))?;

        let code = field_str(row, idx, code_col)?;
        let eng = eng_col.map(|c| field_str(row, idx, c)).transpose()?;
        let cym = cym_col.map(|c| field_str(row, idx, c)).transpose()?;
        let mut measure = Measure::new(
            &measure_code.extract(row, idx)?,
            measure_label.extract(row, idx)?,
        );
        let year = field_year(row, idx, year_col)?;
        let value = field_f64(row, idx, value_col)?;
        measure.set_value(year, value);

        let names = eng.iter().chain(cym.iter()).map(String::as_str);
        if !(filters.regions.matches(&code, names)
            && filters.measures.matches(measure.code())
            && filters.years.contains(year))
        {
            continue;
        }

        let mut region = Region::new(code);
        if let Some(eng) = eng {
            region.set_name(LANG_ENG, eng)?;
        }
        region.set_measure(measure);
        regions.upsert(region);
        accepted += 1;
    }

    log::debug!("json table: {accepted} of {} records accepted", rows.len());
    Ok(accepted)
}

fn field<'r>(row: &'r Row, idx: usize, column: &str) -> Result<&'r Value> {
    row.get(column)
        .ok_or_else(|| Error::parse(idx, format!("missing field '{column}'")))
}

fn field_str(row: &Row, idx: usize, column: &str) -> Result<String> {
    field(row, idx, column)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::parse(idx, format!("field '{column}' is not a string")))
}

/// Years arrive as strings (`"2015"`) in StatsWales exports; integers are accepted too.
fn field_year(row: &Row, idx: usize, column: &str) -> Result<i32> {
    let v = field(row, idx, column)?;
    let parsed = match v {
        Value::String(s) => s.trim().parse::<i32>().ok(),
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        _ => None,
    };
    parsed.ok_or_else(|| Error::parse(idx, format!("field '{column}' is not a year: {v}")))
}

/// Numbers may be JSON numbers or numeric strings.
fn field_f64(row: &Row, idx: usize, column: &str) -> Result<f64> {
    let v = field(row, idx, column)?;
    let parsed = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| Error::parse(idx, format!("field '{column}' is not numeric: {v}")))
}
