//! Source formats, column roles, and the built-in catalogue of StatsWales datasets.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Encoding of an input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// `code,english_name,welsh_name` reference table.
    AuthorityCodeCsv,
    /// One row per region, one column per year, single measure per file.
    AuthorityByYearCsv,
    /// StatsWales JSON: `{"value": [ {...}, ... ]}`.
    WelshStatsJson,
}

impl FromStr for SourceFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "authority-code-csv" | "authoritycodecsv" => Ok(SourceFormat::AuthorityCodeCsv),
            "authority-by-year-csv" | "authoritybyyearcsv" => Ok(SourceFormat::AuthorityByYearCsv),
            "welsh-stats-json" | "welshstatsjson" => Ok(SourceFormat::WelshStatsJson),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Logical column roles a mapping can assign to source field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceColumn {
    AuthCode,
    AuthNameEng,
    AuthNameCym,
    MeasureCode,
    MeasureName,
    /// Constant measure code for single-measure files (not a field name).
    SingleMeasureCode,
    /// Constant measure label for single-measure files (not a field name).
    SingleMeasureName,
    Year,
    Value,
}

impl fmt::Display for SourceColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SourceColumn::AuthCode => "region code",
            SourceColumn::AuthNameEng => "region name (eng)",
            SourceColumn::AuthNameCym => "region name (cym)",
            SourceColumn::MeasureCode => "measure code",
            SourceColumn::MeasureName => "measure label",
            SourceColumn::SingleMeasureCode => "single measure code",
            SourceColumn::SingleMeasureName => "single measure label",
            SourceColumn::Year => "year",
            SourceColumn::Value => "value",
        };
        f.write_str(s)
    }
}

/// Role → source field name (or constant, for the single-measure roles).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping(BTreeMap<SourceColumn, String>);

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, column: SourceColumn, name: impl Into<String>) -> Self {
        self.0.insert(column, name.into());
        self
    }

    pub fn get(&self, column: SourceColumn) -> Option<&str> {
        self.0.get(&column).map(String::as_str)
    }

    /// Like [`ColumnMapping::get`] but fails with [`Error::MissingColumn`].
    pub fn require(&self, column: SourceColumn) -> Result<&str> {
        self.get(column).ok_or(Error::MissingColumn(column))
    }
}

impl<S: Into<String>> FromIterator<(SourceColumn, S)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (SourceColumn, S)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(c, s)| (c, s.into())).collect())
    }
}

/// One importable file: display name, short code, file name, format, and mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSource {
    pub name: String,
    pub code: String,
    pub file: String,
    pub format: SourceFormat,
    pub columns: ColumnMapping,
}

impl DatasetSource {
    fn new(
        name: &str,
        code: &str,
        file: &str,
        format: SourceFormat,
        columns: &[(SourceColumn, &str)],
    ) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
            file: file.to_string(),
            format,
            columns: columns.iter().map(|&(c, s)| (c, s)).collect(),
        }
    }
}

/// The reference table of region codes and names.
pub fn areas_source() -> DatasetSource {
    use SourceColumn::*;
    DatasetSource::new(
        "Areas",
        "areas",
        "areas.csv",
        SourceFormat::AuthorityCodeCsv,
        &[
            (AuthCode, "Local authority code"),
            (AuthNameEng, "Name (eng)"),
            (AuthNameCym, "Name (cym)"),
        ],
    )
}

/// All measure datasets known to the CLI, in import order.
pub fn catalogue() -> Vec<DatasetSource> {
    use SourceColumn::*;
    use SourceFormat::*;
    vec![
        DatasetSource::new(
            "Population density",
            "popden",
            "popu1009.json",
            WelshStatsJson,
            &[
                (AuthCode, "Localauthority_Code"),
                (AuthNameEng, "Localauthority_ItemName_ENG"),
                (MeasureCode, "Measure_Code"),
                (MeasureName, "Measure_ItemName_ENG"),
                (Year, "Year_Code"),
                (Value, "Data"),
            ],
        ),
        DatasetSource::new(
            "Active Businesses",
            "biz",
            "econ0080.json",
            WelshStatsJson,
            &[
                (AuthCode, "Area_Code"),
                (AuthNameEng, "Area_ItemName_ENG"),
                (MeasureCode, "Variable_Code"),
                (MeasureName, "Variable_ItemName_ENG"),
                (Year, "Year_Code"),
                (Value, "Data"),
            ],
        ),
        DatasetSource::new(
            "Air Quality Indicators",
            "aqi",
            "envi0201.json",
            WelshStatsJson,
            &[
                (AuthCode, "Area_Code"),
                (AuthNameEng, "Area_ItemName_ENG"),
                (MeasureCode, "Pollutant_ItemName_ENG"),
                (MeasureName, "Pollutant_ItemName_ENG"),
                (Year, "Year_Code"),
                (Value, "Data"),
            ],
        ),
        DatasetSource::new(
            "Rail passenger journeys",
            "trains",
            "tran0152.json",
            WelshStatsJson,
            &[
                (AuthCode, "LocalAuthority_Code"),
                (AuthNameEng, "LocalAuthority_ItemName_ENG"),
                (Year, "Year_Code"),
                (Value, "Data"),
                (SingleMeasureCode, "rail"),
                (SingleMeasureName, "Rail passenger journeys"),
            ],
        ),
        DatasetSource::new(
            "Population density",
            "complete-popden",
            "complete-popu1009-popden.csv",
            AuthorityByYearCsv,
            &[
                (AuthCode, "AuthorityCode"),
                (SingleMeasureCode, "dens"),
                (SingleMeasureName, "Population density"),
            ],
        ),
        DatasetSource::new(
            "Population",
            "complete-pop",
            "complete-popu1009-pop.csv",
            AuthorityByYearCsv,
            &[
                (AuthCode, "AuthorityCode"),
                (SingleMeasureCode, "pop"),
                (SingleMeasureName, "Population"),
            ],
        ),
        DatasetSource::new(
            "Land area",
            "complete-area",
            "complete-popu1009-area.csv",
            AuthorityByYearCsv,
            &[
                (AuthCode, "AuthorityCode"),
                (SingleMeasureCode, "area"),
                (SingleMeasureName, "Land area"),
            ],
        ),
    ]
}

/// Resolve dataset codes against the catalogue. An empty list or `all` (any case)
/// selects every dataset.
pub fn select(codes: &[String]) -> Result<Vec<DatasetSource>> {
    let all = catalogue();
    if codes.is_empty() || codes.iter().any(|c| c.eq_ignore_ascii_case("all")) {
        return Ok(all);
    }
    codes
        .iter()
        .map(|code| {
            all.iter()
                .find(|d| d.code.eq_ignore_ascii_case(code.trim()))
                .cloned()
                .ok_or_else(|| Error::UnknownDataset(code.clone()))
        })
        .collect()
}
