//! Region, measure, and year filters shared by all parsers.
//!
//! Filters are read-only views supplied by the caller. An empty filter matches
//! everything.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Lowercase tokens matched against region codes (exact) and names (substring).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionFilter(BTreeSet<String>);

impl RegionFilter {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(normalise(tokens))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Inclusive-any: one matching token is enough. Codes compare
    /// case-insensitively, names match when their lowercase form contains a token.
    pub fn matches<'a>(&self, code: &str, names: impl IntoIterator<Item = &'a str>) -> bool {
        if self.0.is_empty() {
            return true;
        }
        let code = code.to_lowercase();
        if self.0.contains(&code) {
            return true;
        }
        let names: Vec<String> = names
            .into_iter()
            .filter(|n| !n.is_empty())
            .map(str::to_lowercase)
            .collect();
        self.0
            .iter()
            .any(|token| names.iter().any(|name| name.contains(token.as_str())))
    }
}

/// Lowercase measure codes; exact match required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureFilter(BTreeSet<String>);

impl MeasureFilter {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(normalise(codes))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, code: &str) -> bool {
        self.0.is_empty() || self.0.contains(&code.to_lowercase())
    }
}

fn normalise<I, S>(tokens: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Closed, inclusive year range. `0..=0` means "import all years".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    /// No filtering.
    pub const ALL: YearRange = YearRange { start: 0, end: 0 };

    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Single year like 2020.
    pub fn year(year: i32) -> Self {
        Self::new(year, year)
    }

    pub fn is_all(&self) -> bool {
        self.start == 0 && self.end == 0
    }

    pub fn contains(&self, year: i32) -> bool {
        self.is_all() || (self.start..=self.end).contains(&year)
    }
}

impl FromStr for YearRange {
    type Err = Error;

    /// Accepts `YYYY`, `YYYY-ZZZZ` with `YYYY <= ZZZZ`, or `0` for all years.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || Error::InvalidYears(s.to_string());
        let parse_year = |part: &str| -> Result<i32> {
            let part = part.trim();
            if part == "0" {
                return Ok(0);
            }
            if part.len() != 4 || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse::<i32>().map_err(|_| invalid())
        };
        match s.split_once('-') {
            Some((a, b)) => {
                let (start, end) = (parse_year(a)?, parse_year(b)?);
                if start > end {
                    return Err(invalid());
                }
                Ok(YearRange::new(start, end))
            }
            None => Ok(YearRange::year(parse_year(s)?)),
        }
    }
}

/// The three filters applied during ingestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub regions: RegionFilter,
    pub measures: MeasureFilter,
    pub years: YearRange,
}
