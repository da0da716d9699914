use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Language tag for English names.
pub const LANG_ENG: &str = "eng";
/// Language tag for Welsh names.
pub const LANG_CYM: &str = "cym";

/// A named statistic tracked over years (e.g. population density).
///
/// The code is normalised to lowercase on construction. At most one value is
/// stored per year; setting an existing year overwrites it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measure {
    code: String,
    label: String,
    values: BTreeMap<i32, f64>,
}

impl Measure {
    pub fn new(code: &str, label: impl Into<String>) -> Self {
        Self {
            code: code.to_lowercase(),
            label: label.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Value stored for `year`.
    pub fn value(&self, year: i32) -> Result<f64> {
        self.values
            .get(&year)
            .copied()
            .ok_or(Error::YearNotFound(year))
    }

    /// Insert or replace the value for `year`.
    pub fn set_value(&mut self, year: i32, value: f64) {
        self.values.insert(year, value);
    }

    /// Year → value entries in chronological order.
    pub fn values(&self) -> &BTreeMap<i32, f64> {
        &self.values
    }

    /// Number of years with a stored value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Union of year entries; values from `other` win on conflict.
    pub fn merge(&mut self, other: Measure) {
        if !other.label.is_empty() {
            self.label = other.label;
        }
        self.values.extend(other.values);
    }
}

/// An administrative unit with names in several languages and a set of measures.
///
/// The code is fixed at construction and is the only merge key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    code: String,
    names: BTreeMap<String, String>,
    measures: BTreeMap<String, Measure>,
}

impl Region {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            names: BTreeMap::new(),
            measures: BTreeMap::new(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Name stored for a language tag (case-insensitive).
    pub fn name(&self, lang: &str) -> Result<&str> {
        self.names
            .get(&lang.to_ascii_lowercase())
            .map(String::as_str)
            .ok_or_else(|| Error::NameNotFound(lang.to_string()))
    }

    /// Set the name for a three-letter alphabetic language tag, replacing any
    /// previous name for that language. Invalid tags leave the region untouched.
    pub fn set_name(&mut self, lang: &str, name: impl Into<String>) -> Result<()> {
        if lang.chars().count() != 3 || !lang.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::InvalidLanguage(lang.to_string()));
        }
        self.names.insert(lang.to_ascii_lowercase(), name.into());
        Ok(())
    }

    /// Language tag → name, ordered by tag.
    pub fn names(&self) -> &BTreeMap<String, String> {
        &self.names
    }

    /// Measure by code (case-insensitive).
    pub fn measure(&self, code: &str) -> Result<&Measure> {
        self.measures
            .get(&code.to_lowercase())
            .ok_or_else(|| Error::MeasureNotFound(code.to_string()))
    }

    /// Insert a measure, merging into an existing measure with the same code.
    pub fn set_measure(&mut self, measure: Measure) {
        match self.measures.get_mut(measure.code()) {
            Some(existing) => existing.merge(measure),
            None => {
                self.measures.insert(measure.code().to_string(), measure);
            }
        }
    }

    /// Measures ordered by code.
    pub fn measures(&self) -> impl Iterator<Item = &Measure> {
        self.measures.values()
    }

    /// Number of measures.
    pub fn len(&self) -> usize {
        self.measures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    /// Combine `other` into this region: names are upserted per language and
    /// measures merged measure by measure. The code of `self` is kept.
    pub fn merge(&mut self, other: Region) {
        self.names.extend(other.names);
        for measure in other.measures.into_values() {
            self.set_measure(measure);
        }
    }

    /// `"English / Welsh"`, whichever single name exists, or `"Unnamed"`.
    pub fn display_name(&self) -> String {
        match (self.names.get(LANG_ENG), self.names.get(LANG_CYM)) {
            (Some(eng), Some(cym)) => format!("{eng} / {cym}"),
            (Some(name), None) | (None, Some(name)) => name.clone(),
            (None, None) => self
                .names
                .values()
                .next()
                .cloned()
                .unwrap_or_else(|| "Unnamed".to_string()),
        }
    }
}
