use crate::datasets::{ColumnMapping, SourceFormat};
use crate::error::{Error, Result};
use crate::filters::Filters;
use crate::input::InputSource;
use crate::models::Region;
use crate::parsers::{authority_csv, by_year_csv, stats_json};
use std::collections::BTreeMap;
use std::io::BufRead;

/// Top-level store of all regions, keyed and ordered by region code.
///
/// Regions only enter through [`RegionCollection::upsert`], which merges into an
/// existing region with the same code instead of replacing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionCollection {
    regions: BTreeMap<String, Region>,
}

impl RegionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `region`, or merge it into the stored region with the same code.
    pub fn upsert(&mut self, region: Region) {
        match self.regions.get_mut(region.code()) {
            Some(existing) => existing.merge(region),
            None => {
                self.regions.insert(region.code().to_string(), region);
            }
        }
    }

    pub fn region(&self, code: &str) -> Result<&Region> {
        self.regions
            .get(code)
            .ok_or_else(|| Error::RegionNotFound(code.to_string()))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.regions.contains_key(code)
    }

    /// Regions in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Decode `reader` with the parser for `format` and merge the result in.
    ///
    /// Returns the number of accepted records. On error, records upserted before
    /// the failure stay in the collection.
    pub fn populate<R: BufRead>(
        &mut self,
        reader: R,
        format: SourceFormat,
        cols: &ColumnMapping,
        filters: &Filters,
    ) -> Result<usize> {
        match format {
            SourceFormat::AuthorityCodeCsv => authority_csv::parse(reader, &filters.regions, self),
            SourceFormat::AuthorityByYearCsv => by_year_csv::parse(reader, cols, filters, self),
            SourceFormat::WelshStatsJson => stats_json::parse(reader, cols, filters, self),
        }
    }

    /// Open `input` and [`populate`](RegionCollection::populate) from it.
    pub fn populate_from(
        &mut self,
        input: &dyn InputSource,
        format: SourceFormat,
        cols: &ColumnMapping,
        filters: &Filters,
    ) -> Result<usize> {
        let reader = input.open()?;
        let accepted = self.populate(reader, format, cols, filters)?;
        log::info!("imported {accepted} records from {}", input.source());
        Ok(accepted)
    }
}

impl<'a> IntoIterator for &'a RegionCollection {
    type Item = &'a Region;
    type IntoIter = std::collections::btree_map::Values<'a, String, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.values()
    }
}
