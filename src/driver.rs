//! Multi-file ingestion: load the reference table, then each selected dataset,
//! and render the requested output.

use crate::collection::RegionCollection;
use crate::datasets::{self, DatasetSource};
use crate::error::{Error, Result};
use crate::filters::{Filters, RegionFilter};
use crate::input::InputFile;
use crate::report;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to print once all sources are ingested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Table,
    Json,
}

/// Everything a run needs, built explicitly by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Directory holding the dataset files.
    pub dir: PathBuf,
    pub datasets: Vec<DatasetSource>,
    pub filters: Filters,
    pub output: OutputMode,
}

impl RunConfig {
    /// All catalogue datasets from `dir`, no filters, table output.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            datasets: datasets::catalogue(),
            filters: Filters::default(),
            output: OutputMode::default(),
        }
    }
}

/// Ingest the reference table of region names from `dir`.
pub fn load_areas(
    regions: &mut RegionCollection,
    dir: &Path,
    filter: &RegionFilter,
) -> Result<usize> {
    let source = datasets::areas_source();
    let filters = Filters {
        regions: filter.clone(),
        ..Filters::default()
    };
    let input = InputFile::new(dir.join(&source.file));
    regions.populate_from(&input, source.format, &source.columns, &filters)
}

/// Ingest each dataset in order. A failing source is logged and skipped; sources
/// already ingested stay in the collection. Returns the errors of the skipped
/// sources.
pub fn load_datasets(
    regions: &mut RegionCollection,
    dir: &Path,
    sources: &[DatasetSource],
    filters: &Filters,
) -> Vec<Error> {
    let mut skipped = Vec::new();
    for source in sources {
        let input = InputFile::new(dir.join(&source.file));
        if let Err(e) = regions.populate_from(&input, source.format, &source.columns, filters) {
            log::warn!("skipping dataset {} ({}): {e}", source.code, source.name);
            skipped.push(e);
        }
    }
    skipped
}

/// The ingested collection plus the errors of every source that was skipped.
#[derive(Debug)]
pub struct Ingested {
    pub regions: RegionCollection,
    pub skipped: Vec<Error>,
}

/// Build the collection described by `config`.
pub fn ingest(config: &RunConfig) -> Ingested {
    let mut regions = RegionCollection::new();
    let mut skipped = Vec::new();
    if let Err(e) = load_areas(&mut regions, &config.dir, &config.filters.regions) {
        log::warn!("skipping reference table: {e}");
        skipped.push(e);
    }
    skipped.extend(load_datasets(
        &mut regions,
        &config.dir,
        &config.datasets,
        &config.filters,
    ));
    Ingested { regions, skipped }
}

/// Rendered output of a run and the sources that could not be imported.
#[derive(Debug)]
pub struct RunOutput {
    pub rendered: String,
    pub skipped: Vec<Error>,
}

/// Ingest everything and render the requested output.
pub fn run(config: &RunConfig) -> Result<RunOutput> {
    let Ingested { regions, skipped } = ingest(config);
    let rendered = match config.output {
        OutputMode::Json => report::to_json(&regions)?,
        OutputMode::Table => report::to_text(&regions),
    };
    Ok(RunOutput { rendered, skipped })
}
