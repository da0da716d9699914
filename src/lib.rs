//! bethyw_rs
//!
//! A small Rust library for importing Welsh Government (StatsWales) regional
//! statistics into one in-memory model and summarizing them. Pairs with the
//! `bethyw` CLI.
//!
//! ### Features
//! - Import three source formats: the region reference CSV, wide by-year CSV
//!   tables, and StatsWales JSON tables
//! - Filter by region (code or name), measure code, and year range while importing
//! - Merge repeated regions and measures across files instead of overwriting them
//! - Export as JSON or print a table report with average, difference, and % difference
//!
//! ### Example
//! ```no_run
//! use bethyw_rs::{Filters, RegionCollection, RegionFilter, datasets};
//! use bethyw_rs::input::InputFile;
//!
//! let mut regions = RegionCollection::new();
//! let filters = Filters {
//!     regions: RegionFilter::new(["swansea"]),
//!     ..Filters::default()
//! };
//! let areas = datasets::areas_source();
//! let input = InputFile::new("datasets/areas.csv");
//! regions.populate_from(&input, areas.format, &areas.columns, &filters)?;
//! print!("{}", bethyw_rs::report::to_text(&regions));
//! # Ok::<(), bethyw_rs::Error>(())
//! ```

pub mod collection;
pub mod datasets;
pub mod driver;
pub mod error;
pub mod filters;
pub mod input;
pub mod models;
pub mod parsers;
pub mod report;
pub mod stats;

pub use collection::RegionCollection;
pub use datasets::{ColumnMapping, SourceColumn, SourceFormat};
pub use error::{Error, Result};
pub use filters::{Filters, MeasureFilter, RegionFilter, YearRange};
pub use models::{Measure, Region};
