use anyhow::{Context, Result};
use bethyw_rs::driver::{self, OutputMode, RunConfig};
use bethyw_rs::{Filters, MeasureFilter, RegionFilter, YearRange, datasets};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bethyw",
    version,
    about = "Import, filter & summarize Welsh Government (StatsWales) data files"
)]
struct Cli {
    /// Directory holding the input data files.
    #[arg(long, default_value = "datasets")]
    dir: PathBuf,
    /// Dataset codes separated by comma or semicolon (omit or 'all' for every dataset)
    #[arg(short, long)]
    datasets: Option<String>,
    /// Area codes or names separated by comma or semicolon (omit or 'all' for every area)
    #[arg(short, long)]
    areas: Option<String>,
    /// Measure codes separated by comma or semicolon (omit or 'all' for every measure)
    #[arg(short, long)]
    measures: Option<String>,
    /// Year (YYYY) or inclusive range (YYYY-ZZZZ); 0 imports all years.
    #[arg(short, long, default_value = "0")]
    years: String,
    /// Print the output as JSON instead of tables.
    #[arg(short, long, default_value_t = false)]
    json: bool,
    /// Write the output to a file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// `all` (any case) anywhere in the list disables the filter.
fn filter_tokens(arg: Option<&str>) -> Vec<String> {
    let tokens = arg.map(parse_list).unwrap_or_default();
    if tokens.iter().any(|t| t.eq_ignore_ascii_case("all")) {
        Vec::new()
    } else {
        tokens
    }
}

impl Cli {
    fn into_config(self) -> Result<RunConfig> {
        let codes = filter_tokens(self.datasets.as_deref());
        let datasets = datasets::select(&codes)?;
        let years: YearRange = self.years.parse()?;
        Ok(RunConfig {
            dir: self.dir,
            datasets,
            filters: Filters {
                regions: RegionFilter::new(filter_tokens(self.areas.as_deref())),
                measures: MeasureFilter::new(filter_tokens(self.measures.as_deref())),
                years,
            },
            output: if self.json {
                OutputMode::Json
            } else {
                OutputMode::Table
            },
        })
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let out = cli.out.clone();
    let config = cli.into_config()?;
    log::debug!("running with {config:?}");

    let output = driver::run(&config)?;
    for e in &output.skipped {
        eprintln!("Error importing dataset:\n{e}");
    }
    let rendered = output.rendered;
    match out {
        Some(path) => {
            std::fs::write(&path, format!("{rendered}\n"))
                .with_context(|| format!("write {}", path.display()))?;
            eprintln!("Wrote output to {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
