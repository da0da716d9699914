//! Output encodings for a populated [`RegionCollection`]: the structured JSON export
//! and the human-readable table report.

use crate::collection::RegionCollection;
use crate::error::Result;
use crate::models::{Measure, Region};
use crate::stats::summarize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Serialize)]
struct RegionExport<'a> {
    names: &'a BTreeMap<String, String>,
    measures: BTreeMap<&'a str, &'a BTreeMap<i32, f64>>,
}

/// Serialize as `{"<code>": {"names": {...}, "measures": {"<measure>": {"<year>": v}}}}`.
/// An empty collection yields `{}`.
pub fn to_json(regions: &RegionCollection) -> Result<String> {
    let export: BTreeMap<&str, RegionExport<'_>> = regions
        .iter()
        .map(|region| {
            let measures = region.measures().map(|m| (m.code(), m.values())).collect();
            (
                region.code(),
                RegionExport {
                    names: region.names(),
                    measures,
                },
            )
        })
        .collect();
    Ok(serde_json::to_string(&export)?)
}

/// Render the table report; one blank line separates regions.
pub fn to_text(regions: &RegionCollection) -> String {
    TextReport(regions).to_string()
}

/// [`fmt::Display`] adapter behind [`to_text`].
pub struct TextReport<'a>(pub &'a RegionCollection);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, region) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write_region(f, region)?;
        }
        Ok(())
    }
}

fn write_region(f: &mut fmt::Formatter<'_>, region: &Region) -> fmt::Result {
    writeln!(f, "{} ({})", region.display_name(), region.code())?;
    if region.is_empty() {
        return writeln!(f, "<no measures>");
    }
    for measure in region.measures() {
        write_measure(f, measure)?;
    }
    Ok(())
}

fn write_measure(f: &mut fmt::Formatter<'_>, measure: &Measure) -> fmt::Result {
    writeln!(f, "{} ({})", measure.label(), measure.code())?;
    if measure.is_empty() {
        return writeln!(f, "<no data>");
    }

    let summary = summarize(measure);
    let mut header: Vec<String> = measure.values().keys().map(|y| y.to_string()).collect();
    header.extend(["Average", "Diff.", "% Diff."].map(String::from));
    let mut cells: Vec<String> = measure
        .values()
        .values()
        .map(|v| format!("{v:.6}"))
        .collect();
    cells.extend(
        [
            summary.average,
            summary.difference,
            summary.percentage_difference,
        ]
        .map(|v| format!("{v:.6}")),
    );

    let widths: Vec<usize> = header
        .iter()
        .zip(&cells)
        .map(|(h, c)| h.chars().count().max(c.chars().count()))
        .collect();
    writeln!(f, "{}", align(&header, &widths))?;
    writeln!(f, "{}", align(&cells, &widths))
}

fn align(row: &[String], widths: &[usize]) -> String {
    row.iter()
        .zip(widths)
        .map(|(s, &w)| format!("{s:>w$}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_right_pads_to_width() {
        let row = vec!["1991".to_string(), "Average".to_string()];
        assert_eq!(align(&row, &[10, 10]), "      1991    Average");
    }
}
