use crate::collection::RegionCollection;
use crate::models::Measure;
use serde::{Deserialize, Serialize};

/// Derived statistics for one measure.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub count: usize,
    /// Arithmetic mean of all stored values.
    pub average: f64,
    /// Last-year value minus first-year value.
    pub difference: f64,
    /// `difference / first * 100`.
    pub percentage_difference: f64,
}

/// Grouping key for [`grouped_summary`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub region_code: String,
    pub measure_code: String,
}

/// Compute the derived statistics of a measure. All three are 0 for a measure
/// without values; the difference is 0 when only one year is stored.
pub fn summarize(measure: &Measure) -> Summary {
    let values = measure.values();
    let count = values.len();
    if count == 0 {
        return Summary::default();
    }

    let average = values.values().sum::<f64>() / count as f64;
    let (first, last) = match (values.first_key_value(), values.last_key_value()) {
        (Some((_, &first)), Some((_, &last))) => (first, last),
        _ => return Summary::default(),
    };
    let difference = if count > 1 { last - first } else { 0.0 };
    let percentage_difference = if difference != 0.0 && first != 0.0 {
        difference / first * 100.0
    } else {
        0.0
    };

    Summary {
        count,
        average,
        difference,
        percentage_difference,
    }
}

/// Summaries for every (region, measure) pair, ordered by region then measure code.
pub fn grouped_summary(regions: &RegionCollection) -> Vec<(GroupKey, Summary)> {
    regions
        .iter()
        .flat_map(|region| {
            region.measures().map(move |measure| {
                let key = GroupKey {
                    region_code: region.code().to_string(),
                    measure_code: measure.code().to_string(),
                };
                (key, summarize(measure))
            })
        })
        .collect()
}
