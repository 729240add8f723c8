use crate::analysis::aggregate::{Aggregation, UrlAccumulator};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;

pub const DEFAULT_REPORT_SIZE: usize = 1000;

/// One finalized report line. Floats serialize as decimals with 10 fractional digits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub url: String,
    pub count: u64,
    #[serde(serialize_with = "fixed")]
    pub time_avg: f64,
    #[serde(serialize_with = "fixed")]
    pub time_max: f64,
    #[serde(serialize_with = "fixed")]
    pub time_sum: f64,
    #[serde(serialize_with = "fixed")]
    pub time_med: f64,
    #[serde(serialize_with = "fixed")]
    pub time_perc: f64,
    #[serde(serialize_with = "fixed")]
    pub count_perc: f64,
}

fn fixed<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("{value:.10}"))
}

/// Median of a sample list: middle element for odd lengths, mean of the two
/// middle elements for even lengths. `None` for an empty list.
pub fn median(samples: &[f64]) -> Option<f64> {
    let n = samples.len();
    if n == 0 {
        return None;
    }

    let mut sorted = samples.to_vec();
    let (lower, mid, _) = sorted.select_nth_unstable_by(n / 2, f64::total_cmp);
    let mid = *mid;

    if n % 2 == 1 {
        return Some(mid);
    }

    // Everything left of the pivot is <= it, so the other middle is the max of that half.
    let below = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((below + mid) / 2.0)
}

/// Rank by average time, slowest first. Equal averages fall back to url order.
fn by_time_avg_desc(a: &ReportRow, b: &ReportRow) -> Ordering {
    b.time_avg
        .total_cmp(&a.time_avg)
        .then_with(|| a.url.cmp(&b.url))
}

fn build_row(url: &str, acc: &UrlAccumulator, aggregation: &Aggregation) -> ReportRow {
    let totals = &aggregation.totals;
    let count = acc.count as f64;

    let time_perc = if totals.time_sum > 0.0 {
        acc.time_sum / totals.time_sum
    } else {
        0.0
    };

    ReportRow {
        url: url.to_string(),
        count: acc.count,
        time_avg: acc.time_sum / count,
        time_max: acc.time_max,
        time_sum: acc.time_sum,
        time_med: median(&acc.time_samples).unwrap_or_default(),
        time_perc,
        count_perc: count / totals.parsed_count as f64,
    }
}

/// Turn accumulated per-url state into the ordered, truncated report.
pub fn build_report(aggregation: &Aggregation, limit: usize) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = aggregation
        .urls
        .iter()
        .filter(|(_, acc)| acc.count > 0)
        .map(|(url, acc)| build_row(url, acc, aggregation))
        .collect();

    rows.sort_by(by_time_avg_desc);
    rows.truncate(limit);
    rows
}
