use crate::analysis::types::{ParseOutcome, ParsedLine};
use ahash::RandomState;
use std::collections::HashMap;
use thiserror::Error;

const PROGRESS_EVERY: u64 = 100_000;

/// Running statistics for one url.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlAccumulator {
    pub count: u64,
    pub time_sum: f64,
    pub time_max: f64,
    /// Samples in the order they were seen for this url.
    pub time_samples: Vec<f64>,
}

impl UrlAccumulator {
    pub fn record(&mut self, response_time: f64) {
        self.count += 1;
        self.time_sum += response_time;
        self.time_max = self.time_max.max(response_time);
        self.time_samples.push(response_time);
    }

    pub fn merge(&mut self, other: UrlAccumulator) {
        self.count += other.count;
        self.time_sum += other.time_sum;
        self.time_max = self.time_max.max(other.time_max);
        self.time_samples.extend(other.time_samples);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunTotals {
    /// Every line seen, parsed or not.
    pub line_count: u64,
    pub parsed_count: u64,
    pub time_sum: f64,
}

impl RunTotals {
    pub fn failed_count(&self) -> u64 {
        self.line_count - self.parsed_count
    }
}

pub type UrlMap = HashMap<String, UrlAccumulator, RandomState>;

/// Output of one aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub urls: UrlMap,
    pub totals: RunTotals,
}

impl Aggregation {
    /// Union two aggregations by url, summing every field.
    ///
    /// Not used by a single-file run. This is the merge step for aggregating
    /// several files independently and combining the results afterwards.
    pub fn merge(&mut self, other: Aggregation) {
        for (url, acc) in other.urls {
            self.urls.entry(url).or_default().merge(acc);
        }
        self.totals.line_count += other.totals.line_count;
        self.totals.parsed_count += other.totals.parsed_count;
        self.totals.time_sum += other.totals.time_sum;
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("no lines to analyze")]
    Empty,

    #[error(
        "too many unparsable lines: {failed} of {total} failed (max allowed ratio {max_error_ratio})"
    )]
    TooManyErrors {
        failed: u64,
        total: u64,
        max_error_ratio: f64,
    },
}

/// Single-pass accumulator over parse outcomes.
pub struct Aggregator {
    urls: UrlMap,
    totals: RunTotals,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            urls: UrlMap::default(),
            totals: RunTotals::default(),
        }
    }

    pub fn push(&mut self, outcome: ParseOutcome) {
        self.totals.line_count += 1;

        match outcome {
            Ok(ParsedLine { url, response_time }) => {
                self.urls.entry(url).or_default().record(response_time);
                self.totals.parsed_count += 1;
                self.totals.time_sum += response_time;
            }
            Err(reason) => {
                tracing::debug!(line = self.totals.line_count, %reason, "skipped line");
            }
        }

        if self.totals.line_count % PROGRESS_EVERY == 0 {
            tracing::info!(lines = self.totals.line_count, "lines processed");
        }
    }

    pub fn totals(&self) -> &RunTotals {
        &self.totals
    }

    /// Apply the failure ratio gate and hand over the accumulated state.
    ///
    /// `max_error_ratio` is the largest tolerated fraction of unparsable lines.
    /// An empty pass always fails.
    pub fn finish(self, max_error_ratio: f64) -> Result<Aggregation, FormatError> {
        let RunTotals {
            line_count,
            parsed_count,
            ..
        } = self.totals;

        if line_count == 0 {
            return Err(FormatError::Empty);
        }

        // parsed / total < 1 - max  <=>  failed / total > max
        let failed = line_count - parsed_count;
        if failed as f64 / line_count as f64 > max_error_ratio {
            return Err(FormatError::TooManyErrors {
                failed,
                total: line_count,
                max_error_ratio,
            });
        }

        tracing::info!(
            lines = line_count,
            parsed = parsed_count,
            urls = self.urls.len(),
            "aggregation complete"
        );

        Ok(Aggregation {
            urls: self.urls,
            totals: self.totals,
        })
    }
}

/// Aggregate a whole sequence of parse outcomes in one pass.
pub fn aggregate<I>(outcomes: I, max_error_ratio: f64) -> Result<Aggregation, FormatError>
where
    I: IntoIterator<Item = ParseOutcome>,
{
    let mut aggregator = Aggregator::new();
    for outcome in outcomes {
        aggregator.push(outcome);
    }
    aggregator.finish(max_error_ratio)
}
