use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightPoint {
    pub date: NaiveDate,
    pub weight: f64,
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    /// `YYYY-MM-DD`; defaults to six days before `end`.
    pub start: Option<String>,
    /// `YYYY-MM-DD`; defaults to today in the reference timezone.
    pub end: Option<String>,
}

/// `average` is null when no samples fall in the window; that is a normal
/// state, not an error.
#[derive(Debug, Serialize, PartialEq)]
pub struct AverageResponse {
    pub average: Option<f64>,
    pub samples: usize,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAverage {
    /// Monday of the ISO week, in the reference timezone.
    pub week_start: NaiveDate,
    pub weight: f64,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeekSampleCounts {
    pub current_week: usize,
    pub previous_week: usize,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeekStarts {
    pub current: NaiveDate,
    pub previous: NaiveDate,
}

/// Current and previous ISO-week averages plus today's discrete sample, each
/// independently nullable; counts let the caller qualify confidence.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeekComparison {
    pub current_week_average: Option<f64>,
    pub previous_week_average: Option<f64>,
    pub today_weight: Option<f64>,
    pub sample_counts: WeekSampleCounts,
    pub week_starts: WeekStarts,
}
