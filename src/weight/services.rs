use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;
use uuid::Uuid;

use crate::daily_log::bucket;
use crate::daily_log::store::WeightSample;
use crate::error::Result;
use crate::state::AppState;
use crate::weight::dto::{
    AverageResponse, WeekComparison, WeekSampleCounts, WeekStarts, WeeklyAverage, WeightPoint,
};

/// A sample anchored to its local calendar day in the reference timezone.
#[derive(Debug, Clone, Copy)]
struct DatedSample {
    date: NaiveDate,
    weight: f64,
}

fn to_local_dates(tz: Tz, samples: &[WeightSample]) -> Vec<DatedSample> {
    samples
        .iter()
        .map(|s| DatedSample {
            date: s.logged_at.with_timezone(&tz).date_naive(),
            weight: s.weight,
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn mean(weights: impl Iterator<Item = f64>) -> AverageResponse {
    let mut sum = 0.0;
    let mut count = 0usize;
    for w in weights {
        sum += w;
        count += 1;
    }
    AverageResponse {
        average: (count > 0).then(|| round2(sum / count as f64)),
        samples: count,
    }
}

fn weekly_buckets(samples: &[DatedSample]) -> Vec<WeeklyAverage> {
    use std::collections::BTreeMap;
    let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for s in samples {
        let bucket = buckets.entry(bucket::monday_of(s.date)).or_insert((0.0, 0));
        bucket.0 += s.weight;
        bucket.1 += 1;
    }
    // Weeks with no samples are simply absent.
    buckets
        .into_iter()
        .map(|(week_start, (sum, count))| WeeklyAverage {
            week_start,
            weight: round2(sum / count as f64),
        })
        .collect()
}

/// All samples with a recorded weight, ascending by date.
pub async fn history(state: &AppState, user_id: Uuid) -> Result<Vec<WeightPoint>> {
    let samples = state.daily_logs.weight_samples(user_id).await?;
    let tz = state.config.reference_timezone;
    Ok(to_local_dates(tz, &samples)
        .into_iter()
        .map(|s| WeightPoint {
            date: s.date,
            weight: s.weight,
        })
        .collect())
}

/// Arithmetic mean of the samples whose local calendar day falls in
/// `[start, end]`; defaults to the trailing seven days inclusive.
pub async fn average_in_range(
    state: &AppState,
    user_id: Uuid,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<AverageResponse> {
    let tz = state.config.reference_timezone;
    let end = match end {
        Some(raw) => bucket::parse_day(raw)?,
        None => bucket::today(tz),
    };
    let start = match start {
        Some(raw) => bucket::parse_day(raw)?,
        None => end - Duration::days(6),
    };

    let samples = state.daily_logs.weight_samples(user_id).await?;
    let dated = to_local_dates(tz, &samples);
    Ok(mean(
        dated
            .iter()
            .filter(|s| s.date >= start && s.date <= end)
            .map(|s| s.weight),
    ))
}

/// One average per ISO week (Monday-anchored, reference timezone), ascending
/// by week start.
pub async fn weekly_averages(state: &AppState, user_id: Uuid) -> Result<Vec<WeeklyAverage>> {
    let samples = state.daily_logs.weight_samples(user_id).await?;
    let dated = to_local_dates(state.config.reference_timezone, &samples);
    Ok(weekly_buckets(&dated))
}

pub async fn week_comparison(state: &AppState, user_id: Uuid) -> Result<WeekComparison> {
    let tz = state.config.reference_timezone;
    let today = bucket::today(tz);
    let current_start = bucket::monday_of(today);
    let previous_start = current_start - Duration::days(7);

    let samples = state.daily_logs.weight_samples(user_id).await?;
    let dated = to_local_dates(tz, &samples);

    let current = mean(
        dated
            .iter()
            .filter(|s| bucket::monday_of(s.date) == current_start)
            .map(|s| s.weight),
    );
    let previous = mean(
        dated
            .iter()
            .filter(|s| bucket::monday_of(s.date) == previous_start)
            .map(|s| s.weight),
    );
    let today_weight = dated.iter().rev().find(|s| s.date == today).map(|s| s.weight);

    Ok(WeekComparison {
        current_week_average: current.average,
        previous_week_average: previous.average,
        today_weight,
        sample_counts: WeekSampleCounts {
            current_week: current.samples,
            previous_week: previous.samples,
        },
        week_starts: WeekStarts {
            current: current_start,
            previous: previous_start,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daily_log::model::Meals;
    use crate::test_support::{state_with, test_timezone, FactsFixture, LogsFixture, UsersFixture};

    fn sample(date: &str, weight: f64) -> DatedSample {
        DatedSample {
            date: bucket::parse_day(date).expect("valid date"),
            weight,
        }
    }

    #[test]
    fn mean_of_empty_is_null_with_zero_samples() {
        let avg = mean(std::iter::empty());
        assert_eq!(
            avg,
            AverageResponse {
                average: None,
                samples: 0
            }
        );
    }

    #[test]
    fn mean_rounds_to_two_decimals() {
        let avg = mean([70.0, 70.5, 71.0].into_iter());
        assert_eq!(avg.average, Some(70.5));
        let avg = mean([70.0, 70.1].into_iter());
        assert_eq!(avg.average, Some(70.05));
    }

    #[test]
    fn wednesday_sample_groups_into_preceding_monday_week() {
        // 2024-03-13 is a Wednesday; its ISO week starts 2024-03-11.
        let weekly = weekly_buckets(&[sample("2024-03-13", 71.0)]);
        assert_eq!(weekly.len(), 1);
        assert_eq!(weekly[0].week_start, bucket::parse_day("2024-03-11").unwrap());
    }

    #[test]
    fn weekly_buckets_average_per_week_ascending() {
        let weekly = weekly_buckets(&[
            sample("2024-03-18", 70.0), // week of 03-18
            sample("2024-03-12", 72.0), // week of 03-11
            sample("2024-03-14", 71.0), // week of 03-11
        ]);
        assert_eq!(
            weekly,
            vec![
                WeeklyAverage {
                    week_start: bucket::parse_day("2024-03-11").unwrap(),
                    weight: 71.5,
                },
                WeeklyAverage {
                    week_start: bucket::parse_day("2024-03-18").unwrap(),
                    weight: 70.0,
                },
            ]
        );
    }

    #[test]
    fn sunday_sample_stays_in_its_week_not_the_next() {
        // 2024-03-17 is a Sunday; it belongs to the week of 03-11.
        let weekly = weekly_buckets(&[sample("2024-03-17", 70.0)]);
        assert_eq!(weekly[0].week_start, bucket::parse_day("2024-03-11").unwrap());
    }

    #[tokio::test]
    async fn history_only_includes_logs_with_weight_ascending() {
        let user_id = Uuid::new_v4();
        let mut logs = LogsFixture::default();
        logs.seed(user_id, "2024-03-16", Some(70.8), Meals::empty());
        logs.seed(user_id, "2024-03-14", Some(71.2), Meals::empty());
        logs.seed(user_id, "2024-03-15", None, Meals::empty());
        let state = state_with(FactsFixture::default(), logs, UsersFixture::default());

        let points = history(&state, user_id).await.expect("history");
        assert_eq!(
            points,
            vec![
                WeightPoint {
                    date: bucket::parse_day("2024-03-14").unwrap(),
                    weight: 71.2,
                },
                WeightPoint {
                    date: bucket::parse_day("2024-03-16").unwrap(),
                    weight: 70.8,
                },
            ]
        );
    }

    #[tokio::test]
    async fn explicit_range_filters_by_local_calendar_day() {
        let user_id = Uuid::new_v4();
        let mut logs = LogsFixture::default();
        logs.seed(user_id, "2024-03-10", Some(72.0), Meals::empty());
        logs.seed(user_id, "2024-03-12", Some(71.0), Meals::empty());
        logs.seed(user_id, "2024-03-20", Some(70.0), Meals::empty());
        let state = state_with(FactsFixture::default(), logs, UsersFixture::default());

        let avg = average_in_range(&state, user_id, Some("2024-03-11"), Some("2024-03-15"))
            .await
            .expect("average");
        assert_eq!(
            avg,
            AverageResponse {
                average: Some(71.0),
                samples: 1
            }
        );
    }

    #[tokio::test]
    async fn empty_range_returns_null_average_not_an_error() {
        let state = state_with(
            FactsFixture::default(),
            LogsFixture::default(),
            UsersFixture::default(),
        );
        let avg = average_in_range(&state, Uuid::new_v4(), Some("2024-03-01"), Some("2024-03-07"))
            .await
            .expect("average");
        assert_eq!(
            avg,
            AverageResponse {
                average: None,
                samples: 0
            }
        );
    }

    #[tokio::test]
    async fn comparison_weeks_are_monday_anchored_in_reference_timezone() {
        let user_id = Uuid::new_v4();
        let today = bucket::today(test_timezone());
        let current_monday = bucket::monday_of(today);

        let mut logs = LogsFixture::default();
        logs.seed(user_id, &current_monday.to_string(), Some(70.0), Meals::empty());
        logs.seed(
            user_id,
            &(current_monday - Duration::days(3)).to_string(),
            Some(72.0),
            Meals::empty(),
        );
        let state = state_with(FactsFixture::default(), logs, UsersFixture::default());

        let cmp = week_comparison(&state, user_id).await.expect("comparison");
        assert_eq!(cmp.current_week_average, Some(70.0));
        assert_eq!(cmp.previous_week_average, Some(72.0));
        assert_eq!(cmp.sample_counts.current_week, 1);
        assert_eq!(cmp.sample_counts.previous_week, 1);
        assert_eq!(cmp.week_starts.current, current_monday);
        assert_eq!(cmp.week_starts.previous, current_monday - Duration::days(7));
        // Today may or may not coincide with the seeded Monday sample.
        if today == current_monday {
            assert_eq!(cmp.today_weight, Some(70.0));
        }
    }

    #[tokio::test]
    async fn comparison_with_no_data_is_all_null() {
        let state = state_with(
            FactsFixture::default(),
            LogsFixture::default(),
            UsersFixture::default(),
        );
        let cmp = week_comparison(&state, Uuid::new_v4()).await.expect("comparison");
        assert_eq!(cmp.current_week_average, None);
        assert_eq!(cmp.previous_week_average, None);
        assert_eq!(cmp.today_weight, None);
        assert_eq!(cmp.sample_counts.current_week, 0);
    }
}
