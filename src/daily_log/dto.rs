use serde::{Deserialize, Deserializer};

use crate::daily_log::model::Meals;

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    /// `YYYY-MM-DD` in the reference timezone; defaults to today.
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLogRequest {
    pub date: Option<String>,
    pub body_weight_of_day: Option<f64>,
    #[serde(default)]
    pub meals: Meals,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLogRequest {
    /// Absent leaves the stored weight unchanged; an explicit `null` clears
    /// it.
    #[serde(default, deserialize_with = "some_or_null")]
    pub body_weight_of_day: Option<Option<f64>>,
    /// When present, replaces the meal slots wholesale.
    pub meals: Option<Meals>,
}

/// Wraps a present field in `Some` so that `Some(None)` records an explicit
/// JSON `null`, while `serde(default)` keeps an absent field as `None`.
fn some_or_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
