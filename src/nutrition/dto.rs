use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::nutrition::profile::NutrientProfile;
use crate::nutrition::targets::BodyProfile;

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    /// `YYYY-MM-DD` in the reference timezone; defaults to today.
    pub date: Option<String>,
}

/// Body profile plus an optional manual override. With an override the
/// response is the override verbatim; without one the targets are recomputed
/// from the profile inputs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveTargetsRequest {
    #[serde(flatten)]
    pub profile: BodyProfile,
    pub override_target: Option<NutrientProfile>,
}

/// Daily consumption compared against the stored target. `difference` is
/// target minus consumed: positive means under target, negative means over.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub date: NaiveDate,
    pub consumed: NutrientProfile,
    pub target: NutrientProfile,
    pub difference: NutrientProfile,
}
