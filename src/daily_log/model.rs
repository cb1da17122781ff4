use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A logged consumption: exactly one catalog reference plus a positive
/// quantity in grams. The tagged variant makes "both ids set" and "neither
/// id set" unrepresentable past the deserialization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLogEntry", into = "RawLogEntry")]
pub enum LogEntry {
    Product { product_id: Uuid, quantity_grams: f64 },
    Recipe { recipe_id: Uuid, quantity_grams: f64 },
}

/// Wire shape: `productId` XOR `recipeId` alongside `quantityGrams`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLogEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    product_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recipe_id: Option<Uuid>,
    quantity_grams: f64,
}

impl TryFrom<RawLogEntry> for LogEntry {
    type Error = String;

    fn try_from(raw: RawLogEntry) -> Result<Self, Self::Error> {
        if raw.quantity_grams <= 0.0 {
            return Err("quantityGrams must be greater than 0".into());
        }
        match (raw.product_id, raw.recipe_id) {
            (Some(product_id), None) => Ok(LogEntry::Product {
                product_id,
                quantity_grams: raw.quantity_grams,
            }),
            (None, Some(recipe_id)) => Ok(LogEntry::Recipe {
                recipe_id,
                quantity_grams: raw.quantity_grams,
            }),
            (Some(_), Some(_)) => Err("entry must reference a product or a recipe, not both".into()),
            (None, None) => Err("entry must reference a product or a recipe".into()),
        }
    }
}

impl From<LogEntry> for RawLogEntry {
    fn from(entry: LogEntry) -> Self {
        match entry {
            LogEntry::Product {
                product_id,
                quantity_grams,
            } => RawLogEntry {
                product_id: Some(product_id),
                recipe_id: None,
                quantity_grams,
            },
            LogEntry::Recipe {
                recipe_id,
                quantity_grams,
            } => RawLogEntry {
                product_id: None,
                recipe_id: Some(recipe_id),
                quantity_grams,
            },
        }
    }
}

/// The six fixed meal slots of a day. Slot identity never affects totals;
/// it only buckets entries for presentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meals {
    #[serde(default)]
    pub breakfast: Vec<LogEntry>,
    #[serde(default)]
    pub lunch: Vec<LogEntry>,
    #[serde(default)]
    pub main_meal: Vec<LogEntry>,
    #[serde(default)]
    pub snack: Vec<LogEntry>,
    #[serde(default)]
    pub dinner: Vec<LogEntry>,
    #[serde(default)]
    pub late_snack: Vec<LogEntry>,
}

impl Meals {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Flatten all slots into one sequence; order is irrelevant for totals.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.breakfast
            .iter()
            .chain(&self.lunch)
            .chain(&self.main_meal)
            .chain(&self.snack)
            .chain(&self.dinner)
            .chain(&self.late_snack)
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

/// One record per user per calendar day in the reference timezone.
/// `logged_at` is the absolute instant anchoring the record inside its day.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub logged_at: DateTime<Utc>,
    pub body_weight_of_day: Option<f64>,
    pub meals: Meals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_entry_round_trips() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"productId":"{id}","quantityGrams":150}}"#);
        let entry: LogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(
            entry,
            LogEntry::Product {
                product_id: id,
                quantity_grams: 150.0
            }
        );
        let back = serde_json::to_value(entry).unwrap();
        assert_eq!(back["productId"], id.to_string());
        assert!(back.get("recipeId").is_none());
    }

    #[test]
    fn entry_with_both_ids_is_rejected() {
        let json = format!(
            r#"{{"productId":"{}","recipeId":"{}","quantityGrams":100}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let err = serde_json::from_str::<LogEntry>(&json).unwrap_err();
        assert!(err.to_string().contains("not both"));
    }

    #[test]
    fn entry_with_neither_id_is_rejected() {
        let err = serde_json::from_str::<LogEntry>(r#"{"quantityGrams":100}"#).unwrap_err();
        assert!(err.to_string().contains("product or a recipe"));
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        let json = format!(r#"{{"productId":"{}","quantityGrams":0}}"#, Uuid::new_v4());
        let err = serde_json::from_str::<LogEntry>(&json).unwrap_err();
        assert!(err.to_string().contains("greater than 0"));
    }

    #[test]
    fn meals_deserialize_with_missing_slots_empty() {
        let meals: Meals = serde_json::from_str(r#"{"breakfast":[]}"#).unwrap();
        assert!(meals.is_empty());
    }

    #[test]
    fn entries_flattens_all_six_slots() {
        let entry = |q: f64| LogEntry::Product {
            product_id: Uuid::new_v4(),
            quantity_grams: q,
        };
        let meals = Meals {
            breakfast: vec![entry(1.0)],
            lunch: vec![entry(2.0)],
            main_meal: vec![entry(3.0)],
            snack: vec![entry(4.0)],
            dinner: vec![entry(5.0)],
            late_snack: vec![entry(6.0)],
        };
        let quantities: Vec<f64> = meals
            .entries()
            .map(|e| match *e {
                LogEntry::Product { quantity_grams, .. }
                | LogEntry::Recipe { quantity_grams, .. } => quantity_grams,
            })
            .collect();
        assert_eq!(quantities, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }
}
