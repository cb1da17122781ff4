use std::ops::{AddAssign, Sub};

use serde::{Deserialize, Serialize};

/// Four-field nutrient value type. Used as a per-100g product fact, a
/// whole-recipe fact, a daily target and a computed consumed total. Always
/// fully populated; missing inputs default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct NutrientProfile {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
}

impl NutrientProfile {
    pub const ZERO: NutrientProfile = NutrientProfile {
        calories: 0.0,
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
    };

    pub fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
        }
    }

    /// Scale every field by `factor` (e.g. quantity / 100 for per-100g facts).
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
        }
    }

    /// Half-up rounding of each field independently. Applied once, at the end
    /// of an aggregation, never per entry.
    pub fn rounded(&self) -> Self {
        Self {
            calories: self.calories.round(),
            protein: self.protein.round(),
            carbs: self.carbs.round(),
            fat: self.fat.round(),
        }
    }
}

impl AddAssign for NutrientProfile {
    fn add_assign(&mut self, rhs: Self) {
        self.calories += rhs.calories;
        self.protein += rhs.protein;
        self.carbs += rhs.carbs;
        self.fat += rhs.fat;
    }
}

impl Sub for NutrientProfile {
    type Output = NutrientProfile;

    fn sub(self, rhs: Self) -> Self {
        Self {
            calories: self.calories - rhs.calories,
            protein: self.protein - rhs.protein,
            carbs: self.carbs - rhs.carbs,
            fat: self.fat - rhs.fat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_multiplies_every_field() {
        let p = NutrientProfile::new(200.0, 10.0, 30.0, 5.0);
        let scaled = p.scale(0.5);
        assert_eq!(scaled, NutrientProfile::new(100.0, 5.0, 15.0, 2.5));
    }

    #[test]
    fn rounding_is_half_up_per_field() {
        let p = NutrientProfile::new(2712.5, 169.5625, 339.125, 75.361);
        assert_eq!(p.rounded(), NutrientProfile::new(2713.0, 170.0, 339.0, 75.0));
    }

    #[test]
    fn difference_is_field_wise() {
        let target = NutrientProfile::new(2000.0, 150.0, 250.0, 60.0);
        let consumed = NutrientProfile::new(2100.0, 100.0, 250.0, 40.0);
        let diff = target - consumed;
        // Negative means over target, positive means under.
        assert_eq!(diff, NutrientProfile::new(-100.0, 50.0, 0.0, 20.0));
    }

    #[test]
    fn missing_fields_deserialize_as_zero() {
        let p: NutrientProfile = serde_json::from_str(r#"{"calories": 100}"#).unwrap();
        assert_eq!(p, NutrientProfile::new(100.0, 0.0, 0.0, 0.0));
    }
}
