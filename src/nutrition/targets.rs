use serde::{Deserialize, Serialize};

use crate::nutrition::profile::NutrientProfile;

/// Closed list; unrecognized values fail request deserialization before any
/// store access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    fn factor(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Goal {
    LoseWeight,
    Maintain,
    GainMuscle,
}

/// Body and activity inputs the daily target is derived from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyProfile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

/// Daily nutrient targets from body metrics: Mifflin-St Jeor BMR, activity
/// factor, goal adjustment, then a fixed 25/50/25 macro split. Each macro is
/// rounded independently; the split is not reconciled back to total calories.
pub fn resolve_targets(profile: &BodyProfile) -> NutrientProfile {
    let sex_term = match profile.sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    let bmr =
        10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * f64::from(profile.age) + sex_term;
    let tee = bmr * profile.activity_level.factor();

    let adjusted = match profile.goal {
        Goal::LoseWeight => tee - 500.0,
        Goal::GainMuscle => tee + 300.0,
        Goal::Maintain => tee,
    };

    let calories = adjusted.round();
    NutrientProfile {
        calories,
        protein: (0.25 * calories / 4.0).round(),
        carbs: (0.50 * calories / 4.0).round(),
        fat: (0.25 * calories / 9.0).round(),
    }
}

/// An explicit override is stored verbatim; without one, any profile edit
/// recomputes the target from the new inputs.
pub fn apply_target_update(
    profile: &BodyProfile,
    override_target: Option<NutrientProfile>,
) -> NutrientProfile {
    override_target.unwrap_or_else(|| resolve_targets(profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_profile() -> BodyProfile {
        BodyProfile {
            weight_kg: 70.0,
            height_cm: 175.0,
            age: 30,
            sex: Sex::Male,
            activity_level: ActivityLevel::Moderate,
            goal: Goal::Maintain,
        }
    }

    #[test]
    fn maintain_goal_reference_values() {
        // bmr = 700 + 1093.75 - 150 + 5 = 1750, tee = 1750 * 1.55 = 2712.5
        let t = resolve_targets(&reference_profile());
        assert_eq!(t.calories, 2713.0);
        assert_eq!(t.protein, 170.0);
        assert_eq!(t.carbs, 339.0);
        assert_eq!(t.fat, 75.0);
    }

    #[test]
    fn lose_weight_subtracts_500_kcal() {
        let profile = BodyProfile {
            goal: Goal::LoseWeight,
            ..reference_profile()
        };
        assert_eq!(resolve_targets(&profile).calories, 2213.0);
    }

    #[test]
    fn gain_muscle_adds_300_kcal() {
        let profile = BodyProfile {
            goal: Goal::GainMuscle,
            ..reference_profile()
        };
        assert_eq!(resolve_targets(&profile).calories, 3013.0);
    }

    #[test]
    fn female_sex_term_is_minus_161() {
        let profile = BodyProfile {
            sex: Sex::Female,
            ..reference_profile()
        };
        // bmr = 1750 - 166 = 1584, tee = 1584 * 1.55 = 2455.2
        assert_eq!(resolve_targets(&profile).calories, 2455.0);
    }

    #[test]
    fn unrecognized_activity_level_fails_deserialization() {
        let err = serde_json::from_str::<BodyProfile>(
            r#"{"weightKg":70,"heightCm":175,"age":30,"sex":"male",
                "activityLevel":"couchPotato","goal":"maintain"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("couchPotato"));
    }

    #[test]
    fn override_is_stored_verbatim() {
        let manual = NutrientProfile::new(1800.0, 140.0, 180.0, 60.0);
        assert_eq!(apply_target_update(&reference_profile(), Some(manual)), manual);
    }

    #[test]
    fn profile_edit_without_override_recomputes() {
        let t = apply_target_update(&reference_profile(), None);
        assert_eq!(t, resolve_targets(&reference_profile()));
    }
}
