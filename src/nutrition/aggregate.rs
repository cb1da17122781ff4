use std::collections::HashMap;

use tracing::warn;
use uuid::Uuid;

use crate::catalog::{Product, Recipe};
use crate::daily_log::model::{LogEntry, Meals};
use crate::nutrition::profile::NutrientProfile;

/// Distinct product and recipe ids referenced by a day's meals, for one
/// batched fetch per kind.
pub fn referenced_ids(meals: &Meals) -> (Vec<Uuid>, Vec<Uuid>) {
    let mut product_ids = Vec::new();
    let mut recipe_ids = Vec::new();
    for entry in meals.entries() {
        match entry {
            LogEntry::Product { product_id, .. } => {
                if !product_ids.contains(product_id) {
                    product_ids.push(*product_id);
                }
            }
            LogEntry::Recipe { recipe_id, .. } => {
                if !recipe_ids.contains(recipe_id) {
                    recipe_ids.push(*recipe_id);
                }
            }
        }
    }
    (product_ids, recipe_ids)
}

/// Sums the nutrient contribution of every entry across all six slots.
///
/// Products contribute per-100g facts scaled by quantity; recipes contribute
/// whole-recipe facts scaled by the consumed fraction of the final weight.
/// Entries referencing deleted catalog items, and recipes with a non-positive
/// final weight, are skipped with a warning; they never fail the aggregation.
/// Rounding happens once, on the final totals.
pub fn compute_consumed(
    meals: &Meals,
    products: &HashMap<Uuid, Product>,
    recipes: &HashMap<Uuid, Recipe>,
) -> NutrientProfile {
    let mut total = NutrientProfile::ZERO;
    for entry in meals.entries() {
        match entry {
            LogEntry::Product {
                product_id,
                quantity_grams,
            } => match products.get(product_id) {
                Some(product) => total += product.nutrients.scale(quantity_grams / 100.0),
                None => warn!(product_id = %product_id, "skipping entry referencing missing product"),
            },
            LogEntry::Recipe {
                recipe_id,
                quantity_grams,
            } => match recipes.get(recipe_id) {
                Some(recipe) if recipe.final_weight_grams > 0.0 => {
                    total += recipe
                        .nutrients
                        .scale(quantity_grams / recipe.final_weight_grams);
                }
                Some(_) => {
                    warn!(recipe_id = %recipe_id, "skipping recipe with non-positive final weight")
                }
                None => warn!(recipe_id = %recipe_id, "skipping entry referencing missing recipe"),
            },
        }
    }
    total.rounded()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Owner;

    fn product(nutrients: NutrientProfile) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "test product".into(),
            brand: None,
            barcode: None,
            nutrients,
            serving_size_grams: None,
            owner: Owner::Global,
        }
    }

    fn recipe(nutrients: NutrientProfile, final_weight_grams: f64) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            name: "test recipe".into(),
            ingredients: Vec::new(),
            final_weight_grams,
            nutrients,
            owner: Owner::Global,
        }
    }

    fn meals_with(breakfast: Vec<LogEntry>) -> Meals {
        Meals {
            breakfast,
            ..Meals::empty()
        }
    }

    #[test]
    fn product_contribution_scales_per_100g() {
        let p = product(NutrientProfile::new(250.0, 10.0, 30.0, 8.0));
        let meals = meals_with(vec![LogEntry::Product {
            product_id: p.id,
            quantity_grams: 150.0,
        }]);
        let products = HashMap::from([(p.id, p)]);
        let consumed = compute_consumed(&meals, &products, &HashMap::new());
        assert_eq!(consumed, NutrientProfile::new(375.0, 15.0, 45.0, 12.0));
    }

    #[test]
    fn recipe_contribution_scales_by_fraction_of_final_weight() {
        let r = recipe(NutrientProfile::new(800.0, 40.0, 100.0, 20.0), 400.0);
        let meals = meals_with(vec![LogEntry::Recipe {
            recipe_id: r.id,
            quantity_grams: 100.0,
        }]);
        let recipes = HashMap::from([(r.id, r)]);
        let consumed = compute_consumed(&meals, &HashMap::new(), &recipes);
        assert_eq!(consumed, NutrientProfile::new(200.0, 10.0, 25.0, 5.0));
    }

    #[test]
    fn zero_weight_recipe_contributes_nothing_without_failing() {
        let r = recipe(NutrientProfile::new(800.0, 40.0, 100.0, 20.0), 0.0);
        let meals = meals_with(vec![LogEntry::Recipe {
            recipe_id: r.id,
            quantity_grams: 100.0,
        }]);
        let recipes = HashMap::from([(r.id, r)]);
        let consumed = compute_consumed(&meals, &HashMap::new(), &recipes);
        assert_eq!(consumed, NutrientProfile::ZERO);
    }

    #[test]
    fn dangling_references_are_skipped_silently() {
        let p = product(NutrientProfile::new(100.0, 5.0, 10.0, 2.0));
        let meals = meals_with(vec![
            LogEntry::Product {
                product_id: p.id,
                quantity_grams: 100.0,
            },
            LogEntry::Product {
                product_id: Uuid::new_v4(), // deleted after being logged
                quantity_grams: 500.0,
            },
            LogEntry::Recipe {
                recipe_id: Uuid::new_v4(),
                quantity_grams: 200.0,
            },
        ]);
        let products = HashMap::from([(p.id, p)]);
        let consumed = compute_consumed(&meals, &products, &HashMap::new());
        assert_eq!(consumed, NutrientProfile::new(100.0, 5.0, 10.0, 2.0));
    }

    #[test]
    fn rounding_happens_once_at_the_end() {
        // Each entry contributes 0.3 kcal; per-entry rounding would give 0,
        // final rounding of the 0.6 sum gives 1.
        let p = product(NutrientProfile::new(1.0, 0.0, 0.0, 0.0));
        let entry = LogEntry::Product {
            product_id: p.id,
            quantity_grams: 30.0,
        };
        let meals = meals_with(vec![entry, entry]);
        let products = HashMap::from([(p.id, p)]);
        let consumed = compute_consumed(&meals, &products, &HashMap::new());
        assert_eq!(consumed.calories, 1.0);
    }

    #[test]
    fn empty_meals_sum_to_zero() {
        let consumed = compute_consumed(&Meals::empty(), &HashMap::new(), &HashMap::new());
        assert_eq!(consumed, NutrientProfile::ZERO);
    }

    #[test]
    fn referenced_ids_are_distinct_and_partitioned() {
        let pid = Uuid::new_v4();
        let rid = Uuid::new_v4();
        let meals = Meals {
            breakfast: vec![
                LogEntry::Product {
                    product_id: pid,
                    quantity_grams: 50.0,
                },
                LogEntry::Product {
                    product_id: pid,
                    quantity_grams: 80.0,
                },
            ],
            dinner: vec![LogEntry::Recipe {
                recipe_id: rid,
                quantity_grams: 120.0,
            }],
            ..Meals::empty()
        };
        let (product_ids, recipe_ids) = referenced_ids(&meals);
        assert_eq!(product_ids, vec![pid]);
        assert_eq!(recipe_ids, vec![rid]);
    }
}
