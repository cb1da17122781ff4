use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::nutrition::profile::NutrientProfile;

/// Catalog entries are either shared globally or private to one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "userId")]
pub enum Owner {
    Global,
    OwnedBy(Uuid),
}

impl Owner {
    fn from_column(owner_id: Option<Uuid>) -> Self {
        match owner_id {
            Some(id) => Owner::OwnedBy(id),
            None => Owner::Global,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub brand: Option<String>,
    pub barcode: Option<String>,
    /// Facts are per 100 g of product.
    pub nutrients: NutrientProfile,
    pub serving_size_grams: Option<f64>,
    pub owner: Owner,
}

/// Editable provenance only; recipe nutrient math always uses the stored
/// whole-recipe profile, never a live sum over ingredients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub product_id: Uuid,
    pub quantity_grams: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    /// Total yield of the finished recipe; must be > 0 for consumption math
    /// to be defined.
    pub final_weight_grams: f64,
    /// Facts for the whole finished recipe.
    pub nutrients: NutrientProfile,
    pub owner: Owner,
}

/// Batch lookup of nutrient facts by id set. One fetch per kind per
/// aggregation, never one per entry.
#[async_trait]
pub trait NutrientFactsStore: Send + Sync {
    async fn get_products(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Product>>;
    async fn get_recipes(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Recipe>>;
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    brand: Option<String>,
    barcode: Option<String>,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    serving_size_grams: Option<f64>,
    owner_id: Option<Uuid>,
}

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            brand: r.brand,
            barcode: r.barcode,
            nutrients: NutrientProfile::new(r.calories, r.protein, r.carbs, r.fat),
            serving_size_grams: r.serving_size_grams,
            owner: Owner::from_column(r.owner_id),
        }
    }
}

#[derive(Debug, FromRow)]
struct RecipeRow {
    id: Uuid,
    name: String,
    ingredients: sqlx::types::Json<Vec<Ingredient>>,
    final_weight_grams: f64,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    owner_id: Option<Uuid>,
}

impl From<RecipeRow> for Recipe {
    fn from(r: RecipeRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            ingredients: r.ingredients.0,
            final_weight_grams: r.final_weight_grams,
            nutrients: NutrientProfile::new(r.calories, r.protein, r.carbs, r.fat),
            owner: Owner::from_column(r.owner_id),
        }
    }
}

#[derive(Clone)]
pub struct PgNutrientFactsStore {
    db: PgPool,
}

impl PgNutrientFactsStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NutrientFactsStore for PgNutrientFactsStore {
    async fn get_products(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, brand, barcode, calories, protein, carbs, fat,
                   serving_size_grams, owner_id
            FROM products
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn get_recipes(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Recipe>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, RecipeRow>(
            r#"
            SELECT id, name, ingredients, final_weight_grams,
                   calories, protein, carbs, fat, owner_id
            FROM recipes
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }
}
