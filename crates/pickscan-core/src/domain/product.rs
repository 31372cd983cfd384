//! Product and nutrition records returned by the product service.
//!
//! Field names mirror the PickBetter API response body, so these structs
//! deserialize straight off the wire. The service sends more fields than the
//! app renders (timestamps, data-source metadata); unknown fields are
//! ignored on deserialization.
//!
//! Amounts are per 100 g: `calories_100g` is kcal, `sodium_100g` is
//! milligrams, the rest are grams. Every amount is optional. An absent
//! value means the service does not know, which is not the same as zero, so
//! display code renders "unknown" instead of fabricating a `0.0`.

use serde::Deserialize;

/// A retail product as returned by the product service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    /// Service-side record identifier.
    pub id: i64,
    /// The barcode the service stored for this product.
    pub barcode: String,
    /// Product name.
    pub name: String,
    /// Brand, when known.
    pub brand: Option<String>,
    /// Category, when known (e.g. `"Spreads"`).
    pub category: Option<String>,
    /// Package size in grams.
    pub package_size: Option<f64>,
    /// Serving size in grams.
    pub serving_size: Option<f64>,
    /// Number of servings per package.
    pub servings_per_package: Option<f64>,
    /// URL of a product photo, when the service has one.
    pub image_url: Option<String>,
    /// Free-text ingredient list.
    pub ingredients_text: Option<String>,
    /// Dietary flag; `None` when the service could not determine it.
    pub is_vegan: Option<bool>,
    pub is_vegetarian: Option<bool>,
    pub is_gluten_free: Option<bool>,
    /// Per-100 g nutrition, when the service has normalized data.
    pub normalized_nutrition: Option<NutritionFacts>,
}

impl Product {
    /// One-line title: the name, plus the brand when known.
    pub fn display_title(&self) -> String {
        match &self.brand {
            Some(brand) => format!("{} ({brand})", self.name),
            None => self.name.clone(),
        }
    }
}

/// Normalized per-100 g nutrition amounts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NutritionFacts {
    /// Kilocalories per 100 g.
    pub calories_100g: Option<f64>,
    pub carbs_100g: Option<f64>,
    pub sugar_100g: Option<f64>,
    pub fiber_100g: Option<f64>,
    pub protein_100g: Option<f64>,
    pub fat_100g: Option<f64>,
    pub saturated_fat_100g: Option<f64>,
    pub trans_fat_100g: Option<f64>,
    /// Milligrams per 100 g.
    pub sodium_100g: Option<f64>,
    pub salt_100g: Option<f64>,
    /// Composite 0-100 score computed by the service.
    pub general_health_score: Option<f64>,
    /// Nutri-Score grade letter, `"a"`-`"e"`.
    pub nutri_grade: Option<String>,
}

/// Formats an optional amount with its unit for display.
///
/// Missing data renders as the literal `"unknown"`, never as a fabricated
/// zero, since `0.0` is real information (e.g. zero sugar).
pub fn format_amount(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.1} {unit}"),
        None => "unknown".to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
