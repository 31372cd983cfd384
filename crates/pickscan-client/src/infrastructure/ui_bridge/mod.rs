//! Terminal rendering of the controller's view decisions.
//!
//! The view controller decides *which* view and *what message*; a
//! `ViewSurface` implementation draws them. This build keeps the surface to
//! plain stdout lines so the whole scan flow can be exercised end to end
//! without a GUI toolkit.

use pickscan_core::{format_amount, Product};

use crate::application::view_controller::ViewSurface;

/// Stdout implementation of [`ViewSurface`].
#[derive(Default)]
pub struct TerminalSurface;

impl TerminalSurface {
    pub fn new() -> Self {
        Self
    }
}

impl ViewSurface for TerminalSurface {
    fn show_scanner(&self) {
        println!();
        println!("── Scanner ─────────────────────────────────────");
        println!("Point the camera at a barcode, or type its digits and press Enter.");
    }

    fn show_loading(&self, candidate: &str) {
        println!("Looking up {candidate}…");
    }

    fn show_product(&self, product: &Product) {
        println!();
        println!("── Product ─────────────────────────────────────");
        println!("{}", product.display_title());
        if let Some(category) = &product.category {
            println!("Category: {category}");
        }
        match &product.normalized_nutrition {
            Some(nutrition) => {
                println!("Per 100 g:");
                println!("  calories   {}", format_amount(nutrition.calories_100g, "kcal"));
                println!("  carbs      {}", format_amount(nutrition.carbs_100g, "g"));
                println!("  sugar      {}", format_amount(nutrition.sugar_100g, "g"));
                println!("  fiber      {}", format_amount(nutrition.fiber_100g, "g"));
                println!("  protein    {}", format_amount(nutrition.protein_100g, "g"));
                println!("  fat        {}", format_amount(nutrition.fat_100g, "g"));
                println!("  saturated  {}", format_amount(nutrition.saturated_fat_100g, "g"));
                println!("  sodium     {}", format_amount(nutrition.sodium_100g, "mg"));
                if let Some(grade) = &nutrition.nutri_grade {
                    println!("Nutri-Score: {}", grade.to_uppercase());
                }
            }
            None => println!("No nutrition data for this product yet."),
        }
        if let Some(url) = &product.image_url {
            println!("Photo: {url}");
        }
        println!("Type `retry` to scan another product.");
    }

    fn show_error(&self, message: &str) {
        println!();
        println!("── Problem ─────────────────────────────────────");
        println!("{message}");
        println!("Type `retry` to go back to the scanner.");
    }

    fn set_entry_hint(&self, hint: Option<&str>) {
        if let Some(hint) = hint {
            println!("(hint: {hint})");
        }
    }

    fn clear_entry(&self) {
        // Terminal input is line-based; there is no persistent field to clear.
    }
}
