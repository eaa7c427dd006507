//! Prompt templates for recipe generation.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — the template wording is a design
//!    constant; changing it requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can assemble and inspect prompts without
//!    a live API call, so template regressions are caught immediately.
//!
//! Assembly is deterministic: identical inputs produce byte-identical
//! prompt strings across calls.

use crate::config::DietaryTag;

/// Substituted for the document section when no PDF text was supplied.
pub const NO_DOCUMENT_TEXT: &str = "None";

/// Build the recipe prompt from user text and optional extracted PDF text.
///
/// Both values are embedded verbatim; the surrounding instruction is fixed.
pub fn build_recipe_prompt(user_text: &str, document_text: Option<&str>) -> String {
    format!(
        "You are an expert chef. Based on the following inputs, generate a detailed recipe:\n\
         - User Input: {user_text}\n\
         - PDF Content (if provided): {document}\n\
         Provide a recipe that includes:\n\
         - Ingredients list\n\
         - Step-by-step instructions\n\
         - Cooking time and serving size\n\
         - Any dietary considerations mentioned in the input\n",
        document = document_text.unwrap_or(NO_DOCUMENT_TEXT),
    )
}

/// Build the seasonal prompt: a distinct operation from [`build_recipe_prompt`].
///
/// Takes a season and an ingredient list rather than free text, and asks for
/// a dish that showcases what is in season.
pub fn build_seasonal_prompt(season: &str, ingredients: &[String]) -> String {
    format!(
        "You are an expert chef. Create a recipe that celebrates {season} produce, \
         using these seasonal ingredients: {list}.\n\
         Provide a recipe that includes:\n\
         - Ingredients list\n\
         - Step-by-step instructions\n\
         - Cooking time and serving size\n\
         - A note on why these ingredients shine in {season}\n",
        list = ingredients.join(", "),
    )
}

/// Append the dietary annotation to the user text before templating.
///
/// `"pasta"` + Keto becomes `"pasta (Dietary preference: Keto)"`.
pub fn annotate_dietary(user_text: &str, tag: DietaryTag) -> String {
    format!("{user_text} (Dietary preference: {tag})")
}

// ── Per-mode user-text prefills ──────────────────────────────────────────
//
// The five intake modes all funnel into the same dispatch contract; these
// helpers supply the canned user text for the modes where the user typed
// nothing themselves.

/// Prefill for image-only mode.
pub fn image_only_user_text() -> String {
    "Suggest a recipe based on the ingredients or dish shown in the attached image.".to_string()
}

/// Prefill for PDF-only mode.
pub fn pdf_only_user_text() -> String {
    "Suggest a recipe based on the attached document content.".to_string()
}

/// Prefill for leftover-ingredients mode.
pub fn leftover_user_text(ingredients: &[String]) -> String {
    format!(
        "Suggest a recipe that uses up these leftover ingredients: {}. \
         Prefer using everything listed rather than adding many new ingredients.",
        ingredients.join(", ")
    )
}
