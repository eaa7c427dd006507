//! Blocking (full-response) generation entry points.
//!
//! This is the dispatch boundary of the pipeline: prompt assembly, the
//! single API call, and the conversion of any transport failure into a
//! displayable warning string all happen here. The high-level functions
//! never return `Err` for a network problem — the system favours "always
//! return displayable text" over strict error propagation.
//!
//! Use [`crate::stream::generate_stream`] instead when you want the
//! response incrementally.

use crate::config::DietaryTag;
use crate::error::ChefgenError;
use crate::pipeline::encode::ImagePayload;
use crate::pipeline::extract::ExtractedText;
use crate::pipeline::llm::{GeminiClient, Part};
use crate::prompts;
use tracing::{info, warn};

/// Marker prefixed to every failure message handed back to the renderer.
pub const WARNING_MARKER: &str = "⚠️ ";

/// Inputs for one recipe-generation call.
///
/// Transient by design: constructed by the caller, consumed by one dispatch,
/// discarded. At least one of the three content fields should be non-empty;
/// that precondition is the front end's to enforce, not this type's.
#[derive(Debug, Clone, Default)]
pub struct RecipeRequest {
    /// Free-form user text (preferences, cuisine, ingredients on hand).
    pub user_text: String,
    /// Optional dietary preference, folded into the user text as a
    /// parenthetical annotation before templating.
    pub dietary: Option<DietaryTag>,
    /// Optional image, already re-encoded to the canonical format.
    pub image: Option<ImagePayload>,
    /// Optional extracted document text (or the no-text-layer sentinel).
    pub document_text: Option<ExtractedText>,
}

impl RecipeRequest {
    /// A request carrying only free text.
    pub fn from_text(user_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            ..Self::default()
        }
    }

    pub fn with_dietary(mut self, tag: DietaryTag) -> Self {
        self.dietary = Some(tag);
        self
    }

    pub fn with_image(mut self, image: ImagePayload) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_document_text(mut self, text: ExtractedText) -> Self {
        self.document_text = Some(text);
        self
    }

    /// User text with the dietary annotation applied.
    pub fn effective_user_text(&self) -> String {
        match self.dietary {
            Some(tag) => prompts::annotate_dietary(&self.user_text, tag),
            None => self.user_text.clone(),
        }
    }

    /// Document text to substitute into the template.
    ///
    /// The no-text-layer sentinel substitutes the same literal as "no
    /// document": either way there is nothing for the model to read.
    fn document_for_prompt(&self) -> Option<&str> {
        self.document_text.as_ref().and_then(|d| d.as_text())
    }

    /// Assemble the request parts: exactly one text part, plus the image
    /// part when an image is present.
    pub fn build_parts(&self) -> Vec<Part> {
        let prompt =
            prompts::build_recipe_prompt(&self.effective_user_text(), self.document_for_prompt());
        let mut parts = vec![Part::text(prompt)];
        if let Some(ref image) = self.image {
            parts.push(Part::image(image.clone()));
        }
        parts
    }
}

/// Render a dispatch failure as user-facing text.
pub fn failure_text(err: &ChefgenError) -> String {
    format!("{WARNING_MARKER}Recipe generation failed: {err}")
}

/// Generate a recipe from the assembled request.
///
/// Always returns displayable text: the model's response on success, or a
/// warning-marker message describing the failure.
pub async fn generate(client: &GeminiClient, request: &RecipeRequest) -> String {
    let parts = request.build_parts();
    info!(
        model = client.model(),
        has_image = request.image.is_some(),
        has_document = request.document_text.is_some(),
        "Generating recipe"
    );

    match client.generate_content(&parts).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Dispatch failed: {e}");
            failure_text(&e)
        }
    }
}

/// Generate a seasonal recipe from a season name and ingredient list.
///
/// A distinct operation from [`generate`]: text-only, with its own template.
pub async fn generate_seasonal(
    client: &GeminiClient,
    season: &str,
    ingredients: &[String],
) -> String {
    let prompt = prompts::build_seasonal_prompt(season, ingredients);
    info!(model = client.model(), season, "Generating seasonal recipe");

    match client.generate_content(&[Part::text(prompt)]).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Dispatch failed: {e}");
            failure_text(&e)
        }
    }
}
