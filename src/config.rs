//! Configuration types for recipe generation.
//!
//! All generation behaviour is controlled through [`GenerationConfig`], built
//! via its [`GenerationConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across calls, serialise them for logging, and
//! diff two runs to understand why their outputs differ.
//!
//! The config deliberately carries no credential: the API key lives on the
//! explicitly constructed [`crate::pipeline::llm::GeminiClient`], so there is
//! no process-wide model singleton to configure.

use crate::error::ChefgenError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for a recipe-generation call.
///
/// Built via [`GenerationConfig::builder()`] or using
/// [`GenerationConfig::default()`].
///
/// # Example
/// ```rust
/// use chefgen::GenerationConfig;
///
/// let config = GenerationConfig::builder()
///     .model("gemini-2.0-flash")
///     .temperature(0.9)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Gemini model identifier. Default: "gemini-2.0-flash".
    ///
    /// Any multimodal Gemini model works; flash is the cheap default and is
    /// more than capable of writing a recipe from a photo of ingredients.
    pub model: String,

    /// Sampling temperature for the completion. Default: 0.7.
    ///
    /// Recipes benefit from some creativity — 0.7 gives varied but coherent
    /// suggestions. Lower it towards 0 if you want the model to stick
    /// rigidly to the listed ingredients.
    pub temperature: f32,

    /// Maximum tokens the model may generate. Default: 2048.
    ///
    /// A full recipe (ingredients, steps, timings, dietary notes) fits
    /// comfortably in 1 000–1 500 tokens; 2 048 leaves headroom for long
    /// ingredient lists without letting cost run away.
    pub max_output_tokens: u32,

    /// Nucleus sampling cutoff. Default: 0.95.
    pub top_p: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            temperature: 0.7,
            max_output_tokens: 2048,
            top_p: 0.95,
        }
    }
}

impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("top_p", &self.top_p)
            .finish()
    }
}

impl GenerationConfig {
    /// Create a new builder for `GenerationConfig`.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`GenerationConfig`].
#[derive(Debug)]
pub struct GenerationConfigBuilder {
    config: GenerationConfig,
}

impl GenerationConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_output_tokens(mut self, n: u32) -> Self {
        self.config.max_output_tokens = n.max(1);
        self
    }

    pub fn top_p(mut self, p: f32) -> Self {
        self.config.top_p = p.clamp(0.0, 1.0);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<GenerationConfig, ChefgenError> {
        let c = &self.config;
        if c.model.trim().is_empty() {
            return Err(ChefgenError::InvalidConfig(
                "Model name must not be empty".into(),
            ));
        }
        if !(0.0..=2.0).contains(&c.temperature) {
            return Err(ChefgenError::InvalidConfig(format!(
                "Temperature must be 0.0–2.0, got {}",
                c.temperature
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Dietary preference appended to the user text before templating.
///
/// This is deliberately string concatenation, not a separate request
/// channel: the model reads `"pasta (Dietary preference: Keto)"` the same
/// way a chef reads a ticket annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DietaryTag {
    Vegan,
    Vegetarian,
    Keto,
    Paleo,
    GlutenFree,
    DairyFree,
}

impl fmt::Display for DietaryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DietaryTag::Vegan => "Vegan",
            DietaryTag::Vegetarian => "Vegetarian",
            DietaryTag::Keto => "Keto",
            DietaryTag::Paleo => "Paleo",
            DietaryTag::GlutenFree => "Gluten-Free",
            DietaryTag::DairyFree => "Dairy-Free",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GenerationConfig::builder().build().unwrap();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.max_output_tokens, 2048);
    }

    #[test]
    fn temperature_is_clamped() {
        let config = GenerationConfig::builder().temperature(5.0).build().unwrap();
        assert_eq!(config.temperature, 2.0);
    }

    #[test]
    fn empty_model_rejected() {
        let err = GenerationConfig::builder().model("  ").build().unwrap_err();
        assert!(err.to_string().contains("Model name"));
    }

    #[test]
    fn dietary_tag_labels() {
        assert_eq!(DietaryTag::Keto.to_string(), "Keto");
        assert_eq!(DietaryTag::GlutenFree.to_string(), "Gluten-Free");
    }
}
