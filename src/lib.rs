//! # chefgen
//!
//! Generate recipes from free text, ingredient photos, and PDF documents
//! using Google Gemini.
//!
//! ## Pipeline Overview
//!
//! ```text
//! text / image / PDF
//!  │
//!  ├─ 1. Input     validate paths, decode image bytes
//!  ├─ 2. Extract   PDF text layer via lopdf (page order, per-page degrade)
//!  ├─ 3. Encode    image → canonical base64 PNG
//!  ├─ 4. Prompt    fixed chef template + dietary annotation
//!  └─ 5. Dispatch  one Gemini call, blocking or streamed
//! ```
//!
//! Every stage is stateless and synchronous from the caller's perspective;
//! the only blocking operation is the network call. Transport failures are
//! converted into displayable warning text at the dispatch boundary, so the
//! high-level functions always hand the renderer something to show.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chefgen::{generate, GeminiClient, GenerationConfig, RecipeRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GenerationConfig::default();
//!     let client = GeminiClient::from_env(&config)?; // reads GEMINI_API_KEY
//!     let request = RecipeRequest::from_text("vegan Italian with tomatoes");
//!     println!("{}", generate(&client, &request).await);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `chefgen` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! chefgen = { version = "0.2", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod pipeline;
pub mod prompts;
pub mod stream;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{DietaryTag, GenerationConfig, GenerationConfigBuilder};
pub use error::ChefgenError;
pub use generate::{generate, generate_seasonal, RecipeRequest, WARNING_MARKER};
pub use pipeline::encode::{encode_image, ImagePayload, CANONICAL_IMAGE_MIME};
pub use pipeline::extract::{extract_text, extract_text_from_path, ExtractedText};
pub use pipeline::llm::GeminiClient;
pub use stream::{collect_recipe, generate_seasonal_stream, generate_stream, RecipeStream};
