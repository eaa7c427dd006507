//! Pipeline stages for recipe generation.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. a different PDF backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract          encode
//! (path)    (lopdf text)     (PNG + base64)
//!              │                 │
//!              └────▶ llm ◀──────┘
//!                   (Gemini)
//! ```
//!
//! 1. [`input`]   — validate the user-supplied document path and load images
//! 2. [`extract`] — pull the PDF text layer, page by page, degrading
//!    per-page failures to empty fragments
//! 3. [`encode`]  — re-encode any raster input to the one canonical format
//!    (base64 PNG) the API request carries
//! 4. [`llm`]     — build the multimodal request and drive the Gemini call;
//!    the only stage with network I/O

pub mod encode;
pub mod extract;
pub mod input;
pub mod llm;
