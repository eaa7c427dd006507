//! CLI binary for chefgen.
//!
//! A thin shim over the library crate: maps subcommands and flags to a
//! `RecipeRequest`, validates inputs before the pipeline runs, and prints
//! the recipe text (streamed or blocking).

use anyhow::{bail, Context, Result};
use chefgen::{
    collect_recipe, encode_image, extract_text_from_path, generate, generate_seasonal,
    generate_seasonal_stream, generate_stream, pipeline::input, prompts, ChefgenError,
    DietaryTag, ExtractedText, GeminiClient, GenerationConfig, RecipeRequest,
};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_stream::StreamExt;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Free-text search
  chefgen search "vegan Italian with tomatoes"

  # Free text + dietary preference, streamed as it generates
  chefgen search "pasta" --diet keto --stream

  # Recipe from a photo of your fridge
  chefgen image fridge.jpg

  # Recipe from a PDF (menu, handwritten-notes scan, cookbook page)
  chefgen pdf grandmas-notes.pdf

  # Combine inputs
  chefgen search "something quick" --image pantry.png --pdf notes.pdf

  # Seasonal cooking
  chefgen seasonal --season autumn --ingredients pumpkin,sage,walnuts

  # Use up leftovers
  chefgen leftovers --ingredients rice,"half an onion",feta

ENVIRONMENT VARIABLES:
  GEMINI_API_KEY   API key (required) — https://aistudio.google.com/apikey
  CHEFGEN_MODEL    Override model ID (default: gemini-2.0-flash)

NOTES:
  Scanned or image-only PDFs have no text layer; chefgen tells you so and
  continues with whatever other inputs you provided.
"#;

/// Generate recipes from text, images, and PDFs using Google Gemini.
#[derive(Parser, Debug)]
#[command(
    name = "chefgen",
    version,
    about = "Generate recipes from text, images, and PDFs using Google Gemini",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Gemini model ID.
    #[arg(long, global = true, env = "CHEFGEN_MODEL")]
    model: Option<String>,

    /// Sampling temperature (0.0–2.0).
    #[arg(long, global = true, env = "CHEFGEN_TEMPERATURE")]
    temperature: Option<f32>,

    /// Max tokens the model may generate.
    #[arg(long, global = true, env = "CHEFGEN_MAX_TOKENS")]
    max_tokens: Option<u32>,

    /// Stream the recipe as it is generated instead of waiting for the
    /// full response. The final text is identical either way.
    #[arg(long, global = true)]
    stream: bool,

    /// Write the recipe to this file instead of stdout.
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except the recipe and errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Free-text search: describe preferences, cuisine, or ingredients.
    Search {
        /// What you want to cook, e.g. "vegan Italian with tomatoes".
        text: Option<String>,
        /// Attach an image of ingredients or a dish.
        #[arg(long)]
        image: Option<PathBuf>,
        /// Attach a PDF with recipe details or requirements.
        #[arg(long)]
        pdf: Option<PathBuf>,
        /// Dietary preference.
        #[arg(long, value_enum)]
        diet: Option<DietArg>,
    },
    /// Recipe from an image alone.
    Image {
        /// Path to a JPEG/PNG of ingredients or a dish.
        path: PathBuf,
        #[arg(long, value_enum)]
        diet: Option<DietArg>,
    },
    /// Recipe from a PDF alone.
    Pdf {
        /// Path to a PDF with recipe details.
        path: PathBuf,
        #[arg(long, value_enum)]
        diet: Option<DietArg>,
    },
    /// Seasonal recipe from a season and ingredient list.
    Seasonal {
        /// Season name, e.g. "autumn".
        #[arg(long)]
        season: String,
        /// Comma-separated seasonal ingredients.
        #[arg(long, value_delimiter = ',', required = true)]
        ingredients: Vec<String>,
    },
    /// Use up leftover ingredients.
    Leftovers {
        /// Comma-separated leftovers.
        #[arg(long, value_delimiter = ',', required = true)]
        ingredients: Vec<String>,
        #[arg(long, value_enum)]
        diet: Option<DietArg>,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum DietArg {
    Vegan,
    Vegetarian,
    Keto,
    Paleo,
    GlutenFree,
    DairyFree,
}

impl From<DietArg> for DietaryTag {
    fn from(v: DietArg) -> Self {
        match v {
            DietArg::Vegan => DietaryTag::Vegan,
            DietArg::Vegetarian => DietaryTag::Vegetarian,
            DietArg::Keto => DietaryTag::Keto,
            DietArg::Paleo => DietaryTag::Paleo,
            DietArg::GlutenFree => DietaryTag::GlutenFree,
            DietArg::DairyFree => DietaryTag::DairyFree,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config and client ──────────────────────────────────────────
    // A missing API key is fatal and halts before any pipeline call.
    let config = build_config(&cli)?;
    let client = GeminiClient::from_env(&config).context("Cannot start")?;

    // ── Assemble the request per intake mode ─────────────────────────────
    let recipe = match &cli.command {
        Command::Search {
            text,
            image,
            pdf,
            diet,
        } => {
            if text.as_deref().map_or(true, |t| t.trim().is_empty())
                && image.is_none()
                && pdf.is_none()
            {
                bail!("{}", ChefgenError::NoInput);
            }
            // Prefill the user text from the strongest remaining input when
            // the user typed nothing themselves.
            let user_text = match text.as_deref().map(str::trim) {
                Some(t) if !t.is_empty() => t.to_string(),
                _ if image.is_some() => prompts::image_only_user_text(),
                _ => prompts::pdf_only_user_text(),
            };
            let request = build_request(user_text, image.as_deref(), pdf.as_deref(), *diet, &cli)?;
            run_generate(&client, &request, &cli).await
        }
        Command::Image { path, diet } => {
            let request =
                build_request(prompts::image_only_user_text(), Some(path), None, *diet, &cli)?;
            run_generate(&client, &request, &cli).await
        }
        Command::Pdf { path, diet } => {
            // PDF is the sole content input here, so extraction problems
            // are fatal rather than degraded.
            let extracted = extract_text_from_path(path)
                .with_context(|| format!("Cannot use PDF '{}'", path.display()))?;
            if extracted == ExtractedText::NoTextLayer {
                bail!(
                    "No text could be extracted from '{}' (it may be scanned or image-only).\n\
                     Try `chefgen image` with a photo, or add free text with `chefgen search`.",
                    path.display()
                );
            }
            let mut request = RecipeRequest::from_text(prompts::pdf_only_user_text())
                .with_document_text(extracted);
            if let Some(tag) = diet {
                request = request.with_dietary((*tag).into());
            }
            run_generate(&client, &request, &cli).await
        }
        Command::Seasonal { season, ingredients } => {
            if cli.stream {
                let chunks = generate_seasonal_stream(&client, season, ingredients).await;
                print_streamed(chunks, &cli).await
            } else {
                with_spinner(&cli, generate_seasonal(&client, season, ingredients)).await
            }
        }
        Command::Leftovers { ingredients, diet } => {
            let request = build_request(
                prompts::leftover_user_text(ingredients),
                None,
                None,
                *diet,
                &cli,
            )?;
            run_generate(&client, &request, &cli).await
        }
    };

    // ── Render ───────────────────────────────────────────────────────────
    if let Some(ref path) = cli.output {
        std::fs::write(path, &recipe)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        if !cli.quiet {
            eprintln!("Recipe written to {}", path.display());
        }
    } else if !cli.stream {
        // Streamed chunks were already printed as they arrived.
        let mut stdout = io::stdout().lock();
        stdout.write_all(recipe.as_bytes()).ok();
        if !recipe.ends_with('\n') {
            stdout.write_all(b"\n").ok();
        }
    }

    Ok(())
}

/// Map CLI args to `GenerationConfig`.
fn build_config(cli: &Cli) -> Result<GenerationConfig> {
    let mut builder = GenerationConfig::builder();
    if let Some(ref model) = cli.model {
        builder = builder.model(model);
    }
    if let Some(t) = cli.temperature {
        builder = builder.temperature(t);
    }
    if let Some(n) = cli.max_tokens {
        builder = builder.max_output_tokens(n);
    }
    builder.build().context("Invalid configuration")
}

/// Load optional image and PDF inputs and assemble the `RecipeRequest`.
fn build_request(
    user_text: String,
    image_path: Option<&Path>,
    pdf_path: Option<&Path>,
    diet: Option<DietArg>,
    cli: &Cli,
) -> Result<RecipeRequest> {
    let mut request = RecipeRequest::from_text(user_text);

    if let Some(tag) = diet {
        request = request.with_dietary(tag.into());
    }

    if let Some(path) = image_path {
        let img = input::load_image(path)
            .with_context(|| format!("Cannot use image '{}'", path.display()))?;
        let payload = encode_image(&img).context("Failed to encode image")?;
        request = request.with_image(payload);
    }

    if let Some(path) = pdf_path {
        match extract_text_from_path(path) {
            Ok(ExtractedText::NoTextLayer) => {
                if !cli.quiet {
                    eprintln!(
                        "Note: no text could be extracted from '{}' (scanned or image-only PDF); \
                         continuing without it.",
                        path.display()
                    );
                }
                request = request.with_document_text(ExtractedText::NoTextLayer);
            }
            Ok(text) => request = request.with_document_text(text),
            Err(e) => {
                // Extraction failures are local: report them in place of the
                // text and let the remaining inputs proceed.
                if !cli.quiet {
                    eprintln!("Warning: {e}");
                }
            }
        }
    }

    Ok(request)
}

/// Dispatch the request, honouring `--stream`.
async fn run_generate(client: &GeminiClient, request: &RecipeRequest, cli: &Cli) -> String {
    if cli.stream {
        let chunks = generate_stream(client, request).await;
        print_streamed(chunks, cli).await
    } else {
        with_spinner(cli, generate(client, request)).await
    }
}

/// Print stream chunks as they arrive (unless writing to a file) and
/// return the concatenated text.
async fn print_streamed(mut chunks: chefgen::RecipeStream, cli: &Cli) -> String {
    if cli.output.is_some() {
        return collect_recipe(chunks).await;
    }
    let mut full = String::new();
    let mut stdout = io::stdout().lock();
    while let Some(chunk) = chunks.next().await {
        stdout.write_all(chunk.as_bytes()).ok();
        stdout.flush().ok();
        full.push_str(&chunk);
    }
    if !full.ends_with('\n') {
        stdout.write_all(b"\n").ok();
    }
    full
}

/// Show a spinner while a blocking generation is pending.
async fn with_spinner(cli: &Cli, fut: impl std::future::Future<Output = String>) -> String {
    if cli.quiet {
        return fut.await;
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message("Generating your recipe…");
    bar.enable_steady_tick(Duration::from_millis(80));
    let result = fut.await;
    bar.finish_and_clear();
    result
}
