//! Streaming generation API: emit response text as it arrives.
//!
//! ## Why stream?
//!
//! A full recipe takes several seconds to generate. Streaming lets the
//! front end print text as the model writes it instead of showing a blank
//! spinner. Semantically nothing changes: the concatenation of the chunks,
//! in arrival order, equals what the blocking call would have returned.
//!
//! Failures follow the same always-displayable policy as
//! [`crate::generate::generate`]: a transport error during setup or
//! mid-stream surfaces as a final warning-marker chunk, never as an error
//! the caller must handle.

use crate::generate::{failure_text, RecipeRequest};
use crate::pipeline::llm::GeminiClient;
use futures::stream::{self, Stream, StreamExt};
use std::pin::Pin;
use tracing::{info, warn};

/// A boxed, finite stream of response text chunks.
///
/// Created fresh for each invocation and consumed exactly once; a new call
/// starts a new stream (there is no mid-stream resume).
pub type RecipeStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// Generate a recipe, streaming text chunks in arrival order.
///
/// Never fails: if the request cannot be sent, the stream yields a single
/// warning-marker chunk; if the connection drops mid-stream, the text so
/// far is followed by a warning-marker chunk.
pub async fn generate_stream(client: &GeminiClient, request: &RecipeRequest) -> RecipeStream {
    let parts = request.build_parts();
    info!(
        model = client.model(),
        has_image = request.image.is_some(),
        "Generating recipe (streamed)"
    );

    match client.stream_generate_content(&parts).await {
        Ok(chunks) => Box::pin(chunks.map(|item| match item {
            Ok(text) => text,
            Err(e) => {
                warn!("Stream failed mid-response: {e}");
                failure_text(&e)
            }
        })),
        Err(e) => {
            warn!("Stream dispatch failed: {e}");
            Box::pin(stream::once(futures::future::ready(failure_text(&e))))
        }
    }
}

/// Streaming variant of [`crate::generate::generate_seasonal`].
///
/// Same failure policy as [`generate_stream`].
pub async fn generate_seasonal_stream(
    client: &GeminiClient,
    season: &str,
    ingredients: &[String],
) -> RecipeStream {
    let prompt = crate::prompts::build_seasonal_prompt(season, ingredients);
    info!(model = client.model(), season, "Generating seasonal recipe (streamed)");

    match client
        .stream_generate_content(&[crate::pipeline::llm::Part::text(prompt)])
        .await
    {
        Ok(chunks) => Box::pin(chunks.map(|item| match item {
            Ok(text) => text,
            Err(e) => {
                warn!("Stream failed mid-response: {e}");
                failure_text(&e)
            }
        })),
        Err(e) => {
            warn!("Stream dispatch failed: {e}");
            Box::pin(stream::once(futures::future::ready(failure_text(&e))))
        }
    }
}

/// Consume a [`RecipeStream`], concatenating chunks in arrival order.
///
/// The result is identical to what the blocking call returns for the same
/// underlying model response.
pub async fn collect_recipe(mut stream: RecipeStream) -> String {
    let mut text = String::new();
    while let Some(chunk) = stream.next().await {
        text.push_str(&chunk);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn collect_concatenates_in_order() {
        let chunks = vec![
            "## Ingredients\n".to_string(),
            "- 2 tomatoes\n".to_string(),
            "## Steps\n".to_string(),
        ];
        let stream: RecipeStream = Box::pin(stream::iter(chunks));
        let text = collect_recipe(stream).await;
        assert_eq!(text, "## Ingredients\n- 2 tomatoes\n## Steps\n");
    }

    #[tokio::test]
    async fn collect_of_empty_stream_is_empty() {
        let stream: RecipeStream = Box::pin(stream::iter(Vec::<String>::new()));
        assert_eq!(collect_recipe(stream).await, "");
    }
}
