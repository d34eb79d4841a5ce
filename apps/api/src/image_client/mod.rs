//! Image collaborator — best-effort topic illustration generation.
//!
//! Failures here are never fatal: each image is attempted independently and
//! the caller receives whatever subset succeeded (possibly empty). The
//! calling workflow must not abort on an empty result.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

const IMAGE_MODEL: &str = "google/gemini-2.5-flash-image-preview";
/// Hard cap on images per request, regardless of what the caller asks for.
const MAX_IMAGES: usize = 3;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image API error (status {0})")]
    Api(u16),
}

#[derive(Debug, Serialize)]
struct ImageMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct GatewayResponse {
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    images: Option<Vec<ChoiceImage>>,
}

#[derive(Debug, Deserialize)]
struct ChoiceImage {
    image_url: Option<ImageUrl>,
}

#[derive(Debug, Deserialize)]
struct ImageUrl {
    url: Option<String>,
}

/// Client for the chat-completions style image gateway.
#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl ImageClient {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(90))
                .build()
                .expect("Failed to build HTTP client"),
            api_url,
            api_key,
        }
    }

    /// Generates up to `count` (capped at 3) illustrations for a topic.
    ///
    /// Each image is requested independently; a failed request is logged and
    /// skipped, so the returned list holds only the successes. This function
    /// itself never fails — total failure is an empty list.
    pub async fn generate_topic_images(&self, topic: &str, count: usize) -> Vec<String> {
        let prompts = topic_prompts(topic);
        let mut images = Vec::new();

        for (i, prompt) in prompts.iter().take(count.min(MAX_IMAGES)).enumerate() {
            match self.generate_one(prompt).await {
                Ok(Some(url)) => {
                    info!("Image {}/{} generated", i + 1, count.min(MAX_IMAGES));
                    images.push(url);
                }
                Ok(None) => warn!("Image {} response carried no image payload", i + 1),
                Err(e) => warn!("Image {} generation failed: {e}", i + 1),
            }
        }

        info!("Generated {} images for topic '{}'", images.len(), topic);
        images
    }

    async fn generate_one(&self, prompt: &str) -> Result<Option<String>, ImageError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": IMAGE_MODEL,
                "messages": [ImageMessage { role: "user", content: prompt }],
                "modalities": ["image", "text"],
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::Api(status.as_u16()));
        }

        let body: GatewayResponse = response.json().await?;
        let url = body
            .choices
            .unwrap_or_default()
            .into_iter()
            .filter_map(|c| c.message)
            .flat_map(|m| m.images.unwrap_or_default())
            .filter_map(|i| i.image_url)
            .find_map(|u| u.url);

        Ok(url)
    }
}

/// The three fixed prompt styles, most-specific first. Image `i` uses
/// prompt `i`, so a 2-image request gets the infographic and the diagram.
fn topic_prompts(topic: &str) -> [String; 3] {
    [
        format!(
            "Professional infographic about {topic}, modern design, clean layout, \
             educational style, high quality, 16:9 aspect ratio"
        ),
        format!(
            "Academic illustration about {topic}, scientific diagram style, \
             professional colors, informative visuals"
        ),
        format!(
            "Conceptual visualization of {topic}, modern professional design, \
             educational poster style, clean aesthetics"
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_prompts_mention_topic() {
        let prompts = topic_prompts("Quantum Computing");
        for p in &prompts {
            assert!(p.contains("Quantum Computing"));
        }
    }

    #[test]
    fn test_gateway_response_extraction_shape() {
        let body = r#"{
            "choices": [
                {"message": {"images": [{"image_url": {"url": "data:image/png;base64,Zm9v"}}]}}
            ]
        }"#;
        let parsed: GatewayResponse = serde_json::from_str(body).unwrap();
        let url = parsed
            .choices
            .unwrap()
            .into_iter()
            .filter_map(|c| c.message)
            .flat_map(|m| m.images.unwrap_or_default())
            .filter_map(|i| i.image_url)
            .find_map(|u| u.url);
        assert_eq!(url.as_deref(), Some("data:image/png;base64,Zm9v"));
    }
}
