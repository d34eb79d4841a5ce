//! Rasterizer client — the headless-browser HTML-to-PDF collaborator.
//!
//! The PDF backend assembles a deterministic HTML document; this client
//! ships it to a browserless-style rendering service and returns the
//! paginated PDF bytes. The service itself is opaque to the core.

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RasterizerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rasterizer error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Fixed page setup for all PDF exports: A4 portrait, 15mm margins,
/// 2x raster scale. Not user-configurable at the API level.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfOptions {
    pub format: &'static str,
    pub landscape: bool,
    pub scale: f32,
    pub print_background: bool,
    pub margin: PdfMargins,
}

#[derive(Debug, Clone, Serialize)]
pub struct PdfMargins {
    pub top: &'static str,
    pub bottom: &'static str,
    pub left: &'static str,
    pub right: &'static str,
}

impl Default for PdfOptions {
    fn default() -> Self {
        PdfOptions {
            format: "A4",
            landscape: false,
            scale: 2.0,
            print_background: true,
            margin: PdfMargins {
                top: "15mm",
                bottom: "15mm",
                left: "15mm",
                right: "15mm",
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct RasterizeRequest<'a> {
    html: &'a str,
    options: &'a PdfOptions,
}

#[derive(Clone)]
pub struct RasterizerClient {
    client: Client,
    base_url: String,
}

impl RasterizerClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }

    /// Converts an HTML document to PDF bytes.
    pub async fn render_pdf(
        &self,
        html: &str,
        options: &PdfOptions,
    ) -> Result<Vec<u8>, RasterizerError> {
        let url = format!("{}/pdf", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .json(&RasterizeRequest { html, options })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RasterizerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        debug!("Rasterized {} bytes of PDF", bytes.len());
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_a4_portrait_2x() {
        let opts = PdfOptions::default();
        assert_eq!(opts.format, "A4");
        assert!(!opts.landscape);
        assert_eq!(opts.scale, 2.0);
        assert_eq!(opts.margin.top, "15mm");
    }

    #[test]
    fn test_options_serialize_camel_case() {
        let json = serde_json::to_value(PdfOptions::default()).unwrap();
        assert!(json.get("printBackground").is_some());
        assert!(json.get("print_background").is_none());
    }
}
