use sqlx::PgPool;

use crate::config::Config;
use crate::image_client::ImageClient;
use crate::llm_client::LlmClient;
use crate::rasterizer::RasterizerClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// Best-effort image collaborator. Failures degrade, never abort.
    pub images: ImageClient,
    /// Headless-browser HTML-to-PDF service used by the PDF backend.
    pub rasterizer: RasterizerClient,
    pub config: Config,
}
