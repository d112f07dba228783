//! Server-rendered staff UI: a sidebar menu with one form page per operation

mod html;
mod pages;

use std::path::Path;

use axum::{
    response::Redirect,
    routing::{get, post},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::{config::UiConfig, AppState};

/// Static presentation data resolved once at startup
#[derive(Debug, Clone)]
pub struct UiAssets {
    pub title: String,
    /// `data:` URL of the tiled background, if the image could be read
    pub background: Option<String>,
}

impl UiAssets {
    /// Resolve UI assets; a missing background image falls back to the plain style
    pub fn load(config: &UiConfig) -> Self {
        let background = config
            .background_image
            .as_deref()
            .and_then(|path| match std::fs::read(path) {
                Ok(bytes) => Some(format!(
                    "data:{};base64,{}",
                    image_mime(Path::new(path)),
                    STANDARD.encode(bytes)
                )),
                Err(e) => {
                    tracing::warn!(path, error = %e, "Background image not found, using default style");
                    None
                }
            });

        Self {
            title: config.title.clone(),
            background,
        }
    }
}

fn image_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "image/png",
    }
}

/// HTML routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/borrow") }))
        .route("/borrow", get(pages::borrow_page).post(pages::borrow_submit))
        .route("/return", get(pages::return_page).post(pages::return_submit))
        .route("/inventory", get(pages::inventory_page))
        .route("/inventory/items", post(pages::add_item_submit))
        .route("/inventory/import", post(pages::import_submit))
        .route("/logs", get(pages::logs_page))
        .with_state(state)
}
