use std::path::Path;

use axum::middleware;
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::shared::config::FrontendConfig;
use crate::system::middleware::request_logger::request_logger;

pub async fn health() -> &'static str {
    "ok"
}

/// Раздача статики SPA.
///
/// Неизвестные пути под базовым отдают index.html, чтобы глубокие ссылки
/// переживали перезагрузку.
pub fn router(frontend: &FrontendConfig, dist_dir: &Path) -> Router {
    let base = frontend.base_path();
    let spa = ServeDir::new(dist_dir)
        .fallback(ServeFile::new(dist_dir.join("index.html")));

    let app = Router::new().route("/health", get(health));

    let app = if base == "/" {
        app.fallback_service(spa)
    } else {
        let target = base.clone();
        app.route("/", get(move || async move { Redirect::temporary(&target) }))
            .nest_service(&base, spa)
    };

    app.layer(middleware::from_fn(request_logger))
}
