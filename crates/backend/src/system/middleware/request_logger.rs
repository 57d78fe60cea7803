use axum::body::Body;
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::Response;

/// Одна строка лога на запрос: статус, длительность, размер ответа, метод и путь.
///
/// Размер берётся из `Content-Length`; для потоковых ответов `-`.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status();
    let size = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let elapsed = start.elapsed().as_millis();

    if status.is_client_error() || status.is_server_error() {
        tracing::warn!(
            "{} | {:>5}ms | {:>10} | {} {}",
            status.as_u16(),
            elapsed,
            size,
            method,
            path
        );
    } else {
        tracing::info!(
            "{} | {:>5}ms | {:>10} | {} {}",
            status.as_u16(),
            elapsed,
            size,
            method,
            path
        );
    }

    response
}
