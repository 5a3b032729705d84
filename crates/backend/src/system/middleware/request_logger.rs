use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::shared::format::format_number;

/// Middleware для логирования HTTP запросов
///
/// One line per request: status, method, path, response size, duration.
/// The body is buffered to know its real size.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(
                status = parts.status.as_u16(),
                "{} {} | body read failed: {} | {}ms",
                method,
                path,
                e,
                start.elapsed().as_millis()
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let status = parts.status.as_u16();
    let size = format_number(bytes.len());
    let elapsed = start.elapsed().as_millis();
    if parts.status.is_server_error() {
        tracing::error!(status, "{} {} | {} B | {}ms", method, path, size, elapsed);
    } else if parts.status.is_client_error() {
        tracing::warn!(status, "{} {} | {} B | {}ms", method, path, size, elapsed);
    } else {
        tracing::info!(status, "{} {} | {} B | {}ms", method, path, size, elapsed);
    }

    Response::from_parts(parts, Body::from(bytes))
}
