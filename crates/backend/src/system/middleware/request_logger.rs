use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Local;
use std::time::Duration;

/// Middleware для логирования HTTP запросов
///
/// Выводит в консоль время, длительность, размер ответа, статус, метод и
/// путь. Ошибочные ответы дополнительно попадают в tracing.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Читаем тело ответа, чтобы узнать реальный размер
    let (bytes, size) = match to_bytes(body, usize::MAX).await {
        Ok(b) => {
            let size = Some(b.len());
            (b, size)
        }
        Err(e) => {
            tracing::error!(
                "Failed to read response body for {} {}: {}",
                method,
                uri.path(),
                e
            );
            (Default::default(), None)
        }
    };

    let line = format_request_line(&method, uri.path(), parts.status, start.elapsed(), size);
    let color_code = if parts.status.is_success() { "36" } else { "33" };
    println!(
        "\x1b[{}m{}\x1b[0m | {}",
        color_code,
        Local::now().format("%H:%M:%S"),
        line
    );
    if parts.status.is_server_error() {
        tracing::warn!("{}", line);
    }

    Response::from_parts(parts, Body::from(bytes))
}

fn format_request_line(
    method: &Method,
    path: &str,
    status: StatusCode,
    elapsed: Duration,
    size: Option<usize>,
) -> String {
    let size = size.map(format_size).unwrap_or_else(|| "error".to_string());
    format!(
        "{:>5}ms | {:>10} | {} {:>6} {}",
        elapsed.as_millis(),
        size,
        status.as_u16(),
        method.as_str(),
        path
    )
}

/// Размер тела ответа: 512 B, 1.5 KB, 2.0 MB
fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let value = bytes as f64;
    if value >= MB {
        format!("{:.1} MB", value / MB)
    } else if value >= KB {
        format!("{:.1} KB", value / KB)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(2 * 1024 * 1024), "2.0 MB");
    }

    #[test]
    fn test_format_request_line() {
        let line = format_request_line(
            &Method::GET,
            "/api/sales",
            StatusCode::BAD_GATEWAY,
            Duration::from_millis(42),
            None,
        );
        assert_eq!(line, "   42ms |      error | 502    GET /api/sales");
    }
}
