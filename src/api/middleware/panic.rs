//! Error boundary turning handler panics into a fixed 500 response.

use axum::body::Body;
use axum::http::{Response, StatusCode, header};
use axum::response::IntoResponse;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;

/// Panic handler signature accepted by [`CatchPanicLayer::custom`].
pub type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response<Body>;

/// Creates the panic-catching layer.
///
/// The panic payload is logged; the client only sees
/// `500 Internal Server Error`. The server keeps serving other requests.
pub fn layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %detail, "Panic while handling HTTP request");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "Internal server error",
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_handle_panic_hides_payload() {
        let response = handle_panic(Box::new("secret detail"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Internal server error");
    }
}
