//! Promo image routes: upload, presigned link, HTML variants, preview.

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{error, info};

use crate::AppState;
use promo_core::image::ImageError;

/// Content type assumed when the upload part declares none.
const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// Message returned for a missing upload field or an unknown identifier.
const NOT_FOUND_MESSAGE: &str = "image not found";

/// Message returned when the multipart body itself cannot be read.
const INVALID_MULTIPART_MESSAGE: &str = "invalid multipart body";

/// Creates the image routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload))
        .route("/link/{image_id}", get(link))
        .route("/html-embed/{image_id}", get(html_embed))
        .route("/html-link/{image_id}", get(html_link))
        .route("/preview/{image_id}", get(preview))
}

// ============================================================================
// Response Types
// ============================================================================

/// Response body for `POST /upload`.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Whether the upload succeeded.
    pub success: bool,
    /// Issued image identifier.
    #[serde(rename = "imageId", skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    /// Human-readable outcome message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response body for `GET /link/{image_id}`.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    /// Whether the lookup succeeded.
    pub success: bool,
    /// Presigned download URL.
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Human-readable outcome message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response body for the HTML endpoints.
#[derive(Debug, Serialize)]
pub struct HtmlResponse {
    /// Whether the lookup succeeded.
    pub success: bool,
    /// Base64-encoded HTML document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Human-readable outcome message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/upload` - store a multipart image and issue an identifier.
async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> impl IntoResponse {
    let mut image: Option<(Bytes, String)> = None;

    loop {
        let part = match multipart.next_field().await {
            Ok(Some(part)) => part,
            Ok(None) => break,
            Err(err) => {
                error!(error = %err, "failed to read multipart body");
                return upload_rejected(
                    StatusCode::BAD_REQUEST,
                    INVALID_MULTIPART_MESSAGE.to_string(),
                );
            }
        };

        if part.name() == Some("image") {
            let content_type = part
                .content_type()
                .unwrap_or(DEFAULT_CONTENT_TYPE)
                .to_string();
            match part.bytes().await {
                Ok(bytes) => image = Some((bytes, content_type)),
                Err(err) => {
                    error!(error = %err, "failed to read upload part");
                    return upload_rejected(
                        StatusCode::BAD_REQUEST,
                        INVALID_MULTIPART_MESSAGE.to_string(),
                    );
                }
            }
        }
    }

    let Some((bytes, content_type)) = image.filter(|(bytes, _)| !bytes.is_empty()) else {
        return upload_rejected(StatusCode::BAD_REQUEST, NOT_FOUND_MESSAGE.to_string());
    };

    match state.service.upload(bytes, &content_type).await {
        Ok(image_id) => {
            info!(image_id = %image_id, content_type = %content_type, "image uploaded");
            (
                StatusCode::OK,
                Json(UploadResponse {
                    success: true,
                    image_id: Some(image_id),
                    message: Some("image uploaded successfully".to_string()),
                }),
            )
                .into_response()
        }
        Err(err) => {
            error!(error = %err, "upload failed");
            upload_rejected(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

fn upload_rejected(status: StatusCode, message: String) -> axum::response::Response {
    (
        status,
        Json(UploadResponse {
            success: false,
            image_id: None,
            message: Some(message),
        }),
    )
        .into_response()
}

/// GET `/link/{image_id}` - presigned download URL for an uploaded image.
async fn link(State(state): State<AppState>, Path(image_id): Path<String>) -> impl IntoResponse {
    match state.service.link(&image_id).await {
        Ok(url) => (
            StatusCode::OK,
            Json(LinkResponse {
                success: true,
                image_url: Some(url),
                message: None,
            }),
        )
            .into_response(),
        Err(err) => {
            let (status, message) = error_status(&image_id, "resolve link", &err);
            (
                status,
                Json(LinkResponse {
                    success: false,
                    image_url: None,
                    message: Some(message),
                }),
            )
                .into_response()
        }
    }
}

/// GET `/html-embed/{image_id}` - base64 HTML document inlining the image.
async fn html_embed(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
) -> impl IntoResponse {
    html_payload(state.service.html_embed(&image_id).await, &image_id, "render embedded html")
}

/// GET `/html-link/{image_id}` - base64 HTML document linking the image.
async fn html_link(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
) -> impl IntoResponse {
    html_payload(state.service.html_link(&image_id).await, &image_id, "render linked html")
}

fn html_payload(
    result: Result<String, ImageError>,
    image_id: &str,
    operation: &'static str,
) -> axum::response::Response {
    match result {
        Ok(html) => (
            StatusCode::OK,
            Json(HtmlResponse {
                success: true,
                html: Some(html),
                message: None,
            }),
        )
            .into_response(),
        Err(err) => {
            let (status, message) = error_status(image_id, operation, &err);
            (
                status,
                Json(HtmlResponse {
                    success: false,
                    html: None,
                    message: Some(message),
                }),
            )
                .into_response()
        }
    }
}

/// GET `/preview/{image_id}` - raw preview HTML for interactive viewing.
async fn preview(State(state): State<AppState>, Path(image_id): Path<String>) -> impl IntoResponse {
    match state.service.preview(&image_id).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            let (status, message) = error_status(&image_id, "render preview", &err);
            (status, message).into_response()
        }
    }
}

/// Fixed mapping from workflow error kind to status code and client message.
fn error_status(image_id: &str, operation: &str, err: &ImageError) -> (StatusCode, String) {
    match err {
        ImageError::NotFound(_) => {
            info!(image_id = %image_id, operation, "unknown image identifier");
            (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string())
        }
        ImageError::Storage(storage_err) => {
            error!(image_id = %image_id, operation, error = %storage_err, "storage operation failed");
            (StatusCode::INTERNAL_SERVER_ERROR, storage_err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use promo_core::image::ImageService;
    use promo_core::registry::ImageRegistry;
    use promo_core::storage::ImageStore;
    use promo_shared::StorageConfig;

    use crate::{AppState, create_router};

    /// Router over a store that would refuse any connection; the paths
    /// under test never reach it.
    fn test_router() -> axum::Router {
        let config = StorageConfig {
            internal_endpoint: "http://127.0.0.1:9".to_string(),
            ..StorageConfig::default()
        };
        let store = ImageStore::from_config(&config);
        let service = ImageService::new(Arc::new(store), Arc::new(ImageRegistry::new()));
        create_router(AppState {
            service: Arc::new(service),
        })
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("body is JSON")
    }

    fn multipart_request(field_name: &str, content: &str) -> Request<Body> {
        let boundary = "test-boundary-7MA4YWxkTrZu0gW";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"{field_name}\"\r\n\r\n\
             {content}\r\n\
             --{boundary}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("request builds")
    }

    #[tokio::test]
    async fn test_greeting() {
        let response = test_router()
            .oneshot(Request::get("/").body(Body::empty()).expect("request"))
            .await
            .expect("handler runs");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();
        assert_eq!(&bytes[..], b"Promo service is running!");
    }

    #[tokio::test]
    async fn test_upload_without_image_field_is_rejected() {
        let response = test_router()
            .oneshot(multipart_request("note", "not an image"))
            .await
            .expect("handler runs");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "image not found");
        assert!(body.get("imageId").is_none());
    }

    #[tokio::test]
    async fn test_upload_with_empty_image_field_is_rejected() {
        let response = test_router()
            .oneshot(multipart_request("image", ""))
            .await
            .expect("handler runs");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "image not found");
    }

    #[tokio::test]
    async fn test_upload_with_malformed_body_is_rejected() {
        // Multipart content type, but the body carries no boundary at all.
        let request = Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                CONTENT_TYPE,
                "multipart/form-data; boundary=test-boundary-7MA4YWxkTrZu0gW",
            )
            .body(Body::from("this is not a multipart payload"))
            .expect("request builds");

        let response = test_router()
            .oneshot(request)
            .await
            .expect("handler runs");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "invalid multipart body");
    }

    #[tokio::test]
    async fn test_link_unknown_identifier_is_404() {
        let response = test_router()
            .oneshot(
                Request::get("/link/no-such-image")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("handler runs");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "image not found");
        assert!(body.get("imageUrl").is_none());
    }

    #[tokio::test]
    async fn test_html_embed_unknown_identifier_is_404() {
        let response = test_router()
            .oneshot(
                Request::get("/html-embed/no-such-image")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("handler runs");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "image not found");
        assert!(body.get("html").is_none());
    }

    #[tokio::test]
    async fn test_html_link_unknown_identifier_is_404() {
        let response = test_router()
            .oneshot(
                Request::get("/html-link/no-such-image")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("handler runs");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_preview_unknown_identifier_is_plaintext_404() {
        let response = test_router()
            .oneshot(
                Request::get("/preview/no-such-image")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("handler runs");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/plain"));
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();
        assert_eq!(&bytes[..], b"image not found");
    }
}
