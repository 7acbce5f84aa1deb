//! Storefront theme endpoint

use axum::{Json, Router, extract::Query, routing::get};
use serde::Deserialize;
use storefront_theme::{Platform, Theme};
use utoipa::{IntoParams, OpenApi};

#[derive(OpenApi)]
#[openapi(paths(get_theme), components(schemas(Theme, Platform)))]
pub struct ThemeDoc;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ThemeQuery {
    /// `android`, `ios` or `web` (default)
    pub platform: Option<Platform>,
    /// Status bar height reported by the device, in points
    pub status_bar_height: Option<f32>,
}

pub fn router() -> Router {
    Router::new().route("/theme", get(get_theme))
}

/// Style constants for the requesting platform
#[utoipa::path(
    get,
    path = "/theme",
    tag = "Storefront",
    params(ThemeQuery),
    responses(
        (status = 200, description = "Theme for the platform", body = Theme)
    )
)]
async fn get_theme(Query(query): Query<ThemeQuery>) -> Json<Theme> {
    Json(Theme::for_platform(
        query.platform.unwrap_or_default(),
        query.status_bar_height,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn fetch(uri: &str) -> (StatusCode, Option<Value>) {
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).ok())
    }

    #[tokio::test]
    async fn test_android_theme_pads_status_bar() {
        let (status, body) = fetch("/theme?platform=android&status_bar_height=24").await;
        assert_eq!(status, StatusCode::OK);
        let body = body.unwrap();
        assert_eq!(body["platform"], "android");
        assert_eq!(body["screen"]["paddingTop"], 24.0);
    }

    #[tokio::test]
    async fn test_default_platform_is_web() {
        let (status, body) = fetch("/theme").await;
        assert_eq!(status, StatusCode::OK);
        let body = body.unwrap();
        assert_eq!(body["platform"], "web");
        assert_eq!(body["screen"]["paddingTop"], 0.0);
    }

    #[tokio::test]
    async fn test_unknown_platform_is_rejected() {
        let (status, _) = fetch("/theme?platform=symbian").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
