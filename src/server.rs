// HTTP surface: router, handlers, and shared state.
// This is the only place errors are translated into HTTP responses.

use std::path::Path as FsPath;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
};
use tracing::warn;

use crate::cache::TtlCache;
use crate::error::AppError;
use crate::github::GitHubClient;
use crate::profile::{self, ProfileResult};

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub client: GitHubClient,
    pub cache: Arc<Mutex<TtlCache<ProfileResult>>>,
}

impl AppState {
    pub fn new(client: GitHubClient, cache_ttl: Duration) -> Self {
        Self {
            client,
            cache: Arc::new(Mutex::new(TtlCache::new(cache_ttl))),
        }
    }
}

/// Build the application router. Static assets (the dashboard) are served
/// for any path the API routes do not claim; every response carries
/// permissive CORS and `Cache-Control: no-store`.
pub fn router(state: AppState, static_dir: &FsPath) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/profile/{username}", get(get_profile))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::new().allow_origin(Any))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state)
}

async fn healthz() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

async fn get_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let profile = profile::aggregate(&state.client, &state.cache, &username).await?;
    Ok(Json(json!({"ok": true, "profile": profile})))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Upstream { status } => {
                warn!(status, "upstream request failed");
                let code =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let body = json!({"ok": false, "error": "GitHub API error", "status": status});
                (code, Json(body)).into_response()
            }
            other => {
                warn!(error = %other, "request failed");
                let body = json!({"ok": false, "error": other.to_string()});
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_router(upstream: &MockServer) -> Router {
        let client = GitHubClient::new(upstream.uri(), None).unwrap();
        let state = AppState::new(client, Duration::from_secs(60));
        router(state, FsPath::new("static"))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn alice_user() -> serde_json::Value {
        json!({
            "login": "alice",
            "name": "Alice",
            "bio": null,
            "avatar_url": "https://avatars.githubusercontent.com/u/1",
            "html_url": "https://github.com/alice",
            "followers": 10,
            "following": 2,
            "public_repos": 2
        })
    }

    fn alice_repos() -> serde_json::Value {
        json!([
            {
                "name": "one",
                "html_url": "https://github.com/alice/one",
                "stargazers_count": 5,
                "forks_count": 1,
                "language": "Go",
                "pushed_at": "2024-01-15T12:00:00Z",
                "updated_at": "2024-01-15T12:00:00Z"
            },
            {
                "name": "two",
                "html_url": "https://github.com/alice/two",
                "stargazers_count": 3,
                "forks_count": 0,
                "language": "Go",
                "pushed_at": "2024-01-10T12:00:00Z",
                "updated_at": "2024-01-10T12:00:00Z"
            }
        ])
    }

    async fn mount_alice(server: &MockServer, expected_fetches: u64) {
        Mock::given(method("GET"))
            .and(path("/users/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(alice_user()))
            .expect(expected_fetches)
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/alice/repos"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(alice_repos()))
            .expect(expected_fetches)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn healthz_is_always_ok() {
        let upstream = MockServer::start().await;
        let app = test_router(&upstream);

        let response = app.oneshot(get_request("/healthz")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn every_response_carries_cors_and_no_store_headers() {
        let upstream = MockServer::start().await;
        let app = test_router(&upstream);

        let response = app.oneshot(get_request("/healthz")).await.unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        assert_eq!(response.headers().get("cache-control").unwrap(), "no-store");
    }

    #[tokio::test]
    async fn profile_success_envelope() {
        let upstream = MockServer::start().await;
        mount_alice(&upstream, 1).await;
        let app = test_router(&upstream);

        let response = app.oneshot(get_request("/api/profile/alice")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["profile"]["username"], "alice");
        assert_eq!(body["profile"]["total_stars"], 8);
        assert_eq!(body["profile"]["total_forks"], 1);
        assert_eq!(body["profile"]["repo_count"], 2);
        assert_eq!(body["profile"]["languages"], json!({"Go": 2}));
    }

    #[tokio::test]
    async fn second_request_within_ttl_is_served_from_cache() {
        let upstream = MockServer::start().await;
        // expect(1): the second request must not reach the upstream.
        mount_alice(&upstream, 1).await;
        let app = test_router(&upstream);

        let first = app
            .clone()
            .oneshot(get_request("/api/profile/alice"))
            .await
            .unwrap();
        let second = app.oneshot(get_request("/api/profile/alice")).await.unwrap();

        let first_body = first.into_body().collect().await.unwrap().to_bytes();
        let second_body = second.into_body().collect().await.unwrap().to_bytes();
        // Byte-identical replay, fetched_at included.
        assert_eq!(first_body, second_body);
    }

    #[tokio::test]
    async fn unknown_user_maps_upstream_404() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/__definitely_not_a_real_user__"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&upstream)
            .await;
        let app = test_router(&upstream);

        let response = app
            .oneshot(get_request("/api/profile/__definitely_not_a_real_user__"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"ok": false, "error": "GitHub API error", "status": 404})
        );
    }

    #[tokio::test]
    async fn upstream_server_error_passes_through() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/alice"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&upstream)
            .await;
        let app = test_router(&upstream);

        let response = app.oneshot(get_request("/api/profile/alice")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["ok"], false);
        assert_eq!(body["status"], 502);
    }

    #[tokio::test]
    async fn error_responses_still_carry_uniform_headers() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/alice"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&upstream)
            .await;
        let app = test_router(&upstream);

        let response = app.oneshot(get_request("/api/profile/alice")).await.unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        assert_eq!(response.headers().get("cache-control").unwrap(), "no-store");
    }
}
