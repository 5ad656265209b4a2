use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::feed::Feed;

use super::api::beacon as beacon_handlers;
use super::api::decode as decode_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        // Live feed
        .route("/api/beacon/status", get(beacon_handlers::status))
        .route("/api/beacon/samples", get(beacon_handlers::samples))
        .route("/api/beacon/frame", get(beacon_handlers::current_frame))
        .route("/api/beacon/frame/{index}", get(beacon_handlers::frame_at))
        .route("/api/beacon/ingest", post(beacon_handlers::ingest))
        // Stateless
        .route("/api/decode", post(decode_handlers::decode))
        .route("/api/project", get(decode_handlers::project))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    if let Some(dir) = &state.config.web.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();

    let mut feed = Feed::new(config.feed_settings());
    if let Err(e) = feed.start() {
        log::warn!("Failed to start feed: {}", e);
    }
    let feed = Arc::new(Mutex::new(feed));

    let state = AppState {
        config: Arc::new(config),
        feed: feed.clone(),
    };
    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    feed.lock().await.stop().await;
    log::info!("Server stopped");
    served
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedSettings;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    const BLOB: &str = "Message 1 L[0,0,600] R[10,0,0] G[0,0,0] @@ RD[]IL\n\
                        Message 2 L[0,0,600] R[20,0,0] G[0,0,0] @@ RD[]IL\n\
                        Message 3 L[0,0,600] R[30,0,0] G[0,0,0] @@ RD[]IL\n";

    fn app() -> Router {
        let config = Config::from_yaml("source:\n  path: unused.txt\n").unwrap();
        let feed = Feed::new(FeedSettings::new("unused.txt"));
        router(AppState {
            config: Arc::new(config),
            feed: Arc::new(Mutex::new(feed)),
        })
    }

    async fn json(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn decode_endpoint_returns_samples_and_diagnostics() {
        let app = app();
        let req = Request::post("/api/decode")
            .body(Body::from("Message 4 L[1,2,3] @@ RD[]IL"))
            .unwrap();
        let (status, body) = json(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["samples"].as_array().unwrap().len(), 0);
        assert_eq!(body["diagnostics"][0]["error"]["kind"], "missing_field");
        assert_eq!(body["diagnostics"][0]["error"]["key"], "R");
    }

    #[tokio::test]
    async fn ingest_then_read_frames() {
        let app = app();
        let req = Request::post("/api/beacon/ingest")
            .body(Body::from(BLOB))
            .unwrap();
        let (_, status) = json(&app, req).await;
        assert_eq!(status["sampleCount"], 3);
        assert_eq!(status["mode"], "idle");

        let req = Request::get("/api/beacon/frame/1").body(Body::empty()).unwrap();
        let (code, frame) = json(&app, req).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(frame["sample"]["messageId"], 2);
        assert_eq!(frame["prediction"]["yaw"], 30.0);

        let req = Request::get("/api/beacon/frame/9").body(Body::empty()).unwrap();
        let (code, err) = json(&app, req).await;
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert_eq!(err["error"], "sample_not_found");

        let req = Request::get("/api/beacon/frame").body(Body::empty()).unwrap();
        let (_, frame) = json(&app, req).await;
        assert_eq!(frame["index"], 0);
        assert!(frame["prediction"].is_null());
    }

    #[tokio::test]
    async fn project_uses_configured_radius() {
        let app = app();
        let req = Request::get("/api/project?latitude=90&longitude=0")
            .body(Body::empty())
            .unwrap();
        let (code, point) = json(&app, req).await;
        assert_eq!(code, StatusCode::OK);
        assert!((point["y"].as_f64().unwrap() - 100.0).abs() < 1e-9);

        let req = Request::get("/api/project?latitude=NaN&longitude=0")
            .body(Body::empty())
            .unwrap();
        let (code, _) = json(&app, req).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
    }
}
