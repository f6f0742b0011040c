use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use sheet_packer::config::{self, SearchConfig};
use sheet_packer::search::{Search, SearchOutcome};
use sheet_packer::types::{ItemSpec, Sheet};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize, Serialize)]
struct PackRequest {
    sheet: Sheet,
    #[serde(default)]
    items: Vec<ItemSpec>,
    #[serde(default = "default_max_iterations")]
    max_iterations: u64,
    #[serde(default = "default_max_runtime_secs")]
    max_runtime_secs: f64,
}

fn default_max_iterations() -> u64 {
    config::DEFAULT_MAX_ITERATIONS
}

fn default_max_runtime_secs() -> f64 {
    config::DEFAULT_MAX_RUNTIME.as_secs_f64()
}

impl PackRequest {
    fn into_search(self) -> Result<Search, String> {
        let max_runtime =
            config::runtime_from_secs(self.max_runtime_secs).map_err(|e| e.to_string())?;
        let config = SearchConfig::new(self.sheet, self.items)
            .with_max_iterations(self.max_iterations)
            .with_max_runtime(max_runtime);
        Search::new(config).map_err(|e| e.to_string())
    }
}

async fn pack(Json(req): Json<PackRequest>) -> Result<Json<SearchOutcome>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /pack"
    );

    let search = req
        .into_search()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let outcome = tokio::task::spawn_blocking(move || search.run())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "search task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "search failed".to_string())
        })?;

    Ok(Json(outcome))
}

fn main() {
    let _sentry = sentry::init((
        std::env::var("SENTRY_DSN").ok(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
        .block_on(serve());
}

async fn serve() {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/pack", post(pack))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req: PackRequest = serde_json::from_str(
            r#"{"sheet": {"length": 2, "width": 2}, "items": [{"length": 1, "width": 1}]}"#,
        )
        .unwrap();
        assert_eq!(req.max_iterations, 100_000);
        assert_eq!(req.max_runtime_secs, 60.0);
        let outcome = req.into_search().unwrap().run();
        assert_eq!(outcome.count, 4);
    }

    #[test]
    fn test_request_validation() {
        let req: PackRequest =
            serde_json::from_str(r#"{"sheet": {"length": 0, "width": 2}}"#).unwrap();
        assert!(req.into_search().is_err());

        let req: PackRequest = serde_json::from_str(
            r#"{"sheet": {"length": 2, "width": 2}, "max_runtime_secs": -5}"#,
        )
        .unwrap();
        assert!(req.into_search().is_err());
    }

    #[test]
    fn test_oversized_sheet_rejected_before_allocation() {
        let req: PackRequest = serde_json::from_str(
            r#"{"sheet": {"length": 1e20, "width": 1}, "items": [{"length": 1, "width": 1}]}"#,
        )
        .unwrap();
        let err = req.into_search().unwrap_err();
        assert!(err.contains("exceeds the limit"), "unexpected error: {err}");
    }
}
