use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use thiserror::Error;
use tracing::{error, info};

use drybulk_algo::config::Settings;
use drybulk_algo::core::Matcher;
use drybulk_algo::models::RankingWeights;
use drybulk_algo::routes::{self, matches::AppState};
use drybulk_algo::services::DEFAULT_MATCH_CACHE_CAPACITY;

/// JSON error response for malformed payloads
#[derive(Debug, serde::Serialize, Error)]
#[error("{error}: {message}")]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST),
        )
        .content_type("application/json")
        .body(serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string()))
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(
    err: error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Drybulk Algo matching service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize matcher with the configured memoization bound
    let cache_capacity = settings
        .cache
        .capacity
        .unwrap_or(DEFAULT_MATCH_CACHE_CAPACITY);
    let matcher = Matcher::new(cache_capacity);

    info!("Matcher initialized (cache capacity: {} entries)", cache_capacity);

    // Ranking weights from configuration
    let weights = RankingWeights {
        size: settings.ranking.weights.size,
        laycan: settings.ranking.weights.laycan,
        rate: settings.ranking.weights.rate,
        port: settings.ranking.weights.port,
        age: settings.ranking.weights.age,
        charterer: settings.ranking.weights.charterer,
        cargo_type: settings.ranking.weights.cargo_type,
        port_efficiency: settings.ranking.weights.port_efficiency,
        historical_performance: settings.ranking.weights.historical_performance,
        market_trend: settings.ranking.weights.market_trend,
        geographic_proximity: settings.ranking.weights.geographic_proximity,
    };

    info!("Ranking weights: {:?}", weights);

    let proximity_radius_nm = settings
        .matching
        .proximity_radius_nm
        .unwrap_or(drybulk_algo::core::DEFAULT_PROXIMITY_RADIUS_NM);

    // Build application state
    let app_state = AppState {
        matcher,
        ranking_weights: weights,
        proximity_radius_nm,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
