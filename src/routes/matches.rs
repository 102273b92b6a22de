use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::core::ports::{in_proximity, port_distance_nm, proximity_score, registry_size};
use crate::core::{extract_requirement, rank_listings, Matcher};
use crate::models::{
    ErrorResponse, ExtractRequest, ExtractResponse, FindMatchesRequest, FindMatchesResponse,
    HealthResponse, ProximityQuery, ProximityResponse, RankListingsRequest, RankListingsResponse,
    RankingWeights,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub ranking_weights: RankingWeights,
    pub proximity_radius_nm: f64,
}

/// Configure all matching-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/matches/rank", web::post().to(rank_pool))
        .route("/requirements/extract", web::post().to(extract))
        .route("/ports/proximity", web::get().to(port_proximity));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        ports_loaded: registry_size(),
    })
}

/// Find matching listings endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "requirement": { "id": "...", "vesselSize": 76000, "targetRate": 20 },
///   "listings": [ ... ]
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let mut requirement = req.requirement.clone();
    // An identity is needed for memoization; mint one for ad-hoc requests
    if requirement.id.is_empty() {
        requirement.id = Uuid::new_v4().to_string();
    }

    tracing::info!(
        "Finding matches for requirement {} over {} listings",
        requirement.id,
        req.listings.len()
    );

    let result = state.matcher.find_matching_listings(&requirement, &req.listings);

    tracing::info!(
        "Returning {} matches for requirement {} (from {} candidates)",
        result.matches.len(),
        requirement.id,
        result.total_candidates
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        matches: result.matches,
        requirement_id: requirement.id,
        total_candidates: result.total_candidates,
    })
}

/// Rank a listing pool endpoint
///
/// POST /api/v1/matches/rank
///
/// Request body:
/// ```json
/// {
///   "listings": [ ... ],
///   "weights": { "size": 0.2, ... },
///   "preferences": { "maxRate": 20, "preferredPorts": ["Qingdao"] }
/// }
/// ```
async fn rank_pool(
    state: web::Data<AppState>,
    req: web::Json<RankListingsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let weights = req.weights.unwrap_or(state.ranking_weights);
    if !weights.is_valid() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid weights".to_string(),
            message: "ranking weights must be finite and non-negative".to_string(),
            status_code: 400,
        });
    }

    let ranked = rank_listings(&req.listings, &weights, &req.preferences);

    tracing::debug!("Ranked {} listings", ranked.len());

    let total_listings = ranked.len();
    HttpResponse::Ok().json(RankListingsResponse {
        ranked,
        total_listings,
    })
}

/// Requirement extraction endpoint
///
/// POST /api/v1/requirements/extract
///
/// Request body:
/// ```json
/// { "text": "Looking for a Panamax 76k dwt, laycan June 5-10, $20k/day" }
/// ```
async fn extract(req: web::Json<ExtractRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let requirement = extract_requirement(&req.text);
    let fields_populated = requirement.confidence_scores.len();

    tracing::info!(
        "Extracted requirement {} with {} populated fields",
        requirement.id,
        fields_populated
    );

    HttpResponse::Ok().json(ExtractResponse {
        requirement,
        fields_populated,
    })
}

/// Port proximity endpoint
///
/// GET /api/v1/ports/proximity?from=Qingdao&to=Rizhao&radiusNm=500
async fn port_proximity(
    state: web::Data<AppState>,
    query: web::Query<ProximityQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let radius_nm = query.radius_nm.unwrap_or(state.proximity_radius_nm);
    if radius_nm <= 0.0 || !radius_nm.is_finite() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid radius".to_string(),
            message: "radiusNm must be a positive number".to_string(),
            status_code: 400,
        });
    }

    let distance_nm = port_distance_nm(&query.from, &query.to);
    let score = proximity_score(&query.from, &query.to, radius_nm);

    HttpResponse::Ok().json(ProximityResponse {
        from: query.from.clone(),
        to: query.to.clone(),
        distance_nm,
        proximity_score: score,
        in_proximity: in_proximity(&query.from, &query.to, radius_nm),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
            ports_loaded: registry_size(),
        };

        assert_eq!(response.status, "healthy");
        assert!(response.ports_loaded > 0);
    }
}
