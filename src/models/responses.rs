use serde::{Deserialize, Serialize};

use crate::models::domain::{CargoRequirement, RankedListing, ScoredListing};

/// Response for the find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub matches: Vec<ScoredListing>,
    #[serde(rename = "requirementId")]
    pub requirement_id: String,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response for the rank listings endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankListingsResponse {
    pub ranked: Vec<RankedListing>,
    #[serde(rename = "totalListings")]
    pub total_listings: usize,
}

/// Response for the requirement extraction endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub requirement: CargoRequirement,
    #[serde(rename = "fieldsPopulated")]
    pub fields_populated: usize,
}

/// Response for the port proximity endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProximityResponse {
    pub from: String,
    pub to: String,
    #[serde(rename = "distanceNm")]
    pub distance_nm: Option<f64>,
    #[serde(rename = "proximityScore")]
    pub proximity_score: u8,
    #[serde(rename = "inProximity")]
    pub in_proximity: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "portsLoaded")]
    pub ports_loaded: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
