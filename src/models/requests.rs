use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{CargoRequirement, RankingPreferences, RankingWeights, VesselListing};

/// Request to find matching listings for a requirement
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    pub requirement: CargoRequirement,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub listings: Vec<VesselListing>,
}

/// Request to rank a listing pool by preference fit
///
/// Weight overrides are checked for non-negativity in the handler; omitted
/// weights fall back to the configured defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankListingsRequest {
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub listings: Vec<VesselListing>,
    #[serde(default)]
    pub weights: Option<RankingWeights>,
    #[serde(default)]
    pub preferences: RankingPreferences,
}

/// Request to extract a structured requirement from message text
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExtractRequest {
    #[validate(length(max = 20000))]
    pub text: String,
}

/// Query parameters for the port proximity endpoint
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProximityQuery {
    #[validate(length(min = 1))]
    pub from: String,
    #[validate(length(min = 1))]
    pub to: String,
    #[serde(rename = "radiusNm", default)]
    pub radius_nm: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_proximity_query_rejected() {
        let query = ProximityQuery {
            from: String::new(),
            to: "Qingdao".to_string(),
            radius_nm: None,
        };

        assert!(query.validate().is_err());
    }

    #[test]
    fn test_proximity_query_accepted() {
        let query = ProximityQuery {
            from: "Qingdao".to_string(),
            to: "Rizhao".to_string(),
            radius_nm: Some(300.0),
        };

        assert!(query.validate().is_ok());
    }
}
