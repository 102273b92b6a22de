// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CargoRequirement, PortLocation, RankedListing, RankingPreferences, RankingWeights,
    ScoredListing, VesselListing,
};
pub use requests::{ExtractRequest, FindMatchesRequest, ProximityQuery, RankListingsRequest};
pub use responses::{
    ErrorResponse, ExtractResponse, FindMatchesResponse, HealthResponse, ProximityResponse,
    RankListingsResponse,
};
