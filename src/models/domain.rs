use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolved port coordinates from the static registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Vessel listing - a chartering opportunity circulated on the desk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselListing {
    pub name: String,
    pub imo: String,
    pub flag: String,
    #[serde(rename = "builtYear")]
    pub built_year: i32,
    pub dwt: f64,
    #[serde(rename = "vesselType", default)]
    pub vessel_type: Option<String>,
    #[serde(rename = "openPort")]
    pub open_port: String,
    #[serde(rename = "dischargePort", default)]
    pub discharge_port: Option<String>,
    #[serde(rename = "laycanStart")]
    pub laycan_start: NaiveDate,
    #[serde(rename = "laycanEnd")]
    pub laycan_end: NaiveDate,
    #[serde(rename = "freightRate")]
    pub freight_rate: f64,
    #[serde(rename = "rateUnit", default = "default_rate_unit")]
    pub rate_unit: String,
    #[serde(rename = "cargoType", default)]
    pub cargo_type: Option<String>,
    #[serde(rename = "cargoQuantity", default)]
    pub cargo_quantity: Option<f64>,
    #[serde(default)]
    pub gear: Option<String>,
    #[serde(rename = "iceClass", default)]
    pub ice_class: Option<String>,
    #[serde(rename = "specialClauses", default)]
    pub special_clauses: Option<String>,
    #[serde(rename = "chartererPreference", default)]
    pub charterer_preference: Option<String>,
}

impl VesselListing {
    /// Vessel age in years as of `today`, never negative
    pub fn age_years(&self, today: NaiveDate) -> i32 {
        (today.year() - self.built_year).max(0)
    }
}

fn default_rate_unit() -> String {
    "k/day".to_string()
}

/// Charter requirement - authored directly or produced by the extractor
///
/// Every matchable field is independently optional. `confidence_scores` is
/// populated only for extracted records and covers exactly the fields the
/// extractor filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CargoRequirement {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "vesselType", default)]
    pub vessel_type: Option<String>,
    #[serde(rename = "vesselSize", default)]
    pub vessel_size: Option<f64>,
    #[serde(rename = "loadPort", default)]
    pub load_port: Option<String>,
    #[serde(rename = "dischargePort", default)]
    pub discharge_port: Option<String>,
    #[serde(rename = "laycanStart", default)]
    pub laycan_start: Option<NaiveDate>,
    #[serde(rename = "laycanEnd", default)]
    pub laycan_end: Option<NaiveDate>,
    #[serde(rename = "targetRate", default)]
    pub target_rate: Option<f64>,
    #[serde(rename = "maxAge", default)]
    pub max_age: Option<i32>,
    #[serde(rename = "gearRequirement", default)]
    pub gear_requirement: Option<String>,
    #[serde(rename = "iceClass", default)]
    pub ice_class: Option<String>,
    #[serde(rename = "flagPreference", default)]
    pub flag_preference: Option<String>,
    #[serde(rename = "specialClauses", default)]
    pub special_clauses: Option<String>,
    #[serde(rename = "chartererPreference", default)]
    pub charterer_preference: Option<String>,
    #[serde(rename = "cargoQuantity", default)]
    pub cargo_quantity: Option<f64>,
    #[serde(rename = "cargoType", default)]
    pub cargo_type: Option<String>,
    #[serde(rename = "confidenceScores", default)]
    pub confidence_scores: HashMap<String, f64>,
}

/// Listing annotated with its compatibility percentage (Mode A output)
///
/// The engine returns annotated copies instead of writing a score back onto
/// caller-owned listings, so cached results cannot be corrupted by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredListing {
    #[serde(flatten)]
    pub listing: VesselListing,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
}

/// Listing annotated with its weight-normalized composite score (Mode B output)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedListing {
    #[serde(flatten)]
    pub listing: VesselListing,
    #[serde(rename = "compositeScore")]
    pub composite_score: f64,
}

/// Ranking weights for the continuous weighted ranking mode
///
/// The last five dimensions are carried in the weight vector but scored at
/// the neutral 50 until their data feeds exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingWeights {
    pub size: f64,
    pub laycan: f64,
    pub rate: f64,
    pub port: f64,
    pub age: f64,
    pub charterer: f64,
    #[serde(rename = "cargoType")]
    pub cargo_type: f64,
    #[serde(rename = "portEfficiency")]
    pub port_efficiency: f64,
    #[serde(rename = "historicalPerformance")]
    pub historical_performance: f64,
    #[serde(rename = "marketTrend")]
    pub market_trend: f64,
    #[serde(rename = "geographicProximity")]
    pub geographic_proximity: f64,
}

impl RankingWeights {
    /// Weights must be finite and non-negative to produce a meaningful
    /// normalized composite
    pub fn is_valid(&self) -> bool {
        self.as_array()
            .iter()
            .all(|weight| weight.is_finite() && *weight >= 0.0)
    }

    pub fn as_array(&self) -> [f64; 11] {
        [
            self.size,
            self.laycan,
            self.rate,
            self.port,
            self.age,
            self.charterer,
            self.cargo_type,
            self.port_efficiency,
            self.historical_performance,
            self.market_trend,
            self.geographic_proximity,
        ]
    }
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            size: 0.20,
            laycan: 0.15,
            rate: 0.20,
            port: 0.10,
            age: 0.10,
            charterer: 0.05,
            cargo_type: 0.05,
            port_efficiency: 0.05,
            historical_performance: 0.04,
            market_trend: 0.03,
            geographic_proximity: 0.03,
        }
    }
}

/// Charterer-side preferences for ranking a listing pool
///
/// Every field is optional; an unset preference leaves its dimension at the
/// neutral sub-score and never moves the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RankingPreferences {
    #[serde(rename = "preferredSizeMin", default)]
    pub preferred_size_min: Option<f64>,
    #[serde(rename = "preferredSizeMax", default)]
    pub preferred_size_max: Option<f64>,
    #[serde(rename = "targetLaycan", default)]
    pub target_laycan: Option<NaiveDate>,
    #[serde(rename = "maxRate", default)]
    pub max_rate: Option<f64>,
    #[serde(rename = "preferredPorts", default)]
    pub preferred_ports: Vec<String>,
    #[serde(rename = "maxAge", default)]
    pub max_age: Option<i32>,
    #[serde(rename = "preferredCharterers", default)]
    pub preferred_charterers: Vec<String>,
}
