use chrono::{Duration, NaiveDate, Utc};
use std::cmp::Ordering;

use crate::core::ports::port_region;
use crate::models::{CargoRequirement, ScoredListing, VesselListing};
use crate::services::cache::{CacheKey, MatchCache, DEFAULT_MATCH_CACHE_CAPACITY};

/// Minimum compatibility percentage for a listing to be returned
const SCORE_THRESHOLD: f64 = 60.0;
/// Retrieval returns at most this many listings
const MAX_RESULTS: usize = 3;
/// Grace applied to the requirement laycan before a no-overlap reject
const LAYCAN_BUFFER_DAYS: i64 = 5;

// Per-dimension weights. Graduated dimensions credit 100/70/50 percent of
// their weight, tolerance-band dimensions 100/80/53.3 percent.
const TYPE_WEIGHT: f64 = 10.0;
const SIZE_WEIGHT: f64 = 15.0;
const PORT_WEIGHT: f64 = 10.0;
const LAYCAN_WEIGHT: f64 = 15.0;
const RATE_WEIGHT: f64 = 15.0;
const AGE_WEIGHT: f64 = 10.0;
const EXACT_WEIGHT: f64 = 5.0;
const QUANTITY_WEIGHT: f64 = 15.0;
const CARGO_TYPE_WEIGHT: f64 = 10.0;

/// Tolerance bands as relative deviations: full credit, 80%, 53.3%
const SIZE_BANDS: (f64, f64, f64) = (0.05, 0.10, 0.20);
const RATE_BANDS: (f64, f64, f64) = (0.05, 0.10, 0.15);

/// Result of a compatibility retrieval
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredListing>,
    pub total_candidates: usize,
}

/// Compatibility retrieval engine (Mode A)
///
/// Scores each candidate dimension by dimension, counting only dimensions
/// the requirement populates - an absent requirement field is neutral, not
/// penalizing. Tolerance-band violations and mismatches on the exact-match
/// dimensions reject the candidate outright.
#[derive(Debug, Clone)]
pub struct Matcher {
    cache: MatchCache,
}

impl Matcher {
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            cache: MatchCache::new(cache_capacity),
        }
    }

    /// Find the best matching listings for a requirement
    ///
    /// Returns at most 3 listings scoring at least 60%, annotated copies
    /// only. When the requirement names a target rate, results order by
    /// distance from that rate instead of raw percentage.
    pub fn find_matching_listings(
        &self,
        requirement: &CargoRequirement,
        pool: &[VesselListing],
    ) -> MatchResult {
        self.find_matching_listings_at(requirement, pool, Utc::now().date_naive())
    }

    /// Retrieval with an explicit "today", used for vessel-age evaluation
    pub fn find_matching_listings_at(
        &self,
        requirement: &CargoRequirement,
        pool: &[VesselListing],
        today: NaiveDate,
    ) -> MatchResult {
        let total_candidates = pool.len();
        let cache_key = CacheKey::matches(&requirement.id, pool.len());

        // Requirements without an identity cannot be told apart, so they
        // bypass the cache entirely
        if !requirement.id.is_empty() {
            if let Some(matches) = self.cache.get(&cache_key) {
                return MatchResult {
                    matches,
                    total_candidates,
                };
            }
        }

        let mut matches: Vec<ScoredListing> = pool
            .iter()
            .filter_map(|listing| {
                let score = score_listing(requirement, listing, today)?;
                (score >= SCORE_THRESHOLD).then(|| ScoredListing {
                    listing: listing.clone(),
                    match_score: score,
                })
            })
            .collect();

        matches.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(Ordering::Equal)
        });

        // Target-rate proximity overrides the percentage order
        if let Some(target) = requirement.target_rate {
            matches.sort_by(|a, b| {
                let delta_a = (a.listing.freight_rate - target).abs();
                let delta_b = (b.listing.freight_rate - target).abs();
                delta_a.partial_cmp(&delta_b).unwrap_or(Ordering::Equal)
            });
        }

        matches.truncate(MAX_RESULTS);

        if !requirement.id.is_empty() {
            self.cache.put(cache_key, matches.clone());
        }

        MatchResult {
            matches,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_CACHE_CAPACITY)
    }
}

/// Score one candidate against the requirement
///
/// `None` is a hard reject. An empty requirement accumulates nothing and
/// scores 0 - uninformative, but not rejected.
fn score_listing(
    requirement: &CargoRequirement,
    listing: &VesselListing,
    today: NaiveDate,
) -> Option<f64> {
    let mut match_score = 0.0;
    let mut max_score = 0.0;

    if let Some(wanted) = requirement.vessel_type.as_deref() {
        max_score += TYPE_WEIGHT;
        match_score += TYPE_WEIGHT * graduated_name_credit(wanted, listing.vessel_type.as_deref());
    }

    if let Some(size) = requirement.vessel_size {
        max_score += SIZE_WEIGHT;
        match_score += SIZE_WEIGHT * band_credit(listing.dwt, size, SIZE_BANDS)?;
    }

    if let Some(load) = requirement.load_port.as_deref() {
        max_score += PORT_WEIGHT;
        match_score += PORT_WEIGHT * port_credit(load, &listing.open_port);
    }

    if let Some(discharge) = requirement.discharge_port.as_deref() {
        max_score += PORT_WEIGHT;
        match_score += PORT_WEIGHT
            * listing
                .discharge_port
                .as_deref()
                .map_or(0.0, |actual| port_credit(discharge, actual));
    }

    if let (Some(start), Some(end)) = (requirement.laycan_start, requirement.laycan_end) {
        max_score += LAYCAN_WEIGHT;
        match_score +=
            LAYCAN_WEIGHT * laycan_credit(start, end, listing.laycan_start, listing.laycan_end)?;
    }

    if let Some(target) = requirement.target_rate {
        max_score += RATE_WEIGHT;
        match_score += RATE_WEIGHT * band_credit(listing.freight_rate, target, RATE_BANDS)?;
    }

    if let Some(max_age) = requirement.max_age {
        max_score += AGE_WEIGHT;
        match_score += AGE_WEIGHT * age_credit(listing.age_years(today), max_age)?;
    }

    if let Some(gear) = requirement.gear_requirement.as_deref() {
        max_score += EXACT_WEIGHT;
        match_score += EXACT_WEIGHT * exact_credit(gear, listing.gear.as_deref())?;
    }

    if let Some(ice_class) = requirement.ice_class.as_deref() {
        max_score += EXACT_WEIGHT;
        match_score += EXACT_WEIGHT * exact_credit(ice_class, listing.ice_class.as_deref())?;
    }

    if let Some(flag) = requirement.flag_preference.as_deref() {
        max_score += EXACT_WEIGHT;
        match_score += EXACT_WEIGHT * exact_credit(flag, Some(&listing.flag))?;
    }

    if let Some(clauses) = requirement.special_clauses.as_deref() {
        max_score += EXACT_WEIGHT;
        match_score += EXACT_WEIGHT * exact_credit(clauses, listing.special_clauses.as_deref())?;
    }

    if let Some(charterer) = requirement.charterer_preference.as_deref() {
        max_score += EXACT_WEIGHT;
        match_score +=
            EXACT_WEIGHT * exact_credit(charterer, listing.charterer_preference.as_deref())?;
    }

    if let Some(quantity) = requirement.cargo_quantity {
        max_score += QUANTITY_WEIGHT;
        // Unknown cargo affinity earns no credit but is not a reject
        if let Some(actual) = listing.cargo_quantity {
            match_score += QUANTITY_WEIGHT * band_credit(actual, quantity, RATE_BANDS)?;
        }
    }

    if let Some(cargo) = requirement.cargo_type.as_deref() {
        max_score += CARGO_TYPE_WEIGHT;
        match_score += CARGO_TYPE_WEIGHT * graduated_name_credit(cargo, listing.cargo_type.as_deref());
    }

    if max_score == 0.0 {
        return Some(0.0);
    }
    Some(match_score / max_score * 100.0)
}

/// Credit within relative tolerance bands; beyond the widest band is a
/// hard reject
fn band_credit(actual: f64, target: f64, bands: (f64, f64, f64)) -> Option<f64> {
    let deviation = ((actual - target) / target).abs();
    if !deviation.is_finite() {
        return None;
    }

    if deviation <= bands.0 {
        Some(1.0)
    } else if deviation <= bands.1 {
        Some(0.8)
    } else if deviation <= bands.2 {
        Some(8.0 / 15.0)
    } else {
        None
    }
}

/// Graduated credit for category-like names: exact, substring, shared
/// max/size family token. Never a reject.
fn graduated_name_credit(wanted: &str, actual: Option<&str>) -> f64 {
    let Some(actual) = actual else { return 0.0 };
    let wanted = wanted.trim().to_lowercase();
    let actual = actual.trim().to_lowercase();
    if wanted.is_empty() || actual.is_empty() {
        return 0.0;
    }

    if wanted == actual {
        return 1.0;
    }
    if wanted.contains(&actual) || actual.contains(&wanted) {
        return 0.7;
    }
    if (wanted.contains("max") && actual.contains("max"))
        || (wanted.contains("size") && actual.contains("size"))
    {
        return 0.5;
    }
    0.0
}

/// Graduated credit for a port pair: exact, substring, shared loading
/// region. Never a reject.
fn port_credit(wanted: &str, actual: &str) -> f64 {
    let wanted_lower = wanted.trim().to_lowercase();
    let actual_lower = actual.trim().to_lowercase();
    if wanted_lower.is_empty() || actual_lower.is_empty() {
        return 0.0;
    }

    if wanted_lower == actual_lower {
        return 1.0;
    }
    if wanted_lower.contains(&actual_lower) || actual_lower.contains(&wanted_lower) {
        return 0.7;
    }
    match (port_region(wanted), port_region(actual)) {
        (Some(region_a), Some(region_b)) if region_a == region_b => 0.5,
        _ => 0.0,
    }
}

/// Laycan credit: fully inside the requirement window, any overlap, or
/// overlap only within the buffered window. No overlap at all rejects.
///
/// Inverted ranges compare as empty windows and fall through to the
/// reject, never to arithmetic errors.
fn laycan_credit(
    req_start: NaiveDate,
    req_end: NaiveDate,
    listing_start: NaiveDate,
    listing_end: NaiveDate,
) -> Option<f64> {
    if listing_start >= req_start && listing_end <= req_end {
        return Some(1.0);
    }
    if listing_start <= req_end && listing_end >= req_start {
        return Some(0.8);
    }

    let buffered_start = req_start - Duration::days(LAYCAN_BUFFER_DAYS);
    let buffered_end = req_end + Duration::days(LAYCAN_BUFFER_DAYS);
    if listing_start <= buffered_end && listing_end >= buffered_start {
        return Some(8.0 / 15.0);
    }

    None
}

/// Vessel age against the required maximum, with two- and five-year grace
/// tiers before the reject
fn age_credit(age: i32, max_age: i32) -> Option<f64> {
    if age <= max_age {
        Some(1.0)
    } else if age <= max_age + 2 {
        Some(0.7)
    } else if age <= max_age + 5 {
        Some(0.5)
    } else {
        None
    }
}

/// Exact-match-or-reject dimensions carry no partial credit
fn exact_credit(wanted: &str, actual: Option<&str>) -> Option<f64> {
    let actual = actual?;
    if wanted.trim().eq_ignore_ascii_case(actual.trim()) {
        Some(1.0)
    } else {
        None
    }
}
