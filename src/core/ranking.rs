use chrono::{NaiveDate, Utc};
use std::cmp::Ordering;

use crate::models::{RankedListing, RankingPreferences, RankingWeights, VesselListing};

/// Sub-score used whenever a preference is unset; absence of preference
/// must never move the ranking
const NEUTRAL_SCORE: f64 = 50.0;

/// Rank a listing pool by weighted preference fit (Mode B)
///
/// Every listing comes back annotated with a weight-normalized composite
/// score in [0, 100], sorted descending. No listing is ever dropped.
pub fn rank_listings(
    pool: &[VesselListing],
    weights: &RankingWeights,
    preferences: &RankingPreferences,
) -> Vec<RankedListing> {
    rank_listings_at(pool, weights, preferences, Utc::now().date_naive())
}

/// Ranking with an explicit "today", used for vessel-age fit
pub fn rank_listings_at(
    pool: &[VesselListing],
    weights: &RankingWeights,
    preferences: &RankingPreferences,
    today: NaiveDate,
) -> Vec<RankedListing> {
    let mut ranked: Vec<RankedListing> = pool
        .iter()
        .map(|listing| RankedListing {
            listing: listing.clone(),
            composite_score: composite_score(listing, weights, preferences, today),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.composite_score
            .partial_cmp(&a.composite_score)
            .unwrap_or(Ordering::Equal)
    });

    ranked
}

fn composite_score(
    listing: &VesselListing,
    weights: &RankingWeights,
    preferences: &RankingPreferences,
    today: NaiveDate,
) -> f64 {
    let sub_scores = [
        (size_fit(listing, preferences), weights.size),
        (laycan_fit(listing, preferences), weights.laycan),
        (rate_fit(listing, preferences), weights.rate),
        (port_fit(listing, preferences), weights.port),
        (age_fit(listing, preferences, today), weights.age),
        (charterer_fit(listing, preferences), weights.charterer),
        // Placeholder dimensions: carried in the weight vector, scored at
        // the neutral value until their data feeds exist
        (NEUTRAL_SCORE, weights.cargo_type),
        (NEUTRAL_SCORE, weights.port_efficiency),
        (NEUTRAL_SCORE, weights.historical_performance),
        (NEUTRAL_SCORE, weights.market_trend),
        (NEUTRAL_SCORE, weights.geographic_proximity),
    ];

    let weighted: f64 = sub_scores.iter().map(|(score, weight)| score * weight).sum();
    let maximum: f64 = sub_scores.iter().map(|(_, weight)| 100.0 * weight).sum();

    if maximum > 0.0 {
        weighted / maximum * 100.0
    } else {
        0.0
    }
}

/// Full credit inside the preferred size range, linear decay with relative
/// distance from the nearer bound outside it
fn size_fit(listing: &VesselListing, preferences: &RankingPreferences) -> f64 {
    let (Some(min), Some(max)) = (
        preferences.preferred_size_min,
        preferences.preferred_size_max,
    ) else {
        return NEUTRAL_SCORE;
    };

    if listing.dwt >= min && listing.dwt <= max {
        return 100.0;
    }

    let nearer_bound = if listing.dwt < min { min } else { max };
    if nearer_bound <= 0.0 {
        return 0.0;
    }
    let deviation_pct = (listing.dwt - nearer_bound).abs() / nearer_bound * 100.0;
    (100.0 - deviation_pct * 2.0).max(0.0)
}

/// 100 minus 2 points per day between the listing's opening date and the
/// target laycan, floored at 0
fn laycan_fit(listing: &VesselListing, preferences: &RankingPreferences) -> f64 {
    let Some(target) = preferences.target_laycan else {
        return NEUTRAL_SCORE;
    };

    let days_off = (listing.laycan_start - target).num_days().abs() as f64;
    (100.0 - 2.0 * days_off).max(0.0)
}

/// Full credit at or below budget, linear decay above it
fn rate_fit(listing: &VesselListing, preferences: &RankingPreferences) -> f64 {
    let Some(budget) = preferences.max_rate else {
        return NEUTRAL_SCORE;
    };

    if listing.freight_rate <= budget {
        return 100.0;
    }
    if budget <= 0.0 {
        return 0.0;
    }
    let over_pct = (listing.freight_rate - budget) / budget * 100.0;
    (100.0 - over_pct * 2.0).max(0.0)
}

/// 100 when the open port is on the preferred list, 20 otherwise
fn port_fit(listing: &VesselListing, preferences: &RankingPreferences) -> f64 {
    if preferences.preferred_ports.is_empty() {
        return NEUTRAL_SCORE;
    }

    let open_port = listing.open_port.trim();
    let preferred = preferences
        .preferred_ports
        .iter()
        .any(|port| port.trim().eq_ignore_ascii_case(open_port));
    if preferred {
        100.0
    } else {
        20.0
    }
}

/// Full credit at or below the preferred maximum age, 10 points off per
/// excess year
fn age_fit(listing: &VesselListing, preferences: &RankingPreferences, today: NaiveDate) -> f64 {
    let Some(max_age) = preferences.max_age else {
        return NEUTRAL_SCORE;
    };

    let age = listing.age_years(today);
    if age <= max_age {
        return 100.0;
    }
    (100.0 - 10.0 * (age - max_age) as f64).max(0.0)
}

/// 100 for a listed charterer, 50 otherwise
fn charterer_fit(listing: &VesselListing, preferences: &RankingPreferences) -> f64 {
    if preferences.preferred_charterers.is_empty() {
        return NEUTRAL_SCORE;
    }

    let on_list = listing.charterer_preference.as_deref().is_some_and(|charterer| {
        preferences
            .preferred_charterers
            .iter()
            .any(|preferred| preferred.trim().eq_ignore_ascii_case(charterer.trim()))
    });
    if on_list {
        100.0
    } else {
        50.0
    }
}
