// Unit tests for Drybulk Algo

use chrono::NaiveDate;
use drybulk_algo::core::{
    extract_requirement_at, haversine_nm, in_proximity, port_distance_nm, proximity_score,
    rank_listings_at, resolve_port, DEFAULT_PROXIMITY_RADIUS_NM,
};
use drybulk_algo::models::{RankingPreferences, RankingWeights, VesselListing};

fn listing(name: &str, dwt: f64, rate: f64) -> VesselListing {
    VesselListing {
        name: name.to_string(),
        imo: "9700001".to_string(),
        flag: "Panama".to_string(),
        built_year: 2018,
        dwt,
        vessel_type: Some("Panamax".to_string()),
        open_port: "Qingdao".to_string(),
        discharge_port: None,
        laycan_start: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        laycan_end: NaiveDate::from_ymd_opt(2026, 6, 10).unwrap(),
        freight_rate: rate,
        rate_unit: "k/day".to_string(),
        cargo_type: Some("coal".to_string()),
        cargo_quantity: None,
        gear: None,
        ice_class: None,
        special_clauses: None,
        charterer_preference: None,
    }
}

#[test]
fn test_distance_symmetry() {
    let pairs = [
        ("Qingdao", "Singapore"),
        ("Tubarao", "Rotterdam"),
        ("Port Hedland", "Gwangyang"),
    ];

    for (a, b) in pairs {
        let ab = port_distance_nm(a, b).expect("both ports resolve");
        let ba = port_distance_nm(b, a).expect("both ports resolve");
        assert!((ab - ba).abs() < 1e-9, "distance must be symmetric for {}/{}", a, b);
    }
}

#[test]
fn test_distance_identity() {
    let distance = port_distance_nm("Qingdao", "Qingdao").unwrap();
    assert!(distance < 1e-9);
}

#[test]
fn test_haversine_known_distance() {
    // Qingdao to Shanghai, roughly 300 NM
    let distance = haversine_nm(36.0671, 120.3826, 31.2304, 121.4737);
    assert!(distance > 270.0 && distance < 330.0, "got {}", distance);
}

#[test]
fn test_resolve_port_stages() {
    // Exact, case-insensitive, substring, word-level
    assert_eq!(resolve_port("Rotterdam").unwrap().name, "Rotterdam");
    assert_eq!(resolve_port("rotterdam").unwrap().name, "Rotterdam");
    assert_eq!(resolve_port("Rotterdam Maasvlakte").unwrap().name, "Rotterdam");
    assert_eq!(resolve_port("Hedland anchorage").unwrap().name, "Port Hedland");
    assert!(resolve_port("Atlantis").is_none());
}

#[test]
fn test_proximity_score_text_and_unresolved() {
    // Identical text short-circuits to 100
    assert_eq!(proximity_score("Qingdao", "Qingdao", DEFAULT_PROXIMITY_RADIUS_NM), 100);
    // Unresolved left operand is neutral, never zero
    assert_eq!(proximity_score("Atlantis", "Qingdao", DEFAULT_PROXIMITY_RADIUS_NM), 50);
}

#[test]
fn test_proximity_score_bounded() {
    let pairs = [
        ("Qingdao", "Rizhao"),
        ("Qingdao", "Rotterdam"),
        ("Atlantis", "Nowhere"),
        ("Santos", "Paranagua"),
    ];

    for (a, b) in pairs {
        let score = proximity_score(a, b, DEFAULT_PROXIMITY_RADIUS_NM);
        assert!(score <= 100, "score {} out of range for {}/{}", score, a, b);
    }
}

#[test]
fn test_unresolved_never_in_proximity() {
    assert!(!in_proximity("Atlantis", "Qingdao", f64::MAX));
}

#[test]
fn test_laycan_rollover_forward() {
    // "Now" is past the window: both dates roll into next year
    let today = NaiveDate::from_ymd_opt(2026, 6, 11).unwrap();
    let req = extract_requirement_at("Laycan June 5-10", today);
    assert_eq!(req.laycan_start, NaiveDate::from_ymd_opt(2027, 6, 5));
    assert_eq!(req.laycan_end, NaiveDate::from_ymd_opt(2027, 6, 10));
}

#[test]
fn test_laycan_stays_in_current_year() {
    // "Now" is before the window: current year applies
    let today = NaiveDate::from_ymd_opt(2026, 6, 4).unwrap();
    let req = extract_requirement_at("Laycan June 5-10", today);
    assert_eq!(req.laycan_start, NaiveDate::from_ymd_opt(2026, 6, 5));
    assert_eq!(req.laycan_end, NaiveDate::from_ymd_opt(2026, 6, 10));
}

#[test]
fn test_extraction_never_fails_on_noise() {
    let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
    for text in ["", "   ", "no chartering content here", "!!!###"] {
        let req = extract_requirement_at(text, today);
        assert!(req.confidence_scores.is_empty(), "noise input must stay empty: {:?}", text);
    }
}

#[test]
fn test_extraction_full_message() {
    let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
    let req = extract_requirement_at(
        "Looking for a Kamsarmax abt 82k, 70k mt coal from Newcastle to Gwangyang, \
         laycan June 5-10, rate idea $18.5k/day, max age 15, geared, Panama flag",
        today,
    );

    assert_eq!(req.vessel_type.as_deref(), Some("Kamsarmax"));
    assert_eq!(req.vessel_size, Some(82000.0));
    assert_eq!(req.cargo_quantity, Some(70000.0));
    assert_eq!(req.cargo_type.as_deref(), Some("coal"));
    assert_eq!(req.load_port.as_deref(), Some("Newcastle"));
    assert_eq!(req.discharge_port.as_deref(), Some("Gwangyang"));
    assert_eq!(req.laycan_start, NaiveDate::from_ymd_opt(2026, 6, 5));
    assert_eq!(req.target_rate, Some(18.5));
    assert_eq!(req.max_age, Some(15));
    assert_eq!(req.gear_requirement.as_deref(), Some("geared"));
    assert_eq!(req.flag_preference.as_deref(), Some("Panama"));

    // Every populated field carries a confidence entry
    for key in [
        "vesselType",
        "vesselSize",
        "cargoQuantity",
        "cargoType",
        "loadPort",
        "dischargePort",
        "laycan",
        "targetRate",
        "maxAge",
        "gearRequirement",
        "flagPreference",
    ] {
        let confidence = req
            .confidence_scores
            .get(key)
            .unwrap_or_else(|| panic!("missing confidence for {}", key));
        assert!(*confidence > 0.0 && *confidence <= 1.0);
    }
}

#[test]
fn test_neutral_default_ranking() {
    let today = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
    let weights = RankingWeights::default();
    let preferences = RankingPreferences::default();

    let pool = vec![
        listing("Small Old", 28000.0, 35.0),
        listing("Large New", 180000.0, 12.0),
        listing("Mid", 76000.0, 20.0),
    ];

    let ranked = rank_listings_at(&pool, &weights, &preferences, today);
    for entry in &ranked {
        assert!(
            (entry.composite_score - ranked[0].composite_score).abs() < 1e-9,
            "empty preferences must score every listing identically"
        );
    }
}

#[test]
fn test_ranking_scores_bounded() {
    let today = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
    let weights = RankingWeights::default();
    let preferences = RankingPreferences {
        preferred_size_min: Some(70000.0),
        preferred_size_max: Some(80000.0),
        target_laycan: NaiveDate::from_ymd_opt(2026, 6, 1),
        max_rate: Some(18.0),
        preferred_ports: vec!["Qingdao".to_string()],
        max_age: Some(5),
        preferred_charterers: vec!["Cargill".to_string()],
    };

    let pool = vec![
        listing("A", 28000.0, 35.0),
        listing("B", 180000.0, 12.0),
        listing("C", 76000.0, 20.0),
    ];

    for entry in rank_listings_at(&pool, &weights, &preferences, today) {
        assert!(entry.composite_score >= 0.0 && entry.composite_score <= 100.0);
    }
}
