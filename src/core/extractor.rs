use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

use crate::models::CargoRequirement;

// Fixed per-field confidence constants. Confidence records "field was found",
// not match strength, so it is keyed by field identity alone.
const CONF_VESSEL_TYPE: f64 = 0.85;
const CONF_VESSEL_SIZE: f64 = 0.90;
const CONF_PORTS: f64 = 0.80;
const CONF_LAYCAN: f64 = 0.75;
const CONF_RATE: f64 = 0.70;
const CONF_MAX_AGE: f64 = 0.80;
const CONF_GEAR: f64 = 0.85;
const CONF_ICE_CLASS: f64 = 0.90;
const CONF_FLAG: f64 = 0.75;
const CONF_CLAUSES: f64 = 0.60;
const CONF_CHARTERER: f64 = 0.70;
const CONF_CARGO_QUANTITY: f64 = 0.85;
const CONF_CARGO_TYPE: f64 = 0.80;

/// Dry-bulk vessel categories, smallest to largest
const VESSEL_CLASSES: &[&str] = &[
    "Handysize",
    "Handymax",
    "Supramax",
    "Ultramax",
    "Panamax",
    "Kamsarmax",
    "Post-Panamax",
    "Capesize",
    "Newcastlemax",
    "VLOC",
];

const MONTHS: &[(&str, &str)] = &[
    ("january", "jan"),
    ("february", "feb"),
    ("march", "mar"),
    ("april", "apr"),
    ("may", "may"),
    ("june", "jun"),
    ("july", "jul"),
    ("august", "aug"),
    ("september", "sep"),
    ("october", "oct"),
    ("november", "nov"),
    ("december", "dec"),
];

fn class_alternation() -> String {
    VESSEL_CLASSES
        .iter()
        .map(|c| c.to_lowercase().replace('-', "[- ]"))
        .collect::<Vec<_>>()
        .join("|")
}

// Each field carries an ordered pattern list; the first pattern that matches
// wins, so ordering encodes preference (an explicit phrasing beats a bare
// category mention).

static VESSEL_TYPE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let classes = class_alternation();
    vec![
        Regex::new(&format!(
            r"(?i)looking\s+for\s+(?:an?\s+)?({classes})"
        ))
        .unwrap(),
        Regex::new(&format!(
            r"(?i)\b({classes})\b\s+(?:bulk\s*carrier|bulker|vessel|tonnage)"
        ))
        .unwrap(),
        Regex::new(&format!(r"(?i)\b({classes})\b")).unwrap(),
    ]
});

static VESSEL_SIZE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*k\s*(?:dwt|dwcc|tonner)\b").unwrap(),
        Regex::new(r"(?i)(?:abt\.?|about|around)\s*(\d{2,3})\s*k\b").unwrap(),
        Regex::new(r"(?i)(\d{2,3})\s*k\s+(?:bulk\s*carrier|bulker|vessel|ship)").unwrap(),
    ]
});

static ROUTE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(
            r"(?i)\bfrom\s+([a-z][a-z .']*?)\s+to\s+([a-z][a-z .']+?)(?:\s+(?:laycan|laydays|loading|cargo|for|with|rate)\b|[,.;\n]|$)",
        )
        .unwrap(),
        Regex::new(
            r"(?i)\b([a-z][a-z .']{1,30}?)\s*(?:->|→)\s*([a-z][a-z .']{1,30}?)(?:\s+(?:laycan|laydays|loading|cargo|for|with|rate)\b|[,.;\n]|$)",
        )
        .unwrap(),
        Regex::new(
            r"(?i)\b([a-z][a-z .']{1,30}?)\s+[-–]\s+([a-z][a-z .']{1,30}?)(?:\s+(?:laycan|laydays|loading|cargo|for|with|rate)\b|[,.;\n]|$)",
        )
        .unwrap(),
    ]
});

static LAYCAN_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // "laycan June 5-10", "laycan: jun 5/10"
        Regex::new(r"(?i)laycan\s*:?\s*([a-z]{3,9})\.?\s*(\d{1,2})\s*[-–/]\s*(\d{1,2})").unwrap(),
        // "laycan 5-10 June"
        Regex::new(r"(?i)laycan\s*:?\s*(\d{1,2})\s*[-–/]\s*(\d{1,2})\s*([a-z]{3,9})").unwrap(),
        // bare "June 5-10"
        Regex::new(r"(?i)\b([a-z]{3,9})\.?\s+(\d{1,2})\s*[-–/]\s*(\d{1,2})\b").unwrap(),
    ]
});

static RATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\$?\s*(\d+(?:\.\d+)?)\s*k\s*(?:/|\s*per\s+)day").unwrap(),
        Regex::new(r"(?i)rate\s*(?:idea|guide)?\s*:?\s*\$?\s*(\d+(?:\.\d+)?)\s*k\b").unwrap(),
    ]
});

// A single list covers both build year and age-in-years; the two are told
// apart by capture length (4 digits = build year).
static AGE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)(?:built|blt)\.?\s*:?\s*(\d{4})\b").unwrap(),
        Regex::new(r"(?i)\b(\d{4})[- ]built\b").unwrap(),
        Regex::new(r"(?i)max(?:imum)?\s*age\s*:?\s*(\d{1,2})\b").unwrap(),
        Regex::new(r"(?i)\b(\d{1,2})\s*y(?:ea)?rs?\s*old\b").unwrap(),
        Regex::new(r"(?i)(?:under|below)\s+(\d{1,2})\s*y(?:ea)?rs?\b").unwrap(),
    ]
});

static GEAR_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(gearless)\b").unwrap(),
        Regex::new(r"(?i)\b(geared)\b").unwrap(),
        Regex::new(r"(?i)\b(\d+\s*x\s*\d+(?:\.\d+)?\s*(?:mt|t)?\s*cranes?)\b").unwrap(),
        Regex::new(r"(?i)\b(cranes?|grabs?|gear)\b").unwrap(),
    ]
});

static ICE_CLASS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)ice\s*class\s*:?\s*([0-9a-z]{1,3})\b").unwrap(),
        Regex::new(r"(?i)\bice[- ]classed?\s+([0-9a-z]{1,3})\b").unwrap(),
    ]
});

static FLAG_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b([a-z]{3,}(?:\s+islands?)?)[- ]flag(?:ged)?\b").unwrap(),
        Regex::new(r"(?i)flag\s*:?\s*([a-z][a-z ]{2,}?)(?:[,.;\n]|$)").unwrap(),
    ]
});

static CLAUSE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)subject\s+to\s+([^.;\n]+)").unwrap(),
        Regex::new(r"(?i)clauses?\s*:?\s*([^.;\n]+)").unwrap(),
        Regex::new(r"(?i)\b(no\s+(?:war\s+risk|ice)[^.;\n]*)").unwrap(),
    ]
});

static CHARTERER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)(?:charterers?|chtrs?|account)\s*:?\s+([a-z][a-z0-9 .&'-]+?)(?:\s*[,.;\n]|$)").unwrap(),
        Regex::new(r"(?i)\bfor\s+([a-z][a-z0-9 .&'-]+?)\s+account\b").unwrap(),
    ]
});

static CARGO_QUANTITY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // "70k mt" - the k group marks a thousands qualifier
        Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(k)\s*(?:mts?|tons?|tonnes?)\b").unwrap(),
        // "150,000 mt" / "150000 tons" - stems are never two digits
        Regex::new(r"(?i)(\d{1,3}(?:,\d{3})+|\d{4,})\s*(?:mts?|tons?|tonnes?)\b").unwrap(),
    ]
});

static CARGO_TYPE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(
            r"(?i)\d+(?:[.,]\d+)?\s*k?\s*(?:mts?|tons?|tonnes?)\s+of\s+([a-z][a-z ]{2,}?)(?:\s+(?:from|to|ex|for|laycan|loading|discharging)\b|[,.;\n]|$)",
        )
        .unwrap(),
        Regex::new(r"(?i)cargo\s*:\s*([a-z][a-z ]{2,}?)(?:[,.;\n]|$)").unwrap(),
        Regex::new(
            r"(?i)\b(iron\s+ore|coal|grains?|wheat|corn|soy\s*beans?|bauxite|alumina|fertilizers?|cement|steel|sugar|scrap)\b",
        )
        .unwrap(),
    ]
});

/// Apply patterns in priority order, returning the first capture group of the
/// first pattern that matches
fn first_capture(text: &str, patterns: &[Regex]) -> Option<String> {
    patterns.iter().find_map(|re| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    })
}

/// Apply patterns in priority order, returning all capture groups of the
/// first pattern that matches (for multi-part fields: routes, date ranges)
fn all_captures(text: &str, patterns: &[Regex]) -> Option<Vec<String>> {
    patterns.iter().find_map(|re| {
        re.captures(text).map(|caps| {
            caps.iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str().trim().to_string())
                .collect()
        })
    })
}

/// Extract a structured charter requirement from a free-text message
///
/// Never fails: unmatched fields stay empty, and the confidence map covers
/// exactly the fields that were populated. Empty or unparseable input yields
/// a record with nothing but a fresh id.
pub fn extract_requirement(text: &str) -> CargoRequirement {
    extract_requirement_at(text, Utc::now().date_naive())
}

/// Extraction with an explicit "today", used for laycan year resolution
pub fn extract_requirement_at(text: &str, today: NaiveDate) -> CargoRequirement {
    let mut req = CargoRequirement {
        id: Uuid::new_v4().to_string(),
        ..CargoRequirement::default()
    };

    if let Some(raw) = first_capture(text, &VESSEL_TYPE_PATTERNS) {
        if let Some(class) = canonical_class(&raw) {
            req.vessel_type = Some(class.to_string());
            req.confidence_scores.insert("vesselType".into(), CONF_VESSEL_TYPE);
        }
    }

    if let Some(raw) = first_capture(text, &VESSEL_SIZE_PATTERNS) {
        if let Ok(thousands) = raw.parse::<f64>() {
            req.vessel_size = Some(thousands * 1000.0);
            req.confidence_scores.insert("vesselSize".into(), CONF_VESSEL_SIZE);
        }
    }

    if let Some(parts) = all_captures(text, &ROUTE_PATTERNS) {
        if parts.len() == 2 {
            req.load_port = Some(parts[0].clone());
            req.discharge_port = Some(parts[1].clone());
            req.confidence_scores.insert("loadPort".into(), CONF_PORTS);
            req.confidence_scores.insert("dischargePort".into(), CONF_PORTS);
        }
    }

    if let Some(parts) = all_captures(text, &LAYCAN_PATTERNS) {
        if let Some((start, end)) = parse_laycan(&parts, today) {
            req.laycan_start = Some(start);
            req.laycan_end = Some(end);
            req.confidence_scores.insert("laycan".into(), CONF_LAYCAN);
        }
    }

    if let Some(raw) = first_capture(text, &RATE_PATTERNS) {
        // k/day figures stay in thousands
        if let Ok(rate) = raw.parse::<f64>() {
            req.target_rate = Some(rate);
            req.confidence_scores.insert("targetRate".into(), CONF_RATE);
        }
    }

    if let Some(raw) = first_capture(text, &AGE_PATTERNS) {
        if let Some(age) = parse_max_age(&raw, today) {
            req.max_age = Some(age);
            req.confidence_scores.insert("maxAge".into(), CONF_MAX_AGE);
        }
    }

    if let Some(raw) = first_capture(text, &GEAR_PATTERNS) {
        req.gear_requirement = Some(normalize_gear(&raw).to_string());
        req.confidence_scores.insert("gearRequirement".into(), CONF_GEAR);
    }

    if let Some(raw) = first_capture(text, &ICE_CLASS_PATTERNS) {
        req.ice_class = Some(raw.to_uppercase());
        req.confidence_scores.insert("iceClass".into(), CONF_ICE_CLASS);
    }

    if let Some(raw) = first_capture(text, &FLAG_PATTERNS) {
        req.flag_preference = Some(raw);
        req.confidence_scores.insert("flagPreference".into(), CONF_FLAG);
    }

    if let Some(raw) = first_capture(text, &CLAUSE_PATTERNS) {
        req.special_clauses = Some(raw);
        req.confidence_scores.insert("specialClauses".into(), CONF_CLAUSES);
    }

    if let Some(raw) = first_capture(text, &CHARTERER_PATTERNS) {
        req.charterer_preference = Some(raw);
        req.confidence_scores.insert("chartererPreference".into(), CONF_CHARTERER);
    }

    if let Some(parts) = all_captures(text, &CARGO_QUANTITY_PATTERNS) {
        if let Some(first) = parts.first() {
            if let Ok(quantity) = first.replace(',', "").parse::<f64>() {
                // a "k" qualifier before the unit means thousands
                let multiplier = if parts.len() > 1 { 1000.0 } else { 1.0 };
                req.cargo_quantity = Some(quantity * multiplier);
                req.confidence_scores.insert("cargoQuantity".into(), CONF_CARGO_QUANTITY);
            }
        }
    }

    if let Some(raw) = first_capture(text, &CARGO_TYPE_PATTERNS) {
        req.cargo_type = Some(raw.to_lowercase());
        req.confidence_scores.insert("cargoType".into(), CONF_CARGO_TYPE);
    }

    req
}

/// Map a raw category mention onto the fixed vessel-class vocabulary
fn canonical_class(raw: &str) -> Option<&'static str> {
    let folded = raw.to_lowercase().replace(' ', "-");
    VESSEL_CLASSES
        .iter()
        .copied()
        .find(|class| class.to_lowercase() == folded)
}

/// Resolve a month mention: direct full/abbreviated lookup, then substring
/// fallback in both directions, defaulting to the current calendar month
fn resolve_month(raw: &str, today: NaiveDate) -> u32 {
    let query = raw.trim().to_lowercase();

    for (index, (full, abbr)) in MONTHS.iter().enumerate() {
        if query == *full || query == *abbr {
            return index as u32 + 1;
        }
    }
    for (index, (full, _)) in MONTHS.iter().enumerate() {
        if full.contains(&query) || query.contains(full) {
            return index as u32 + 1;
        }
    }

    today.month()
}

/// Build the laycan window from captured parts (one month token, two days)
///
/// Year rule: assume the current year; when the resulting start has already
/// passed, roll both dates forward by exactly one year.
fn parse_laycan(parts: &[String], today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let mut month_raw: Option<&str> = None;
    let mut days: Vec<u32> = Vec::new();

    for part in parts {
        match part.parse::<u32>() {
            Ok(day) => days.push(day),
            Err(_) => month_raw = Some(part.as_str()),
        }
    }

    let (month_raw, [day_start, day_end]) = (month_raw?, <[u32; 2]>::try_from(days).ok()?);
    let month = resolve_month(month_raw, today);

    let start = NaiveDate::from_ymd_opt(today.year(), month, day_start)?;
    let end = NaiveDate::from_ymd_opt(today.year(), month, day_end)?;

    if start < today {
        let start = NaiveDate::from_ymd_opt(today.year() + 1, month, day_start)?;
        let end = NaiveDate::from_ymd_opt(today.year() + 1, month, day_end)?;
        return Some((start, end));
    }

    Some((start, end))
}

/// Disambiguate a captured age figure by length: 4 digits is a build year,
/// 1-2 digits is an age in years
fn parse_max_age(raw: &str, today: NaiveDate) -> Option<i32> {
    let value = raw.parse::<i32>().ok()?;
    if raw.len() == 4 {
        Some((today.year() - value).max(0))
    } else {
        Some(value)
    }
}

/// Collapse any crane/gear/grab mention into the two-value gear vocabulary
fn normalize_gear(raw: &str) -> &'static str {
    if raw.to_lowercase().contains("gearless") {
        "gearless"
    } else {
        "geared"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    #[test]
    fn test_extract_vessel_type_and_size() {
        let req = extract_requirement_at(
            "Looking for a Panamax around 76k dwt for grain",
            fixed_today(),
        );
        assert_eq!(req.vessel_type.as_deref(), Some("Panamax"));
        assert_eq!(req.vessel_size, Some(76000.0));
        assert_eq!(req.confidence_scores.get("vesselType"), Some(&0.85));
        assert_eq!(req.confidence_scores.get("vesselSize"), Some(&0.90));
    }

    #[test]
    fn test_extract_route() {
        let req = extract_requirement_at(
            "Cargo moves from Tubarao to Qingdao, laycan June 5-10",
            fixed_today(),
        );
        assert_eq!(req.load_port.as_deref(), Some("Tubarao"));
        assert_eq!(req.discharge_port.as_deref(), Some("Qingdao"));
    }

    #[test]
    fn test_extract_route_arrow() {
        let req = extract_requirement_at("Newcastle -> Gwangyang, 130k mt coal", fixed_today());
        assert_eq!(req.load_port.as_deref(), Some("Newcastle"));
        assert_eq!(req.discharge_port.as_deref(), Some("Gwangyang"));
    }

    #[test]
    fn test_laycan_current_year() {
        // Today is March 15, 2026; June has not passed yet
        let req = extract_requirement_at("laycan June 5-10", fixed_today());
        assert_eq!(req.laycan_start, NaiveDate::from_ymd_opt(2026, 6, 5));
        assert_eq!(req.laycan_end, NaiveDate::from_ymd_opt(2026, 6, 10));
    }

    #[test]
    fn test_laycan_rolls_over_when_passed() {
        // Today is July 1, 2026; June 5 is behind us
        let today = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let req = extract_requirement_at("laycan June 5-10", today);
        assert_eq!(req.laycan_start, NaiveDate::from_ymd_opt(2027, 6, 5));
        assert_eq!(req.laycan_end, NaiveDate::from_ymd_opt(2027, 6, 10));
    }

    #[test]
    fn test_laycan_days_first_ordering() {
        let req = extract_requirement_at("laycan 5-10 June", fixed_today());
        assert_eq!(req.laycan_start, NaiveDate::from_ymd_opt(2026, 6, 5));
        assert_eq!(req.laycan_end, NaiveDate::from_ymd_opt(2026, 6, 10));
    }

    #[test]
    fn test_laycan_abbreviated_month() {
        let req = extract_requirement_at("laycan jun 5/10", fixed_today());
        assert_eq!(req.laycan_start, NaiveDate::from_ymd_opt(2026, 6, 5));
    }

    #[test]
    fn test_rate_stays_in_thousands() {
        let req = extract_requirement_at("rate idea $20k/day", fixed_today());
        assert_eq!(req.target_rate, Some(20.0));
    }

    #[test]
    fn test_age_from_build_year() {
        let req = extract_requirement_at("built 2015 or younger", fixed_today());
        assert_eq!(req.max_age, Some(11));
    }

    #[test]
    fn test_age_direct() {
        let req = extract_requirement_at("max age 12", fixed_today());
        assert_eq!(req.max_age, Some(12));
    }

    #[test]
    fn test_gear_normalization() {
        let geared = extract_requirement_at("needs 4 x 30 mt cranes", fixed_today());
        assert_eq!(geared.gear_requirement.as_deref(), Some("geared"));

        let gearless = extract_requirement_at("gearless tonnage acceptable", fixed_today());
        assert_eq!(gearless.gear_requirement.as_deref(), Some("gearless"));
    }

    #[test]
    fn test_ice_class_and_flag() {
        let req = extract_requirement_at(
            "ice class 1A preferred, Panama flag",
            fixed_today(),
        );
        assert_eq!(req.ice_class.as_deref(), Some("1A"));
        assert_eq!(req.flag_preference.as_deref(), Some("Panama"));
    }

    #[test]
    fn test_cargo_quantity_k_multiplier() {
        let req = extract_requirement_at("70k mt coal stems", fixed_today());
        assert_eq!(req.cargo_quantity, Some(70000.0));

        let plain = extract_requirement_at("150,000 mt of iron ore", fixed_today());
        assert_eq!(plain.cargo_quantity, Some(150000.0));
    }

    #[test]
    fn test_cargo_type() {
        let req = extract_requirement_at("150,000 mt of iron ore from Tubarao", fixed_today());
        assert_eq!(req.cargo_type.as_deref(), Some("iron ore"));
    }

    #[test]
    fn test_empty_input_yields_empty_record() {
        let req = extract_requirement_at("", fixed_today());
        assert!(req.vessel_type.is_none());
        assert!(req.vessel_size.is_none());
        assert!(req.laycan_start.is_none());
        assert!(req.confidence_scores.is_empty());
        assert!(!req.id.is_empty());
    }

    #[test]
    fn test_confidence_covers_only_populated_fields() {
        let req = extract_requirement_at("Looking for a Capesize", fixed_today());
        assert_eq!(req.confidence_scores.len(), 1);
        assert!(req.confidence_scores.contains_key("vesselType"));
    }

    #[test]
    fn test_month_fallback_substring() {
        assert_eq!(resolve_month("sept", fixed_today()), 9);
        assert_eq!(resolve_month("June", fixed_today()), 6);
        // Nothing matches: default to the current calendar month
        assert_eq!(resolve_month("zzz", fixed_today()), 3);
    }
}
