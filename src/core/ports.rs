use crate::core::distance::haversine_nm;
use crate::models::PortLocation;

/// Default radius used when scoring port proximity
pub const DEFAULT_PROXIMITY_RADIUS_NM: f64 = 500.0;

/// Static port registry: canonical name, loading region, latitude, longitude.
///
/// Covers the major dry-bulk load/discharge areas. The table is compiled in
/// and never mutated at runtime.
const PORTS: &[(&str, &str, f64, f64)] = &[
    // China
    ("Qingdao", "China", 36.0671, 120.3826),
    ("Shanghai", "China", 31.2304, 121.4737),
    ("Ningbo", "China", 29.8683, 121.5440),
    ("Tianjin", "China", 38.9789, 117.7694),
    ("Dalian", "China", 38.9140, 121.6147),
    ("Rizhao", "China", 35.4164, 119.5269),
    ("Caofeidian", "China", 38.9500, 118.5000),
    ("Fangcheng", "China", 21.6146, 108.3550),
    ("Zhoushan", "China", 30.0160, 122.1070),
    // Japan
    ("Kashima", "Japan", 35.9300, 140.6900),
    ("Chiba", "Japan", 35.6073, 140.1063),
    ("Nagoya", "Japan", 35.0833, 136.8833),
    ("Mizushima", "Japan", 34.5000, 133.7500),
    ("Oita", "Japan", 33.2382, 131.6126),
    // Korea
    ("Pohang", "Korea", 36.0190, 129.3435),
    ("Gwangyang", "Korea", 34.9407, 127.6956),
    ("Incheon", "Korea", 37.4563, 126.7052),
    ("Busan", "Korea", 35.1796, 129.0756),
    // Australia
    ("Port Hedland", "Australia", -20.3111, 118.5753),
    ("Dampier", "Australia", -20.6625, 116.7076),
    ("Port Walcott", "Australia", -20.5897, 117.1886),
    ("Newcastle", "Australia", -32.9283, 151.7817),
    ("Gladstone", "Australia", -23.8490, 151.2630),
    ("Hay Point", "Australia", -21.2833, 149.3000),
    ("Abbot Point", "Australia", -19.8833, 148.0833),
    // Brazil
    ("Tubarao", "Brazil", -20.2854, -40.2464),
    ("Ponta da Madeira", "Brazil", -2.5667, -44.3667),
    ("Itaqui", "Brazil", -2.5783, -44.3672),
    ("Santos", "Brazil", -23.9608, -46.3336),
    ("Paranagua", "Brazil", -25.5063, -48.5114),
    ("Itaguai", "Brazil", -22.9236, -43.8372),
    // US Gulf / East Coast
    ("New Orleans", "US Gulf", 29.9511, -90.0715),
    ("Houston", "US Gulf", 29.7604, -95.3698),
    ("Mobile", "US Gulf", 30.6954, -88.0399),
    ("Baltimore", "US East Coast", 39.2904, -76.6122),
    ("Norfolk", "US East Coast", 36.8508, -76.2859),
    ("Hampton Roads", "US East Coast", 36.9312, -76.3452),
    // Europe
    ("Rotterdam", "Europe", 51.9225, 4.4792),
    ("Amsterdam", "Europe", 52.3676, 4.9041),
    ("Hamburg", "Europe", 53.5511, 9.9937),
    ("Immingham", "Europe", 53.6317, -0.1876),
    ("Gdansk", "Europe", 54.3520, 18.6466),
    ("Dunkirk", "Europe", 51.0344, 2.3768),
    ("Taranto", "Europe", 40.4644, 17.2470),
    // Southeast Asia
    ("Singapore", "Southeast Asia", 1.2644, 103.8220),
    ("Port Klang", "Southeast Asia", 3.0000, 101.3929),
    ("Cigading", "Southeast Asia", -5.9333, 106.0167),
    ("Map Ta Phut", "Southeast Asia", 12.6718, 101.1535),
    ("Ho Chi Minh", "Southeast Asia", 10.7769, 106.7009),
    // India
    ("Paradip", "India", 20.2647, 86.6947),
    ("Visakhapatnam", "India", 17.6868, 83.2185),
    ("Mundra", "India", 22.8394, 69.7219),
    ("Kandla", "India", 23.0333, 70.2167),
    ("Chennai", "India", 13.0827, 80.2707),
    ("Mormugao", "India", 15.4100, 73.8000),
    ("Krishnapatnam", "India", 14.2500, 80.1167),
    // Black Sea
    ("Novorossiysk", "Black Sea", 44.7239, 37.7686),
    ("Odessa", "Black Sea", 46.4825, 30.7233),
    ("Constanta", "Black Sea", 44.1598, 28.6348),
    ("Yuzhny", "Black Sea", 46.6236, 31.1094),
    ("Varna", "Black Sea", 43.2141, 27.9147),
    // South Africa
    ("Richards Bay", "South Africa", -28.7807, 32.0383),
    ("Saldanha Bay", "South Africa", -33.0117, 17.9442),
    ("Durban", "South Africa", -29.8587, 31.0218),
];

/// Number of ports in the registry
pub fn registry_size() -> usize {
    PORTS.len()
}

/// Resolve a free-text port name to registry coordinates
///
/// Resolution order, first hit wins:
/// 1. Exact case-sensitive key match
/// 2. Case-insensitive substring match in either direction
/// 3. Word-level fuzzy match (any query word against any registry word)
///
/// Returns `None` when nothing matches - callers must treat that as
/// "unknown", never as zero distance.
pub fn resolve_port(name: &str) -> Option<PortLocation> {
    if name.trim().is_empty() {
        return None;
    }

    // Stage 1: exact key match
    if let Some(&(key, _, lat, lon)) = PORTS.iter().find(|(key, _, _, _)| *key == name) {
        return Some(port_location(key, lat, lon));
    }

    let query = name.trim().to_lowercase();

    // Stage 2: substring match, either direction
    for &(key, _, lat, lon) in PORTS {
        let key_lower = key.to_lowercase();
        if key_lower.contains(&query) || query.contains(&key_lower) {
            return Some(port_location(key, lat, lon));
        }
    }

    // Stage 3: word-level fuzzy match
    let query_words: Vec<&str> = query.split_whitespace().collect();
    for &(key, _, lat, lon) in PORTS {
        let key_lower = key.to_lowercase();
        for key_word in key_lower.split_whitespace() {
            for query_word in &query_words {
                if key_word.contains(query_word) || query_word.contains(key_word) {
                    return Some(port_location(key, lat, lon));
                }
            }
        }
    }

    None
}

/// Loading region of a port, resolved through the same fuzzy lookup
pub fn port_region(name: &str) -> Option<&'static str> {
    let resolved = resolve_port(name)?;
    PORTS
        .iter()
        .find(|(key, _, _, _)| *key == resolved.name)
        .map(|&(_, region, _, _)| region)
}

/// Great-circle distance between two port names in nautical miles
///
/// `None` when either name is unresolvable - unknown propagates, it does
/// not default to 0 or infinity.
pub fn port_distance_nm(name_a: &str, name_b: &str) -> Option<f64> {
    let a = resolve_port(name_a)?;
    let b = resolve_port(name_b)?;
    Some(haversine_nm(a.latitude, a.longitude, b.latitude, b.longitude))
}

/// Score the proximity of two port names on a 0-100 scale
///
/// Equal names (trimmed, case-insensitive) short-circuit to 100 without
/// geocoding. An unresolvable side scores the neutral 50 - absence of data
/// must not penalize as if confirmed-far. Otherwise the score interpolates
/// linearly from 100 at 0 NM down to 0 at `max_distance_nm`.
pub fn proximity_score(name_a: &str, name_b: &str, max_distance_nm: f64) -> u8 {
    if name_a.trim().to_lowercase() == name_b.trim().to_lowercase() {
        return 100;
    }

    let distance = match port_distance_nm(name_a, name_b) {
        Some(d) => d,
        None => return 50,
    };

    if distance == 0.0 {
        return 100;
    }
    if distance > max_distance_nm {
        return 0;
    }

    (100.0 - (distance / max_distance_nm) * 100.0).round() as u8
}

/// Whether two ports resolve to within `radius_nm` of each other
///
/// An unresolved distance is never "in proximity".
pub fn in_proximity(name_a: &str, name_b: &str, radius_nm: f64) -> bool {
    port_distance_nm(name_a, name_b).is_some_and(|d| d <= radius_nm)
}

fn port_location(name: &str, latitude: f64, longitude: f64) -> PortLocation {
    PortLocation {
        name: name.to_string(),
        latitude,
        longitude,
    }
}
