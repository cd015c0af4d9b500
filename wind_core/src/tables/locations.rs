//! Basic wind speed by location (m/s, 3-second gust at 10 m, exposure B).

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::errors::{CalcError, CalcResult};

/// (location, basic wind speed in m/s)
const LOCATION_WIND_SPEEDS: [(&str, f64); 74] = [
    ("Angarpota", 47.8),
    ("Bagerhat", 77.5),
    ("Bandarban", 62.5),
    ("Barguna", 80.0),
    ("Barisal", 78.7),
    ("Bhola", 69.5),
    ("Bogra", 61.9),
    ("Brahmanbaria", 56.7),
    ("Chandpur", 50.6),
    ("Chapai Nawabganj", 41.4),
    ("Chittagong", 80.0),
    ("Chuadanga", 61.9),
    ("Comilla", 61.4),
    ("Cox’s Bazar", 80.0),
    ("Dahagram", 47.8),
    ("Dhaka", 65.7),
    ("Dinajpur", 41.4),
    ("Faridpur", 63.1),
    ("Feni", 64.1),
    ("Gaibandha", 65.6),
    ("Gazipur", 66.5),
    ("Gopalganj", 74.5),
    ("Habiganj", 54.2),
    ("Hatiya", 80.0),
    ("Ishurdi", 69.5),
    ("Joypurhat", 56.7),
    ("Jamalpur", 56.7),
    ("Jessore", 64.1),
    ("Jhalakati", 80.0),
    ("Jhenaidah", 65.0),
    ("Khagrachhari", 56.7),
    ("Khulna", 73.3),
    ("Kutubdia", 80.0),
    ("Kishoreganj", 64.7),
    ("Kurigram", 65.6),
    ("Kushtia", 66.9),
    ("Lakshmipur", 51.2),
    ("Lalmonirhat", 63.7),
    ("Madaripur", 68.1),
    ("Magura", 65.0),
    ("Manikganj", 58.2),
    ("Meherpur", 58.2),
    ("Maheshkhali", 80.0),
    ("Moulvibazar", 53.0),
    ("Munshiganj", 57.1),
    ("Mymensingh", 67.4),
    ("Naogaon", 55.2),
    ("Narail", 68.6),
    ("Narayanganj", 61.1),
    ("Narsinghdi", 59.7),
    ("Natore", 61.9),
    ("Netrokona", 65.6),
    ("Nilphamari", 44.7),
    ("Noakhali", 57.1),
    ("Pabna", 63.1),
    ("Panchagarh", 41.4),
    ("Patuakhali", 80.0),
    ("Pirojpur", 80.0),
    ("Rajbari", 59.1),
    ("Rajshahi", 49.2),
    ("Rangamati", 56.7),
    ("Rangpur", 65.3),
    ("Satkhira", 57.6),
    ("Shariatpur", 61.9),
    ("Sherpur", 62.5),
    ("Sirajganj", 50.6),
    ("Srimangal", 50.6),
    ("St. Martin’s Island", 80.0),
    ("Sunamganj", 61.1),
    ("Sylhet", 61.1),
    ("Sandwip", 80.0),
    ("Tangail", 50.6),
    ("Teknaf", 80.0),
    ("Thakurgaon", 41.4),
];

static WIND_SPEED_BY_LOCATION: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| LOCATION_WIND_SPEEDS.iter().copied().collect());

/// Basic wind speed V (m/s) for a named location.
///
/// Surrounding whitespace is ignored; an exact name match is tried first,
/// then a case-insensitive one.
///
/// # Example
///
/// ```rust
/// use wind_core::tables::location_wind_speed;
///
/// assert_eq!(location_wind_speed("Dhaka").unwrap(), 65.7);
/// assert_eq!(location_wind_speed(" chittagong ").unwrap(), 80.0);
/// assert!(location_wind_speed("Atlantis").is_err());
/// ```
pub fn location_wind_speed(location: &str) -> CalcResult<f64> {
    let name = location.trim();
    if let Some(speed) = WIND_SPEED_BY_LOCATION.get(name) {
        return Ok(*speed);
    }
    LOCATION_WIND_SPEEDS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|(_, speed)| *speed)
        .ok_or_else(|| CalcError::invalid_code_key("location_wind_speed", location))
}

/// All known location names, sorted for selection lists
pub fn location_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = LOCATION_WIND_SPEEDS.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names
}
