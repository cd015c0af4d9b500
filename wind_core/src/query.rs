//! # Pressure Query Service
//!
//! The narrow interface other design modules (glass panels, connections,
//! fixings) use to obtain one design pressure for an element.
//!
//! `resolve(effective_area, elevation, zone)` evaluates the cladding rows for
//! that area over the configured levels, picks the row whose elevation is
//! closest to the request (first row wins a tie), and returns:
//!
//! - Zone 4 / Zone 5 (walls): the larger of |positive| and |negative|
//! - Zone 1 / 2 / 3 (roof): |suction|
//!
//! ## Example
//!
//! ```rust
//! use wind_core::config::WindLoadConfig;
//! use wind_core::engine::WindLoadEngine;
//! use wind_core::calculations::effective_wind_area;
//!
//! let engine = WindLoadEngine::new(WindLoadConfig::demo_building()).unwrap();
//! let area = effective_wind_area(2.4, 1.2);
//!
//! let wall = engine.query().resolve(area, 28.0, "Zone 5").unwrap();
//! let roof = engine.query().resolve(area, 30.0, "Zone 3").unwrap();
//! assert!(roof > wall);
//! assert!(engine.query().resolve(area, 28.0, "Zone 9").is_err());
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug_span;

use crate::calculations::CladdingPressureRecord;
use crate::engine::WindLoadEngine;
use crate::errors::{CalcError, CalcResult};
use crate::gust::GustModel;
use crate::topography::TopographyModel;

/// Envelope family a zone belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneFamily {
    Wall,
    Roof,
}

/// Cladding zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CladdingZone {
    /// Roof field
    #[serde(rename = "Zone 1")]
    Zone1,
    /// Roof edge
    #[serde(rename = "Zone 2")]
    Zone2,
    /// Roof corner
    #[serde(rename = "Zone 3")]
    Zone3,
    /// Wall field
    #[serde(rename = "Zone 4")]
    Zone4,
    /// Wall corner
    #[serde(rename = "Zone 5")]
    Zone5,
}

impl CladdingZone {
    pub const ALL: [CladdingZone; 5] = [
        CladdingZone::Zone1,
        CladdingZone::Zone2,
        CladdingZone::Zone3,
        CladdingZone::Zone4,
        CladdingZone::Zone5,
    ];

    /// Parse "Zone 4", "zone4", "ZONE-4" or "4"
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let normalized: String = s.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        let upper = normalized.to_ascii_uppercase();
        let digits = upper.strip_prefix("ZONE").unwrap_or(&upper);
        match digits {
            "1" => Ok(CladdingZone::Zone1),
            "2" => Ok(CladdingZone::Zone2),
            "3" => Ok(CladdingZone::Zone3),
            "4" => Ok(CladdingZone::Zone4),
            "5" => Ok(CladdingZone::Zone5),
            _ => Err(CalcError::unsupported_zone(s)),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CladdingZone::Zone1 => "Zone 1",
            CladdingZone::Zone2 => "Zone 2",
            CladdingZone::Zone3 => "Zone 3",
            CladdingZone::Zone4 => "Zone 4",
            CladdingZone::Zone5 => "Zone 5",
        }
    }

    pub fn family(&self) -> ZoneFamily {
        match self {
            CladdingZone::Zone4 | CladdingZone::Zone5 => ZoneFamily::Wall,
            _ => ZoneFamily::Roof,
        }
    }

    /// Design pressure magnitude of this zone in one row
    pub fn governing_pressure(&self, row: &CladdingPressureRecord) -> f64 {
        match self {
            CladdingZone::Zone1 => row.roof.zone1.abs(),
            CladdingZone::Zone2 => row.roof.zone2.abs(),
            CladdingZone::Zone3 => row.roof.zone3.abs(),
            CladdingZone::Zone4 => row.wall.zone4_governing(),
            CladdingZone::Zone5 => row.wall.zone5_governing(),
        }
    }
}

impl std::fmt::Display for CladdingZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Row closest in elevation to `elevation_m`; the first row wins a tie
pub fn nearest_row(rows: &[CladdingPressureRecord], elevation_m: f64) -> Option<&CladdingPressureRecord> {
    let mut best: Option<(&CladdingPressureRecord, f64)> = None;
    for row in rows {
        let distance = (row.elevation_m - elevation_m).abs();
        match best {
            Some((_, best_distance)) if !(distance < best_distance) => {}
            _ => best = Some((row, distance)),
        }
    }
    best.map(|(row, _)| row)
}

/// Read-only query view over an engine
#[derive(Debug, Clone, Copy)]
pub struct PressureQueryService<'a, G: GustModel, T: TopographyModel> {
    engine: &'a WindLoadEngine<G, T>,
}

impl<'a, G: GustModel, T: TopographyModel> PressureQueryService<'a, G, T> {
    pub fn new(engine: &'a WindLoadEngine<G, T>) -> Self {
        PressureQueryService { engine }
    }

    /// Design pressure magnitude (kPa) for an element.
    ///
    /// Fails with `UnsupportedZone` for an unknown zone label, with
    /// `InvalidInput` for a non-positive or non-finite area or a non-finite
    /// elevation, and with `NoPressureData` when no selected level produced
    /// a row.
    pub fn resolve(&self, effective_area_m2: f64, elevation_m: f64, zone: &str) -> CalcResult<f64> {
        let zone = CladdingZone::from_str_flexible(zone)?;
        self.resolve_zone(effective_area_m2, elevation_m, zone)
    }

    /// [`resolve`](Self::resolve) with an already parsed zone
    pub fn resolve_zone(&self, effective_area_m2: f64, elevation_m: f64, zone: CladdingZone) -> CalcResult<f64> {
        let _span = debug_span!("resolve", effective_area_m2, elevation_m, zone = zone.display_name()).entered();

        if !elevation_m.is_finite() {
            return Err(CalcError::invalid_input(
                "elevation_m",
                elevation_m.to_string(),
                "Elevation must be finite",
            ));
        }
        let group = self.engine.cladding_for_area(effective_area_m2)?;
        let row = nearest_row(&group.rows, elevation_m).ok_or(CalcError::NoPressureData { effective_area_m2 })?;
        Ok(zone.governing_pressure(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindLoadConfig;

    fn single_level_engine() -> WindLoadEngine {
        let mut config = WindLoadConfig::demo_building();
        config.height_m = 4.0;
        config.floor_heights_m = vec![4.0];
        config.effective_areas_m2 = vec![10.0];
        config.selected_levels = vec![1];
        WindLoadEngine::new(config).unwrap()
    }

    #[test]
    fn test_zone_parsing() {
        assert_eq!(CladdingZone::from_str_flexible("Zone 4").unwrap(), CladdingZone::Zone4);
        assert_eq!(CladdingZone::from_str_flexible("zone1").unwrap(), CladdingZone::Zone1);
        assert_eq!(CladdingZone::from_str_flexible("3").unwrap(), CladdingZone::Zone3);
        assert_eq!(CladdingZone::Zone5.family(), ZoneFamily::Wall);
        assert_eq!(CladdingZone::Zone2.family(), ZoneFamily::Roof);

        let err = CladdingZone::from_str_flexible("Zone 6").unwrap_err();
        assert_eq!(err, CalcError::UnsupportedZone { zone: "Zone 6".to_string() });
        assert!(CladdingZone::from_str_flexible("").is_err());
        for zone in CladdingZone::ALL {
            assert_eq!(CladdingZone::from_str_flexible(&zone.to_string()).unwrap(), zone);
        }
    }

    #[test]
    fn test_single_level_ignores_elevation() {
        let engine = single_level_engine();
        let query = engine.query();
        for zone in CladdingZone::ALL {
            let low = query.resolve_zone(10.0, 0.0, zone).unwrap();
            let high = query.resolve_zone(10.0, 500.0, zone).unwrap();
            assert_eq!(low, high);
            assert!(low > 0.0);
        }
    }

    #[test]
    fn test_matches_cladding_rows() {
        let engine = WindLoadEngine::new(WindLoadConfig::demo_building()).unwrap();
        let rows = engine.cladding().unwrap();
        let rows = rows.rows_for(20.0);

        // Levels 5 and 10 sit at 15 m and 30 m
        let mid = engine.query().resolve(20.0, 16.0, "Zone 4").unwrap();
        assert_eq!(mid, rows[0].wall.zone4_governing());
        let top = engine.query().resolve(20.0, 29.0, "Zone 3").unwrap();
        assert_eq!(top, rows[1].roof.zone3.abs());
    }

    #[test]
    fn test_tie_goes_to_first_row() {
        let engine = WindLoadEngine::new(WindLoadConfig::demo_building()).unwrap();
        let group = engine.cladding_for_area(5.0).unwrap();
        // 22.5 m is equidistant from 15 m and 30 m
        let row = nearest_row(&group.rows, 22.5).unwrap();
        assert_eq!(row.level, 5);
        assert!(nearest_row(&[], 10.0).is_none());
    }

    #[test]
    fn test_no_pressure_data() {
        let mut config = WindLoadConfig::demo_building();
        config.selected_levels = vec![42];
        let engine = WindLoadEngine::new(config).unwrap();
        let err = engine.query().resolve(10.0, 3.0, "Zone 1").unwrap_err();
        assert_eq!(err, CalcError::NoPressureData { effective_area_m2: 10.0 });
        assert_eq!(err.error_code(), "NO_PRESSURE_DATA");
    }

    #[test]
    fn test_rejects_non_finite_or_non_positive_area() {
        let engine = WindLoadEngine::new(WindLoadConfig::demo_building()).unwrap();
        let query = engine.query();
        for area in [f64::NAN, f64::INFINITY, -5.0, 0.0] {
            let err = query.resolve(area, 15.0, "Zone 5").unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT");
        }
        assert_eq!(engine.cladding_for_area(f64::NAN).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_rejects_non_finite_elevation() {
        let engine = WindLoadEngine::new(WindLoadConfig::demo_building()).unwrap();
        for elevation in [f64::NAN, f64::NEG_INFINITY] {
            let err = engine.query().resolve(10.0, elevation, "Zone 1").unwrap_err();
            assert!(err.to_string().contains("elevation_m"));
        }

        // A NaN elevation never displaces the first row
        let group = engine.cladding_for_area(10.0).unwrap();
        assert_eq!(nearest_row(&group.rows, f64::NAN).unwrap().level, 5);
    }
}
