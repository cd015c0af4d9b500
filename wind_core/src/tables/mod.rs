//! # Code Tables
//!
//! Static lookup tables for wind load design: base wind speed by location,
//! importance factor by occupancy category, directionality factor by
//! structure type, internal pressure coefficient by enclosure, the
//! velocity-pressure exposure coefficient table and the external pressure
//! coefficients for walls, roofs and cladding zones.
//!
//! Every categorical key is a closed enum. Lookups keyed by an enum are
//! total; the fallible step is parsing a label into the enum, which fails
//! with [`CalcError::InvalidCodeKey`] naming the label and the table.
//!
//! ## Example
//!
//! ```rust
//! use wind_core::tables::{ExposureCategory, OccupancyCategory, StructureType, WindSystem};
//! use wind_core::tables::velocity_pressure::exposure_coefficient;
//!
//! let occupancy = OccupancyCategory::from_str_flexible("II").unwrap();
//! assert_eq!(occupancy.importance_factor(), 1.0);
//!
//! let structure = StructureType::from_str_flexible("buildings").unwrap();
//! assert_eq!(structure.directionality_factor(), 0.85);
//!
//! let kz = exposure_coefficient(ExposureCategory::B, 30.5, WindSystem::Mwfrs);
//! assert!((kz - 1.26).abs() < 1e-9);
//! ```

pub mod locations;
pub mod pressure_coefficients;
pub mod velocity_pressure;

pub use locations::{location_names, location_wind_speed};
pub use pressure_coefficients::{
    roof_cladding_coefficients, wall_cladding_coefficients, AreaCurve, ExternalPressureCoefficients,
    RoofCladdingCoefficients, WallCladdingCoefficients,
};
pub use velocity_pressure::exposure_coefficient;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Normalize a label for flexible matching: uppercase, no spaces/punctuation
fn normalize(s: &str) -> String {
    s.trim()
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

// ============================================================================
// Exposure Category
// ============================================================================

/// Terrain-roughness exposure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ExposureCategory {
    /// Urban and suburban areas, closely spaced obstructions
    A,
    /// Open terrain with scattered obstructions
    #[default]
    B,
    /// Flat, unobstructed areas and water surfaces
    C,
}

impl ExposureCategory {
    /// All exposure categories for UI selection
    pub const ALL: [ExposureCategory; 3] = [ExposureCategory::A, ExposureCategory::B, ExposureCategory::C];

    /// Parse from a category label ("A", "b", " C ")
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match normalize(s).as_str() {
            "A" => Ok(ExposureCategory::A),
            "B" => Ok(ExposureCategory::B),
            "C" => Ok(ExposureCategory::C),
            _ => Err(CalcError::invalid_code_key("exposure_category", s)),
        }
    }

    /// Single-letter code
    pub fn code(&self) -> &'static str {
        match self {
            ExposureCategory::A => "A",
            ExposureCategory::B => "B",
            ExposureCategory::C => "C",
        }
    }
}

impl std::fmt::Display for ExposureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Occupancy Category
// ============================================================================

/// Occupancy (risk) category governing the importance factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OccupancyCategory {
    /// Low hazard to human life: I = 0.77
    I,
    /// Standard occupancy: I = 1.00
    #[default]
    II,
    /// Substantial hazard / assembly: I = 1.15
    III,
    /// Essential facilities: I = 1.15
    IV,
}

impl OccupancyCategory {
    /// All occupancy categories for UI selection
    pub const ALL: [OccupancyCategory; 4] = [
        OccupancyCategory::I,
        OccupancyCategory::II,
        OccupancyCategory::III,
        OccupancyCategory::IV,
    ];

    /// Parse from a roman-numeral or arabic label
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match normalize(s).as_str() {
            "I" | "1" => Ok(OccupancyCategory::I),
            "II" | "2" => Ok(OccupancyCategory::II),
            "III" | "3" => Ok(OccupancyCategory::III),
            "IV" | "4" => Ok(OccupancyCategory::IV),
            _ => Err(CalcError::invalid_code_key("importance_factor", s)),
        }
    }

    /// Importance factor I
    pub fn importance_factor(&self) -> f64 {
        match self {
            OccupancyCategory::I => 0.77,
            OccupancyCategory::II => 1.0,
            OccupancyCategory::III => 1.15,
            OccupancyCategory::IV => 1.15,
        }
    }

    /// Roman-numeral code
    pub fn code(&self) -> &'static str {
        match self {
            OccupancyCategory::I => "I",
            OccupancyCategory::II => "II",
            OccupancyCategory::III => "III",
            OccupancyCategory::IV => "IV",
        }
    }
}

impl std::fmt::Display for OccupancyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Structure Type
// ============================================================================

/// Structure type governing the wind directionality factor K_d
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StructureType {
    #[default]
    Buildings,
    #[serde(rename = "Solid Sign")]
    SolidSign,
    #[serde(rename = "Open Sign")]
    OpenSign,
    #[serde(rename = "Lattice framework")]
    LatticeFramework,
    #[serde(rename = "Trussed Tower (Rectangular)")]
    TrussedTowerRectangular,
    #[serde(rename = "Trussed Tower (Square)")]
    TrussedTowerSquare,
    #[serde(rename = "Trussed Tower (Triangular)")]
    TrussedTowerTriangular,
    #[serde(rename = "Trussed Tower (Others)")]
    TrussedTowerOthers,
    #[serde(rename = "Chimney, Tanks (Hexagonal)")]
    ChimneyTankHexagonal,
    #[serde(rename = "Chimney, Tanks (Round)")]
    ChimneyTankRound,
    #[serde(rename = "Chimney, Tanks (Square)")]
    ChimneyTankSquare,
}

impl StructureType {
    /// All structure types for UI selection
    pub const ALL: [StructureType; 11] = [
        StructureType::Buildings,
        StructureType::SolidSign,
        StructureType::OpenSign,
        StructureType::LatticeFramework,
        StructureType::TrussedTowerRectangular,
        StructureType::TrussedTowerSquare,
        StructureType::TrussedTowerTriangular,
        StructureType::TrussedTowerOthers,
        StructureType::ChimneyTankHexagonal,
        StructureType::ChimneyTankRound,
        StructureType::ChimneyTankSquare,
    ];

    /// Parse from a display label, ignoring case, spacing and punctuation
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let key = normalize(s);
        StructureType::ALL
            .into_iter()
            .find(|t| normalize(t.display_name()) == key)
            .ok_or_else(|| CalcError::invalid_code_key("directionality_factor", s))
    }

    /// Wind directionality factor K_d
    pub fn directionality_factor(&self) -> f64 {
        match self {
            StructureType::Buildings
            | StructureType::SolidSign
            | StructureType::OpenSign
            | StructureType::LatticeFramework
            | StructureType::TrussedTowerRectangular
            | StructureType::TrussedTowerSquare
            | StructureType::TrussedTowerTriangular => 0.85,
            StructureType::ChimneyTankHexagonal | StructureType::ChimneyTankRound => 0.95,
            StructureType::ChimneyTankSquare => 0.90,
            StructureType::TrussedTowerOthers => 0.95,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            StructureType::Buildings => "Buildings",
            StructureType::SolidSign => "Solid Sign",
            StructureType::OpenSign => "Open Sign",
            StructureType::LatticeFramework => "Lattice framework",
            StructureType::TrussedTowerRectangular => "Trussed Tower (Rectangular)",
            StructureType::TrussedTowerSquare => "Trussed Tower (Square)",
            StructureType::TrussedTowerTriangular => "Trussed Tower (Triangular)",
            StructureType::TrussedTowerOthers => "Trussed Tower (Others)",
            StructureType::ChimneyTankHexagonal => "Chimney, Tanks (Hexagonal)",
            StructureType::ChimneyTankRound => "Chimney, Tanks (Round)",
            StructureType::ChimneyTankSquare => "Chimney, Tanks (Square)",
        }
    }
}

impl std::fmt::Display for StructureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Enclosure Type
// ============================================================================

/// Enclosure classification governing the internal pressure coefficient GC_pi
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EnclosureType {
    /// GC_pi = ±0.18
    #[default]
    Enclosed,
    /// GC_pi = ±0.55
    #[serde(rename = "Partially Enclosed")]
    PartiallyEnclosed,
    /// GC_pi = 0.00
    Open,
}

impl EnclosureType {
    /// All enclosure types for UI selection
    pub const ALL: [EnclosureType; 3] = [
        EnclosureType::Enclosed,
        EnclosureType::PartiallyEnclosed,
        EnclosureType::Open,
    ];

    /// Parse from a display label
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match normalize(s).as_str() {
            "ENCLOSED" => Ok(EnclosureType::Enclosed),
            "PARTIALLYENCLOSED" | "PARTIAL" => Ok(EnclosureType::PartiallyEnclosed),
            "OPEN" => Ok(EnclosureType::Open),
            _ => Err(CalcError::invalid_code_key("internal_pressure_coefficient", s)),
        }
    }

    /// Internal pressure coefficient magnitude GC_pi
    pub fn internal_pressure_coefficient(&self) -> f64 {
        match self {
            EnclosureType::Enclosed => 0.18,
            EnclosureType::PartiallyEnclosed => 0.55,
            EnclosureType::Open => 0.0,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            EnclosureType::Enclosed => "Enclosed",
            EnclosureType::PartiallyEnclosed => "Partially Enclosed",
            EnclosureType::Open => "Open",
        }
    }
}

impl std::fmt::Display for EnclosureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Descriptive categories
// ============================================================================

/// Roof shape. Recorded with the configuration; the pressure tables in this
/// crate are the flat-roof set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RoofType {
    #[default]
    Flat,
    Monoslope,
    Gable,
    Hip,
    Dome,
}

impl RoofType {
    /// All roof types for UI selection
    pub const ALL: [RoofType; 5] = [
        RoofType::Flat,
        RoofType::Monoslope,
        RoofType::Gable,
        RoofType::Hip,
        RoofType::Dome,
    ];

    /// Parse from a display label
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let key = normalize(s);
        RoofType::ALL
            .into_iter()
            .find(|t| normalize(t.display_name()) == key)
            .ok_or_else(|| CalcError::invalid_code_key("roof_type", s))
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            RoofType::Flat => "Flat",
            RoofType::Monoslope => "Monoslope",
            RoofType::Gable => "Gable",
            RoofType::Hip => "Hip",
            RoofType::Dome => "Dome",
        }
    }
}

impl std::fmt::Display for RoofType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Plan regularity of the building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BuildingType {
    #[default]
    Regular,
    Irregular,
}

impl std::fmt::Display for BuildingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildingType::Regular => write!(f, "Regular"),
            BuildingType::Irregular => write!(f, "Irregular"),
        }
    }
}

/// Dynamic classification of the structure; gates the gust-factor path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Rigidity {
    /// Fundamental frequency ≥ 1 Hz: G = 0.85
    #[default]
    Rigid,
    /// Fundamental frequency < 1 Hz: resonant-response gust factor G_f
    Flexible,
}

impl std::fmt::Display for Rigidity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rigidity::Rigid => write!(f, "Rigid"),
            Rigidity::Flexible => write!(f, "Flexible"),
        }
    }
}

/// Which load path a velocity pressure is evaluated for.
///
/// Only exposure A distinguishes the two; B and C share one K_z row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindSystem {
    /// Main Wind Force Resisting System
    Mwfrs,
    /// Components and Cladding
    ComponentsAndCladding,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_importance_factors() {
        assert_eq!(OccupancyCategory::I.importance_factor(), 0.77);
        assert_eq!(OccupancyCategory::II.importance_factor(), 1.0);
        assert_eq!(OccupancyCategory::III.importance_factor(), 1.15);
        assert_eq!(OccupancyCategory::IV.importance_factor(), 1.15);
    }

    #[test]
    fn test_directionality_factors() {
        assert_eq!(StructureType::Buildings.directionality_factor(), 0.85);
        assert_eq!(StructureType::ChimneyTankRound.directionality_factor(), 0.95);
        assert_eq!(StructureType::ChimneyTankSquare.directionality_factor(), 0.90);
        assert_eq!(StructureType::TrussedTowerOthers.directionality_factor(), 0.95);
    }

    #[test]
    fn test_internal_pressure_coefficients() {
        assert_eq!(EnclosureType::Enclosed.internal_pressure_coefficient(), 0.18);
        assert_eq!(EnclosureType::PartiallyEnclosed.internal_pressure_coefficient(), 0.55);
        assert_eq!(EnclosureType::Open.internal_pressure_coefficient(), 0.0);
    }

    #[test]
    fn test_flexible_parsing() {
        assert_eq!(ExposureCategory::from_str_flexible(" c ").unwrap(), ExposureCategory::C);
        assert_eq!(OccupancyCategory::from_str_flexible("3").unwrap(), OccupancyCategory::III);
        assert_eq!(
            StructureType::from_str_flexible("chimney, tanks (round)").unwrap(),
            StructureType::ChimneyTankRound
        );
        assert_eq!(
            EnclosureType::from_str_flexible("partially enclosed").unwrap(),
            EnclosureType::PartiallyEnclosed
        );
        assert_eq!(RoofType::from_str_flexible("gable").unwrap(), RoofType::Gable);
    }

    #[test]
    fn test_unknown_keys_name_the_table() {
        let err = ExposureCategory::from_str_flexible("D").unwrap_err();
        assert_eq!(err, CalcError::invalid_code_key("exposure_category", "D"));

        let err = StructureType::from_str_flexible("Bridge").unwrap_err();
        assert_eq!(err, CalcError::invalid_code_key("directionality_factor", "Bridge"));

        let err = OccupancyCategory::from_str_flexible("V").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CODE_KEY");
    }

    #[test]
    fn test_serde_labels() {
        let json = serde_json::to_string(&EnclosureType::PartiallyEnclosed).unwrap();
        assert_eq!(json, "\"Partially Enclosed\"");

        let parsed: StructureType = serde_json::from_str("\"Chimney, Tanks (Square)\"").unwrap();
        assert_eq!(parsed, StructureType::ChimneyTankSquare);
    }
}
