//! # Topographic Factor K_zt
//!
//! Speed-up of wind over isolated hills, ridges and escarpments:
//!
//! ```text
//! K_zt = (1 + K1 × K2 × K3)²
//!
//! K1 = K1_table(type, exposure) × (H / L_h)
//! K2 = max(0, 1 − |x| / (μ × L_h))
//! K3 = exp(−γ × z / L_h)
//! ```
//!
//! where `H` is the feature height, `L_h` the horizontal distance upwind of
//! the crest to where the ground is half the feature height, `x` the distance
//! of the building from the crest and `z` the elevation above local ground.
//!
//! Homogeneous terrain returns exactly 1.0 without looking at the other inputs.
//!
//! ## Example
//!
//! ```rust
//! use wind_core::tables::ExposureCategory;
//! use wind_core::topography::{CodeTopography, CrestSide, TopographyInput, TopographyModel, TopographyType};
//!
//! let site = TopographyInput {
//!     topography_type: TopographyType::Escarpment2D,
//!     feature_height_m: 15.3,
//!     feature_length_m: 12.8,
//!     crest_distance_m: 18.2,
//!     crest_side: CrestSide::Downwind,
//! };
//! let kzt = CodeTopography.topographic_factor(&site, 30.0, ExposureCategory::B).unwrap();
//! assert!(kzt >= 1.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::tables::ExposureCategory;

/// Terrain feature class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TopographyType {
    /// Flat, homogeneous terrain: topography not considered
    #[default]
    Homogeneous,
    #[serde(rename = "2-Dimensional Ridge")]
    Ridge2D,
    #[serde(rename = "2-Dimensional Escarpment")]
    Escarpment2D,
    #[serde(rename = "3-Dimensional Hill")]
    Hill3D,
}

impl TopographyType {
    /// All topography types for UI selection
    pub const ALL: [TopographyType; 4] = [
        TopographyType::Homogeneous,
        TopographyType::Ridge2D,
        TopographyType::Escarpment2D,
        TopographyType::Hill3D,
    ];

    /// Parse from a display label ("2-Dimensional Ridge", "ridge", "3d hill", ...)
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let key: String = s
            .to_uppercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "HOMOGENEOUS" | "NONE" | "FLAT" => Ok(TopographyType::Homogeneous),
            "2DIMENSIONALRIDGE" | "2DRIDGE" | "RIDGE" => Ok(TopographyType::Ridge2D),
            "2DIMENSIONALESCARPMENT" | "2DESCARPMENT" | "ESCARPMENT" => Ok(TopographyType::Escarpment2D),
            "3DIMENSIONALHILL" | "3DHILL" | "HILL" => Ok(TopographyType::Hill3D),
            _ => Err(CalcError::invalid_topography(
                "topography_type",
                s,
                "Expected Homogeneous, 2-Dimensional Ridge, 2-Dimensional Escarpment or 3-Dimensional Hill",
            )),
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            TopographyType::Homogeneous => "Homogeneous",
            TopographyType::Ridge2D => "2-Dimensional Ridge",
            TopographyType::Escarpment2D => "2-Dimensional Escarpment",
            TopographyType::Hill3D => "3-Dimensional Hill",
        }
    }
}

impl std::fmt::Display for TopographyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Side of the crest the building sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CrestSide {
    #[default]
    Upwind,
    Downwind,
}

impl CrestSide {
    /// Parse from "Upwind"/"Downwind" (case-insensitive)
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "upwind" | "up" => Ok(CrestSide::Upwind),
            "downwind" | "down" => Ok(CrestSide::Downwind),
            _ => Err(CalcError::invalid_topography(
                "crest_side",
                s,
                "Expected Upwind or Downwind",
            )),
        }
    }
}

impl std::fmt::Display for CrestSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrestSide::Upwind => write!(f, "Upwind"),
            CrestSide::Downwind => write!(f, "Downwind"),
        }
    }
}

/// Topography descriptor of the site
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct TopographyInput {
    /// Terrain feature class
    pub topography_type: TopographyType,
    /// Height of the hill/escarpment relative to upwind terrain, H (m)
    pub feature_height_m: f64,
    /// Distance upwind of crest to half-height point, L_h (m)
    pub feature_length_m: f64,
    /// Horizontal distance from the crest to the building, x (m)
    pub crest_distance_m: f64,
    /// Building upwind or downwind of the crest
    pub crest_side: CrestSide,
}

impl TopographyInput {
    /// Homogeneous terrain
    pub fn homogeneous() -> Self {
        TopographyInput::default()
    }

    /// Whether a speed-up is evaluated at all
    pub fn is_considered(&self) -> bool {
        self.topography_type != TopographyType::Homogeneous
    }
}

/// Multipliers behind one K_zt evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopographicMultipliers {
    /// Shape multiplier K1 (already scaled by H/L_h)
    pub k1: f64,
    /// Horizontal attenuation K2
    pub k2: f64,
    /// Vertical attenuation K3
    pub k3: f64,
    /// K_zt = (1 + K1·K2·K3)²
    pub kzt: f64,
}

/// Topographic speed-up model.
///
/// Pressure engines depend on this trait only, so a different code edition
/// can be swapped in without touching them.
pub trait TopographyModel {
    /// Topographic factor K_zt at `elevation_m` above local ground
    fn topographic_factor(
        &self,
        site: &TopographyInput,
        elevation_m: f64,
        exposure: ExposureCategory,
    ) -> CalcResult<f64>;
}

/// Tabulated K1/γ/μ model
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeTopography;

/// Base K1 for H/L_h = 1
fn k1_base(topography: TopographyType, exposure: ExposureCategory) -> Option<f64> {
    use ExposureCategory::*;
    match (topography, exposure) {
        (TopographyType::Ridge2D, A) => Some(1.30),
        (TopographyType::Ridge2D, B) => Some(1.45),
        (TopographyType::Ridge2D, C) => Some(1.55),
        (TopographyType::Escarpment2D, A) => Some(0.75),
        (TopographyType::Escarpment2D, B) => Some(0.85),
        (TopographyType::Escarpment2D, C) => Some(0.95),
        (TopographyType::Hill3D, A) => Some(0.95),
        (TopographyType::Hill3D, B) => Some(1.05),
        (TopographyType::Hill3D, C) => Some(1.15),
        (TopographyType::Homogeneous, _) => None,
    }
}

/// Height attenuation factor γ
fn gamma(topography: TopographyType) -> Option<f64> {
    match topography {
        TopographyType::Ridge2D => Some(3.0),
        TopographyType::Escarpment2D => Some(2.5),
        TopographyType::Hill3D => Some(4.0),
        TopographyType::Homogeneous => None,
    }
}

/// Horizontal attenuation factor μ
fn mu(topography: TopographyType, side: CrestSide) -> Option<f64> {
    match (topography, side) {
        (TopographyType::Ridge2D, _) => Some(1.5),
        (TopographyType::Escarpment2D, CrestSide::Upwind) => Some(1.5),
        (TopographyType::Escarpment2D, CrestSide::Downwind) => Some(4.0),
        (TopographyType::Hill3D, _) => Some(1.5),
        (TopographyType::Homogeneous, _) => None,
    }
}

impl CodeTopography {
    /// Evaluate K1, K2, K3 and K_zt for a non-homogeneous site.
    pub fn multipliers(
        &self,
        site: &TopographyInput,
        elevation_m: f64,
        exposure: ExposureCategory,
    ) -> CalcResult<TopographicMultipliers> {
        let unsupported = || {
            CalcError::invalid_topography(
                "topography_type",
                site.topography_type.display_name(),
                "No K1/γ/μ values for this feature type",
            )
        };
        let base = k1_base(site.topography_type, exposure).ok_or_else(unsupported)?;
        let gamma = gamma(site.topography_type).ok_or_else(unsupported)?;
        let mu = mu(site.topography_type, site.crest_side).ok_or_else(unsupported)?;

        if !(site.feature_length_m > 0.0) {
            return Err(CalcError::invalid_topography(
                "feature_length_m",
                site.feature_length_m.to_string(),
                "Feature length L_h must be positive",
            ));
        }
        if !(site.feature_height_m >= 0.0) {
            return Err(CalcError::invalid_topography(
                "feature_height_m",
                site.feature_height_m.to_string(),
                "Feature height H cannot be negative",
            ));
        }

        let lh = site.feature_length_m;
        let k1 = base * (site.feature_height_m / lh);
        let k2 = (1.0 - site.crest_distance_m.abs() / (mu * lh)).max(0.0);
        let k3 = (-gamma * elevation_m / lh).exp();
        let kzt = (1.0 + k1 * k2 * k3).powi(2);

        Ok(TopographicMultipliers { k1, k2, k3, kzt })
    }
}

impl TopographyModel for CodeTopography {
    fn topographic_factor(
        &self,
        site: &TopographyInput,
        elevation_m: f64,
        exposure: ExposureCategory,
    ) -> CalcResult<f64> {
        if !site.is_considered() {
            return Ok(1.0);
        }
        Ok(self.multipliers(site, elevation_m, exposure)?.kzt)
    }
}
