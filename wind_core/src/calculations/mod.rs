//! # Wind Pressure Calculations
//!
//! The two load paths of the engine. Each follows the same pattern:
//!
//! - `*Input` - Scalar factors resolved once per configuration
//! - `*Result` / `*Record` - Calculated pressures (JSON-serializable)
//! - `calculate(...) -> CalcResult<...>` - Pure calculation function
//!
//! Both paths evaluate velocity pressure through [`SiteExposure`], so a given
//! elevation always yields the same K_z, K_zt and q_z regardless of which
//! path asks (up to the K_z row, which differs for exposure A).
//!
//! ## Available Calculations
//!
//! - [`mwfrs`] - Main wind force resisting system pressures
//! - [`cladding`] - Components & cladding pressures by effective area

pub mod cladding;
pub mod mwfrs;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::tables::{exposure_coefficient, ExposureCategory, WindSystem};
use crate::topography::{TopographyInput, TopographyModel};

pub use cladding::{
    effective_wind_area, CladdingAreaGroup, CladdingPressureRecord, CladdingResults, RoofZonePressures,
    WallZonePressures,
};
pub use mwfrs::{LevelPressureRecord, MwfrsInput, MwfrsReference, MwfrsResult, ParapetPressure};

/// Velocity pressure evaluated at one elevation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityPressure {
    /// Elevation above grade (m)
    pub elevation_m: f64,
    /// Velocity-pressure exposure coefficient K_z
    pub kz: f64,
    /// Topographic factor K_zt
    pub kzt: f64,
    /// Velocity pressure q_z (kPa)
    pub q_z: f64,
}

/// Site data shared by both load paths.
///
/// `base_velocity_pressure` is q_zk = 0.000613·K_d·V²·I, i.e. the velocity
/// pressure before the height-dependent K_z and K_zt are applied.
pub struct SiteExposure<'a, T: TopographyModel> {
    pub base_velocity_pressure: f64,
    pub exposure: ExposureCategory,
    pub site: &'a TopographyInput,
    pub topography: &'a T,
}

impl<'a, T: TopographyModel> SiteExposure<'a, T> {
    /// K_z, K_zt and q_z at an elevation for the given wind system
    pub fn at(&self, elevation_m: f64, system: WindSystem) -> CalcResult<VelocityPressure> {
        let kz = exposure_coefficient(self.exposure, elevation_m, system);
        let kzt = self.topography.topographic_factor(self.site, elevation_m, self.exposure)?;
        Ok(VelocityPressure {
            elevation_m,
            kz,
            kzt,
            q_z: self.base_velocity_pressure * kz * kzt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topography::CodeTopography;

    #[test]
    fn test_site_exposure_matches_table() {
        let site = TopographyInput::homogeneous();
        let exposure = SiteExposure {
            base_velocity_pressure: 2.0,
            exposure: ExposureCategory::B,
            site: &site,
            topography: &CodeTopography,
        };
        let vp = exposure.at(30.0, WindSystem::Mwfrs).unwrap();
        let kz = exposure_coefficient(ExposureCategory::B, 30.0, WindSystem::Mwfrs);
        assert_eq!(vp.kz, kz);
        assert_eq!(vp.kzt, 1.0);
        assert!((vp.q_z - 2.0 * kz).abs() < 1e-12);
    }
}
