//! # Main Wind Force Resisting System
//!
//! Directional-procedure wall pressures for the whole structure.
//!
//! ## Reference height (roof, h)
//!
//! ```text
//! q_h  = q_zk · K_h · K_zt(h)
//! P_hi = q_h · GC_pi                 internal
//! P_hl = q_h · G · C_pl − P_hi       leeward
//! P_hs = q_h · G · C_ps − P_hi       side
//! ```
//!
//! ## Per level (windward wall)
//!
//! ```text
//! q_z  = q_zk · K_z(z) · K_zt(z)
//! P_zw = q_z · G · C_pw + P_hi
//! ```
//!
//! K_z and K_zt are re-evaluated at every level because both vary with height.
//!
//! ## Parapet
//!
//! Evaluated at h + h_p with GC_pn = +1.5 (windward) and −1.0 (leeward). With
//! no parapet the record is the zero case at elevation 0 and carries no
//! physical meaning.

use serde::{Deserialize, Serialize};

use super::{SiteExposure, VelocityPressure};
use crate::errors::CalcResult;
use crate::height_profile::HeightProfile;
use crate::tables::pressure_coefficients::{GCPN_PARAPET_LEEWARD, GCPN_PARAPET_WINDWARD};
use crate::tables::{ExternalPressureCoefficients, WindSystem};
use crate::topography::TopographyModel;

/// Factors resolved once per configuration for the MWFRS path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MwfrsInput {
    /// Mean roof height h (m)
    pub height_m: f64,
    /// Parapet height above the roof (m)
    pub parapet_height_m: f64,
    /// Gust-effect factor G
    pub gust_factor: f64,
    /// Internal pressure coefficient GC_pi
    pub internal_coefficient: f64,
    /// Wall external pressure coefficients
    pub external: ExternalPressureCoefficients,
}

/// Pressures at the reference (roof) height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MwfrsReference {
    /// K_h
    pub kz: f64,
    /// K_zt at roof height
    pub kzt: f64,
    /// q_h (kPa)
    pub q_h: f64,
    /// P_hi (kPa)
    pub internal: f64,
    /// P_hl (kPa)
    pub leeward: f64,
    /// P_hs (kPa)
    pub side: f64,
}

/// Windward pressure at one floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelPressureRecord {
    pub level: usize,
    pub floor_height_m: f64,
    pub elevation_m: f64,
    pub kz: f64,
    pub kzt: f64,
    /// q_z (kPa)
    pub q_z: f64,
    /// P_zw (kPa)
    pub windward: f64,
}

/// Parapet net pressures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParapetPressure {
    /// Configured parapet height (m)
    pub parapet_height_m: f64,
    /// Evaluation elevation: h + h_p, or 0 without a parapet
    pub elevation_m: f64,
    pub kz: f64,
    pub kzt: f64,
    /// q_p (kPa)
    pub q_p: f64,
    /// Windward parapet P_pw (kPa)
    pub windward: f64,
    /// Leeward parapet P_pl (kPa)
    pub leeward: f64,
}

impl ParapetPressure {
    /// True when a parapet is configured and the record is physical
    pub fn is_present(&self) -> bool {
        self.parapet_height_m > 0.0
    }
}

/// Complete MWFRS output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MwfrsResult {
    pub reference: MwfrsReference,
    pub levels: Vec<LevelPressureRecord>,
    pub parapet: ParapetPressure,
}

/// Reference-height pressure envelope
pub fn reference_pressures<T: TopographyModel>(
    site: &SiteExposure<'_, T>,
    input: &MwfrsInput,
) -> CalcResult<MwfrsReference> {
    let VelocityPressure { kz, kzt, q_z: q_h, .. } = site.at(input.height_m, WindSystem::Mwfrs)?;
    let internal = q_h * input.internal_coefficient;

    Ok(MwfrsReference {
        kz,
        kzt,
        q_h,
        internal,
        leeward: q_h * input.gust_factor * input.external.leeward - internal,
        side: q_h * input.gust_factor * input.external.side - internal,
    })
}

/// One windward record per floor of the profile
pub fn level_pressures<T: TopographyModel>(
    site: &SiteExposure<'_, T>,
    profile: &HeightProfile,
    input: &MwfrsInput,
    reference: &MwfrsReference,
) -> CalcResult<Vec<LevelPressureRecord>> {
    profile
        .iter()
        .map(|level| -> CalcResult<LevelPressureRecord> {
            let vp = site.at(level.elevation_m, WindSystem::Mwfrs)?;
            Ok(LevelPressureRecord {
                level: level.level,
                floor_height_m: level.floor_height_m,
                elevation_m: level.elevation_m,
                kz: vp.kz,
                kzt: vp.kzt,
                q_z: vp.q_z,
                windward: vp.q_z * input.gust_factor * input.external.windward + reference.internal,
            })
        })
        .collect()
}

/// Parapet pressures at h + h_p
pub fn parapet_pressure<T: TopographyModel>(
    site: &SiteExposure<'_, T>,
    input: &MwfrsInput,
) -> CalcResult<ParapetPressure> {
    let elevation_m = if input.parapet_height_m > 0.0 {
        input.height_m + input.parapet_height_m
    } else {
        0.0
    };
    let vp = site.at(elevation_m, WindSystem::Mwfrs)?;

    Ok(ParapetPressure {
        parapet_height_m: input.parapet_height_m,
        elevation_m,
        kz: vp.kz,
        kzt: vp.kzt,
        q_p: vp.q_z,
        windward: GCPN_PARAPET_WINDWARD * vp.q_z,
        leeward: GCPN_PARAPET_LEEWARD * vp.q_z,
    })
}

/// Run the full MWFRS path.
///
/// Either every output is produced or the first error is returned.
pub fn calculate<T: TopographyModel>(
    site: &SiteExposure<'_, T>,
    profile: &HeightProfile,
    input: &MwfrsInput,
) -> CalcResult<MwfrsResult> {
    let reference = reference_pressures(site, input)?;
    let levels = level_pressures(site, profile, input, &reference)?;
    let parapet = parapet_pressure(site, input)?;

    Ok(MwfrsResult {
        reference,
        levels,
        parapet,
    })
}
