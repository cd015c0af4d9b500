//! # Components & Cladding
//!
//! Area-dependent envelope pressures for the selected levels.
//!
//! For each effective wind area A the zone coefficients GC_p(A) are resolved
//! once, then at every selected level:
//!
//! ```text
//! q_z       = q_zk · K_z(z) · K_zt(z)          (C&C exposure row)
//! P_zi      = q_z · GC_pi
//! wall (+)  = q_z · GC_p + P_zi
//! wall (−)  = q_z · GC_p − P_zi
//! roof      = q_z · GC_p − P_zi                 (suction only)
//! ```
//!
//! Internal pressure always acts to increase the net magnitude. A selected
//! level outside the profile is skipped with a warning.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::SiteExposure;
use crate::errors::CalcResult;
use crate::height_profile::HeightProfile;
use crate::tables::{
    roof_cladding_coefficients, wall_cladding_coefficients, RoofCladdingCoefficients, WallCladdingCoefficients,
    WindSystem,
};
use crate::topography::TopographyModel;

/// Effective wind area of a cladding element: max(span·width, span²/3)
pub fn effective_wind_area(span_m: f64, width_m: f64) -> f64 {
    (span_m * width_m).max(span_m * span_m / 3.0)
}

/// Wall zone pressures (kPa)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallZonePressures {
    pub zone4_positive: f64,
    pub zone4_negative: f64,
    pub zone5_positive: f64,
    pub zone5_negative: f64,
}

impl WallZonePressures {
    /// Governing magnitude for Zone 4
    pub fn zone4_governing(&self) -> f64 {
        self.zone4_positive.abs().max(self.zone4_negative.abs())
    }

    /// Governing magnitude for Zone 5
    pub fn zone5_governing(&self) -> f64 {
        self.zone5_positive.abs().max(self.zone5_negative.abs())
    }
}

/// Roof zone suction pressures (kPa, negative)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoofZonePressures {
    pub zone1: f64,
    pub zone2: f64,
    pub zone3: f64,
}

/// Pressures at one selected level for one effective area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CladdingPressureRecord {
    pub level: usize,
    pub elevation_m: f64,
    pub kz: f64,
    pub kzt: f64,
    /// q_z (kPa)
    pub q_z: f64,
    /// P_zi (kPa)
    pub internal: f64,
    pub wall: WallZonePressures,
    pub roof: RoofZonePressures,
}

/// All selected-level rows for one effective area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CladdingAreaGroup {
    pub effective_area_m2: f64,
    pub wall_coefficients: WallCladdingCoefficients,
    pub roof_coefficients: RoofCladdingCoefficients,
    /// Rows in selected-level order
    pub rows: Vec<CladdingPressureRecord>,
}

/// Cladding output keyed by effective area, in request order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CladdingResults {
    pub groups: Vec<CladdingAreaGroup>,
}

impl CladdingResults {
    /// Group for an effective area, if it was evaluated
    pub fn group(&self, effective_area_m2: f64) -> Option<&CladdingAreaGroup> {
        self.groups.iter().find(|g| g.effective_area_m2 == effective_area_m2)
    }

    /// Rows for an effective area; empty when the area was not evaluated
    pub fn rows_for(&self, effective_area_m2: f64) -> &[CladdingPressureRecord] {
        self.group(effective_area_m2).map(|g| g.rows.as_slice()).unwrap_or(&[])
    }

    /// Evaluated areas in request order
    pub fn areas(&self) -> impl Iterator<Item = f64> + '_ {
        self.groups.iter().map(|g| g.effective_area_m2)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Rows for one effective area over the selected levels
pub fn area_group<T: TopographyModel>(
    site: &SiteExposure<'_, T>,
    profile: &HeightProfile,
    internal_coefficient: f64,
    effective_area_m2: f64,
    selected_levels: &[usize],
) -> CalcResult<CladdingAreaGroup> {
    let wall_gc = wall_cladding_coefficients(effective_area_m2);
    let roof_gc = roof_cladding_coefficients(effective_area_m2);

    let mut rows = Vec::with_capacity(selected_levels.len());
    for &level in selected_levels {
        let Ok(profile_level) = profile.level(level) else {
            warn!(level, floors = profile.len(), "selected level outside height profile, skipped");
            continue;
        };

        let vp = site.at(profile_level.elevation_m, WindSystem::ComponentsAndCladding)?;
        let q = vp.q_z;
        let internal = q * internal_coefficient;

        rows.push(CladdingPressureRecord {
            level,
            elevation_m: profile_level.elevation_m,
            kz: vp.kz,
            kzt: vp.kzt,
            q_z: q,
            internal,
            wall: WallZonePressures {
                zone4_positive: q * wall_gc.zone4_positive + internal,
                zone4_negative: q * wall_gc.zone4_negative - internal,
                zone5_positive: q * wall_gc.zone5_positive + internal,
                zone5_negative: q * wall_gc.zone5_negative - internal,
            },
            roof: RoofZonePressures {
                zone1: q * roof_gc.zone1 - internal,
                zone2: q * roof_gc.zone2 - internal,
                zone3: q * roof_gc.zone3 - internal,
            },
        });
    }

    Ok(CladdingAreaGroup {
        effective_area_m2,
        wall_coefficients: wall_gc,
        roof_coefficients: roof_gc,
        rows,
    })
}

/// Evaluate every requested area. Repeated areas are evaluated once.
pub fn calculate<T: TopographyModel>(
    site: &SiteExposure<'_, T>,
    profile: &HeightProfile,
    internal_coefficient: f64,
    effective_areas_m2: &[f64],
    selected_levels: &[usize],
) -> CalcResult<CladdingResults> {
    let mut results = CladdingResults::default();
    for &area in effective_areas_m2 {
        if results.group(area).is_some() {
            continue;
        }
        let group = area_group(site, profile, internal_coefficient, area, selected_levels)?;
        results.groups.push(group);
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{exposure_coefficient, ExposureCategory};
    use crate::topography::{CodeTopography, TopographyInput};

    const Q_ZK: f64 = 0.000613 * 0.85 * 65.7 * 65.7;

    fn site(topography: &TopographyInput, exposure: ExposureCategory) -> SiteExposure<'_, CodeTopography> {
        SiteExposure {
            base_velocity_pressure: Q_ZK,
            exposure,
            site: topography,
            topography: &CodeTopography,
        }
    }

    #[test]
    fn test_effective_wind_area() {
        assert_eq!(effective_wind_area(3.0, 1.5), 4.5);
        // Long narrow element governed by span²/3
        assert_eq!(effective_wind_area(3.0, 0.5), 3.0);
    }

    #[test]
    fn test_sign_convention() {
        let topo = TopographyInput::homogeneous();
        let profile = HeightProfile::build(&[3.0; 10]).unwrap();
        let group = area_group(&site(&topo, ExposureCategory::B), &profile, 0.18, 10.0, &[10]).unwrap();
        let row = &group.rows[0];

        let gc = wall_cladding_coefficients(10.0);
        let q = row.q_z;
        assert!((row.internal - 0.18 * q).abs() < 1e-12);
        assert!((row.wall.zone4_positive - (q * gc.zone4_positive + row.internal)).abs() < 1e-12);
        assert!((row.wall.zone5_negative - (q * gc.zone5_negative - row.internal)).abs() < 1e-12);
        assert!(row.wall.zone4_positive > 0.0);
        assert!(row.wall.zone5_negative < row.wall.zone4_negative);
        assert!(row.roof.zone3 < row.roof.zone2 && row.roof.zone2 < row.roof.zone1);
        assert!(row.roof.zone1 < 0.0);
        assert_eq!(row.wall.zone5_governing(), row.wall.zone5_negative.abs());
    }

    #[test]
    fn test_uses_cladding_exposure_row() {
        let topo = TopographyInput::homogeneous();
        let profile = HeightProfile::build(&[3.0]).unwrap();
        let group = area_group(&site(&topo, ExposureCategory::A), &profile, 0.0, 5.0, &[1]).unwrap();
        let expected = exposure_coefficient(ExposureCategory::A, 3.0, WindSystem::ComponentsAndCladding);
        assert_eq!(group.rows[0].kz, expected);
    }

    #[test]
    fn test_out_of_range_levels_skipped() {
        let topo = TopographyInput::homogeneous();
        let profile = HeightProfile::build(&[3.0; 4]).unwrap();
        let group = area_group(&site(&topo, ExposureCategory::B), &profile, 0.18, 5.0, &[0, 2, 4, 9]).unwrap();
        let levels: Vec<usize> = group.rows.iter().map(|r| r.level).collect();
        assert_eq!(levels, vec![2, 4]);
    }

    #[test]
    fn test_groups_keyed_by_area() {
        let topo = TopographyInput::homogeneous();
        let profile = HeightProfile::build(&[3.0; 10]).unwrap();
        let results = calculate(
            &site(&topo, ExposureCategory::B),
            &profile,
            0.18,
            &[5.0, 10.0, 5.0, 46.5],
            &[5, 10],
        )
        .unwrap();

        assert_eq!(results.areas().collect::<Vec<_>>(), vec![5.0, 10.0, 46.5]);
        assert_eq!(results.rows_for(10.0).len(), 2);
        assert!(results.rows_for(7.0).is_empty());

        // Larger tributary area is less severe
        let small = results.rows_for(5.0)[1];
        let large = results.rows_for(46.5)[1];
        assert!(large.roof.zone3 > small.roof.zone3);
        assert!(large.wall.zone5_governing() < small.wall.zone5_governing());
    }
}
