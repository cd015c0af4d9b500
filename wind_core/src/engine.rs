//! # Wind Load Engine
//!
//! Per-configuration orchestration. [`WindLoadEngine`] validates a
//! [`WindLoadConfig`], builds the [`HeightProfile`] and the [`FactorSet`]
//! once, then runs the MWFRS and cladding paths on demand. The engine never
//! mutates its configuration; a changed configuration means a new engine.
//!
//! ## Example
//!
//! ```rust
//! use wind_core::config::WindLoadConfig;
//! use wind_core::engine::WindLoadEngine;
//!
//! let engine = WindLoadEngine::new(WindLoadConfig::demo_building()).unwrap();
//! let summary = engine.summary().unwrap();
//!
//! assert_eq!(summary.factors.gust_factor, 0.85);
//! assert_eq!(summary.mwfrs.levels.len(), 10);
//! println!("q_h = {:.2} kPa", summary.mwfrs.reference.q_h);
//!
//! let pressure = engine.query().resolve(10.0, 15.0, "Zone 5").unwrap();
//! assert!(pressure > 0.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, warn};

use crate::calculations::cladding::{self, CladdingAreaGroup, CladdingResults};
use crate::calculations::mwfrs::{self, MwfrsInput, MwfrsResult, ParapetPressure};
use crate::calculations::SiteExposure;
use crate::config::{WindLoadConfig, WindNotes};
use crate::errors::{CalcError, CalcResult};
use crate::gust::{FlexibleGustResponse, GustInput, GustModel, SpectralGustModel};
use crate::height_profile::HeightProfile;
use crate::query::PressureQueryService;
use crate::tables::velocity_pressure::velocity_pressure;
use crate::tables::{
    BuildingType, EnclosureType, ExposureCategory, ExternalPressureCoefficients, OccupancyCategory, Rigidity,
    RoofType, StructureType,
};
use crate::topography::{CodeTopography, TopographyModel, TopographyType};

/// Allowed relative disagreement between the floor-height sum and the
/// declared building height before a warning is logged
const HEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Scalar factors derived once per configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorSet {
    /// Basic wind speed V (m/s)
    pub base_wind_speed_ms: f64,
    /// Importance factor I
    pub importance_factor: f64,
    /// Directionality factor K_d
    pub directionality_factor: f64,
    /// Internal pressure coefficient GC_pi
    pub internal_coefficient: f64,
    /// Topographic factor at roof height
    pub kzt_roof: f64,
    /// Gust-effect factor G (rigid) or G_f (flexible)
    pub gust_factor: f64,
    /// MWFRS wall coefficients
    pub external: ExternalPressureCoefficients,
    /// q_zk = 0.000613·K_d·V²·I (kPa)
    pub base_velocity_pressure: f64,
    /// Intermediate gust terms, flexible structures only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gust_response: Option<FlexibleGustResponse>,
}

/// Echo of the inputs and the base wind quantities, for reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindParameters {
    pub location: String,
    pub base_wind_speed_ms: f64,
    /// q_zk (kPa)
    pub base_velocity_pressure: f64,
    /// L/B
    pub aspect_ratio: f64,
    pub structure_type: StructureType,
    pub building_type: BuildingType,
    pub enclosure_type: EnclosureType,
    pub roof_type: RoofType,
    pub exposure: ExposureCategory,
    pub occupancy: OccupancyCategory,
    pub rigidity: Rigidity,
    pub topography_type: TopographyType,
    pub notes: WindNotes,
}

/// Everything one configuration produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindLoadSummary {
    pub parameters: WindParameters,
    pub factors: FactorSet,
    pub profile: HeightProfile,
    pub mwfrs: MwfrsResult,
    pub cladding: CladdingResults,
}

/// Wind load engine for one configuration.
///
/// The gust and topography models default to the closed-form code models and
/// can be replaced with [`WindLoadEngine::with_models`].
#[derive(Debug, Clone)]
pub struct WindLoadEngine<G: GustModel = SpectralGustModel, T: TopographyModel = CodeTopography> {
    config: WindLoadConfig,
    profile: HeightProfile,
    factors: FactorSet,
    gust_model: G,
    topography_model: T,
}

impl WindLoadEngine {
    /// Engine with the default gust and topography models
    pub fn new(config: WindLoadConfig) -> CalcResult<Self> {
        Self::with_models(config, SpectralGustModel, CodeTopography)
    }
}

impl<G: GustModel, T: TopographyModel> WindLoadEngine<G, T> {
    /// Validate the configuration and derive the profile and factors.
    pub fn with_models(config: WindLoadConfig, gust_model: G, topography_model: T) -> CalcResult<Self> {
        config.validate()?;
        let profile = HeightProfile::build(&config.floor_heights_m)?;

        let roof = profile.roof_elevation_m();
        if (roof - config.height_m).abs() > HEIGHT_SUM_TOLERANCE * config.height_m {
            warn!(
                floor_sum_m = roof,
                height_m = config.height_m,
                "floor heights do not add up to the building height"
            );
        }

        let factors = derive_factors(&config, &gust_model, &topography_model)?;
        debug!(
            v = factors.base_wind_speed_ms,
            q_zk = factors.base_velocity_pressure,
            g = factors.gust_factor,
            kzt = factors.kzt_roof,
            "wind factors derived"
        );

        Ok(WindLoadEngine {
            config,
            profile,
            factors,
            gust_model,
            topography_model,
        })
    }

    pub fn config(&self) -> &WindLoadConfig {
        &self.config
    }

    pub fn profile(&self) -> &HeightProfile {
        &self.profile
    }

    pub fn factors(&self) -> &FactorSet {
        &self.factors
    }

    pub fn gust_model(&self) -> &G {
        &self.gust_model
    }

    pub fn topography_model(&self) -> &T {
        &self.topography_model
    }

    /// Base wind quantities and the echoed inputs
    pub fn parameters(&self) -> WindParameters {
        let config = &self.config;
        WindParameters {
            location: config.location.clone(),
            base_wind_speed_ms: self.factors.base_wind_speed_ms,
            base_velocity_pressure: self.factors.base_velocity_pressure,
            aspect_ratio: config.aspect_ratio(),
            structure_type: config.structure_type,
            building_type: config.building_type,
            enclosure_type: config.enclosure_type,
            roof_type: config.roof_type,
            exposure: config.exposure,
            occupancy: config.occupancy,
            rigidity: config.rigidity,
            topography_type: config.topography.topography_type,
            notes: config.notes.clone(),
        }
    }

    fn site(&self) -> SiteExposure<'_, T> {
        SiteExposure {
            base_velocity_pressure: self.factors.base_velocity_pressure,
            exposure: self.config.exposure,
            site: &self.config.topography,
            topography: &self.topography_model,
        }
    }

    fn mwfrs_input(&self) -> MwfrsInput {
        MwfrsInput {
            height_m: self.config.height_m,
            parapet_height_m: self.config.parapet_height_m,
            gust_factor: self.factors.gust_factor,
            internal_coefficient: self.factors.internal_coefficient,
            external: self.factors.external,
        }
    }

    /// Reference-height envelope, per-level windward profile and parapet
    pub fn mwfrs(&self) -> CalcResult<MwfrsResult> {
        let _span = debug_span!("mwfrs", floors = self.profile.len()).entered();
        let result = mwfrs::calculate(&self.site(), &self.profile, &self.mwfrs_input())?;
        debug!(q_h = result.reference.q_h, "mwfrs complete");
        Ok(result)
    }

    /// Parapet pressures only
    pub fn parapet(&self) -> CalcResult<ParapetPressure> {
        mwfrs::parapet_pressure(&self.site(), &self.mwfrs_input())
    }

    /// Cladding rows for every configured effective area
    pub fn cladding(&self) -> CalcResult<CladdingResults> {
        let levels = self.config.cladding_levels();
        let _span = debug_span!("cladding", areas = self.config.effective_areas_m2.len(), levels = levels.len())
            .entered();
        cladding::calculate(
            &self.site(),
            &self.profile,
            self.factors.internal_coefficient,
            &self.config.effective_areas_m2,
            &levels,
        )
    }

    /// Cladding rows for one effective area, configured or not
    pub fn cladding_for_area(&self, effective_area_m2: f64) -> CalcResult<CladdingAreaGroup> {
        if !(effective_area_m2.is_finite() && effective_area_m2 > 0.0) {
            return Err(CalcError::invalid_input(
                "effective_area_m2",
                effective_area_m2.to_string(),
                "Effective wind area must be positive and finite",
            ));
        }
        cladding::area_group(
            &self.site(),
            &self.profile,
            self.factors.internal_coefficient,
            effective_area_m2,
            &self.config.cladding_levels(),
        )
    }

    /// Run both paths and collect the results
    pub fn summary(&self) -> CalcResult<WindLoadSummary> {
        Ok(WindLoadSummary {
            parameters: self.parameters(),
            factors: self.factors.clone(),
            profile: self.profile.clone(),
            mwfrs: self.mwfrs()?,
            cladding: self.cladding()?,
        })
    }

    /// Single-pressure query surface for other design modules
    pub fn query(&self) -> PressureQueryService<'_, G, T> {
        PressureQueryService::new(self)
    }
}

fn derive_factors<G: GustModel, T: TopographyModel>(
    config: &WindLoadConfig,
    gust_model: &G,
    topography_model: &T,
) -> CalcResult<FactorSet> {
    let base_wind_speed_ms = config.base_wind_speed_ms()?;
    let importance_factor = config.occupancy.importance_factor();
    let directionality_factor = config.structure_type.directionality_factor();

    let kzt_roof = topography_model.topographic_factor(&config.topography, config.height_m, config.exposure)?;

    let gust_input = GustInput {
        height_m: config.height_m,
        width_m: config.width_m,
        length_m: config.length_m,
        wind_speed_ms: base_wind_speed_ms,
        natural_frequency_hz: config.natural_frequency_hz,
        damping_ratio: config.damping_ratio,
        exposure: config.exposure,
    };
    let (gust_factor, gust_response) = match config.rigidity {
        Rigidity::Rigid => (gust_model.gust_effect_factor(Rigidity::Rigid, &gust_input)?, None),
        Rigidity::Flexible => {
            let response = gust_model.flexible_response(&gust_input)?;
            (response.gust_factor, Some(response))
        }
    };

    Ok(FactorSet {
        base_wind_speed_ms,
        importance_factor,
        directionality_factor,
        internal_coefficient: config.enclosure_type.internal_pressure_coefficient(),
        kzt_roof,
        gust_factor,
        external: ExternalPressureCoefficients::for_plan(config.length_m, config.width_m),
        base_velocity_pressure: velocity_pressure(
            1.0,
            1.0,
            directionality_factor,
            base_wind_speed_ms,
            importance_factor,
        ),
        gust_response,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{exposure_coefficient, WindSystem};
    use crate::topography::{CrestSide, TopographyInput};

    #[test]
    fn test_dhaka_scenario() {
        let engine = WindLoadEngine::new(WindLoadConfig::demo_building()).unwrap();
        let summary = engine.summary().unwrap();

        assert_eq!(summary.factors.base_wind_speed_ms, 65.7);
        assert_eq!(summary.factors.importance_factor, 1.0);
        assert_eq!(summary.factors.directionality_factor, 0.85);
        assert_eq!(summary.factors.internal_coefficient, 0.18);
        assert_eq!(summary.factors.gust_factor, 0.85);
        assert_eq!(summary.factors.kzt_roof, 1.0);
        assert!(summary.factors.gust_response.is_none());
        assert!((engine.profile().roof_elevation_m() - 30.0).abs() < 1e-9);

        let kz = exposure_coefficient(ExposureCategory::B, 30.0, WindSystem::Mwfrs);
        let expected = 0.000613 * kz * 1.0 * 0.85 * 65.7_f64.powi(2) * 1.0;
        let q_h = summary.mwfrs.reference.q_h;
        assert!((q_h - expected).abs() < 0.005);
        assert!((q_h - 2.8266).abs() < 0.001);

        assert_eq!(summary.mwfrs.levels.len(), 10);
        assert!(!summary.mwfrs.parapet.is_present());
        assert_eq!(summary.cladding.groups.len(), 6);
        assert_eq!(summary.cladding.rows_for(46.5).len(), 2);
    }

    #[test]
    fn test_rerun_is_identical() {
        let engine = WindLoadEngine::new(WindLoadConfig::demo_building()).unwrap();
        let first = engine.summary().unwrap();
        let second = engine.summary().unwrap();
        assert_eq!(first, second);

        let rebuilt = WindLoadEngine::new(WindLoadConfig::demo_building()).unwrap();
        assert_eq!(first, rebuilt.summary().unwrap());
    }

    #[test]
    fn test_summary_json_roundtrip() {
        let engine = WindLoadEngine::new(WindLoadConfig::demo_building()).unwrap();
        let summary = engine.summary().unwrap();
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"structure_type\":\"Buildings\""));
        let parsed: WindLoadSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.mwfrs.levels.len(), summary.mwfrs.levels.len());
        assert_eq!(parsed.parameters, summary.parameters);
    }

    #[test]
    fn test_flexible_structure_carries_breakdown() {
        let mut config = WindLoadConfig::demo_building();
        config.rigidity = Rigidity::Flexible;
        let engine = WindLoadEngine::new(config).unwrap();
        let factors = engine.factors();
        let response = factors.gust_response.unwrap();
        assert_eq!(factors.gust_factor, response.gust_factor);
        assert!(factors.gust_factor > 0.85);
    }

    #[test]
    fn test_flexible_rejects_bad_damping() {
        let mut config = WindLoadConfig::demo_building();
        config.rigidity = Rigidity::Flexible;
        config.damping_ratio = 0.0;
        let err = WindLoadEngine::new(config).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GUST_INPUT");

        // Rigid path ignores the dynamic properties
        let mut config = WindLoadConfig::demo_building();
        config.damping_ratio = 0.0;
        assert!(WindLoadEngine::new(config).is_ok());
    }

    #[test]
    fn test_unknown_location() {
        let mut config = WindLoadConfig::demo_building();
        config.location = "Atlantis".to_string();
        match WindLoadEngine::new(config) {
            Err(CalcError::InvalidCodeKey { key, .. }) => assert_eq!(key, "Atlantis"),
            other => panic!("expected InvalidCodeKey, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_empty_floor_list() {
        let mut config = WindLoadConfig::demo_building();
        config.floor_heights_m.clear();
        assert_eq!(WindLoadEngine::new(config).unwrap_err(), CalcError::EmptyFloorList);
    }

    #[test]
    fn test_topography_factor_at_roof() {
        let mut config = WindLoadConfig::demo_building();
        config.topography = TopographyInput {
            topography_type: TopographyType::Ridge2D,
            feature_height_m: 30.0,
            feature_length_m: 120.0,
            crest_distance_m: 0.0,
            crest_side: CrestSide::Upwind,
        };
        let engine = WindLoadEngine::new(config).unwrap();
        let kzt = engine.factors().kzt_roof;
        assert!(kzt > 1.0);

        let mwfrs = engine.mwfrs().unwrap();
        assert_eq!(mwfrs.reference.kzt, kzt);
        // Speed-up decays with height
        assert!(mwfrs.levels[0].kzt > mwfrs.levels[9].kzt);
    }

    #[test]
    fn test_cladding_for_unconfigured_area() {
        let engine = WindLoadEngine::new(WindLoadConfig::demo_building()).unwrap();
        let group = engine.cladding_for_area(7.5).unwrap();
        assert_eq!(group.effective_area_m2, 7.5);
        assert_eq!(group.rows.iter().map(|r| r.level).collect::<Vec<_>>(), vec![5, 10]);
    }

    #[test]
    fn test_parapet_matches_mwfrs_record() {
        let mut config = WindLoadConfig::demo_building();
        config.parapet_height_m = 1.5;
        let engine = WindLoadEngine::new(config).unwrap();

        let parapet = engine.parapet().unwrap();
        assert!(parapet.is_present());
        assert!((parapet.elevation_m - 31.5).abs() < 1e-9);
        assert_eq!(parapet, engine.mwfrs().unwrap().parapet);
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct FixedSpeedUp(f64);

    impl TopographyModel for FixedSpeedUp {
        fn topographic_factor(&self, _: &TopographyInput, _: f64, _: ExposureCategory) -> CalcResult<f64> {
            Ok(self.0)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct FixedGust(f64);

    impl GustModel for FixedGust {
        fn flexible_response(&self, _: &GustInput) -> CalcResult<FlexibleGustResponse> {
            Err(CalcError::invalid_input("rigidity", "Flexible", "Fixed gust model is rigid only"))
        }

        fn gust_effect_factor(&self, _: Rigidity, _: &GustInput) -> CalcResult<f64> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_custom_models() {
        let engine =
            WindLoadEngine::with_models(WindLoadConfig::demo_building(), FixedGust(0.9), FixedSpeedUp(1.2)).unwrap();
        assert_eq!(engine.gust_model(), &FixedGust(0.9));
        assert_eq!(engine.topography_model(), &FixedSpeedUp(1.2));
        assert_eq!(engine.factors().gust_factor, 0.9);
        assert_eq!(engine.factors().kzt_roof, 1.2);

        let baseline = WindLoadEngine::new(WindLoadConfig::demo_building()).unwrap();
        let ratio = engine.mwfrs().unwrap().reference.q_h / baseline.mwfrs().unwrap().reference.q_h;
        assert!((ratio - 1.2).abs() < 1e-9);
    }
}
