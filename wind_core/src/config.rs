//! # Wind Load Configuration
//!
//! [`WindLoadConfig`] is the single input record of the engine. It is plain
//! data: JSON-serializable, validated once, and never mutated by the engine.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "structure_type": "Buildings",
//!   "enclosure_type": "Enclosed",
//!   "roof_type": "Flat",
//!   "location": "Dhaka",
//!   "rigidity": "Rigid",
//!   "natural_frequency_hz": 0.45,
//!   "damping_ratio": 0.02,
//!   "height_m": 30.0,
//!   "width_m": 20.0,
//!   "length_m": 15.0,
//!   "parapet_height_m": 0.0,
//!   "exposure": "B",
//!   "occupancy": "II",
//!   "floor_heights_m": [3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0],
//!   "effective_areas_m2": [5.0, 10.0, 20.0, 30.0, 40.0, 46.5],
//!   "selected_levels": [5, 10]
//! }
//! ```
//!
//! Omitted optional fields fall back to: no wind speed override, homogeneous
//! topography, regular building, the default effective areas, and the
//! mid-height plus top levels for cladding.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::tables::{
    location_wind_speed, BuildingType, EnclosureType, ExposureCategory, OccupancyCategory, Rigidity, RoofType,
    StructureType,
};
use crate::topography::TopographyInput;

/// Effective wind areas evaluated when none are configured (m²)
pub const DEFAULT_EFFECTIVE_AREAS_M2: [f64; 6] = [5.0, 10.0, 20.0, 30.0, 40.0, 46.5];

fn default_effective_areas() -> Vec<f64> {
    DEFAULT_EFFECTIVE_AREAS_M2.to_vec()
}

/// Default cladding levels for a building: mid-height and top floor
pub fn default_selected_levels(floor_count: usize) -> Vec<usize> {
    match floor_count {
        0 => Vec::new(),
        1 => vec![1],
        n => vec![n.div_ceil(2), n],
    }
}

/// Free-text engineering notes echoed into reports
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindNotes {
    #[serde(default)]
    pub exposure: String,
    #[serde(default)]
    pub occupancy: String,
    #[serde(default)]
    pub topography: String,
}

/// Input record for a wind load evaluation. All lengths in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindLoadConfig {
    /// Structure type (governs K_d)
    pub structure_type: StructureType,

    /// Plan regularity
    #[serde(default)]
    pub building_type: BuildingType,

    /// Enclosure classification (governs GC_pi)
    pub enclosure_type: EnclosureType,

    /// Roof shape
    #[serde(default)]
    pub roof_type: RoofType,

    /// Named location for the basic wind speed table
    pub location: String,

    /// Basic wind speed (m/s) to use instead of the location table
    #[serde(default)]
    pub wind_speed_override_ms: Option<f64>,

    /// Rigid or flexible; selects the gust-factor path
    pub rigidity: Rigidity,

    /// Fundamental natural frequency n₁ (Hz), used when flexible
    pub natural_frequency_hz: f64,

    /// Damping ratio β, used when flexible
    pub damping_ratio: f64,

    /// Mean roof height h (m)
    pub height_m: f64,

    /// Plan dimension normal to the wind B (m)
    pub width_m: f64,

    /// Plan dimension parallel to the wind L (m)
    pub length_m: f64,

    /// Parapet height above the roof (m); 0 when there is no parapet
    #[serde(default)]
    pub parapet_height_m: f64,

    /// Exposure category
    pub exposure: ExposureCategory,

    /// Occupancy category (governs I)
    pub occupancy: OccupancyCategory,

    /// Site topography
    #[serde(default)]
    pub topography: TopographyInput,

    /// Storey heights, bottom floor first (m)
    pub floor_heights_m: Vec<f64>,

    /// Effective wind areas to evaluate for cladding (m²)
    #[serde(default = "default_effective_areas")]
    pub effective_areas_m2: Vec<f64>,

    /// 1-based levels evaluated for cladding. Empty selects the defaults.
    #[serde(default)]
    pub selected_levels: Vec<usize>,

    /// Engineer's notes
    #[serde(default)]
    pub notes: WindNotes,
}

impl WindLoadConfig {
    /// Ten-storey office block in Dhaka used by the CLI demo and the tests.
    pub fn demo_building() -> Self {
        WindLoadConfig {
            structure_type: StructureType::Buildings,
            building_type: BuildingType::Regular,
            enclosure_type: EnclosureType::Enclosed,
            roof_type: RoofType::Flat,
            location: "Dhaka".to_string(),
            wind_speed_override_ms: None,
            rigidity: Rigidity::Rigid,
            natural_frequency_hz: 0.45,
            damping_ratio: 0.02,
            height_m: 30.0,
            width_m: 20.0,
            length_m: 15.0,
            parapet_height_m: 0.0,
            exposure: ExposureCategory::B,
            occupancy: OccupancyCategory::II,
            topography: TopographyInput::homogeneous(),
            floor_heights_m: vec![3.0; 10],
            effective_areas_m2: default_effective_areas(),
            selected_levels: vec![5, 10],
            notes: WindNotes::default(),
        }
    }

    /// Validate geometric and numeric inputs.
    ///
    /// Categorical inputs are closed enums and need no checking here; the
    /// location is checked when the wind speed is resolved.
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("height_m", self.height_m),
            ("width_m", self.width_m),
            ("length_m", self.length_m),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
            }
        }
        if !(self.parapet_height_m >= 0.0) {
            return Err(CalcError::invalid_input(
                "parapet_height_m",
                self.parapet_height_m.to_string(),
                "Parapet height cannot be negative",
            ));
        }
        if let Some(speed) = self.wind_speed_override_ms {
            if !(speed > 0.0) {
                return Err(CalcError::invalid_input(
                    "wind_speed_override_ms",
                    speed.to_string(),
                    "Wind speed must be positive",
                ));
            }
        }
        for (i, height) in self.floor_heights_m.iter().enumerate() {
            if !(*height > 0.0) {
                return Err(CalcError::invalid_input(
                    format!("floor_heights_m[{}]", i),
                    height.to_string(),
                    "Floor height must be positive",
                ));
            }
        }
        for (i, area) in self.effective_areas_m2.iter().enumerate() {
            if !(*area > 0.0) {
                return Err(CalcError::invalid_input(
                    format!("effective_areas_m2[{}]", i),
                    area.to_string(),
                    "Effective wind area must be positive",
                ));
            }
        }
        Ok(())
    }

    /// Basic wind speed V (m/s): the override if set, else the location table
    pub fn base_wind_speed_ms(&self) -> CalcResult<f64> {
        match self.wind_speed_override_ms {
            Some(speed) => Ok(speed),
            None => location_wind_speed(&self.location),
        }
    }

    /// Plan aspect ratio L/B
    pub fn aspect_ratio(&self) -> f64 {
        self.length_m / self.width_m
    }

    /// Levels to evaluate for cladding, applying the default when none are set
    pub fn cladding_levels(&self) -> Vec<usize> {
        if self.selected_levels.is_empty() {
            default_selected_levels(self.floor_heights_m.len())
        } else {
            self.selected_levels.clone()
        }
    }
}
