//! External pressure coefficients.
//!
//! ## MWFRS walls
//!
//! | Surface  | C_p                                   |
//! |----------|---------------------------------------|
//! | Windward | +0.8                                  |
//! | Side     | −0.7                                  |
//! | Leeward  | −0.5 (L/B ≤ 1), −0.3 (1 < L/B < 4), −0.2 (L/B ≥ 4) |
//!
//! ## Components & Cladding
//!
//! GC_p depends on the effective wind area A. Each zone curve is defined by
//! its magnitude at a lower and an upper breakpoint area; between them the
//! magnitude varies linearly in log(A):
//!
//! ```text
//! |GC_p|(A) = v_upper + (v_lower − v_upper) × (ln A_upper − ln A) / (ln A_upper − ln A_lower)
//! ```
//!
//! Below the lower breakpoint the (more severe) lower value applies, above
//! the upper breakpoint the (less severe) upper value applies.

use serde::{Deserialize, Serialize};

/// Windward wall C_p
pub const CP_WINDWARD: f64 = 0.8;

/// Side wall C_p
pub const CP_SIDE: f64 = -0.7;

/// Net parapet pressure coefficient, windward parapet
pub const GCPN_PARAPET_WINDWARD: f64 = 1.5;

/// Net parapet pressure coefficient, leeward parapet
pub const GCPN_PARAPET_LEEWARD: f64 = -1.0;

/// Lower breakpoint area for wall zones 4 and 5 (m²)
pub const WALL_LOWER_AREA_M2: f64 = 1.9;

/// Lower breakpoint area for roof zones 1, 2 and 3 (m²)
pub const ROOF_LOWER_AREA_M2: f64 = 0.9;

/// Upper breakpoint area shared by all cladding zones (m²)
pub const UPPER_AREA_M2: f64 = 46.5;

/// MWFRS wall external pressure coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExternalPressureCoefficients {
    /// Windward wall C_pw
    pub windward: f64,
    /// Leeward wall C_pl
    pub leeward: f64,
    /// Side walls C_ps
    pub side: f64,
}

impl ExternalPressureCoefficients {
    /// Wall coefficients for a building of plan length L (along wind) and width B.
    pub fn for_plan(length_m: f64, width_m: f64) -> Self {
        let aspect = length_m / width_m;
        let leeward = if aspect <= 1.0 {
            -0.5
        } else if aspect < 4.0 {
            -0.3
        } else {
            -0.2
        };
        ExternalPressureCoefficients {
            windward: CP_WINDWARD,
            leeward,
            side: CP_SIDE,
        }
    }
}

/// Area-dependent coefficient magnitude curve between two breakpoint areas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaCurve {
    /// Lower breakpoint area (m²)
    pub lower_area_m2: f64,
    /// Upper breakpoint area (m²)
    pub upper_area_m2: f64,
    /// Magnitude at and below the lower breakpoint
    pub at_lower: f64,
    /// Magnitude at and above the upper breakpoint
    pub at_upper: f64,
}

impl AreaCurve {
    pub const fn new(lower_area_m2: f64, upper_area_m2: f64, at_lower: f64, at_upper: f64) -> Self {
        AreaCurve {
            lower_area_m2,
            upper_area_m2,
            at_lower,
            at_upper,
        }
    }

    /// Coefficient magnitude at an effective wind area
    pub fn magnitude(&self, area_m2: f64) -> f64 {
        if area_m2 <= self.lower_area_m2 {
            return self.at_lower;
        }
        if area_m2 >= self.upper_area_m2 {
            return self.at_upper;
        }
        let upper_ln = self.upper_area_m2.ln();
        let span = upper_ln - self.lower_area_m2.ln();
        self.at_upper + (self.at_lower - self.at_upper) * (upper_ln - area_m2.ln()) / span
    }
}

/// Zone 4 positive (also used for Zone 5 positive)
pub const WALL_POSITIVE: AreaCurve = AreaCurve::new(WALL_LOWER_AREA_M2, UPPER_AREA_M2, 0.9, 0.6);
/// Zone 4 negative
pub const WALL_ZONE4_NEGATIVE: AreaCurve = AreaCurve::new(WALL_LOWER_AREA_M2, UPPER_AREA_M2, 0.9, 0.7);
/// Zone 5 negative
pub const WALL_ZONE5_NEGATIVE: AreaCurve = AreaCurve::new(WALL_LOWER_AREA_M2, UPPER_AREA_M2, 1.8, 1.0);
/// Zone 1 (roof field)
pub const ROOF_ZONE1: AreaCurve = AreaCurve::new(ROOF_LOWER_AREA_M2, UPPER_AREA_M2, 1.4, 0.9);
/// Zone 2 (roof edge)
pub const ROOF_ZONE2: AreaCurve = AreaCurve::new(ROOF_LOWER_AREA_M2, UPPER_AREA_M2, 2.3, 1.6);
/// Zone 3 (roof corner)
pub const ROOF_ZONE3: AreaCurve = AreaCurve::new(ROOF_LOWER_AREA_M2, UPPER_AREA_M2, 3.2, 2.3);

/// Signed wall cladding coefficients GC_p for one effective area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallCladdingCoefficients {
    pub zone4_positive: f64,
    pub zone4_negative: f64,
    pub zone5_positive: f64,
    pub zone5_negative: f64,
}

/// Signed (suction) roof cladding coefficients GC_p for one effective area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoofCladdingCoefficients {
    pub zone1: f64,
    pub zone2: f64,
    pub zone3: f64,
}

/// Wall zone coefficients at an effective wind area (m²)
pub fn wall_cladding_coefficients(area_m2: f64) -> WallCladdingCoefficients {
    let positive = WALL_POSITIVE.magnitude(area_m2);
    WallCladdingCoefficients {
        zone4_positive: positive,
        zone4_negative: -WALL_ZONE4_NEGATIVE.magnitude(area_m2),
        zone5_positive: positive,
        zone5_negative: -WALL_ZONE5_NEGATIVE.magnitude(area_m2),
    }
}

/// Roof zone coefficients at an effective wind area (m²)
pub fn roof_cladding_coefficients(area_m2: f64) -> RoofCladdingCoefficients {
    RoofCladdingCoefficients {
        zone1: -ROOF_ZONE1.magnitude(area_m2),
        zone2: -ROOF_ZONE2.magnitude(area_m2),
        zone3: -ROOF_ZONE3.magnitude(area_m2),
    }
}
