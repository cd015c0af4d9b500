//! Velocity-pressure exposure coefficient K_z and the velocity pressure q_z.
//!
//! ```text
//! q_z = 0.000613 × K_z × K_zt × K_d × V² × I      (kPa, V in m/s)
//! ```
//!
//! K_z is tabulated at fixed reference heights and interpolated linearly in
//! between. Heights outside the table return the boundary value; the table
//! is never extrapolated.

use super::{ExposureCategory, WindSystem};

/// SI velocity pressure coefficient (kPa per (m/s)²)
pub const VELOCITY_PRESSURE_COEFFICIENT: f64 = 0.000613;

/// Reference heights (m) of the K_z table
pub const REFERENCE_HEIGHTS_M: [f64; 22] = [
    4.6, 6.1, 7.6, 9.1, 12.2, 15.2, 18.0, 21.3, 24.4, 27.41, 30.5, 36.6, 42.7, 48.8, 54.9, 61.0, 76.2,
    91.4, 106.7, 121.9, 137.2, 152.4,
];

const KZ_A_CLADDING: [f64; 22] = [
    0.70, 0.70, 0.70, 0.70, 0.76, 0.81, 0.85, 0.89, 0.93, 0.96, 0.99, 1.04, 1.09, 1.13, 1.17, 1.20, 1.28,
    1.35, 1.41, 1.47, 1.52, 1.56,
];

const KZ_A_MWFRS: [f64; 22] = [
    0.57, 0.62, 0.66, 0.70, 0.76, 0.81, 0.85, 0.89, 0.93, 0.96, 0.99, 1.04, 1.09, 1.13, 1.17, 1.20, 1.28,
    1.35, 1.41, 1.47, 1.52, 1.56,
];

const KZ_B: [f64; 22] = [
    0.85, 0.90, 0.94, 0.98, 1.04, 1.09, 1.13, 1.17, 1.21, 1.24, 1.26, 1.31, 1.36, 1.39, 1.43, 1.46, 1.53,
    1.59, 1.64, 1.69, 1.73, 1.77,
];

const KZ_C: [f64; 22] = [
    1.03, 1.08, 1.12, 1.16, 1.22, 1.27, 1.31, 1.34, 1.38, 1.40, 1.43, 1.48, 1.52, 1.55, 1.58, 1.61, 1.68,
    1.73, 1.78, 1.82, 1.86, 1.89,
];

/// K_z column for an exposure category and load path
pub fn exposure_row(exposure: ExposureCategory, system: WindSystem) -> &'static [f64; 22] {
    match (exposure, system) {
        (ExposureCategory::A, WindSystem::Mwfrs) => &KZ_A_MWFRS,
        (ExposureCategory::A, WindSystem::ComponentsAndCladding) => &KZ_A_CLADDING,
        (ExposureCategory::B, _) => &KZ_B,
        (ExposureCategory::C, _) => &KZ_C,
    }
}

/// Velocity-pressure exposure coefficient K_z at a height above grade.
///
/// Monotone piecewise-linear between reference heights, clamped at both ends.
pub fn exposure_coefficient(exposure: ExposureCategory, height_m: f64, system: WindSystem) -> f64 {
    interpolate_clamped(&REFERENCE_HEIGHTS_M, exposure_row(exposure, system), height_m)
}

/// Velocity pressure q_z (kPa) from its factors
pub fn velocity_pressure(kz: f64, kzt: f64, kd: f64, wind_speed_ms: f64, importance: f64) -> f64 {
    VELOCITY_PRESSURE_COEFFICIENT * kz * kzt * kd * wind_speed_ms.powi(2) * importance
}

/// Linear interpolation over ascending `xs`, returning the end values outside the range
fn interpolate_clamped(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let last = xs.len() - 1;
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[last] {
        return ys[last];
    }
    // First index with xs[i] > x; x lies in [xs[i-1], xs[i])
    let i = xs.partition_point(|&h| h <= x);
    let (x0, x1) = (xs[i - 1], xs[i]);
    let (y0, y1) = (ys[i - 1], ys[i]);
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_values_at_reference_heights() {
        assert_eq!(exposure_coefficient(ExposureCategory::B, 4.6, WindSystem::Mwfrs), 0.85);
        assert_eq!(exposure_coefficient(ExposureCategory::C, 61.0, WindSystem::Mwfrs), 1.61);
        assert_eq!(exposure_coefficient(ExposureCategory::B, 152.4, WindSystem::Mwfrs), 1.77);
    }

    #[test]
    fn test_interpolation_between_heights() {
        // Between 27.41 m (1.24) and 30.5 m (1.26)
        let kz = exposure_coefficient(ExposureCategory::B, 30.0, WindSystem::Mwfrs);
        let expected = 1.24 + 0.02 * (30.0 - 27.41) / (30.5 - 27.41);
        assert!((kz - expected).abs() < 1e-12);
        assert!((kz - 1.2568).abs() < 1e-4);
    }

    #[test]
    fn test_clamped_outside_table() {
        assert_eq!(exposure_coefficient(ExposureCategory::B, 0.0, WindSystem::Mwfrs), 0.85);
        assert_eq!(exposure_coefficient(ExposureCategory::B, -3.0, WindSystem::Mwfrs), 0.85);
        assert_eq!(exposure_coefficient(ExposureCategory::C, 500.0, WindSystem::Mwfrs), 1.89);
    }

    #[test]
    fn test_exposure_a_cladding_row_floors_at_070() {
        assert!(exposure_coefficient(ExposureCategory::A, 5.0, WindSystem::Mwfrs) < 0.70);
        assert_eq!(exposure_coefficient(ExposureCategory::A, 5.0, WindSystem::ComponentsAndCladding), 0.70);
        // Rows coincide above 9.1 m
        assert_eq!(
            exposure_coefficient(ExposureCategory::A, 40.0, WindSystem::Mwfrs),
            exposure_coefficient(ExposureCategory::A, 40.0, WindSystem::ComponentsAndCladding)
        );
    }

    #[test]
    fn test_monotonic_in_height() {
        for exposure in ExposureCategory::ALL {
            for system in [WindSystem::Mwfrs, WindSystem::ComponentsAndCladding] {
                let mut previous = f64::MIN;
                let mut z = 0.0;
                while z <= 170.0 {
                    let kz = exposure_coefficient(exposure, z, system);
                    assert!(kz >= previous, "K_z decreased at {} m for {:?}", z, exposure);
                    previous = kz;
                    z += 0.25;
                }
            }
        }
    }

    #[test]
    fn test_velocity_pressure_formula() {
        let q = velocity_pressure(1.0, 1.0, 1.0, 10.0, 1.0);
        assert!((q - 0.0613).abs() < 1e-12);
    }
}
