//! # Gust-Effect Factor
//!
//! Rigid structures use G = 0.85. Flexible structures (fundamental frequency
//! below 1 Hz) use the closed-form resonant-response factor G_f:
//!
//! ```text
//! ẑ   = max(0.6 h, 9.14 m)
//! I_z = c (10/ẑ)^(1/6)                 turbulence intensity
//! L_z = ℓ (ẑ/10)^ε̄                     integral length scale
//! Q   = √(1 / (1 + 0.63 ((B + h)/L_z)^0.63))        background response
//! g_R = √(2 ln(3600 n₁)) + 0.577 / √(2 ln(3600 n₁))  resonant peak factor
//! V_z = b̄ (ẑ/10)^ᾱ V                   mean hourly speed at ẑ
//! N₁  = n₁ L_z / V_z
//! R_n = 7.47 N₁ / (1 + 10.3 N₁)^(5/3)
//! R_ℓ = 1/η − (1 − e^(−2η)) / (2η²)    with η_h = 4.6 n₁ h/V_z,
//!                                           η_B = 4.6 n₁ B/V_z,
//!                                           η_L = 15.4 n₁ L/V_z
//! R   = √((1/β) R_n R_h R_B (0.53 + 0.47 R_L))
//! G_f = 0.925 (1 + 1.7 I_z √(g_Q² Q² + g_R² R²)) / (1 + 1.7 g_v I_z)
//! ```
//!
//! The result is not clamped; realistic buildings land near 0.85–1.2.
//!
//! ## Example
//!
//! ```rust
//! use wind_core::gust::{GustInput, GustModel, SpectralGustModel};
//! use wind_core::tables::{ExposureCategory, Rigidity};
//!
//! let input = GustInput {
//!     height_m: 30.0,
//!     width_m: 20.0,
//!     length_m: 15.0,
//!     wind_speed_ms: 65.7,
//!     natural_frequency_hz: 0.45,
//!     damping_ratio: 0.02,
//!     exposure: ExposureCategory::B,
//! };
//!
//! assert_eq!(SpectralGustModel.gust_effect_factor(Rigidity::Rigid, &input).unwrap(), 0.85);
//! let g_f = SpectralGustModel.gust_effect_factor(Rigidity::Flexible, &input).unwrap();
//! assert!((g_f - 0.995).abs() < 0.001);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::tables::{ExposureCategory, Rigidity};

/// Gust-effect factor for rigid structures
pub const RIGID_GUST_FACTOR: f64 = 0.85;

/// Minimum reference height ẑ (m), 30 ft
const Z_MIN_M: f64 = 9.14;
/// Integral length scale factor ℓ (m)
const LENGTH_SCALE_M: f64 = 97.54;
/// Integral length scale power law exponent ε̄
const LENGTH_SCALE_EXPONENT: f64 = 0.333;
/// Background peak factor g_Q
const G_Q: f64 = 3.4;
/// Wind-speed peak factor g_v
const G_V: f64 = 3.4;
/// Averaging period for the resonant peak factor (s)
const AVERAGING_PERIOD_S: f64 = 3600.0;

/// Terrain constants for the gust model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainConstants {
    /// Mean-speed power law exponent ᾱ
    pub alpha: f64,
    /// Mean-speed factor b̄
    pub b: f64,
    /// Turbulence intensity factor c
    pub c: f64,
}

impl TerrainConstants {
    pub fn for_exposure(exposure: ExposureCategory) -> Self {
        match exposure {
            ExposureCategory::A => TerrainConstants { alpha: 0.25, b: 0.45, c: 0.30 },
            ExposureCategory::B => TerrainConstants { alpha: 0.20, b: 0.35, c: 0.25 },
            ExposureCategory::C => TerrainConstants { alpha: 0.15, b: 0.25, c: 0.20 },
        }
    }
}

/// Building and site properties the gust model needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GustInput {
    /// Mean roof height h (m)
    pub height_m: f64,
    /// Horizontal dimension normal to wind B (m)
    pub width_m: f64,
    /// Horizontal dimension parallel to wind L (m)
    pub length_m: f64,
    /// Basic wind speed V (m/s)
    pub wind_speed_ms: f64,
    /// Fundamental natural frequency n₁ (Hz)
    pub natural_frequency_hz: f64,
    /// Damping ratio β (fraction of critical)
    pub damping_ratio: f64,
    /// Exposure category
    pub exposure: ExposureCategory,
}

impl GustInput {
    fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("height_m", self.height_m),
            ("width_m", self.width_m),
            ("length_m", self.length_m),
            ("wind_speed_ms", self.wind_speed_ms),
            ("natural_frequency_hz", self.natural_frequency_hz),
            ("damping_ratio", self.damping_ratio),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(CalcError::invalid_gust(field, value.to_string(), "Must be positive"));
            }
        }
        if AVERAGING_PERIOD_S * self.natural_frequency_hz <= 1.0 {
            return Err(CalcError::invalid_gust(
                "natural_frequency_hz",
                self.natural_frequency_hz.to_string(),
                "ln(3600·n₁) must be positive for the resonant peak factor",
            ));
        }
        Ok(())
    }
}

/// All intermediate terms of a flexible gust-factor evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlexibleGustResponse {
    /// Equivalent height ẑ (m)
    pub z_bar_m: f64,
    /// Turbulence intensity I_z
    pub turbulence_intensity: f64,
    /// Integral length scale L_z (m)
    pub length_scale_m: f64,
    /// Background response Q
    pub background_response: f64,
    /// Resonant peak factor g_R
    pub resonant_peak_factor: f64,
    /// Mean hourly wind speed at ẑ, V_z (m/s)
    pub mean_speed_ms: f64,
    /// Reduced frequency N₁
    pub reduced_frequency: f64,
    /// Spectral term R_n
    pub r_n: f64,
    /// Height reduction R_h
    pub r_h: f64,
    /// Breadth reduction R_B
    pub r_b: f64,
    /// Length reduction R_L
    pub r_l: f64,
    /// Resonant response R
    pub resonant_response: f64,
    /// Gust-effect factor G_f
    pub gust_factor: f64,
}

/// Aspect reduction function R_ℓ(η)
pub fn aspect_reduction(eta: f64) -> f64 {
    1.0 / eta - (1.0 / (2.0 * eta.powi(2))) * (1.0 - (-2.0 * eta).exp())
}

/// Gust-effect factor model.
///
/// Implement `flexible_response` for a different code edition; rigid
/// structures are handled by the provided `gust_effect_factor`.
pub trait GustModel {
    /// Full resonant-response evaluation for a flexible structure
    fn flexible_response(&self, input: &GustInput) -> CalcResult<FlexibleGustResponse>;

    /// G for rigid structures, G_f for flexible ones
    fn gust_effect_factor(&self, rigidity: Rigidity, input: &GustInput) -> CalcResult<f64> {
        match rigidity {
            Rigidity::Rigid => Ok(RIGID_GUST_FACTOR),
            Rigidity::Flexible => Ok(self.flexible_response(input)?.gust_factor),
        }
    }
}

/// Closed-form along-wind spectral model
#[derive(Debug, Clone, Copy, Default)]
pub struct SpectralGustModel;

impl GustModel for SpectralGustModel {
    fn flexible_response(&self, input: &GustInput) -> CalcResult<FlexibleGustResponse> {
        input.validate()?;
        let terrain = TerrainConstants::for_exposure(input.exposure);
        let h = input.height_m;
        let n1 = input.natural_frequency_hz;

        let z_bar = (0.6 * h).max(Z_MIN_M);
        let turbulence_intensity = terrain.c * (10.0 / z_bar).powf(1.0 / 6.0);
        let length_scale = LENGTH_SCALE_M * (z_bar / 10.0).powf(LENGTH_SCALE_EXPONENT);

        let background_response = (1.0 / (1.0 + 0.63 * ((input.width_m + h) / length_scale).powf(0.63))).sqrt();

        let two_ln = 2.0 * (AVERAGING_PERIOD_S * n1).ln();
        let resonant_peak_factor = two_ln.sqrt() + 0.577 / two_ln.sqrt();

        let mean_speed = terrain.b * (z_bar / 10.0).powf(terrain.alpha) * input.wind_speed_ms;
        let reduced_frequency = n1 * length_scale / mean_speed;
        let r_n = 7.47 * reduced_frequency / (1.0 + 10.3 * reduced_frequency).powf(5.0 / 3.0);

        let r_h = aspect_reduction(4.6 * n1 * h / mean_speed);
        let r_b = aspect_reduction(4.6 * n1 * input.width_m / mean_speed);
        let r_l = aspect_reduction(15.4 * n1 * input.length_m / mean_speed);

        let resonant_response = ((1.0 / input.damping_ratio) * r_n * r_h * r_b * (0.53 + 0.47 * r_l)).sqrt();

        let peak = ((G_Q * background_response).powi(2) + (resonant_peak_factor * resonant_response).powi(2)).sqrt();
        let gust_factor =
            0.925 * (1.0 + 1.7 * turbulence_intensity * peak) / (1.0 + 1.7 * G_V * turbulence_intensity);

        Ok(FlexibleGustResponse {
            z_bar_m: z_bar,
            turbulence_intensity,
            length_scale_m: length_scale,
            background_response,
            resonant_peak_factor,
            mean_speed_ms: mean_speed,
            reduced_frequency,
            r_n,
            r_h,
            r_b,
            r_l,
            resonant_response,
            gust_factor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mid_rise() -> GustInput {
        GustInput {
            height_m: 30.0,
            width_m: 20.0,
            length_m: 15.0,
            wind_speed_ms: 65.7,
            natural_frequency_hz: 0.45,
            damping_ratio: 0.02,
            exposure: ExposureCategory::B,
        }
    }

    #[test]
    fn test_rigid_is_constant() {
        let mut input = mid_rise();
        input.damping_ratio = -1.0; // ignored for rigid structures
        input.natural_frequency_hz = 0.0;
        let g = SpectralGustModel.gust_effect_factor(Rigidity::Rigid, &input).unwrap();
        assert_eq!(g, 0.85);
    }

    #[test]
    fn test_flexible_intermediate_terms() {
        let r = SpectralGustModel.flexible_response(&mid_rise()).unwrap();
        // ẑ = max(0.6 × 30, 9.14) = 18 m
        assert!((r.z_bar_m - 18.0).abs() < 1e-12);
        assert!((r.turbulence_intensity - 0.22667).abs() < 1e-5);
        assert!((r.length_scale_m - 118.628).abs() < 1e-3);
        assert!((r.background_response - 0.85575).abs() < 1e-5);
        assert!((r.resonant_peak_factor - 3.99461).abs() < 1e-5);
        assert!((r.mean_speed_ms - 25.8635).abs() < 1e-4);
        assert!((r.resonant_response - 0.63261).abs() < 1e-5);
        assert!((r.gust_factor - 0.99501).abs() < 1e-5);
    }

    #[test]
    fn test_flexible_tall_building_exposure_c() {
        let input = GustInput {
            height_m: 120.0,
            width_m: 40.0,
            length_m: 40.0,
            wind_speed_ms: 65.7,
            natural_frequency_hz: 0.3,
            damping_ratio: 0.015,
            exposure: ExposureCategory::C,
        };
        let g = SpectralGustModel.gust_effect_factor(Rigidity::Flexible, &input).unwrap();
        assert!((g - 0.87922).abs() < 1e-5);
    }

    #[test]
    fn test_minimum_reference_height() {
        let mut input = mid_rise();
        input.height_m = 6.0;
        let r = SpectralGustModel.flexible_response(&input).unwrap();
        assert_eq!(r.z_bar_m, 9.14);
    }

    #[test]
    fn test_more_damping_lowers_gust_factor() {
        let lightly_damped = SpectralGustModel.flexible_response(&mid_rise()).unwrap();
        let mut input = mid_rise();
        input.damping_ratio = 0.05;
        let heavily_damped = SpectralGustModel.flexible_response(&input).unwrap();
        assert!(heavily_damped.gust_factor < lightly_damped.gust_factor);
    }

    #[test]
    fn test_aspect_reduction_limits() {
        // R → 1 as η → 0 and R ≈ 1/η for large η
        assert!((aspect_reduction(1e-3) - 1.0).abs() < 1e-3);
        assert!((aspect_reduction(100.0) - (0.01 - 0.00005)).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_inputs() {
        let base = mid_rise();
        let cases = [
            GustInput { natural_frequency_hz: 0.0, ..base },
            GustInput { height_m: -30.0, ..base },
            GustInput { damping_ratio: 0.0, ..base },
            // 3600 × n₁ < 1: logarithm of the peak factor is negative
            GustInput { natural_frequency_hz: 0.0001, ..base },
        ];
        for input in cases {
            let err = SpectralGustModel
                .gust_effect_factor(Rigidity::Flexible, &input)
                .unwrap_err();
            assert_eq!(err.error_code(), "INVALID_GUST_INPUT");
        }
    }
}
