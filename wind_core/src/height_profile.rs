//! # Height Profile
//!
//! Converts the per-floor height list into cumulative elevations. Every
//! per-level query (MWFRS windward profile, cladding levels, pressure
//! resolution) reads elevations from the same profile so the two load paths
//! stay consistent.
//!
//! ## Example
//!
//! ```rust
//! use wind_core::height_profile::HeightProfile;
//!
//! let profile = HeightProfile::build(&[4.5, 3.0, 3.0]).unwrap();
//! assert_eq!(profile.len(), 3);
//! assert_eq!(profile.level(2).unwrap().elevation_m, 7.5);
//! assert_eq!(profile.roof_elevation_m(), 10.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// One floor of the profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileLevel {
    /// 1-based level index
    pub level: usize,
    /// Storey height (m)
    pub floor_height_m: f64,
    /// Elevation of the top of this storey above grade (m)
    pub elevation_m: f64,
}

/// Ordered cumulative-elevation profile.
///
/// Invariants: at least one level, indices 1..=n contiguous, elevations
/// strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightProfile {
    levels: Vec<ProfileLevel>,
}

impl HeightProfile {
    /// Build the profile from storey heights, bottom floor first.
    pub fn build(floor_heights_m: &[f64]) -> CalcResult<Self> {
        if floor_heights_m.is_empty() {
            return Err(CalcError::EmptyFloorList);
        }

        let mut elevation = 0.0;
        let levels = floor_heights_m
            .iter()
            .enumerate()
            .map(|(i, &height)| {
                if !(height > 0.0) {
                    return Err(CalcError::invalid_input(
                        format!("floor_heights_m[{}]", i),
                        height.to_string(),
                        "Floor height must be positive",
                    ));
                }
                elevation += height;
                Ok(ProfileLevel {
                    level: i + 1,
                    floor_height_m: height,
                    elevation_m: elevation,
                })
            })
            .collect::<CalcResult<Vec<_>>>()?;

        Ok(HeightProfile { levels })
    }

    /// Level by 1-based index
    pub fn level(&self, level: usize) -> CalcResult<&ProfileLevel> {
        if level == 0 {
            return Err(CalcError::LevelOutOfRange {
                level,
                available: self.levels.len(),
            });
        }
        self.levels.get(level - 1).ok_or(CalcError::LevelOutOfRange {
            level,
            available: self.levels.len(),
        })
    }

    /// Elevation of a level's top (m)
    pub fn elevation_of(&self, level: usize) -> CalcResult<f64> {
        self.level(level).map(|l| l.elevation_m)
    }

    /// Whether `level` is a valid 1-based index
    pub fn contains(&self, level: usize) -> bool {
        level >= 1 && level <= self.levels.len()
    }

    /// Elevation of the top floor (m)
    pub fn roof_elevation_m(&self) -> f64 {
        self.levels.last().map_or(0.0, |l| l.elevation_m)
    }

    /// Number of floors
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false for a built profile
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Levels bottom to top
    pub fn levels(&self) -> &[ProfileLevel] {
        &self.levels
    }

    /// Iterate levels bottom to top
    pub fn iter(&self) -> std::slice::Iter<'_, ProfileLevel> {
        self.levels.iter()
    }
}

impl<'a> IntoIterator for &'a HeightProfile {
    type Item = &'a ProfileLevel;
    type IntoIter = std::slice::Iter<'a, ProfileLevel>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}
