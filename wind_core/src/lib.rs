//! # wind_core - Wind Load Calculation Engine
//!
//! `wind_core` computes design wind pressures on a building envelope for the
//! Main Wind Force Resisting System (per-level lateral pressures) and for
//! Components & Cladding (area-dependent zone pressures). All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions of the configuration and static code tables
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Swappable models**: Gust and topography sit behind traits
//!
//! ## Quick Start
//!
//! ```rust
//! use wind_core::{WindLoadConfig, WindLoadEngine};
//!
//! let engine = WindLoadEngine::new(WindLoadConfig::demo_building()).unwrap();
//! let summary = engine.summary().unwrap();
//!
//! for level in &summary.mwfrs.levels {
//!     println!("L{:>2} {:>6.2} m  P_zw = {:.2} kPa", level.level, level.elevation_m, level.windward);
//! }
//!
//! // Serialize for storage or transmission
//! let json = serde_json::to_string_pretty(&summary).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`tables`] - Code lookup tables (wind speeds, K_z, K_d, I, GC_pi, GC_p)
//! - [`topography`] - Topographic factor K_zt
//! - [`gust`] - Gust-effect factor G / G_f
//! - [`height_profile`] - Floor heights to cumulative elevations
//! - [`calculations`] - MWFRS and cladding pressure paths
//! - [`engine`] - Per-configuration orchestration and summary
//! - [`query`] - Single-pressure lookup for other design modules
//! - [`config`] - Input configuration and defaults
//! - [`errors`] - Structured error types
//!
//! The engine does no file or network I/O; persisting configurations is
//! left to the caller.

pub mod calculations;
pub mod config;
pub mod engine;
pub mod errors;
pub mod gust;
pub mod height_profile;
pub mod query;
pub mod tables;
pub mod topography;

// Re-export commonly used types at crate root for convenience
pub use config::WindLoadConfig;
pub use engine::{FactorSet, WindLoadEngine, WindLoadSummary, WindParameters};
pub use errors::{CalcError, CalcResult};
pub use query::{CladdingZone, PressureQueryService};
