//! # Windload CLI Application
//!
//! Prints wind load tables for a configuration, then the full summary as JSON.
//!
//! ```text
//! wind_cli                                        demonstration building
//! wind_cli <config.json>                          saved configuration
//! wind_cli query <config.json> <area> <elev> <zone>
//! wind_cli init <config.json>                     write the demo configuration
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `warn`).

mod file_io;

use std::path::Path;
use std::process::ExitCode;

use file_io::{load_config, save_config};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wind_core::calculations::{CladdingResults, MwfrsResult};
use wind_core::config::WindLoadConfig;
use wind_core::{CalcError, CalcResult, WindLoadEngine, WindLoadSummary};

const USAGE: &str = "\
Usage:
  wind_cli                                          run the demonstration building
  wind_cli <config.json>                            run a saved configuration
  wind_cli query <config.json> <area_m2> <elevation_m> <zone>
  wind_cli init <config.json>                       write the demonstration configuration";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let outcome = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] => run(WindLoadConfig::demo_building()),
        ["-h" | "--help"] => {
            println!("{}", USAGE);
            Ok(())
        }
        ["init", path] => init(Path::new(path)),
        ["query", path, area, elevation, zone] => query(Path::new(path), area, elevation, zone),
        [path] if !path.starts_with('-') => load_config(Path::new(path)).and_then(run),
        _ => {
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(config: WindLoadConfig) -> CalcResult<()> {
    let engine = WindLoadEngine::new(config)?;
    let summary = engine.summary()?;

    print_summary(&summary);

    println!();
    println!("JSON Output:");
    let json = serde_json::to_string_pretty(&summary).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;
    println!("{}", json);
    Ok(())
}

fn init(path: &Path) -> CalcResult<()> {
    save_config(&WindLoadConfig::demo_building(), path)?;
    info!(path = %path.display(), "demonstration configuration written");
    println!("Wrote {}", path.display());
    Ok(())
}

fn query(path: &Path, area: &str, elevation: &str, zone: &str) -> CalcResult<()> {
    let area_m2 = parse_number("area_m2", area)?;
    let elevation_m = parse_number("elevation_m", elevation)?;

    let engine = WindLoadEngine::new(load_config(path)?)?;
    let pressure = engine.query().resolve(area_m2, elevation_m, zone)?;
    println!("{:.3}", pressure);
    Ok(())
}

fn parse_number(field: &str, value: &str) -> CalcResult<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| CalcError::invalid_input(field, value, "Not a number"))
}

fn print_summary(summary: &WindLoadSummary) {
    let p = &summary.parameters;
    let f = &summary.factors;

    println!("═══════════════════════════════════════════════════════════");
    println!("  WIND LOAD CALCULATION");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!("Parameters:");
    println!("  Location:      {} (V = {:.1} m/s)", p.location, p.base_wind_speed_ms);
    println!("  Structure:     {} / {}", p.structure_type, p.building_type);
    println!("  Enclosure:     {}", p.enclosure_type);
    println!("  Roof:          {}", p.roof_type);
    println!("  Exposure:      {}   Occupancy: {}", p.exposure, p.occupancy);
    println!("  Rigidity:      {}", p.rigidity);
    println!("  Topography:    {}", p.topography_type);
    println!("  L/B:           {:.2}", p.aspect_ratio);
    println!();
    println!("Factors:");
    println!("  I     = {:.2}", f.importance_factor);
    println!("  K_d   = {:.2}", f.directionality_factor);
    println!("  GC_pi = ±{:.2}", f.internal_coefficient);
    println!("  K_zt  = {:.3} (roof)", f.kzt_roof);
    println!("  G     = {:.3}", f.gust_factor);
    println!(
        "  C_p   = {:+.1} windward, {:+.1} leeward, {:+.1} side",
        f.external.windward, f.external.leeward, f.external.side
    );
    println!("  q_zk  = {:.3} kPa", f.base_velocity_pressure);

    if let Some(g) = &f.gust_response {
        println!();
        println!("Flexible gust factor:");
        println!("  ẑ = {:.2} m  I_z = {:.3}  L_z = {:.1} m  Q = {:.3}", g.z_bar_m, g.turbulence_intensity, g.length_scale_m, g.background_response);
        println!("  g_R = {:.3}  V_z = {:.2} m/s  N₁ = {:.3}  R_n = {:.4}", g.resonant_peak_factor, g.mean_speed_ms, g.reduced_frequency, g.r_n);
        println!("  R_h = {:.3}  R_B = {:.3}  R_L = {:.3}  R = {:.3}", g.r_h, g.r_b, g.r_l, g.resonant_response);
        println!("  G_f = {:.3}", g.gust_factor);
    }

    print_mwfrs(&summary.mwfrs);
    print_cladding(&summary.cladding);
}

fn print_mwfrs(mwfrs: &MwfrsResult) {
    let r = &mwfrs.reference;
    println!();
    println!("MWFRS (roof height):");
    println!("  K_h = {:.2}  K_zt = {:.3}  q_h = {:.2} kPa", r.kz, r.kzt, r.q_h);
    println!("  P_hi = {:.2}  P_hl = {:.2}  P_hs = {:.2} kPa", r.internal, r.leeward, r.side);
    println!();
    println!("  Level  Height  Elev.    K_z   K_zt     q_z    P_zw");
    for l in &mwfrs.levels {
        println!(
            "  {:>5} {:>7.2} {:>6.2} {:>6.2} {:>6.3} {:>7.2} {:>7.2}",
            l.level, l.floor_height_m, l.elevation_m, l.kz, l.kzt, l.q_z, l.windward
        );
    }

    let pp = &mwfrs.parapet;
    if pp.is_present() {
        println!();
        println!(
            "  Parapet h_p = {:.2} m at {:.2} m: q_p = {:.2}  P_pw = {:.2}  P_pl = {:.2} kPa",
            pp.parapet_height_m, pp.elevation_m, pp.q_p, pp.windward, pp.leeward
        );
    }
}

fn print_cladding(cladding: &CladdingResults) {
    println!();
    println!("Components & Cladding (kPa):");
    for group in &cladding.groups {
        println!();
        println!("  A = {:.2} m²", group.effective_area_m2);
        println!("  Level  Elev.    q_z   Z4(+)   Z4(-)   Z5(+)   Z5(-)      Z1      Z2      Z3");
        for row in &group.rows {
            println!(
                "  {:>5} {:>6.2} {:>6.2} {:>7.2} {:>7.2} {:>7.2} {:>7.2} {:>7.2} {:>7.2} {:>7.2}",
                row.level,
                row.elevation_m,
                row.q_z,
                row.wall.zone4_positive,
                row.wall.zone4_negative,
                row.wall.zone5_positive,
                row.wall.zone5_negative,
                row.roof.zone1,
                row.roof.zone2,
                row.roof.zone3
            );
        }
    }
}
