// Parity sweep for the chain IK solver
// Run with: cargo run -p ik_sim
//
// CHAIN_IK_SAMPLES    samples per profile (default 12)
// CHAIN_IK_MAX_ERROR  fail when the worst residual exceeds this

use std::process::ExitCode;

use tracing::{error, info, warn};

use ik_sim::{sweep::run_sweep, ChainProfile, SweepConfig};

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a number", name, raw);
            None
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let mut config = SweepConfig::default();
    if let Some(samples) = env_parse::<usize>("CHAIN_IK_SAMPLES") {
        config.samples_per_profile = samples;
    }
    let threshold = env_parse::<f64>("CHAIN_IK_MAX_ERROR");

    let profiles = ChainProfile::presets();
    info!(
        "Sweeping {} profiles x {} samples (seed {})",
        profiles.len(),
        config.samples_per_profile,
        config.seed
    );

    let summary = run_sweep(&profiles, &config);

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => error!("Failed to serialize summary: {}", e),
    }

    if summary.non_finite > 0 {
        error!("{} samples produced a non-finite residual", summary.non_finite);
        return ExitCode::FAILURE;
    }
    if let Some(threshold) = threshold {
        if summary.max_error > threshold {
            error!(
                "Max residual {} exceeds threshold {}",
                summary.max_error, threshold
            );
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
