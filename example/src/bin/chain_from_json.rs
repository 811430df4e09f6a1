// Solve a chain described by a JSON document and print the resulting pose
// Run with: cargo run -p example --bin chain_from_json -- example/chains/two_link.json

use chain_ik::{ChainConfig, ChainIkError};
use tracing::{error, info};

fn main() -> Result<(), ChainIkError> {
    tracing_subscriber::fmt::init();

    let Some(path) = std::env::args().nth(1) else {
        error!("usage: chain_from_json <chain.json>");
        return Err(ChainIkError::InvalidConfig("missing chain document path".to_string()));
    };

    let config = ChainConfig::load(&path)?;
    info!("Loaded {} joints from {}", config.joints.len(), path);

    let mut solver = config.into_solver();
    let report = solver.solve_report(config.solver.iterations);

    let target = solver.target();
    let result = serde_json::json!({
        "outcome": format!("{:?}", report.outcome),
        "iterations": report.iterations,
        "error": report.error,
        "target": { "x": target.x, "y": target.y, "z": target.z },
        "joints": solver.chain().joints(),
        "positions": solver
            .positions()
            .iter()
            .map(|p| serde_json::json!({ "x": p.x, "y": p.y, "z": p.z }))
            .collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
