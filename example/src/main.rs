// Two-link arm reaching for a point in its bending plane
// Run with: cargo run -p example

use chain_ik::{Chain, ChainIkError, IkSolver, JointSpec, Vec3};
use std::f64::consts::PI;
use tracing::info;

fn main() -> Result<(), ChainIkError> {
    tracing_subscriber::fmt::init();

    // Shoulder and elbow bend about +X; the last joint only carries the
    // forearm link out to the tip, so it is locked at zero.
    let joint = JointSpec::rotation(Vec3::x(), 1.0).with_limits(-PI, PI);
    let chain = Chain::new(
        vec![
            joint.clone().with_name("shoulder"),
            joint.clone().with_name("elbow"),
            joint.with_limits(0.0, 0.0).with_name("forearm"),
        ],
        Vec3::zeros(),
    );
    chain.validate()?;

    let mut solver = IkSolver::new(chain);
    solver.set_target(Vec3::new(0.0, 1.1, 0.5));

    let report = solver.solve_report(32);
    info!(
        "Solve finished: {:?} after {} iterations, error {:.3e}",
        report.outcome, report.iterations, report.error
    );

    for (name, value) in solver.chain().joint_names().iter().zip(solver.chain().joint_values()) {
        println!("{:>10}: {:8.4} rad", name, value);
    }

    if let Some(end) = solver.positions().last() {
        println!("End effector: [{:.4}, {:.4}, {:.4}]", end.x, end.y, end.z);
    }
    Ok(())
}
