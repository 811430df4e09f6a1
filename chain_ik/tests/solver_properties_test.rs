//! End-to-end behavior of `IkSolver` on small chains.

use chain_ik::{Chain, IkSolver, JointSpec, SolveOutcome, Vec3, CHAIN_IK_TOLERANCE};

/// Two bending joints about +X plus a fixed tip link; moves in the YZ plane.
fn planar_arm(shoulder_limits: (f64, f64)) -> Chain {
    Chain::new(
        vec![
            JointSpec::rotation(Vec3::x(), 1.0)
                .with_limits(shoulder_limits.0, shoulder_limits.1)
                .with_name("shoulder"),
            JointSpec::rotation(Vec3::x(), 1.0).with_name("elbow"),
            JointSpec::rotation(Vec3::x(), 1.0).with_limits(0.0, 0.0).with_name("tip"),
        ],
        Vec3::zeros(),
    )
}

#[test]
fn test_planar_arm_with_locked_tip_converges() {
    let mut solver = IkSolver::new(planar_arm((f64::NEG_INFINITY, f64::INFINITY)));
    let target = Vec3::new(0.0, 1.0, 1.0);
    solver.set_target(target);

    let error = solver.solve(50);
    let end = *solver.positions().last().unwrap();

    println!("error {:e}, end [{:.6}, {:.6}, {:.6}]", error, end.x, end.y, end.z);
    assert!(error < 1e-3, "error {} too large", error);
    assert!((end - target).norm() < 1e-2);
}

#[test]
fn test_joint_limits_hold_across_solves() {
    let mut solver = IkSolver::new(planar_arm((-0.5, 0.5)));
    let targets = [
        Vec3::new(0.0, 1.0, 1.0),
        Vec3::new(0.0, -1.5, 0.5),
        Vec3::new(0.0, 0.3, 2.5),
        Vec3::new(0.0, 1.2, -0.2),
        Vec3::new(0.0, 4.0, 4.0),
    ];

    for target in targets {
        solver.set_target(target);
        let error = solver.solve(50);
        assert!(error.is_finite() && error >= 0.0);

        let shoulder = &solver.chain().joints()[0];
        assert!(
            shoulder.value >= -0.5 - 1e-8 && shoulder.value <= 0.5 + 1e-8,
            "shoulder left its limits: {}",
            shoulder.value
        );
        assert_eq!(solver.chain().joints()[2].value, 0.0);
    }
}

#[test]
fn test_resolve_after_convergence_is_fixed_point() {
    let mut solver = IkSolver::new(planar_arm((f64::NEG_INFINITY, f64::INFINITY)));
    solver.set_target(Vec3::new(0.0, 1.0, 1.0));

    let error = solver.solve(50);
    assert!(error < solver.tolerance());

    let before = solver.chain().end_effector();
    let again = solver.solve(50);
    let after = solver.chain().end_effector();

    assert!(again < solver.tolerance());
    assert!((after - before).norm() < solver.tolerance());
}

#[test]
fn test_fully_extended_chain_is_stable() {
    let extended = || {
        Chain::new(
            vec![
                JointSpec::rotation(Vec3::y(), 1.0),
                JointSpec::rotation(Vec3::x(), 1.0),
                JointSpec::rotation(Vec3::y(), 1.0),
            ],
            Vec3::zeros(),
        )
    };

    // Exactly at the reach limit, then just past it
    for target in [Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, 4.0)] {
        let mut solver = IkSolver::new(extended());
        solver.set_target(target);

        let report = solver.solve_report(30);
        assert!(report.error.is_finite());
        assert!(report.error >= 0.0);
        assert!(report.iterations <= 30);
        assert!(solver.chain().joint_values().iter().all(|v| v.is_finite()));
    }
}

#[test]
fn test_zero_damping_singular_system_is_finite() {
    let chain = Chain::new(
        vec![
            JointSpec::rotation(Vec3::zeros(), 1.0),
            JointSpec::translation(Vec3::zeros(), 1.0),
            JointSpec::rotation(Vec3::z(), 1.0),
        ],
        Vec3::zeros(),
    );
    let mut solver = IkSolver::new(chain);
    solver.set_damping(0.0);
    solver.set_target(Vec3::new(1.0, 0.0, 0.0));

    let report = solver.solve_report(10);
    assert!(report.error.is_finite());
    assert_eq!(report.outcome, SolveOutcome::Stalled);
}

#[test]
fn test_spatial_chain_terminates_with_finite_error() {
    let chain = Chain::new(
        vec![
            JointSpec::rotation(Vec3::y(), 0.8).with_limits(-3.14159, 3.14159),
            JointSpec::rotation(Vec3::z(), 0.7).with_limits(-3.14159, 3.14159),
            JointSpec::rotation(Vec3::x(), 0.5).with_limits(-3.14159, 3.14159),
        ],
        Vec3::zeros(),
    );
    let mut solver = IkSolver::new(chain);
    solver.set_tolerance(CHAIN_IK_TOLERANCE);
    solver.set_target(Vec3::new(0.9, 0.4, 1.0));

    let report = solver.solve_report(60);
    assert!(report.error.is_finite() && report.error >= 0.0);
    assert!(report.iterations <= 60);
    for joint in solver.chain().joints() {
        assert!(joint.within_limits(), "{} = {}", joint.name, joint.value);
    }
}

#[test]
fn test_negative_step_scale_moves_away() {
    let chain = Chain::new(vec![JointSpec::translation(Vec3::x(), 0.0)], Vec3::zeros());
    let mut solver = IkSolver::new(chain);
    solver.set_step_scale(-1.0);
    solver.set_target(Vec3::new(1.0, 0.0, 0.0));

    let error = solver.solve(3);
    assert!(error > 1.0);
    assert!(solver.chain().joints()[0].value < 0.0);
}

#[test]
fn test_unreachable_target_returns_residual() {
    let mut solver = IkSolver::new(planar_arm((f64::NEG_INFINITY, f64::INFINITY)));
    solver.set_target(Vec3::new(0.0, 10.0, 1.0));

    let error = solver.solve(40);
    assert!(error.is_finite());
    // Tip can be at most two links from the shoulder pivot at (0, 0, 1)
    assert!(error >= 8.0 - 1e-9, "error {}", error);
}
