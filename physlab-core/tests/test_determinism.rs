//! Determinism tests - identical inputs give bit-identical trajectories

use physlab_core::runtime::{get_body_states, run_simulation, step_simulation, SimulationContext};
use physlab_core::tests::test_helpers::ball;
use physlab_core::{Sandbox, SimulationParameters};

fn three_ball_context() -> SimulationContext {
    let mut sandbox = Sandbox::new();
    sandbox.add_body(ball(2.0, 10.0, 6.0, 15.0, 1.0, 0.7, 30.0)).unwrap();
    sandbox.add_body(ball(0.5, 4.0, -8.0, 3.0, 2.0, 0.9, 45.0)).unwrap();
    sandbox.add_body(ball(20.0, 1.0, 0.0, 0.0, 0.5, 0.3, 10.0)).unwrap();
    SimulationContext::new(sandbox, SimulationParameters::default())
}

#[test]
fn test_repeated_runs_match_exactly() {
    let mut a = three_ball_context();
    let mut b = three_ball_context();

    for _ in 0..1000 {
        let hits_a = step_simulation(&mut a);
        let hits_b = step_simulation(&mut b);
        assert_eq!(hits_a, hits_b);
        assert_eq!(get_body_states(&a), get_body_states(&b));
    }
}

#[test]
fn test_run_summaries_match() {
    let summaries: Vec<_> = (0..3)
        .map(|_| {
            let mut ctx = three_ball_context();
            run_simulation(&mut ctx, |_, _| {})
        })
        .collect();

    for summary in &summaries[1..] {
        assert_eq!(summary, &summaries[0]);
    }
}
