//! Unit tests for the projectile-and-bounce stepper

use glam::DVec2;
use physlab_core::engine::{BodyId, KinematicBody};
use physlab_core::integrator::{step, step_all, IMPACT_EVENT_THRESHOLD};
use physlab_core::params::SimulationParameters;
use physlab_core::tests::test_helpers::{approx_eq, ball, step_n};
use physlab_core::Sandbox;

fn no_drag() -> SimulationParameters {
    SimulationParameters {
        air_resistance: 0.0,
        ..SimulationParameters::default()
    }
}

#[test]
fn test_first_step_of_default_ball() {
    let mut body = KinematicBody::default();
    let params = SimulationParameters::default();
    let (g, dt, k) = (9.81, 0.016, 0.01);

    step(BodyId(0), &mut body, &params);

    // Position uses the pre-step velocity
    let x = 2.0 + 6.0 * dt;
    let y = 10.0 + 15.0 * dt - 0.5 * g * dt * dt;
    assert!(approx_eq(body.position.x, x, 1e-12));
    assert!(approx_eq(body.position.y, y, 1e-12));
    assert!(approx_eq(body.position.y, 10.2388, 1e-4));

    // Drag on |v|² = 261 with unit mass and size factor, then gravity
    let v = (6.0f64 * 6.0 + 15.0 * 15.0).sqrt();
    let drag = k * v * v;
    let vx = 6.0 - drag * 6.0 / v * dt;
    let vy = 15.0 - drag * 15.0 / v * dt - g * dt;
    assert!(approx_eq(body.velocity.x, vx, 1e-12));
    assert!(approx_eq(body.velocity.y, vy, 1e-12));
    assert!(approx_eq(body.velocity.y, 15.0 - g * dt, 0.05));
}

#[test]
fn test_rest_without_force_is_a_fixed_point() {
    let mut body = ball(3.0, 0.0, 0.0, 0.0, 1.0, 0.7, 30.0);
    let params = SimulationParameters {
        gravity: 0.0,
        ..SimulationParameters::default()
    };

    for _ in 0..100 {
        assert!(step(BodyId(0), &mut body, &params).is_none());
    }

    assert_eq!(body.position, DVec2::new(3.0, 0.0));
    assert_eq!(body.velocity, DVec2::ZERO);
}

#[test]
fn test_left_wall_clamps_and_reflects() {
    let mut body = ball(0.05, 5.0, -10.0, 0.0, 1.0, 0.7, 30.0);
    step(BodyId(0), &mut body, &no_drag());

    assert_eq!(body.position.x, 0.0);
    assert!(approx_eq(body.velocity.x, 7.0, 1e-12));
}

#[test]
fn test_left_wall_reflection_then_drag() {
    let mut body = ball(0.05, 5.0, -10.0, 0.0, 1.0, 0.5, 30.0);
    step(BodyId(0), &mut body, &SimulationParameters::default());

    assert_eq!(body.position.x, 0.0);
    // Reflected to +5 before drag slows it down
    assert!(body.velocity.x > 0.0);
    assert!(body.velocity.x < 5.0);
}

#[test]
fn test_ground_level_follows_size() {
    let mut body = ball(1.0, 2.0, 0.0, -5.0, 1.0, 0.5, 50.0);
    let params = no_drag();

    let impacts = step_n(&mut body, &params, 60);
    assert!(!impacts.is_empty());
    assert!(body.position.y >= 0.5);
}

#[test]
fn test_no_step_goes_below_ground() {
    let configs = [
        ball(2.0, 10.0, 6.0, 15.0, 1.0, 0.7, 30.0),
        ball(0.5, 3.0, -4.0, -20.0, 3.0, 0.9, 10.0),
        ball(10.0, 0.5, 1.0, 0.0, 0.2, 0.0, 80.0),
        ball(0.0, 40.0, 0.0, -30.0, 1.0, 1.0, 1.0),
    ];
    let params = SimulationParameters::default();

    for mut body in configs {
        for _ in 0..3000 {
            step(BodyId(0), &mut body, &params);
            assert!(body.position.y >= 0.0);
            assert!(body.position.y >= body.ground_level() - 1e-12);
            assert!(body.position.x >= 0.0);
        }
    }
}

#[test]
fn test_hard_landing_emits_impact() {
    let mut body = ball(1.0, 10.0, 0.0, 0.0, 1.0, 0.7, 30.0);
    let impacts = step_n(&mut body, &no_drag(), 200);

    let first = impacts.first().expect("ball should hit the ground");
    assert_eq!(first.body, BodyId(0));
    // sqrt(2 * 9.81 * 9.7) ~= 13.8 m/s plus at most one step of gravity
    assert!(first.speed > 13.7 && first.speed < 14.1, "speed = {}", first.speed);
    assert!(impacts.iter().all(|i| i.speed > IMPACT_EVENT_THRESHOLD));
}

#[test]
fn test_slow_components_snap_to_rest_on_contact() {
    let mut body = ball(1.0, 0.3, 0.15, -0.2, 1.0, 0.5, 30.0);
    step(BodyId(0), &mut body, &no_drag());

    assert_eq!(body.position.y, body.ground_level());
    assert_eq!(body.velocity, DVec2::ZERO);
}

#[test]
fn test_ground_friction_applied_on_contact() {
    let mut body = ball(1.0, 0.3, 4.0, -3.0, 1.0, 0.5, 30.0);
    step(BodyId(0), &mut body, &no_drag());

    assert!(approx_eq(body.velocity.x, 4.0 * 0.95, 1e-12));
    // |vy| after gravity, halved and flipped
    assert!(approx_eq(body.velocity.y, (3.0 + 9.81 * 0.016) * 0.5, 1e-12));
}

#[test]
fn test_zero_mass_does_not_produce_nan() {
    let mut body = ball(1.0, 5.0, 3.0, 2.0, 0.0, 0.7, 30.0);
    let params = SimulationParameters::default();

    for _ in 0..500 {
        step(BodyId(0), &mut body, &params);
        assert!(body.position.is_finite());
        assert!(body.velocity.is_finite());
    }
}

#[test]
fn test_heavier_ball_bounces_lower() {
    let params = no_drag();
    let mut light = ball(1.0, 5.0, 0.0, 0.0, 1.0, 0.8, 30.0);
    let mut heavy = ball(1.0, 5.0, 0.0, 0.0, 5.0, 0.8, 30.0);

    let light_hit = step_n(&mut light, &params, 80);
    let heavy_hit = step_n(&mut heavy, &params, 80);
    assert_eq!(light_hit.len(), 1);
    assert_eq!(heavy_hit.len(), 1);

    assert!(heavy.velocity.y < light.velocity.y);
}

#[test]
fn test_step_all_reports_impacts_by_id() {
    let mut sandbox = Sandbox::new();
    let high = sandbox.add_body(ball(1.0, 50.0, 0.0, 0.0, 1.0, 0.7, 30.0)).unwrap();
    let low = sandbox.add_body(ball(2.0, 1.0, 0.0, -10.0, 1.0, 0.7, 30.0)).unwrap();
    let params = SimulationParameters::default();

    let mut hits = Vec::new();
    for _ in 0..10 {
        hits.extend(step_all(&mut sandbox, &params));
    }

    assert!(hits.iter().any(|i| i.body == low));
    assert!(hits.iter().all(|i| i.body != high));
}
