use crate::engine::{BodyId, KinematicBody, Sandbox, REFERENCE_SIZE};
use crate::params::SimulationParameters;

/// Ground impacts faster than this (m/s) are reported as [`CollisionImpact`]s
pub const IMPACT_EVENT_THRESHOLD: f64 = 2.0;

/// Velocity components below this (m/s) are zeroed on ground contact
pub const REST_SPEED_THRESHOLD: f64 = 0.2;

/// A hard ground hit, handed to whoever draws the squash animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionImpact {
    pub body: BodyId,
    pub speed: f64,
}

impl CollisionImpact {
    /// Horizontal stretch and vertical squash scale factors for this hit.
    /// Heavier balls deform less.
    pub fn squash_stretch(&self, mass: f64) -> (f64, f64) {
        let mass_factor = if mass > 0.0 {
            (1.0 / mass).clamp(0.7, 1.2)
        } else {
            1.2
        };
        let squash = (0.6 + self.speed / 50.0).min(0.8) * mass_factor;
        let stretch = 1.0 + (1.0 - squash);
        (stretch, squash)
    }
}

/// Restitution after the heavy-ball correction: up to 2.5% less bounce
pub fn effective_restitution(body: &KinematicBody) -> f64 {
    body.restitution * (1.0 - 0.05 * (body.mass - 1.0).clamp(0.0, 0.5))
}

/// Ground friction after the heavy-ball correction: up to 2% more grip
pub fn effective_friction(body: &KinematicBody, params: &SimulationParameters) -> f64 {
    params.ground_friction * (1.0 - 0.02 * (body.mass - 1.0).clamp(0.0, 1.0))
}

/// Advance one ball by `params.dt`.
///
/// Order: position update from the current velocity, left wall, drag,
/// gravity, ground contact. Returns the impact if the ball hit the ground
/// faster than [`IMPACT_EVENT_THRESHOLD`] during this step.
pub fn step(
    id: BodyId,
    body: &mut KinematicBody,
    params: &SimulationParameters,
) -> Option<CollisionImpact> {
    let dt = params.dt;
    let g = params.gravity;

    body.position.x += body.velocity.x * dt;
    body.position.y += body.velocity.y * dt - 0.5 * g * dt * dt;

    if body.position.x < 0.0 {
        body.position.x = 0.0;
        body.velocity.x = -body.velocity.x * body.restitution;
    }

    apply_drag(body, params);

    body.velocity.y -= g * dt;

    resolve_ground_contact(id, body, params)
}

/// Step every ball in insertion order and collect this tick's impacts
pub fn step_all(sandbox: &mut Sandbox, params: &SimulationParameters) -> Vec<CollisionImpact> {
    sandbox
        .iter_mut()
        .filter_map(|(id, body)| step(id, body, params))
        .collect()
}

fn apply_drag(body: &mut KinematicBody, params: &SimulationParameters) {
    let v = body.velocity.length();
    // No direction to oppose, or no mass to divide by
    if v <= 0.0 || body.mass <= 0.0 {
        return;
    }

    let cross_section = body.size / REFERENCE_SIZE;
    let drag_accel = params.air_resistance * v * v * cross_section * cross_section / body.mass;

    body.velocity.x += -drag_accel * body.velocity.x / v * params.dt;
    body.velocity.y += -drag_accel * body.velocity.y / v * params.dt;
}

fn resolve_ground_contact(
    id: BodyId,
    body: &mut KinematicBody,
    params: &SimulationParameters,
) -> Option<CollisionImpact> {
    let ground = body.ground_level();
    if body.position.y > ground || body.velocity.y >= 0.0 {
        return None;
    }

    body.position.y = ground;
    let impact_speed = body.velocity.y.abs();

    body.velocity.y = -body.velocity.y * effective_restitution(body);
    body.velocity.x *= effective_friction(body, params);

    let impact = (impact_speed > IMPACT_EVENT_THRESHOLD).then_some(CollisionImpact {
        body: id,
        speed: impact_speed,
    });

    // Rest snapping
    if body.velocity.y.abs() < REST_SPEED_THRESHOLD {
        body.velocity.y = 0.0;
    }
    if body.velocity.x.abs() < REST_SPEED_THRESHOLD {
        body.velocity.x = 0.0;
    }

    impact
}
