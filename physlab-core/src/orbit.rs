//! Planetary orbit mode
//!
//! A handful of massive bodies under mutual Newtonian gravity. Direct O(n²)
//! pairwise sum; bodies are allowed to pass through each other.

use glam::DVec2;

pub const GRAVITATIONAL_CONSTANT: f64 = 6.674e-11;

/// Pairs closer than this contribute no force for the step
pub const MIN_SEPARATION: f64 = 0.1;

pub const DEFAULT_ORBIT_DT: f64 = 0.01;

pub const DEFAULT_PLANET_MASS: f64 = 5.97e24;
pub const DEFAULT_SATELLITE_MASS: f64 = 7.34e22;
pub const DEFAULT_ORBIT_RADIUS: f64 = 3.84e8;
pub const DEFAULT_ORBIT_VELOCITY: f64 = 1022.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MassiveBody {
    pub name: String,
    pub position: DVec2,
    pub velocity: DVec2,
    pub acceleration: DVec2, // recomputed every step
    pub mass: f64,
    pub radius: f64,
}

impl MassiveBody {
    pub fn new(
        name: impl Into<String>,
        position: DVec2,
        velocity: DVec2,
        mass: f64,
        radius: f64,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            velocity,
            acceleration: DVec2::ZERO,
            mass,
            radius,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParameters {
    pub gravitational_constant: f64,
    pub dt: f64,
}

impl Default for OrbitParameters {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            dt: DEFAULT_ORBIT_DT,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrbitSystem {
    pub bodies: Vec<MassiveBody>,
    pub time: f64,
}

impl OrbitSystem {
    pub fn new(bodies: Vec<MassiveBody>) -> Self {
        Self { bodies, time: 0.0 }
    }

    /// A planet at rest at the origin with one satellite on the +x axis
    /// moving in +y.
    pub fn planet_and_satellite(
        planet_mass: f64,
        satellite_mass: f64,
        orbit_radius: f64,
        orbit_velocity: f64,
    ) -> Self {
        Self::new(vec![
            MassiveBody::new("Planet", DVec2::ZERO, DVec2::ZERO, planet_mass, 20.0),
            MassiveBody::new(
                "Satellite",
                DVec2::new(orbit_radius, 0.0),
                DVec2::new(0.0, orbit_velocity),
                satellite_mass,
                5.0,
            ),
        ])
    }

    /// Kinetic plus pairwise potential energy. Pairs inside
    /// [`MIN_SEPARATION`] are left out, matching the force cutoff.
    pub fn total_energy(&self, g: f64) -> f64 {
        let kinetic: f64 = self
            .bodies
            .iter()
            .map(|b| 0.5 * b.mass * b.velocity.length_squared())
            .sum();

        let mut potential = 0.0;
        for (i, bi) in self.bodies.iter().enumerate() {
            for bj in &self.bodies[i + 1..] {
                let distance = bi.position.distance(bj.position);
                if distance >= MIN_SEPARATION {
                    potential -= g * bi.mass * bj.mass / distance;
                }
            }
        }

        kinetic + potential
    }
}

/// Gravitational acceleration on every body from the current positions
pub fn compute_accelerations(bodies: &[MassiveBody], g: f64) -> Vec<DVec2> {
    bodies
        .iter()
        .enumerate()
        .map(|(i, body)| {
            let mut accel = DVec2::ZERO;
            if body.mass <= 0.0 {
                return accel;
            }

            for (j, other) in bodies.iter().enumerate() {
                if i == j {
                    continue;
                }

                let direction = other.position - body.position;
                let distance = direction.length();
                if distance < MIN_SEPARATION {
                    continue;
                }

                let force_mag = g * body.mass * other.mass / (distance * distance);
                accel += direction / distance * force_mag / body.mass;
            }

            accel
        })
        .collect()
}

/// Step the orbit system forward by `params.dt` using semi-implicit Euler.
/// All accelerations come from the start-of-step positions.
pub fn step_orbit(system: &mut OrbitSystem, params: &OrbitParameters) {
    let accelerations = compute_accelerations(&system.bodies, params.gravitational_constant);

    for (body, accel) in system.bodies.iter_mut().zip(accelerations) {
        body.acceleration = accel;
        body.velocity += accel * params.dt;
        body.position += body.velocity * params.dt;
    }

    system.time += params.dt;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accelerations_point_at_each_other() {
        let bodies = vec![
            MassiveBody::new("a", DVec2::ZERO, DVec2::ZERO, 1.0, 1.0),
            MassiveBody::new("b", DVec2::new(3.0, 4.0), DVec2::ZERO, 2.0, 1.0),
        ];
        let accels = compute_accelerations(&bodies, 1.0);

        // |a_a| = G * m_b / r² = 2 / 25, along (0.6, 0.8)
        assert!((accels[0] - DVec2::new(0.6, 0.8) * 0.08).length() < 1e-12);
        // |a_b| = G * m_a / r² = 1 / 25, along (-0.6, -0.8)
        assert!((accels[1] - DVec2::new(-0.6, -0.8) * 0.04).length() < 1e-12);
    }

    #[test]
    fn massless_body_feels_nothing() {
        let bodies = vec![
            MassiveBody::new("ghost", DVec2::ZERO, DVec2::ZERO, 0.0, 1.0),
            MassiveBody::new("b", DVec2::new(1.0, 0.0), DVec2::ZERO, 1.0, 1.0),
        ];
        let accels = compute_accelerations(&bodies, 1.0);
        assert_eq!(accels[0], DVec2::ZERO);
        assert_eq!(accels[1], DVec2::ZERO);
    }

    #[test]
    fn preset_places_satellite_on_x_axis() {
        let system = OrbitSystem::planet_and_satellite(1.0e24, 1.0e22, 4.0e8, 1000.0);
        let planet = &system.bodies[0];
        let satellite = &system.bodies[1];

        assert_eq!(planet.position, DVec2::ZERO);
        assert_eq!(planet.radius, 20.0);
        assert_eq!(satellite.position, DVec2::new(4.0e8, 0.0));
        assert_eq!(satellite.velocity, DVec2::new(0.0, 1000.0));
        assert_eq!(satellite.radius, 5.0);
    }

    #[test]
    fn step_advances_time() {
        let mut system = OrbitSystem::planet_and_satellite(
            DEFAULT_PLANET_MASS,
            DEFAULT_SATELLITE_MASS,
            DEFAULT_ORBIT_RADIUS,
            DEFAULT_ORBIT_VELOCITY,
        );
        let params = OrbitParameters::default();
        step_orbit(&mut system, &params);
        step_orbit(&mut system, &params);
        assert!((system.time - 0.02).abs() < 1e-15);
    }
}
