use crate::error::SandboxError;
use glam::DVec2;
use std::fmt;

/// Most balls a sandbox will hold at once
pub const MAX_BODIES: usize = 5;

pub const DEFAULT_POSITION: DVec2 = DVec2::new(2.0, 10.0);
pub const DEFAULT_VELOCITY: DVec2 = DVec2::new(6.0, 15.0);
pub const DEFAULT_MASS: f64 = 1.0;
pub const DEFAULT_RESTITUTION: f64 = 0.7;
pub const DEFAULT_SIZE: f64 = 30.0;

/// Size at which the drag cross-section factor is exactly 1
pub const REFERENCE_SIZE: f64 = 30.0;

/// Stable handle for a body in a [`Sandbox`]. Never reused after removal,
/// so a renderer can key its own shapes on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position and velocity recorded at creation or at the last manual placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    pub position: DVec2,
    pub velocity: DVec2,
}

/// A ball in the projectile sandbox
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicBody {
    pub position: DVec2, // meters, y >= 0 is above ground
    pub velocity: DVec2, // m/s
    pub mass: f64,
    pub restitution: f64, // fraction of vertical speed kept after a bounce
    pub size: f64,        // visual diameter; scales drag and resting height
    pub initial: BodySnapshot,
}

impl KinematicBody {
    pub fn new(position: DVec2, velocity: DVec2, mass: f64, restitution: f64, size: f64) -> Self {
        Self {
            position,
            velocity,
            mass,
            restitution,
            size,
            initial: BodySnapshot { position, velocity },
        }
    }

    /// Move the body by hand. The new state becomes the reset target.
    pub fn place(&mut self, position: DVec2, velocity: DVec2) {
        self.position = position;
        self.velocity = velocity;
        self.initial = BodySnapshot { position, velocity };
    }

    /// Restore the last recorded snapshot
    pub fn reset(&mut self) {
        self.position = self.initial.position;
        self.velocity = self.initial.velocity;
    }

    pub fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            position: self.position,
            velocity: self.velocity,
        }
    }

    /// Height at which this ball touches the ground
    pub fn ground_level(&self) -> f64 {
        self.size / 100.0
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Potential energy relative to y = 0
    pub fn potential_energy(&self, gravity: f64) -> f64 {
        self.mass * gravity * self.position.y
    }
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self::new(
            DEFAULT_POSITION,
            DEFAULT_VELOCITY,
            DEFAULT_MASS,
            DEFAULT_RESTITUTION,
            DEFAULT_SIZE,
        )
    }
}

/// The set of balls being simulated, in insertion order
#[derive(Debug, Clone, Default)]
pub struct Sandbox {
    bodies: Vec<(BodyId, KinematicBody)>,
    next_id: u32,
}

impl Sandbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_body(&mut self, body: KinematicBody) -> Result<BodyId, SandboxError> {
        if self.bodies.len() >= MAX_BODIES {
            return Err(SandboxError::BodyLimitReached { max: MAX_BODIES });
        }
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push((id, body));
        Ok(id)
    }

    pub fn add_default_body(&mut self) -> Result<BodyId, SandboxError> {
        self.add_body(KinematicBody::default())
    }

    pub fn remove_body(&mut self, id: BodyId) -> Result<KinematicBody, SandboxError> {
        let idx = self
            .bodies
            .iter()
            .position(|(body_id, _)| *body_id == id)
            .ok_or(SandboxError::UnknownBody(id))?;
        Ok(self.bodies.remove(idx).1)
    }

    pub fn get(&self, id: BodyId) -> Option<&KinematicBody> {
        self.bodies
            .iter()
            .find(|(body_id, _)| *body_id == id)
            .map(|(_, body)| body)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut KinematicBody> {
        self.bodies
            .iter_mut()
            .find(|(body_id, _)| *body_id == id)
            .map(|(_, body)| body)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &KinematicBody)> {
        self.bodies.iter().map(|(id, body)| (*id, body))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyId, &mut KinematicBody)> {
        self.bodies.iter_mut().map(|(id, body)| (*id, body))
    }

    pub fn bodies(&self) -> impl Iterator<Item = &KinematicBody> {
        self.bodies.iter().map(|(_, body)| body)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.bodies.len() >= MAX_BODIES
    }

    pub fn reset_all(&mut self) {
        for (_, body) in self.bodies.iter_mut() {
            body.reset();
        }
    }
}
