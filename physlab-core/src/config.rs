//! Configuration inputs and their fallbacks
//!
//! Values arrive from an outer layer (command line, form fields) already
//! parsed but unchecked. Anything missing takes its documented default;
//! anything present but unusable takes the default too and leaves a
//! warning behind. Resolving never fails.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::engine::{
    KinematicBody, DEFAULT_MASS, DEFAULT_POSITION, DEFAULT_RESTITUTION, DEFAULT_SIZE,
    DEFAULT_VELOCITY,
};
use crate::params::{
    SimulationParameters, DEFAULT_AIR_RESISTANCE, DEFAULT_DT, DEFAULT_GRAVITY,
    DEFAULT_GROUND_FRICTION, DEFAULT_MAX_TIME,
};
use glam::DVec2;

/// Raw settings for one ball
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyConfig {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub vx: Option<f64>,
    pub vy: Option<f64>,
    pub mass: Option<f64>,
    pub restitution: Option<f64>,
    pub size: Option<f64>,
}

impl BodyConfig {
    /// A ball launched from the left wall at `height`, with `speed` m/s at
    /// `angle_deg` degrees above the horizontal. Everything else is left
    /// to defaults.
    pub fn from_launch(height: f64, speed: f64, angle_deg: f64) -> Self {
        let angle = angle_deg.to_radians();
        Self {
            x: Some(0.0),
            y: Some(height),
            vx: Some(speed * angle.cos()),
            vy: Some(speed * angle.sin()),
            ..Self::default()
        }
    }

    pub fn resolve(&self) -> (KinematicBody, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let d = &mut diagnostics;

        let position = DVec2::new(
            resolve_value("x", self.x, DEFAULT_POSITION.x, |v| v >= 0.0, "be >= 0", d),
            resolve_value("y", self.y, DEFAULT_POSITION.y, |v| v >= 0.0, "be >= 0", d),
        );
        let velocity = DVec2::new(
            resolve_value("vx", self.vx, DEFAULT_VELOCITY.x, |_| true, "be finite", d),
            resolve_value("vy", self.vy, DEFAULT_VELOCITY.y, |_| true, "be finite", d),
        );
        let mass = resolve_value("mass", self.mass, DEFAULT_MASS, |v| v > 0.0, "be > 0", d);
        let restitution = resolve_value(
            "restitution",
            self.restitution,
            DEFAULT_RESTITUTION,
            |v| (0.0..=1.0).contains(&v),
            "lie in [0, 1]",
            d,
        );
        let size = resolve_value("size", self.size, DEFAULT_SIZE, |v| v > 0.0, "be > 0", d);

        (
            KinematicBody::new(position, velocity, mass, restitution, size),
            diagnostics,
        )
    }
}

/// Raw global settings
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParameterConfig {
    pub gravity: Option<f64>,
    pub air_resistance: Option<f64>,
    pub ground_friction: Option<f64>,
    pub dt: Option<f64>,
    pub max_time: Option<f64>,
}

/// Sanitised global settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedParameters {
    pub params: SimulationParameters,
    pub max_time: f64,
}

impl ParameterConfig {
    pub fn resolve(&self) -> (ResolvedParameters, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let d = &mut diagnostics;

        let params = SimulationParameters {
            gravity: resolve_value("gravity", self.gravity, DEFAULT_GRAVITY, |v| v > 0.0, "be > 0", d),
            air_resistance: resolve_value(
                "air resistance",
                self.air_resistance,
                DEFAULT_AIR_RESISTANCE,
                |v| v >= 0.0,
                "be >= 0",
                d,
            ),
            ground_friction: resolve_value(
                "ground friction",
                self.ground_friction,
                DEFAULT_GROUND_FRICTION,
                |v| (0.0..=1.0).contains(&v),
                "lie in [0, 1]",
                d,
            ),
            dt: resolve_value("dt", self.dt, DEFAULT_DT, |v| v > 0.0, "be > 0", d),
        };
        let max_time = resolve_value(
            "max time",
            self.max_time,
            DEFAULT_MAX_TIME,
            |v| v > 0.0,
            "be > 0",
            d,
        );

        (ResolvedParameters { params, max_time }, diagnostics)
    }
}

/// Pick `value` if it is finite and passes `valid`, else `default`.
/// Missing values are silent; rejected ones warn.
fn resolve_value(
    name: &str,
    value: Option<f64>,
    default: f64,
    valid: impl Fn(f64) -> bool,
    requirement: &str,
    diagnostics: &mut Diagnostics,
) -> f64 {
    match value {
        None => default,
        Some(v) if v.is_finite() && valid(v) => v,
        Some(v) => {
            diagnostics.push(Diagnostic::warning(format!(
                "{} must {}, got {}; using default {}",
                name, requirement, v, default
            )));
            default
        }
    }
}
