//! Global parameters for the ball sandbox
//!
//! `SimulationParameters` is read once before a run (or a reset) and passed
//! by value into every step. All bodies in a tick see the same values.

pub const DEFAULT_GRAVITY: f64 = 9.81;
pub const DEFAULT_AIR_RESISTANCE: f64 = 0.01;
pub const DEFAULT_GROUND_FRICTION: f64 = 0.95;
/// Fixed step in seconds. Deliberately 0.016, not 1/60.
pub const DEFAULT_DT: f64 = 0.016;
/// Simulated-time cap after which a run stops regardless of motion.
pub const DEFAULT_MAX_TIME: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    pub gravity: f64,        // m/s², pulls toward -y
    pub air_resistance: f64, // quadratic drag coefficient
    pub ground_friction: f64, // horizontal speed kept per ground contact
    pub dt: f64,             // step size in seconds
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            air_resistance: DEFAULT_AIR_RESISTANCE,
            ground_friction: DEFAULT_GROUND_FRICTION,
            dt: DEFAULT_DT,
        }
    }
}
