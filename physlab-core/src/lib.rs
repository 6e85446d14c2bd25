pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod integrator;
pub mod orbit;
pub mod params;
pub mod runtime;

pub use config::{BodyConfig, ParameterConfig, ResolvedParameters};
pub use diagnostics::{Diagnostic, DiagnosticSeverity, Diagnostics};
pub use engine::{BodyId, BodySnapshot, KinematicBody, Sandbox, MAX_BODIES};
pub use error::SandboxError;
pub use integrator::{step, step_all, CollisionImpact};
pub use orbit::{compute_accelerations, step_orbit, MassiveBody, OrbitParameters, OrbitSystem};
pub use params::SimulationParameters;
pub use runtime::{
    build_simulation_context, get_body_states, is_settled, reset_simulation, run_simulation,
    step_simulation, stop_reason, BodyState, RunSummary, SimulationContext, StopReason,
};
