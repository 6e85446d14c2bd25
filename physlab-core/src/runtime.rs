use crate::config::{BodyConfig, ParameterConfig};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::engine::{BodyId, KinematicBody, Sandbox};
use crate::error::SandboxError;
use crate::integrator::{step_all, CollisionImpact};
use crate::params::{SimulationParameters, DEFAULT_MAX_TIME};
use glam::DVec2;

/// Speed components below this count as stopped
pub const SETTLE_SPEED_THRESHOLD: f64 = 0.1;

/// How far above its resting height a stopped ball may sit and still count
/// as settled
pub const SETTLE_HEIGHT_TOLERANCE: f64 = 0.1;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Settled,
    TimeLimit,
}

/// Per-body state read back by a renderer between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub id: BodyId,
    pub position: DVec2,
    pub velocity: DVec2,
}

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub time: f64,
    pub reason: StopReason,
    pub impacts: Vec<CollisionImpact>,
}

/// Everything the fixed-step driver needs between ticks
#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub sandbox: Sandbox,
    pub params: SimulationParameters,
    pub time: f64,
    pub current_step: usize,
    pub max_time: f64,
}

impl SimulationContext {
    pub fn new(sandbox: Sandbox, params: SimulationParameters) -> Self {
        Self {
            sandbox,
            params,
            time: 0.0,
            current_step: 0,
            max_time: DEFAULT_MAX_TIME,
        }
    }

    /// Set the simulated-time cap. A cap that is not a positive finite
    /// number is ignored and the current one kept.
    pub fn with_max_time(mut self, max_time: f64) -> Self {
        if max_time.is_finite() && max_time > 0.0 {
            self.max_time = max_time;
        }
        self
    }
}

/// Build a context from raw configuration.
///
/// Bad values fall back to defaults and come back as diagnostics; only
/// asking for more balls than the sandbox holds is an error.
pub fn build_simulation_context(
    bodies: &[BodyConfig],
    params: &ParameterConfig,
) -> Result<(SimulationContext, Diagnostics), SandboxError> {
    let mut diagnostics = Diagnostics::new();

    let (resolved, param_diagnostics) = params.resolve();
    diagnostics.extend(param_diagnostics.into());

    if bodies.is_empty() {
        diagnostics.push(Diagnostic::note("no bodies configured; nothing will move"));
    }

    let mut sandbox = Sandbox::new();
    for config in bodies {
        let (body, body_diagnostics) = config.resolve();
        diagnostics.extend(body_diagnostics.into());
        sandbox.add_body(body)?;
    }

    let ctx = SimulationContext::new(sandbox, resolved.params).with_max_time(resolved.max_time);
    Ok((ctx, diagnostics))
}

/// Advance every body by one tick
pub fn step_simulation(ctx: &mut SimulationContext) -> Vec<CollisionImpact> {
    let impacts = step_all(&mut ctx.sandbox, &ctx.params);
    ctx.time += ctx.params.dt;
    ctx.current_step += 1;
    impacts
}

pub fn is_body_settled(body: &KinematicBody) -> bool {
    body.velocity.x.abs() < SETTLE_SPEED_THRESHOLD
        && body.velocity.y.abs() < SETTLE_SPEED_THRESHOLD
        && body.position.y <= body.ground_level() + SETTLE_HEIGHT_TOLERANCE
}

/// True when no body is still moving. An empty set is settled.
pub fn is_settled<'a>(bodies: impl IntoIterator<Item = &'a KinematicBody>) -> bool {
    bodies.into_iter().all(is_body_settled)
}

/// The stop rule: settled or out of time, whichever comes first
pub fn stop_reason(ctx: &SimulationContext) -> Option<StopReason> {
    if is_settled(ctx.sandbox.bodies()) {
        Some(StopReason::Settled)
    } else if ctx.time >= ctx.max_time {
        Some(StopReason::TimeLimit)
    } else {
        None
    }
}

/// Tick until the stop rule fires, calling `on_frame` after every tick
/// with the impacts of that tick.
pub fn run_simulation<F>(ctx: &mut SimulationContext, mut on_frame: F) -> RunSummary
where
    F: FnMut(&SimulationContext, &[CollisionImpact]),
{
    let mut impacts = Vec::new();
    let start_step = ctx.current_step;

    let reason = loop {
        if let Some(reason) = stop_reason(ctx) {
            break reason;
        }
        let frame_impacts = step_simulation(ctx);
        on_frame(&*ctx, frame_impacts.as_slice());
        impacts.extend(frame_impacts);
    };

    RunSummary {
        steps: ctx.current_step - start_step,
        time: ctx.time,
        reason,
        impacts,
    }
}

/// Rewind the clock and put every body back on its snapshot
pub fn reset_simulation(ctx: &mut SimulationContext) {
    ctx.time = 0.0;
    ctx.current_step = 0;
    ctx.sandbox.reset_all();
}

/// Get current body states (for rendering)
pub fn get_body_states(ctx: &SimulationContext) -> Vec<BodyState> {
    ctx.sandbox
        .iter()
        .map(|(id, body)| BodyState {
            id,
            position: body.position,
            velocity: body.velocity,
        })
        .collect()
}
