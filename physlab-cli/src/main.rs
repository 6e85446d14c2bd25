use clap::{Parser, Subcommand};
use physlab_core::diagnostics::format_runtime_error;
use physlab_core::orbit::{
    step_orbit, OrbitParameters, OrbitSystem, DEFAULT_ORBIT_DT, DEFAULT_ORBIT_RADIUS,
    DEFAULT_ORBIT_VELOCITY, DEFAULT_PLANET_MASS, DEFAULT_SATELLITE_MASS,
};
use physlab_core::{
    build_simulation_context, get_body_states, run_simulation, BodyConfig, Diagnostics,
    ParameterConfig, StopReason,
};
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "physlab")]
#[command(about = "physlab - bouncing balls and planetary orbits", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drop up to five balls and run until they settle or time runs out
    Run {
        #[arg(long)]
        gravity: Option<f64>,
        #[arg(long)]
        air_resistance: Option<f64>,
        #[arg(long)]
        friction: Option<f64>,
        #[arg(long)]
        dt: Option<f64>,
        #[arg(long)]
        max_time: Option<f64>,
        /// x,y,vx,vy,mass,restitution,size; empty fields take defaults
        #[arg(long = "ball")]
        balls: Vec<BallSpec>,
        /// height,speed,angle_deg: launch a ball from the left wall
        #[arg(long = "launch")]
        launches: Vec<LaunchSpec>,
        /// Print body states every N ticks (0 = only the final state)
        #[arg(long, default_value_t = 0)]
        every: usize,
    },
    /// Run the planet and satellite orbit
    Orbit {
        #[arg(long, default_value_t = 1000)]
        steps: usize,
        #[arg(long, default_value_t = DEFAULT_ORBIT_DT)]
        dt: f64,
        #[arg(long, default_value_t = 0)]
        every: usize,
    },
}

/// One `--ball` argument
#[derive(Debug, Clone, Copy)]
struct BallSpec(BodyConfig);

impl FromStr for BallSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        if fields.len() > 7 {
            return Err(format!("expected at most 7 fields, got {}", fields.len()));
        }

        // Unreadable numbers become NaN so the config layer swaps in the
        // default and warns about it.
        let field = |i: usize| -> Option<f64> {
            match fields.get(i) {
                None | Some(&"") => None,
                Some(text) => Some(text.parse().unwrap_or(f64::NAN)),
            }
        };

        Ok(Self(BodyConfig {
            x: field(0),
            y: field(1),
            vx: field(2),
            vy: field(3),
            mass: field(4),
            restitution: field(5),
            size: field(6),
        }))
    }
}

/// One `--launch` argument
#[derive(Debug, Clone, Copy)]
struct LaunchSpec(BodyConfig);

impl FromStr for LaunchSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|field| field.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("invalid launch value: {}", e))?;

        match values.as_slice() {
            [height, speed, angle] => Ok(Self(BodyConfig::from_launch(*height, *speed, *angle))),
            _ => Err(format!("expected height,speed,angle, got {} fields", values.len())),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            gravity,
            air_resistance,
            friction,
            dt,
            max_time,
            balls,
            launches,
            every,
        } => {
            let params = ParameterConfig {
                gravity,
                air_resistance,
                ground_friction: friction,
                dt,
                max_time,
            };
            let mut bodies: Vec<BodyConfig> = balls
                .into_iter()
                .map(|b| b.0)
                .chain(launches.into_iter().map(|l| l.0))
                .collect();
            if bodies.is_empty() {
                bodies.push(BodyConfig::default());
            }
            run_balls(&bodies, &params, every)
        }
        Commands::Orbit { steps, dt, every } => run_orbit(steps, dt, every),
    };

    if let Err(e) = result {
        eprintln!("{}", format_runtime_error(e.as_ref()));
        std::process::exit(1);
    }
}

fn print_diagnostics(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic);
    }
}

fn run_balls(
    bodies: &[BodyConfig],
    params: &ParameterConfig,
    every: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let (mut ctx, diagnostics) = build_simulation_context(bodies, params)?;
    print_diagnostics(&diagnostics);

    let summary = run_simulation(&mut ctx, |ctx, impacts| {
        for impact in impacts {
            let mass = ctx.sandbox.get(impact.body).map_or(1.0, |b| b.mass);
            let (stretch, squash) = impact.squash_stretch(mass);
            println!(
                "t={:.3} impact {} speed={:.3} stretch={:.3} squash={:.3}",
                ctx.time, impact.body, impact.speed, stretch, squash
            );
        }
        if every > 0 && ctx.current_step % every == 0 {
            print_states(ctx);
        }
    });

    let reason = match summary.reason {
        StopReason::Settled => "settled",
        StopReason::TimeLimit => "time limit",
    };
    println!(
        "stopped ({}) after {} steps, t={:.3}s, {} impacts",
        reason,
        summary.steps,
        summary.time,
        summary.impacts.len()
    );
    print_states(&ctx);

    Ok(())
}

fn print_states(ctx: &physlab_core::SimulationContext) {
    for state in get_body_states(ctx) {
        println!(
            "t={:.3} {} x={:.4} y={:.4} vx={:.4} vy={:.4}",
            ctx.time,
            state.id,
            state.position.x,
            state.position.y,
            state.velocity.x,
            state.velocity.y
        );
    }
}

fn run_orbit(steps: usize, dt: f64, every: usize) -> Result<(), Box<dyn std::error::Error>> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(format!("dt must be a positive number, got {}", dt).into());
    }

    let mut system = OrbitSystem::planet_and_satellite(
        DEFAULT_PLANET_MASS,
        DEFAULT_SATELLITE_MASS,
        DEFAULT_ORBIT_RADIUS,
        DEFAULT_ORBIT_VELOCITY,
    );
    let params = OrbitParameters {
        dt,
        ..OrbitParameters::default()
    };
    let start_energy = system.total_energy(params.gravitational_constant);

    for i in 1..=steps {
        step_orbit(&mut system, &params);
        if every > 0 && i % every == 0 {
            print_orbit(&system);
        }
    }

    print_orbit(&system);
    let drift = (system.total_energy(params.gravitational_constant) - start_energy) / start_energy;
    println!("relative energy drift {:.3e}", drift);

    Ok(())
}

fn print_orbit(system: &OrbitSystem) {
    for body in &system.bodies {
        println!(
            "t={:.2} {} x={:.6e} y={:.6e} vx={:.4} vy={:.4}",
            system.time, body.name, body.position.x, body.position.y, body.velocity.x, body.velocity.y
        );
    }
}
