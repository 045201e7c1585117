mod canvas;
mod state;
use state::State;

use clap::Parser;
use ggez::{
    conf::{Conf, WindowMode, WindowSetup},
    event, ContextBuilder, GameError,
};
use loader::{prefabs, LoadError};
use simulator::ConfigError;
use thiserror::Error;
use tracing::{error, info};

use std::path::PathBuf;

/// Watch satellites fall around the Earth.
#[derive(Parser, Debug)]
#[command(name = "viewer", version)]
struct Args {
    /// JSON5 scenario to load. Defaults to the Earth and JJB01.
    scenario: Option<PathBuf>,
    /// Load the built-in Sun and Earth instead.
    #[arg(long, conflicts_with = "scenario")]
    solar: bool,
    /// Seconds simulated per frame, overriding the scenario.
    #[arg(long, value_parser = parse_dt)]
    dt: Option<f64>,
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

#[derive(Debug, Error)]
enum ViewerError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("ggez: {0}")]
    Game(#[from] GameError),
}

fn parse_dt(arg: &str) -> Result<f64, String> {
    let dt: f64 = arg.parse().map_err(|e| format!("{}", e))?;
    if dt.is_finite() {
        Ok(dt)
    } else {
        Err(format!("the timestep has to be finite, not {}", dt))
    }
}

pub fn main() {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), ViewerError> {
    let mut scenario = match &args.scenario {
        Some(path) => loader::load_file(path)?,
        None if args.solar => prefabs::systems::solar()?,
        None => prefabs::systems::earth_orbit()?,
    };
    if let Some(dt) = args.dt {
        scenario.dt = dt;
    }
    info!(
        bodies = scenario.store.len(),
        dt = scenario.dt,
        "scenario ready"
    );

    let c = Conf::new();
    let (ref mut ctx, ref mut event_loop) = ContextBuilder::new("satellite_decay", "me")
        .conf(c)
        .window_setup(WindowSetup {
            title: "Satellite decay!".to_owned(),
            ..Default::default()
        })
        .window_mode(WindowMode {
            resizable: true,
            ..Default::default()
        })
        .build()?;

    let state = &mut State::new(ctx, scenario);

    event::run(ctx, event_loop, state)?;
    Ok(())
}
