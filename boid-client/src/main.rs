use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use boid_client::{JsonLinesSink, Simulation, SummarySink, Tee};
use boid_core::FrameSink;
use boid_shared::{FlockSettings, OrderSetting};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Order {
    Sequential,
    Snapshot,
}

impl From<Order> for OrderSetting {
    fn from(order: Order) -> Self {
        match order {
            Order::Sequential => OrderSetting::Sequential,
            Order::Snapshot => OrderSetting::Snapshot,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless boid flocking simulation", long_about = None)]
struct Args {
    /// JSON settings file; command line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of boids (overrides the settings file)
    #[arg(short, long)]
    boids: Option<usize>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Seed for the spawn placement
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Update order (overrides the settings file)
    #[arg(long, value_enum)]
    order: Option<Order>,

    /// Write placement snapshots as JSON lines to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log a flock summary every N frames (0 disables)
    #[arg(long, default_value_t = 60)]
    summary_every: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn load_settings(args: &Args) -> Result<FlockSettings> {
    let mut settings = match &args.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open settings file {}", path.display()))?;
            serde_json::from_reader(file)
                .with_context(|| format!("Failed to parse settings file {}", path.display()))?
        }
        None => FlockSettings::default(),
    };

    if let Some(boids) = args.boids {
        settings.num_boids = boids;
    }
    if let Some(order) = args.order {
        settings.update_order = order.into();
    }
    Ok(settings)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let config = load_settings(&args)?
        .into_config()
        .context("Invalid simulation settings")?;
    let mut simulation = Simulation::new(config, args.seed)?;

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut snapshots = JsonLinesSink::new(writer, args.dt);

    if args.summary_every > 0 {
        let mut summary = SummarySink::new(args.summary_every);
        let sinks: Vec<&mut dyn FrameSink> = vec![&mut snapshots, &mut summary];
        let mut tee = Tee::new(sinks);
        simulation.run(args.frames, args.dt, &mut tee)?;
    } else {
        simulation.run(args.frames, args.dt, &mut snapshots)?;
    }

    snapshots.finish().context("Failed to write snapshots")?;
    log::info!(
        "Finished {} frames ({:.2}s simulated)",
        simulation.frame(),
        simulation.time()
    );
    Ok(())
}
