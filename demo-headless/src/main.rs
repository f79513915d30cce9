use anyhow::{Context, Result};
use clap::Parser;
use forest_fire_core::simulation::config::{
    DEFAULT_HEIGHT, DEFAULT_OUTPUT_PATH, DEFAULT_STEPS, DEFAULT_TREE_PROBABILITY, DEFAULT_WIDTH,
};
use forest_fire_core::{
    render_history_gif, CsvHistoryFile, ForestFireSimulation, RenderOptions, SimulationConfig,
    SimulationStats,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Forest fire cellular automaton with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "forest-fire")]
#[command(about = "Forest fire spread on a toroidal grid, recorded to CSV", long_about = None)]
struct Args {
    /// Grid columns
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Grid rows
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,

    /// Number of transitions to simulate
    #[arg(short, long, default_value_t = DEFAULT_STEPS)]
    steps: usize,

    /// Probability that an initial cell is a tree (0-1)
    #[arg(short = 'p', long, default_value_t = DEFAULT_TREE_PROBABILITY)]
    tree_probability: f64,

    /// History output file (truncated at start)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Seed for the initial forest (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Print a progress row every N steps (0 = only the summary)
    #[arg(short, long, default_value_t = 20)]
    report_interval: usize,

    /// Suppress the progress table and summary
    #[arg(short, long)]
    quiet: bool,

    /// Also render the recorded history as an animated GIF
    #[arg(long)]
    gif: Option<PathBuf>,

    /// Pixels per cell in the GIF
    #[arg(long, default_value_t = 2)]
    gif_scale: u32,

    /// GIF frame duration in milliseconds
    #[arg(long, default_value_t = 100)]
    frame_delay_ms: u32,

    /// Skip the simulation and only render an existing history file (needs --gif)
    #[arg(long, requires = "gif")]
    render_only: bool,
}

impl Args {
    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            scale: self.gif_scale,
            frame_delay_ms: self.frame_delay_ms,
        }
    }

    fn config(&self) -> SimulationConfig {
        SimulationConfig {
            width: self.width,
            height: self.height,
            steps: self.steps,
            tree_probability: self.tree_probability,
            output_path: self.output.clone(),
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.render_only {
        return render_gif(&args);
    }
    let config = args.config();

    let mut sim = ForestFireSimulation::new(config).context("invalid simulation parameters")?;
    let mut history = CsvHistoryFile::create(&args.output)
        .with_context(|| format!("cannot prepare history file {}", args.output.display()))?;

    let report = !args.quiet;
    if report {
        println!("Step    | Trees   | Burning | Charred | Burned(%)");
        println!("--------|---------|---------|---------|----------");
    }

    let stats = sim.initialize(&mut history).context("recording initial state")?;
    if report {
        print_row(&stats);
    }

    while !sim.is_done() {
        let stats = sim
            .advance(&mut history)
            .with_context(|| format!("recording step {}", sim.steps_taken() + 1))?;
        let last = sim.is_done();
        let due = last || (args.report_interval > 0 && stats.step % args.report_interval == 0);
        if report && stats.step > 0 && due {
            print_row(&stats);
        }
    }

    let summary = sim.summary();
    info!(
        "Wrote {} blocks of {}x{} to {}",
        summary.blocks_recorded,
        args.width,
        args.height,
        history.path().display()
    );
    if report {
        println!("\n=== Simulation Complete ===");
        println!("Seed: {}", summary.seed);
        println!("Grid: {}x{}", args.width, args.height);
        println!("Steps: {}", summary.steps_run);
        println!("Blocks written: {} -> {}", summary.blocks_recorded, history.path().display());
        println!("Initial trees: {}", summary.initial.tree);
        println!("Trees remaining: {}", summary.final_census.tree);
        println!("Peak burning cells: {} (step {})", summary.peak_fire, summary.peak_fire_step);
        println!("Burned: {:.1}%", summary.burned_fraction() * 100.0);
    }

    if args.gif.is_some() {
        render_gif(&args)?;
    }

    Ok(())
}

fn render_gif(args: &Args) -> Result<()> {
    let Some(gif) = &args.gif else {
        return Ok(());
    };
    let frames = render_history_gif(
        &args.output,
        args.width,
        args.height,
        gif,
        &args.render_options(),
    )
    .with_context(|| format!("cannot render {} to {}", args.output.display(), gif.display()))?;

    if !args.quiet {
        println!("Animation: {} frames -> {}", frames, gif.display());
    }
    Ok(())
}

fn print_row(stats: &SimulationStats) {
    println!(
        "{:7} | {:7} | {:7} | {:7} | {:9.1}",
        stats.step,
        stats.census.tree,
        stats.census.fire,
        stats.census.charred,
        stats.burned_fraction * 100.0
    );
}
