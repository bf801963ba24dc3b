//! SortVis - Main Entry Point
//!
//! Plays a sorting algorithm step by step in the terminal.
//!
//! Usage:
//!   sortvis 5,3,8,1
//!   sortvis --algorithm insertion --speed 2 -- -4,7,0,3
//!   sortvis --repeat 3 --export history.json 9,2,6

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sortvis_rs::{
    config::{AppConfig, MAX_INPUT_LEN},
    playback::MonotonicClock,
    render::{RenderConfig, RenderSurface, StepRenderer, TextRenderer},
    types::{Algorithm, Step},
    PlaybackState, Visualizer,
};

/// Step-by-step sorting visualizer
#[derive(Parser, Debug)]
#[command(name = "sortvis")]
#[command(about = "Play a sorting algorithm one step at a time")]
struct Args {
    /// Values to sort, comma separated
    #[arg(value_delimiter = ',', allow_negative_numbers = true, required = true)]
    values: Vec<i64>,

    /// Sorting algorithm (bubble, selection, insertion)
    #[arg(short, long, default_value = "bubble")]
    algorithm: Algorithm,

    /// Playback speed multiplier (0.1 to 5.0)
    #[arg(short, long)]
    speed: Option<f64>,

    /// Play the sequence this many times
    #[arg(short, long, default_value_t = 1)]
    repeat: u32,

    /// Print every step immediately instead of playing on a timer
    #[arg(long)]
    instant: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the snapshot history as JSON when done
    #[arg(short, long)]
    export: Option<PathBuf>,
}

/// Text renderer that prints each frame to stdout
#[derive(Debug, Default)]
struct StdoutRenderer {
    inner: TextRenderer,
}

impl StepRenderer for StdoutRenderer {
    fn initialize(
        &mut self,
        surface: &RenderSurface,
        config: &RenderConfig,
    ) -> sortvis_rs::Result<()> {
        self.inner.initialize(surface, config)
    }

    fn render_step(&mut self, step: &Step, config: &RenderConfig) {
        self.inner.render_step(step, config);
        println!("{}", self.inner.last_frame());
    }

    fn capability_supported(&self) -> bool {
        self.inner.capability_supported()
    }

    fn dispose(&mut self) {
        self.inner.dispose();
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,sortvis_rs=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if args.values.len() > MAX_INPUT_LEN {
        bail!(
            "at most {} values are supported, got {}",
            MAX_INPUT_LEN,
            args.values.len()
        );
    }

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AppConfig::load_or_default(),
    };

    let mut renderer = StdoutRenderer::default();
    renderer.initialize(&RenderSurface::default(), &config.render)?;

    let mut vis = Visualizer::new(config, Box::new(MonotonicClock::new()), Box::new(renderer))?;
    vis.set_algorithm(args.algorithm);
    vis.set_data(args.values)?;
    if let Some(speed) = args.speed {
        vis.set_speed(speed)?;
    }
    vis.set_loop(args.repeat > 1);

    tracing::info!(algorithm = %args.algorithm, "Starting sort");
    vis.start_sort()?;

    if args.instant {
        vis.step_to_end()?;
    } else {
        run_timed(&mut vis, args.repeat.max(1));
    }

    if let Some(steps) = vis.steps() {
        println!(
            "{}: {} steps, sorted: {:?}",
            args.algorithm.display_name(),
            steps.len(),
            steps.last().data()
        );
    }

    if let Some(path) = &args.export {
        vis.export_history()
            .save_to_file(path)
            .with_context(|| format!("exporting history to {}", path.display()))?;
        tracing::info!("Exported {} snapshots to {:?}", vis.history().len(), path);
    }

    Ok(())
}

/// Drive the cooperative timer until playback has completed `runs` times
fn run_timed(vis: &mut Visualizer, runs: u32) {
    let tick = Duration::from_millis(5);
    let mut completed = 0;
    let mut was_completed = false;

    vis.play();
    loop {
        vis.update();

        let is_completed = vis.state() == PlaybackState::Completed;
        if is_completed && !was_completed {
            completed += 1;
            if completed >= runs {
                break;
            }
        }
        was_completed = is_completed;

        std::thread::sleep(tick);
    }

    vis.set_loop(false);
}
