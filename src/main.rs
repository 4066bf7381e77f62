use anyhow::Result;
use clap::Parser;
use tracing::info;

mod animation;
mod color;
mod config;
mod curve;
mod display;
mod render;
mod ticks;
mod view;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "limaviz")]
#[command(author, version, about = "Terminal visualizer for the Pascal limaçon r = a(k + cos t)")]
pub struct Args {
    /// Config file path (defaults to ~/.config/limaviz/config.toml)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Write a commented default config to the XDG path and exit
    #[arg(long)]
    init_config: bool,

    /// Radius scale a
    #[arg(short = 'a', long = "a")]
    a: Option<f64>,

    /// Shape parameter k (1 = cardioid, < 1 = inner loop, > 1 = convex)
    #[arg(short = 'k', long = "k")]
    k: Option<f64>,

    /// Sample count (curve is drawn through steps + 1 points)
    #[arg(long)]
    steps: Option<u32>,

    /// Number of full 2π traversals
    #[arg(long)]
    turns: Option<u32>,

    /// Animation speed multiplier (> 0)
    #[arg(short, long)]
    speed: Option<f64>,

    /// Animation loop count
    #[arg(short, long)]
    loops: Option<u32>,

    /// Start with the polar grid instead of Cartesian axes
    #[arg(long)]
    polar: bool,

    /// Color scheme: spectrum, rainbow, fire, ocean, monochrome
    #[arg(long)]
    colors: Option<String>,

    /// Manual zoom multiplier (0.5 - 5.0)
    #[arg(short, long)]
    zoom: Option<f64>,

    /// Render loop target frame rate
    #[arg(long)]
    fps: Option<u64>,

    /// Start with the curve hidden (press 'g' to draw it)
    #[arg(long)]
    hide_curve: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("limaviz=info".parse()?),
        )
        .init();

    let args = Args::parse();

    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    // Load or create config, CLI arguments take priority
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&args);

    info!(
        "Starting limaviz: a={} k={} steps={} turns={}",
        config.curve.a, config.curve.k, config.curve.steps, config.curve.turns
    );

    display::terminal::run(config).await
}
