//! euro - terminal front panel for the synthesis core
//!
//! Run with: cargo run -- play --topology fm

mod app;
mod render;
mod ui;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use euro_dsp::{EngineConfig, TopologyId};
use tracing::Level;

#[derive(Parser)]
#[command(name = "euro", about = "Fixed-point wavetable synth voice", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play through the default output device with a knob TUI
    Play {
        /// Topology name or id (simple, fm, fm-feedback, fm-envelope, chord)
        #[arg(short, long, value_parser = parse_topology)]
        topology: Option<TopologyId>,

        /// TOML engine config
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Render to a 16-bit mono WAV file
    Render {
        #[arg(short, long, value_parser = parse_topology)]
        topology: Option<TopologyId>,

        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Length in seconds
        #[arg(short, long, default_value = "2.0")]
        seconds: f32,

        /// Output file
        out: PathBuf,
    },
}

fn parse_topology(arg: &str) -> Result<TopologyId, String> {
    if let Ok(id) = arg.parse::<u8>() {
        return TopologyId::try_from(id).map_err(|err| err.to_string());
    }
    TopologyId::ALL
        .into_iter()
        .find(|t| t.name() == arg)
        .ok_or_else(|| format!("unknown topology '{arg}'"))
}

fn load_config(path: Option<&Path>, topology: Option<TopologyId>) -> EyreResult<EngineConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
            toml::from_str(&text).wrap_err_with(|| format!("failed to parse config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    if let Some(topology) = topology {
        config.topology = topology;
    }
    if config.queue_capacity == 0 {
        return Err(eyre!("queue_capacity must be at least 1"));
    }
    Ok(config)
}

/// The TUI owns the terminal, so interactive runs log to a file.
fn init_logging(log_file: Option<&Path>) -> EyreResult<()> {
    let builder = tracing_subscriber::fmt().with_max_level(Level::DEBUG);
    match log_file {
        Some(path) => {
            let file = File::create(path).wrap_err_with(|| format!("failed to create {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_max_level(Level::INFO).with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    match cli.command {
        Command::Play { topology, config } => {
            init_logging(Some(Path::new("euro.log")))?;
            let config = load_config(config.as_deref(), topology)?;
            app::run(config)
        }
        Command::Render {
            topology,
            config,
            seconds,
            out,
        } => {
            init_logging(None)?;
            let config = load_config(config.as_deref(), topology)?;
            render::render(&config, seconds, &out)
        }
    }
}
