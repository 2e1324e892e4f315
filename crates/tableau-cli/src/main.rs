//! Tableau CLI - Developer tooling for scene transitions and particle emitters

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, preview, simulate};

#[derive(Parser)]
#[command(name = "tableau")]
#[command(about = "Headless tools for Tableau scene stacks and particle emitters", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every emitter in a config headless and report alive counts
    Simulate {
        /// Path to an emitters TOML file
        config: String,

        /// Number of frames to simulate
        #[arg(long, default_value = "120")]
        frames: u32,

        /// Frame delta in milliseconds
        #[arg(long, default_value = "16.0")]
        dt: f32,

        /// RNG seed
        #[arg(long, default_value = "1")]
        seed: u32,

        /// Print a report every N frames
        #[arg(long, default_value = "10")]
        every: u32,
    },

    /// Parse and build every transition in a config
    Check {
        /// Path to a transitions TOML file
        config: String,
    },

    /// Push one scene over another and print node properties per frame
    Preview {
        /// Transition kind (e.g. fade_in_out, move_in, scale_out)
        #[arg(long, default_value = "fade_in_out")]
        kind: String,

        /// Transition time in milliseconds
        #[arg(long, default_value = "500")]
        time: f32,

        /// Direction for move and scroll transitions
        #[arg(long, default_value = "left", value_parser = parse_direction)]
        direction: tableau_director::Direction,

        /// Easing function name
        #[arg(long, default_value = "linear")]
        easing: String,

        /// Frame delta in milliseconds
        #[arg(long, default_value = "50.0")]
        dt: f32,
    },
}

fn parse_direction(s: &str) -> Result<tableau_director::Direction, String> {
    toml::Value::String(s.to_string())
        .try_into::<tableau_director::Direction>()
        .map_err(|_| {
            format!(
                "unknown direction '{s}'; valid values: up, down, left, right, \
                 up_left, up_right, down_left, down_right"
            )
        })
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            config,
            frames,
            dt,
            seed,
            every,
        } => simulate::run(simulate::SimulateArgs {
            config,
            frames,
            dt,
            seed,
            every,
        }),
        Commands::Check { config } => check::run(&config),
        Commands::Preview {
            kind,
            time,
            direction,
            easing,
            dt,
        } => preview::run(preview::PreviewArgs {
            kind,
            time,
            direction,
            easing,
            dt,
        }),
    }
}
