use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    device::{self, DeviceArgs},
    encode::{self, EncodeArgs},
    generate::{self, GenerateArgs},
    sample::{self, SampleArgs},
    tables::{self, TablesArgs},
    version::{self, VersionArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "mof-sim", about = "Synthetic MOF electrochemistry curve generator")]
struct Cli {
    /// Log at debug level regardless of RUST_LOG.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a seeded dataset and write its artifacts.
    Generate(GenerateArgs),
    /// Print one sample as canonical JSON.
    Sample(SampleArgs),
    /// Print the feature encoding of a material.
    Encode(EncodeArgs),
    /// Simulate a voltage-window device profile.
    Device(DeviceArgs),
    /// Print the property tables and category universe.
    Tables(TablesArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Command::Generate(args) => generate::run(&args),
        Command::Sample(args) => sample::run(&args),
        Command::Encode(args) => encode::run(&args),
        Command::Device(args) => device::run(&args),
        Command::Tables(args) => tables::run(&args),
        Command::Version(args) => version::run(&args),
    }
}

// Logs go to stderr; stdout carries JSON results only.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
