use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lstitch",
    about = "Stitch layers together; earlier layers are stronger",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Stitch input layers into a single output layer
    Stitch(StitchArgs),
    /// Print the spec tree of a layer
    Inspect(InspectArgs),
}

#[derive(Args)]
pub struct StitchArgs {
    /// Layer files, strongest first
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
    /// Where to write the stitched layer
    #[arg(short, long)]
    pub out: PathBuf,
    /// TOML file overriding the stitch configuration
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct InspectArgs {
    pub file: PathBuf,
}
