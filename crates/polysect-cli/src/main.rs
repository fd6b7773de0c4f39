//! polysect - split SVG polygons along cut lines
//!
//! Usage:
//!   polysect clip <svg> --line "x,y x,y ..."   Split polygons along a line
//!   polysect clip <svg>                        Use the cut line drawn in the SVG
//!   polysect inspect <svg>                     Show rings, parts and cut lines
//!   polysect recipe <job.yaml>                 Run a YAML clip job

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli;

use cli::{ClipArgs, cmd_inspect, cmd_recipe, run_clip};

#[derive(Parser)]
#[command(name = "polysect", author, version, about = "Split SVG polygons along polylines")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split every polygon in an SVG along a cut line
    Clip(ClipArgs),

    /// Show rings, parts and cut lines found in an SVG
    Inspect {
        /// Input SVG file ('-' for stdin)
        input: PathBuf,
    },

    /// Run a clip job from a YAML file
    Recipe {
        /// Job file
        job: Option<PathBuf>,

        /// Print an example job and exit
        #[arg(long)]
        example: bool,
    },
}

/// Log to stderr so stdout stays clean for SVG/JSON output.
fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: logging was already initialised");
    }
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Clip(args) => run_clip(args),
        Commands::Inspect { input } => cmd_inspect(input),
        Commands::Recipe { job, example } => cmd_recipe(job.as_deref(), *example),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
