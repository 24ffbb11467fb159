mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::print_error;

/// reconf - inspect and edit generator build configurations
#[derive(Parser)]
#[command(name = "reconf")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Print machine-readable JSON
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show a saved build configuration
  Show {
    /// Saved state file
    state: PathBuf,

    /// Kit description (JSON)
    #[arg(long)]
    kit: Option<PathBuf>,
  },

  /// Merge configuration items into a saved build configuration
  Set {
    /// Saved state file
    state: PathBuf,

    /// Items as KEY:TYPE=VALUE, KEY=VALUE or "unset KEY"
    #[arg(required = true)]
    items: Vec<String>,

    /// Kit description (JSON)
    #[arg(long)]
    kit: Option<PathBuf>,
  },

  /// Detect the build type of a configured build tree
  BuildType {
    /// Build directory containing the generator cache
    build_dir: PathBuf,
  },

  /// Show what would be deployed from a build tree
  Deploy {
    source_dir: PathBuf,
    build_dir: PathBuf,

    /// Build targets reported by the generator (JSON list)
    #[arg(long)]
    targets: Option<PathBuf>,
  },

  /// List the build variants offered for a project
  Variants {
    /// Top-level project file
    project_file: PathBuf,

    /// Kit description (JSON)
    #[arg(long)]
    kit: Option<PathBuf>,
  },
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let result = match cli.command {
    Commands::Show { state, kit } => cmd::cmd_show(&state, kit.as_deref(), cli.verbose, cli.json),
    Commands::Set { state, items, kit } => cmd::cmd_set(&state, &items, kit.as_deref(), cli.json),
    Commands::BuildType { build_dir } => cmd::cmd_build_type(&build_dir, cli.json),
    Commands::Deploy {
      source_dir,
      build_dir,
      targets,
    } => cmd::cmd_deploy(&source_dir, &build_dir, targets.as_deref(), cli.json),
    Commands::Variants { project_file, kit } => cmd::cmd_variants(&project_file, kit.as_deref(), cli.json),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
