mod snapshot;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use awxport_patch::{TracingLogger, node_identifier};

use crate::snapshot::Snapshot;

/// Awxport - patch AWX exports taken from servers older than 10.0.0
#[derive(Parser)]
#[command(name = "awxport")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Fill in fields missing from the exports in a snapshot file
  Patch {
    /// Path to the snapshot file (JSON)
    snapshot_file: PathBuf,

    /// Print the patched exports on a single line
    #[arg(long)]
    compact: bool,
  },

  /// Print the identifier derived for workflow job template node ids
  Identifier {
    #[arg(required = true)]
    ids: Vec<i64>,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  match cli.command {
    Some(Commands::Patch {
      snapshot_file,
      compact,
    }) => {
      patch_snapshot(snapshot_file, compact)?;
    }
    Some(Commands::Identifier { ids }) => {
      for id in ids {
        println!("{}\t{}", id, node_identifier(id));
      }
    }
    None => {
      println!("awxport - use --help to see available commands");
    }
  }

  Ok(())
}

fn patch_snapshot(snapshot_file: PathBuf, compact: bool) -> Result<()> {
  let snapshot = Snapshot::from_path(&snapshot_file)?;
  tracing::info!(
    resources = snapshot.resources.len(),
    exports = snapshot.exports.len(),
    "loaded snapshot"
  );

  let exports = snapshot.patch(&TracingLogger)?;

  let output = if compact {
    serde_json::to_string(&exports)
  } else {
    serde_json::to_string_pretty(&exports)
  }
  .context("failed to serialize patched exports")?;

  println!("{}", output);
  Ok(())
}
