//! datavfs binary.
//!
//! Browse a CSV, JSON or TOML file as a read-only filesystem.
//!
//! Usage:
//!   datavfs settings.json ls /
//!   datavfs settings.json cat /app_settings/version
//!   datavfs --config datavfs.toml inventory.csv stat item_2.csv
//!
//! Logs go to stderr (`RUST_LOG=debug` for detail); stdout carries only
//! content.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use datavfs_kernel::{FileType, VfsConfig, VirtualFilesystem};

/// Read-only filesystem view of structured data.
#[derive(Parser, Debug)]
#[command(name = "datavfs")]
#[command(about = "Browse CSV, JSON and TOML files as a read-only filesystem")]
struct Args {
    /// TOML config file (naming policies, rendering)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Source file to project
    source: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List a directory, one entry per line
    Ls {
        #[arg(default_value = "/")]
        path: String,
    },
    /// Show kind, child count and size of an entry
    Stat {
        #[arg(default_value = "/")]
        path: String,
    },
    /// Print an entry's content (directories print their whole subtree)
    Cat { path: String },
}

fn main() -> ExitCode {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let stdout = std::io::stdout();
    match run(&args, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("datavfs: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, out: &mut impl Write) -> Result<()> {
    let config = match &args.config {
        Some(path) => VfsConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => VfsConfig::default(),
    };

    let fs = VirtualFilesystem::open(&args.source, &config)?;
    if let Some(e) = fs.load_error() {
        tracing::warn!(source = %args.source.display(), error = %e, "namespace is empty");
    }

    match &args.command {
        Command::Ls { path } => {
            for name in fs.list(path)? {
                writeln!(out, "{name}")?;
            }
        }
        Command::Stat { path } => {
            let info = fs.stat(path)?;
            let kind = match info.kind {
                FileType::Directory => "directory",
                FileType::File => "file",
            };
            write!(out, "{}\t{kind}\t{} bytes", info.path, info.size)?;
            if let Some(children) = info.children {
                write!(out, "\t{children} entries")?;
            }
            writeln!(out)?;
        }
        Command::Cat { path } => {
            let content = fs.read(path)?;
            write!(out, "{content}")?;
            if !content.ends_with('\n') {
                writeln!(out)?;
            }
        }
    }
    Ok(())
}
