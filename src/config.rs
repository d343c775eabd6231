//! CLI surface and the immutable configuration value it produces. Parsed
//! once at startup and threaded by value through the dispatcher into every
//! worker — there is no process-wide mutable config state.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

const DEFAULT_BUFFER_CEILING: usize = 2048;

/// Command-line flags, named after the original source's `argparse` surface
/// plus the ambient `--timeout-secs` and `--verbose` knobs (see
/// `SPEC_FULL.md` §6 and §10.2).
#[derive(Debug, Parser)]
#[command(name = "statichttpd", about = "Concurrent static-file HTTP server")]
pub struct Cli {
    /// Bind address
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// TCP port
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Document root, relative to the executable's directory
    #[arg(short = 'r', long = "folder", default_value = "/httptest")]
    pub folder: PathBuf,

    /// Worker count
    #[arg(short, long, default_value_t = 8)]
    pub workers: usize,

    /// Per-connection read timeout, in seconds
    #[arg(short, long = "timeout-secs", default_value_t = 5)]
    pub timeout_secs: u64,

    /// Raise the log level by one step per occurrence
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Immutable, validated server configuration. Built once from [`Cli`] and
/// shared behind an `Arc` for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub document_root: PathBuf,
    pub worker_count: usize,
    pub read_timeout: Duration,
    pub buffer_ceiling: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("document root {0:?} does not exist or is not a directory")]
    MissingDocumentRoot(PathBuf),
    #[error("worker count must be at least 1, got {0}")]
    InvalidWorkerCount(usize),
}

impl ServerConfig {
    /// Resolves `cli.folder` against `exe_dir` (the executable's directory,
    /// per the original source's semantics) and validates the result.
    pub fn from_cli(cli: Cli, exe_dir: &std::path::Path) -> Result<Self, ConfigError> {
        if cli.workers < 1 {
            return Err(ConfigError::InvalidWorkerCount(cli.workers));
        }

        let folder = cli.folder.to_string_lossy();
        let relative = folder.trim_start_matches('/');
        let document_root = exe_dir.join(relative);

        if !document_root.is_dir() {
            return Err(ConfigError::MissingDocumentRoot(document_root));
        }

        Ok(ServerConfig {
            address: cli.address,
            port: cli.port,
            document_root,
            worker_count: cli.workers,
            read_timeout: Duration::from_secs(cli.timeout_secs),
            buffer_ceiling: DEFAULT_BUFFER_CEILING,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}
