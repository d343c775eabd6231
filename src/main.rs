use std::sync::Arc;

use clap::Parser;

use statichttpd::config::{Cli, ServerConfig};
use statichttpd::dispatcher;

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|path| path.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    let config = match ServerConfig::from_cli(cli, &exe_dir) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            log::error!("startup validation failed: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = dispatcher::run(config).await {
        log::error!("dispatcher exited with error: {e}");
        std::process::exit(1);
    }
}
