//! # Stockroom Entry Point
//!
//! ## Usage
//! ```bash
//! stockroom                         # defaults + platform config file
//! stockroom --config ./stockroom.toml
//! STOCKROOM_CONSOLE=false stockroom # HTTP only, stop with Ctrl+C
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use stockroom_server::config::ServerConfig;
use stockroom_server::{init_tracing, run};

fn main() -> anyhow::Result<()> {
    let config_path = parse_args()?;

    init_tracing();

    let config = ServerConfig::load(config_path).context("loading configuration")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    let result = runtime.block_on(run(config));

    // A signal can arrive while stdin is blocked in a read that cannot be
    // cancelled; don't wait for it.
    runtime.shutdown_timeout(Duration::from_millis(200));

    result.map(|_| ())
}

/// Parses `--config <path>`; `--help` prints usage and exits.
fn parse_args() -> anyhow::Result<Option<PathBuf>> {
    let args: Vec<String> = std::env::args().collect();
    let mut config_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let path = args
                    .get(i + 1)
                    .context("--config requires a path")?;
                config_path = Some(PathBuf::from(path));
                i += 1;
            }
            "--help" | "-h" => {
                println!("Stockroom inventory server");
                println!();
                println!("Usage: stockroom [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  TOML configuration file");
                println!("  -h, --help           Show this help message");
                std::process::exit(0);
            }
            other => anyhow::bail!("unknown argument: {}", other),
        }
        i += 1;
    }

    Ok(config_path)
}
