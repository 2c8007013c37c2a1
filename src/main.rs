#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use battleship_server::{init_logging, Server, ServerConfig, DEFAULT_BIND, DEFAULT_MAX_LINE_LENGTH};
#[cfg(feature = "std")]
use clap::Parser;

/// Two-player Battleship server speaking newline-delimited JSON.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[arg(long, default_value = DEFAULT_BIND)]
    bind: String,
    #[arg(long, help = "Fix RNG seed for reproducible boards (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, default_value_t = DEFAULT_MAX_LINE_LENGTH, help = "Longest accepted message in bytes")]
    max_line_length: usize,
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = ServerConfig {
        bind: cli.bind,
        seed: cli.seed,
        max_line_length: cli.max_line_length,
    };
    Server::new(config).run().await
}
