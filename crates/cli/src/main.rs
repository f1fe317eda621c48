use clap::{Parser, Subcommand};
use rootwalk_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod commands;
mod di;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "rootwalk")]
#[command(version)]
#[command(about = "Rootwalk - iterative DNS resolver starting from the root servers")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Root hints file (named.root format)
    #[arg(long, value_name = "FILE", global = true)]
    root_hints: Option<String>,

    /// SQLite cache database path
    #[arg(long, value_name = "FILE", global = true)]
    cache: Option<String>,

    /// Query event JSON file
    #[arg(long, value_name = "FILE", global = true)]
    query_log: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve one or more names, walking from the root on cache misses
    Resolve {
        #[arg(required = true)]
        domains: Vec<String>,

        #[arg(short = 't', long = "type", default_value = "A")]
        record_type: String,

        #[arg(long = "class", default_value = "IN")]
        record_class: String,

        /// Identifier recorded as the client in the query log
        #[arg(long)]
        client: Option<String>,
    },

    /// Measure the latency of every root server
    Probe,

    /// Inspect or maintain the response cache
    Cache {
        #[command(subcommand)]
        action: commands::CacheAction,
    },

    /// Print the most recent query events
    Log {
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },

    /// Run the background jobs and answer lookups from stdin until interrupted
    Run,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        root_hints_path: cli.root_hints,
        cache_path: cli.cache,
        query_log_path: cli.query_log,
        log_level: cli.log_level,
    };
    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Rootwalk v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Resolve {
            domains,
            record_type,
            record_class,
            client,
        } => {
            commands::resolve(
                &config,
                &domains,
                &record_type,
                &record_class,
                client.as_deref(),
            )
            .await
        }
        Command::Probe => commands::probe(&config).await,
        Command::Cache { action } => commands::cache(&config, action).await,
        Command::Log { limit } => commands::log(&config, limit).await,
        Command::Run => commands::run(&config).await,
    }
}
