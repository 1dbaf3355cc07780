use anyhow::Context;
use audit_cli::commands::{self, RunOptions};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulated scan and reveal the finding
    Run {
        #[arg(short, long, help = "Catalog JSON to play instead of the built-in audit")]
        catalog: Option<Utf8PathBuf>,
        #[arg(short, long, default_value_t = audit_config::DEFAULT_SPEED)]
        speed: f64,
        #[arg(long, env = "AUDIT_UNLOCK_EMAIL", help = "Contact used to unlock the full report")]
        unlock: Option<String>,
        #[arg(long, help = "Start the scan again after this many milliseconds")]
        restart_after: Option<u64>,
        #[arg(long, help = "Print the final session snapshot as JSON")]
        json: bool,
    },
    /// Validate and print a catalog
    Catalog {
        #[arg(short, long)]
        catalog: Option<Utf8PathBuf>,
    },
}

fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("default subscriber")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Run {
            catalog,
            speed,
            unlock,
            restart_after,
            json,
        } => {
            commands::cmd_run(RunOptions {
                catalog,
                speed,
                unlock,
                restart_after_ms: restart_after,
                json,
            })
            .await?;
        }
        Commands::Catalog { catalog } => commands::cmd_catalog(catalog)?,
    }

    Ok(())
}
