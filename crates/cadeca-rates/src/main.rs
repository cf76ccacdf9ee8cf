//! cadeca-rates — entry point.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use rust_decimal::Decimal;

use cadeca_rates::{run, Config, ReportMode};

#[derive(Parser)]
#[command(
    name = "cadeca-rates",
    about = "Print the CADECA exchange-rate table",
    version,
    after_help = "Settings come from MAIN_BLOCK_ID, WIDGET_BLOCK_ID, BASE_URL, MLC_RATE\n\
                  and HTTP_TIMEOUT_MS. Flags override the environment."
)]
struct Cli {
    /// Add MLC-equivalent columns to the report
    #[arg(long)]
    mlc: bool,

    /// CUP per MLC used for the derived columns
    #[arg(long)]
    mlc_rate: Option<Decimal>,

    /// Page to fetch
    #[arg(long)]
    base_url: Option<String>,

    /// HTTP timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Id of the block wrapping the exchange-rate widget
    #[arg(long)]
    main_block_id: Option<String>,

    /// Id of the exchange-rate widget
    #[arg(long)]
    widget_block_id: Option<String>,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::from_env();
        if let Some(rate) = self.mlc_rate {
            config.mlc_rate = rate;
        }
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(timeout) = self.timeout_ms {
            config.timeout_ms = timeout;
        }
        if let Some(id) = &self.main_block_id {
            config.main_block_id = id.clone();
        }
        if let Some(id) = &self.widget_block_id {
            config.widget_block_id = id.clone();
        }
        config
    }

    fn mode(&self) -> ReportMode {
        if self.mlc {
            ReportMode::Mlc
        } else {
            ReportMode::Plain
        }
    }
}

fn init_logging(verbose: bool) {
    let directive = if verbose {
        "cadeca_rates=debug"
    } else {
        "cadeca_rates=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(*shell, &mut cmd, "cadeca-rates", &mut std::io::stdout());
        return Ok(());
    }

    let config = cli.config();
    tracing::debug!(?config, "configuration loaded");

    let mut stdout = std::io::stdout().lock();
    let outcome = run(&config, cli.mode(), &mut stdout).await?;
    tracing::debug!(?outcome, "run finished");

    Ok(())
}
