//! chain-connect: run one Chain connector from the command line.
//!
//! The connector's parameter set is read from a JSON file; the output is
//! printed as JSON on stdout, logs go to stderr.

mod config;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use chain_client::HttpClientFactory;
use chain_connectors::{
    run, BalanceInput, Connector, CreateBaseExchangeAssetConnector, ExchangeInput,
    GetBalanceConnector, SpendAssetConnector, SpendInput,
};
use chain_utils::LogFormat;

use crate::config::{pick, read_input, ConnectConfig};

#[derive(Parser)]
#[command(name = "chain-connect", about = "Run a Chain ledger connector")]
struct Cli {
    /// Chain core URL. Overrides the input file and the config file.
    #[arg(long, env = "CHAIN_URL", global = true)]
    url: Option<String>,

    /// Access token (`name:secret`). Overrides the input file and the
    /// config file.
    #[arg(long, env = "CHAIN_ACCESS_TOKEN", global = true, hide_env_values = true)]
    access_token: Option<String>,

    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log output: "human" or "json".
    #[arg(long, env = "CHAIN_LOG_FORMAT", global = true)]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "CHAIN_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Build and sign one side of an asset exchange.
    Exchange(InputArgs),
    /// Transfer an asset between two accounts.
    Spend(InputArgs),
    /// Look up an account's balance of one asset.
    Balance(InputArgs),
}

#[derive(clap::Args)]
struct InputArgs {
    /// JSON file holding the connector's parameters.
    #[arg(long)]
    input: PathBuf,
}

impl Cli {
    /// Resolve url and token across command line, input file and config.
    fn endpoint(
        &self,
        config: &ConnectConfig,
        url: &mut Option<String>,
        token: &mut Option<String>,
    ) {
        *url = pick(self.url.as_deref(), url.as_deref(), config.client.url.as_deref());
        *token = pick(
            self.access_token.as_deref(),
            token.as_deref(),
            config.client.access_token.as_deref(),
        );
    }
}

async fn execute<C>(mut connector: C, input: C::Input) -> anyhow::Result<serde_json::Value>
where
    C: Connector,
    C::Output: Serialize,
{
    let name = connector.name();
    let output = run(&mut connector, &input)
        .await
        .with_context(|| format!("{name} failed"))?;
    Ok(serde_json::to_value(output)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ConnectConfig::load(cli.config.as_deref())?;
    let log_format = match cli.log_format {
        Some(format) => format,
        None => config.log_format.parse().context("invalid log_format in config")?,
    };
    let log_level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    chain_utils::init_logging(log_format, log_level)?;

    let factory = HttpClientFactory::new(config.client.clone());

    let output = match &cli.command {
        Command::Exchange(args) => {
            let mut input: ExchangeInput = read_input(&args.input)?;
            cli.endpoint(&config, &mut input.url, &mut input.account_token);
            execute(CreateBaseExchangeAssetConnector::new(factory), input).await?
        }
        Command::Spend(args) => {
            let mut input: SpendInput = read_input(&args.input)?;
            cli.endpoint(&config, &mut input.url, &mut input.account_token);
            execute(SpendAssetConnector::new(factory), input).await?
        }
        Command::Balance(args) => {
            let mut input: BalanceInput = read_input(&args.input)?;
            cli.endpoint(&config, &mut input.url, &mut input.account_token);
            execute(GetBalanceConnector::new(factory), input).await?
        }
    };

    tracing::debug!("connector finished");
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
