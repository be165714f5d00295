//! Command line front end for the NicAPI DNS-01 provider.
//!
//! Publishes or removes one `_acme-challenge` TXT record, for use from ACME
//! client hook scripts. Logs go to stderr; the exit code reports the outcome.

use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use nicapi_dns01::{
    API_KEY_ENV, ChallengeProvider, CleanupMatch, DEFAULT_RECORD_TTL,
    DEFAULT_RECURSIVE_NAMESERVERS, NICAPI_API_BASE, NicapiConfig, NicapiProvider, domain,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "nicapi-dns01", version, about)]
struct Cli {
    /// NicAPI API token
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: String,

    /// Recursive nameserver used for zone discovery (`ip` or `ip:port`)
    #[arg(
        long = "nameserver",
        env = "LUMASERV_NAMESERVERS",
        value_delimiter = ',',
        conflicts_with = "system_resolver"
    )]
    nameservers: Vec<String>,

    /// Use the system resolver configuration for zone discovery
    #[arg(long)]
    system_resolver: bool,

    /// API base URL
    #[arg(long, env = "LUMASERV_API_URL", default_value = NICAPI_API_BASE)]
    base_url: String,

    /// TTL of created records, in seconds
    #[arg(long, default_value_t = DEFAULT_RECORD_TTL)]
    ttl: u32,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Which records `cleanup` may delete
    #[arg(long, value_enum, default_value_t = CleanupMode::NameAndValue)]
    cleanup_match: CleanupMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CleanupMode {
    /// Delete the challenge record whatever it holds
    Name,
    /// Delete the challenge record only if it still holds the value
    NameAndValue,
}

impl From<CleanupMode> for CleanupMatch {
    fn from(mode: CleanupMode) -> Self {
        match mode {
            CleanupMode::Name => Self::NameOnly,
            CleanupMode::NameAndValue => Self::NameAndValue,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Publish the challenge TXT record
    Present(ChallengeArgs),
    /// Remove the challenge TXT record
    Cleanup(ChallengeArgs),
}

#[derive(Debug, Args)]
struct ChallengeArgs {
    /// Challenge name, e.g. `_acme-challenge.example.com.`
    fqdn: String,

    /// TXT value to publish
    value: String,

    /// Domain under validation (defaults to the FQDN without `_acme-challenge.`)
    #[arg(long)]
    domain: Option<String>,
}

impl ChallengeArgs {
    fn domain(&self) -> &str {
        self.domain
            .as_deref()
            .unwrap_or_else(|| domain::challenge_domain(&self.fqdn))
    }
}

impl Cli {
    fn config(&self) -> NicapiConfig {
        let nameservers = if self.system_resolver {
            Vec::new()
        } else if self.nameservers.is_empty() {
            DEFAULT_RECURSIVE_NAMESERVERS
                .iter()
                .map(ToString::to_string)
                .collect()
        } else {
            self.nameservers.clone()
        };

        let mut config = NicapiConfig::new(self.api_key.clone())
            .with_nameservers(nameservers)
            .with_base_url(self.base_url.clone())
            .with_cleanup_match(self.cleanup_match.into());
        config.record_ttl = self.ttl;
        config.timeout_secs = self.timeout;
        config
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let provider =
        NicapiProvider::with_config(cli.config()).context("Failed to configure provider")?;

    match &cli.command {
        Command::Present(args) => {
            tracing::info!("Presenting challenge at {}", args.fqdn);
            provider
                .present(args.domain(), &args.fqdn, &args.value)
                .await
                .with_context(|| format!("Failed to present challenge at {}", args.fqdn))?;
        }
        Command::Cleanup(args) => {
            tracing::info!("Cleaning up challenge at {}", args.fqdn);
            provider
                .clean_up(args.domain(), &args.fqdn, &args.value)
                .await
                .with_context(|| format!("Failed to clean up challenge at {}", args.fqdn))?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
