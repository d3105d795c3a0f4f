use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use url::Url;

use etwin_client::{Auth, EtwinClient, HttpEtwinClient};
use etwin_core::user::UserId;

/// Fetch users and auth contexts from an Eternaltwin server.
#[derive(Parser)]
#[command(name = "etwin-fetch", version)]
struct Cli {
    /// Server base URL, without the /api/v1 suffix (appended automatically)
    #[arg(long, default_value = "https://eternal-twin.net")]
    base_url: Url,

    /// OAuth access token; guest access when absent
    #[arg(long, env = "ETWIN_TOKEN")]
    token: Option<String>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a user by id
    User {
        /// User id (UUID), e.g. 9f310484-963b-446b-af69-797feec6813f
        user_id: UserId,
    },
    /// Resolve the caller's auth context (requires a token)
    #[command(name = "self")]
    GetSelf,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let auth = match &cli.token {
        Some(token) => Auth::from_token(token.clone()),
        None => Auth::Guest,
    };

    let client = HttpEtwinClient::new(cli.base_url.clone())
        .with_context(|| format!("cannot build a client for {}", cli.base_url))?;

    match cli.command {
        Commands::User { user_id } => {
            tracing::info!(%user_id, "fetching user");
            let user = client.get_user(&auth, user_id).await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Commands::GetSelf => {
            if matches!(auth, Auth::Guest) {
                bail!("`self` needs an access token; pass --token or set ETWIN_TOKEN");
            }
            tracing::info!("resolving auth context");
            let context = client.get_self(&auth).await?;
            println!("{}", serde_json::to_string_pretty(&context)?);
        }
    }

    Ok(())
}
