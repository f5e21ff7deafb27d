mod demo;

use clap::{Parser, Subcommand};
use fullcontact_cab::{
    endpoints::{DEFAULT_API_BASE, DEFAULT_AUTHORIZE_BASE},
    ApiClient, Authorizer, ClientCredentials, Endpoints, ReqwestTransport,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// A small FullContact CAB API demo: log in, then list your contacts.
///
/// Register an application with FullContact first, and set its redirect URI
/// to the one given here.
#[derive(Debug, Parser)]
#[command(name = "cab-demo", version)]
struct Cli {
    #[arg(long, env = "FULLCONTACT_CLIENT_ID")]
    client_id: String,

    #[arg(long, env = "FULLCONTACT_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,

    #[arg(
        long,
        env = "FULLCONTACT_REDIRECT_URI",
        default_value = "http://localhost:8080/login"
    )]
    redirect_uri: String,

    #[arg(long, env = "FULLCONTACT_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    #[arg(long, env = "FULLCONTACT_AUTHORIZE_BASE", default_value = DEFAULT_AUTHORIZE_BASE)]
    authorize_base: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Authorize this app and store the resulting token.
    Login {
        /// Scopes to request. Each writable resource has its own scope.
        #[arg(long = "scope", default_value = "contacts.read")]
        scopes: Vec<String>,
    },
    /// List contacts that have both an email and a photo.
    Contacts {
        #[arg(long, default_value_t = 3)]
        pages: usize,
    },
    /// Forget the stored token.
    Logout,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Both halves share one connection pool, but are otherwise independent.
    let endpoints = Endpoints::new(&cli.api_base, &cli.authorize_base)?;
    let transport = Arc::new(ReqwestTransport::new());
    let authorizer = Authorizer::with_transport(
        ClientCredentials::new(cli.client_id, cli.client_secret),
        endpoints.clone(),
        transport.clone(),
    );
    let client = ApiClient::with_transport(endpoints, transport);
    let session = demo::Session::open()?;

    match cli.command {
        Command::Login { scopes } => {
            let scopes: Vec<&str> = scopes.iter().map(String::as_str).collect();
            demo::login(&authorizer, &session, &cli.redirect_uri, &scopes).await
        }
        Command::Contacts { pages } => demo::list_contacts(&client, &session, pages).await,
        Command::Logout => demo::logout(&session),
    }
}
