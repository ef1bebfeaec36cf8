use std::{path::PathBuf, sync::Arc};

use clap::{
    ArgGroup, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use tracing_subscriber::EnvFilter;

use locshare::{
    Res, config, error,
    identity::{self, FirebaseClient, FirebaseVerifier, IdentityError, ServiceAccount},
    info,
    management::LocationStore,
    server,
    state::AppState,
    success,
    types::ListScope,
    utils, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Defaults to `serve` when omitted
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeOptions),

    /// Obtain a Firebase ID token for calling the protected endpoints
    Token(TokenOptions),
}

#[derive(Parser, Debug, Clone, Default)]
pub struct ServeOptions {
    /// Listen address, overrides SERVER_ADDRESS
    #[clap(long)]
    pub addr: Option<String>,

    /// Service account key file, overrides GOOGLE_APPLICATION_CREDENTIALS
    #[clap(long)]
    pub credentials: Option<PathBuf>,

    /// Which records the shared-locations endpoint returns (all | subject)
    #[clap(long)]
    pub list_scope: Option<ListScope>,
}

#[derive(Parser, Debug, Clone)]
#[clap(group(
    ArgGroup::new("subject")
        .required(true)
        .multiple(true)
        .args(["custom_token", "uid", "phone"]),
))]
pub struct TokenOptions {
    /// Exchange an existing custom token instead of minting one
    #[clap(long, conflicts_with_all = ["uid", "phone"])]
    pub custom_token: Option<String>,

    /// Account uid to sign in as, defaults to the phone number
    #[clap(long)]
    pub uid: Option<String>,

    /// E.164 phone number added as a claim, e.g. +14155552671
    #[clap(long)]
    pub phone: Option<String>,

    /// Service account key used for signing, overrides GOOGLE_APPLICATION_CREDENTIALS
    #[clap(long)]
    pub credentials: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment: {}", e);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Serve(opt)) => serve(opt).await,
        None => serve(ServeOptions::default()).await,
        Some(Command::Token(opt)) => issue_token(opt).await,
    }
}

async fn serve(opt: ServeOptions) {
    let addr = opt.addr.clone().unwrap_or_else(config::server_addr);

    let state = match build_state(opt).await {
        Ok(state) => state,
        Err(e) => error!("Cannot start server: {}", e),
    };

    server::start_api_server(state, &addr).await;
}

async fn build_state(opt: ServeOptions) -> Res<AppState> {
    let credentials_path = opt.credentials.unwrap_or_else(config::credentials_path);
    info!("Loading credentials from {}", credentials_path.display());
    let account = ServiceAccount::load(&credentials_path).await?;

    let verifier = FirebaseVerifier::new(firebase_client()?, account.project_id.as_str());
    success!("Verifying tokens for project {}", account.project_id);

    let list_scope = match opt.list_scope {
        Some(scope) => scope,
        None => config::list_scope()?,
    };
    info!("Shared locations scope: {}", list_scope);

    Ok(AppState::new(
        Arc::new(LocationStore::seeded()),
        Arc::new(verifier),
        list_scope,
    ))
}

fn firebase_client() -> Result<FirebaseClient, IdentityError> {
    let api_key = config::firebase_api_key().ok_or(IdentityError::MissingApiKey)?;
    FirebaseClient::new(
        config::identity_api_url(),
        api_key,
        config::identity_timeout(),
    )
}

async fn issue_token(opt: TokenOptions) {
    if let Some(phone) = opt.phone.as_deref() {
        if let Err(e) = utils::validate_phone_number(phone) {
            error!("Invalid phone number: {}", e);
        }
    }

    let client = match firebase_client() {
        Ok(client) => client,
        Err(e) => error!("{}", e),
    };

    let result = match opt.custom_token.as_deref() {
        Some(custom_token) => client.exchange_custom_token(custom_token).await,
        None => mint_and_exchange(&client, &opt).await,
    };

    match result {
        Ok(id_token) => {
            success!("Obtained an ID token");
            println!("{id_token}");
        }
        Err(e) => error!("Token exchange failed: {}", e),
    }
}

async fn mint_and_exchange(
    client: &FirebaseClient,
    opt: &TokenOptions,
) -> Result<String, IdentityError> {
    let Some(uid) = opt.uid.as_deref().or(opt.phone.as_deref()) else {
        return Err(IdentityError::InvalidUid(
            "pass --uid or --phone".to_string(),
        ));
    };

    let credentials_path = opt
        .credentials
        .clone()
        .unwrap_or_else(config::credentials_path);
    info!("Signing custom token for {} with {}", uid, credentials_path.display());
    let account = ServiceAccount::load(&credentials_path).await?;

    identity::issue_id_token(client, &account, uid, opt.phone.as_deref()).await
}
