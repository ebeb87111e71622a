mod api;
mod commands;
mod config;
mod nav;
mod session;

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use api::{ApiClient, ApiError, ApiMode, EnvelopeMode};
use config::{Config, StorageKind};
use nav::HtmlPage;
use session::{FileStorage, LocalStorage, MemoryStorage, Session};

#[derive(Parser, Debug)]
#[command(name = "ticketbox", version, about = "Event ticketing storefront client")]
struct Args {
    /// Answer every request from canned mock data instead of the network
    #[arg(long)]
    mock: bool,

    /// Return live responses as-is instead of unwrapping a proxy `body` envelope
    #[arg(long)]
    plain: bool,

    /// Backend base URL (overrides TICKETBOX_API_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Where the session token and user id are kept
    #[arg(long, value_enum)]
    storage: Option<StorageKind>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all events
    Events,
    /// Show one event
    Event { id: String },
    /// List the logged-in user's orders
    Orders,
    /// Show one order
    Order { id: String },
    /// Log in and store the session
    Login { user_id: String, password: String },
    /// Create an account and store the session
    Register { user_id: String, password: String },
    /// Buy tickets for an event
    Purchase {
        event_id: String,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Print the navigation bar for the current session
    Nav,
    /// Clear the stored session
    Logout,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] session::StorageError),

    #[error("Failed to format output: {0}")]
    Output(#[from] serde_json::Error),

    #[error(transparent)]
    Nav(#[from] nav::NavError),

    #[cfg(not(all(feature = "keychain", any(target_os = "macos", target_os = "windows"))))]
    #[error("{0}")]
    Unsupported(String),
}

fn build_config(args: &Args) -> Config {
    let mut config = Config::from_env();
    if args.mock {
        config.api.mode = ApiMode::Mock;
    }
    if args.plain {
        config.api.envelope = EnvelopeMode::Plain;
    }
    if let Some(ref url) = args.base_url {
        config.api.base_url = url.clone();
    }
    if let Some(kind) = args.storage {
        config.storage = kind;
    }
    config
}

fn open_storage(kind: StorageKind) -> Result<Box<dyn LocalStorage>, CliError> {
    match kind {
        StorageKind::File => {
            let storage = FileStorage::default_location();
            log::debug!("Session file: {}", storage.path().display());
            Ok(Box::new(storage))
        }
        StorageKind::Memory => Ok(Box::new(MemoryStorage::default())),
        #[cfg(all(feature = "keychain", any(target_os = "macos", target_os = "windows")))]
        StorageKind::Keychain => Ok(Box::new(session::KeychainStorage)),
        #[cfg(not(all(feature = "keychain", any(target_os = "macos", target_os = "windows"))))]
        StorageKind::Keychain => Err(CliError::Unsupported(
            "keychain storage needs the `keychain` feature on macOS or Windows".to_string(),
        )),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(args: Args) -> Result<(), CliError> {
    let config = build_config(&args);
    let session = Arc::new(Session::new(open_storage(config.storage)?));
    let api = ApiClient::new(&config.api, Arc::clone(&session));

    if api.mode() == ApiMode::Mock {
        log::info!("Mock mode: no requests will leave this process");
    } else {
        log::debug!("Live mode against {}", config.api.base_url);
    }

    match args.command {
        Command::Events => print_json(&commands::list_events(&api).await?),
        Command::Event { id } => print_json(&commands::event_detail(&api, &id).await?),
        Command::Orders => print_json(&commands::my_orders(&api).await?),
        Command::Order { id } => print_json(&commands::order_detail(&api, &id).await?),
        Command::Login { user_id, password } => {
            print_json(&commands::login(&api, &user_id, &password).await?)
        }
        Command::Register { user_id, password } => {
            print_json(&commands::register(&api, &user_id, &password).await?)
        }
        Command::Purchase { event_id, quantity } => {
            print_json(&commands::purchase(&api, &event_id, quantity).await?)
        }
        Command::Nav => {
            let mut page = HtmlPage::with_nav();
            nav::render_nav(&session, &mut page)?;
            println!("{}", page.inner_html(nav::NAV_ELEMENT_ID).unwrap_or_default());
            Ok(())
        }
        Command::Logout => {
            let mut page = HtmlPage::with_nav();
            nav::logout(&session, &mut page)?;
            if let Some(location) = page.location() {
                println!("Redirect: {}", location);
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    env_logger::init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
