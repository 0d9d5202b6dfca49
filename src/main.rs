use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tabled::Table;

use spotdash::{
    config::{self, Config},
    error, info,
    server::{self, AppState},
    session::MemorySessionStore,
    spotify::SpotifyClient,
    success, warning,
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
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the web dashboard
    Serve(ServeOptions),

    /// List the HTTP routes the dashboard serves
    Routes,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind, overrides SERVER_ADDRESS (e.g. 0.0.0.0:8000)
    #[clap(long)]
    pub address: Option<String>,

    /// Open the landing page in the default browser once listening
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => serve(opt).await,
        Command::Routes => println!("{}", Table::new(server::route_table_rows())),
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

async fn serve(opt: ServeOptions) {
    match config::load_env().await {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) => warning!("No .env file loaded ({}), using process environment", e),
    }

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration: {}", e),
    };
    if let Some(address) = opt.address {
        config.server_address = address;
    }
    if config.uses_default_secret() {
        warning!(
            "{} is not set; session cookies are signed with an insecure default. Set it in production.",
            config::SECRET_KEY_VAR
        );
    }

    let config = Arc::new(config);
    let spotify = match SpotifyClient::new(Arc::clone(&config)) {
        Ok(client) => Arc::new(client),
        Err(e) => error!("Failed to build HTTP client: {}", e),
    };
    let state = AppState::new(
        Arc::clone(&config),
        spotify,
        Arc::new(MemorySessionStore::default()),
    );

    if opt.open {
        let url = format!("http://{}/", config.server_address);
        if webbrowser::open(&url).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                url
            )
        }
    }

    success!("Spotify dashboard starting");
    if let Err(e) = server::start_api_server(state).await {
        error!("Server stopped: {}", e);
    }
}
