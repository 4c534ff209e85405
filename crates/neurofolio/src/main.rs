mod app;
mod hero;
mod logging;
mod panel;
mod send;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use neurofolio_config::Config;
use tracing::info;

/// A terminal portfolio with an animated neural network background.
#[derive(Debug, Parser)]
#[command(name = "neurofolio", version, about)]
struct Cli {
    /// Config file to read instead of the default location.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the animated portfolio page (default).
    Show,
    /// Run the contact relay HTTP server.
    Serve {
        /// Listen address, e.g. 0.0.0.0:3000.
        #[arg(long)]
        addr: Option<String>,
    },
    /// Submit a message to a running contact relay.
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
        /// Relay base URL. Defaults to the configured listen address.
        #[arg(long)]
        url: Option<String>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Show) {
        Command::Show => {
            // The terminal belongs to the UI, so logs go to a file.
            logging::init_file()?;
            let config = Config::load(cli.config.as_deref())?;
            info!(version = env!("CARGO_PKG_VERSION"), "starting portfolio view");

            let terminal = ratatui::init();
            let result = app::App::new(&config).run(terminal);
            ratatui::restore();
            result
        }
        Command::Serve { addr } => {
            logging::init_stderr();
            let mut config = Config::load(cli.config.as_deref())?;
            if let Some(addr) = addr {
                config.relay.addr = addr;
            }
            serve::run(&config.relay)
        }
        Command::Send {
            name,
            email,
            message,
            url,
        } => {
            logging::init_stderr();
            let config = Config::load(cli.config.as_deref())?;
            let url = url.unwrap_or_else(|| format!("http://{}", config.relay.addr));
            send::run(&url, name, email, message)
        }
    }
}
