use anyhow::Context;
use clap::{Parser, Subcommand};

use bookshelf_kernel::settings::Settings;

/// Bookshelf service command line
#[derive(Debug, Parser)]
#[command(name = "bookshelf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Override `server.host`
        #[arg(long)]
        host: Option<String>,
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the merged OpenAPI document and exit
    Openapi {
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port } => serve(host, port),
        Command::Openapi { pretty } => print_openapi(pretty),
    }
}

fn serve(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let mut settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;
    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(port) = port {
        settings.server.port = port;
    }

    bookshelf_telemetry::init(&settings.telemetry)?;
    tracing::info!(
        env = ?settings.environment,
        address = %settings.server.bind_address(),
        "bookshelf CLI serving"
    );

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(bookshelf_app::serve(&settings))
}

fn print_openapi(pretty: bool) -> anyhow::Result<()> {
    let registry = bookshelf_app::build_registry();
    let document = bookshelf_http::openapi::openapi_document(&registry);

    let rendered = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    println!("{rendered}");
    Ok(())
}
