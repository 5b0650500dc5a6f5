use std::net::{IpAddr, SocketAddr};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sql_agent::router::ActionRouter;
use sql_agent::{routes, state};
use sql_agent_configuration::environment::ProcessEnvironment;
use sql_agent_configuration::{make_runtime_configuration, ParsedConfiguration};

/// Serve the SQL agent action group over HTTP.
///
/// Database and model settings are read from the environment.
#[derive(Parser)]
struct ServerOptions {
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
pub async fn main() -> ExitCode {
    let options = ServerOptions::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match serve(options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(options: ServerOptions) -> anyhow::Result<()> {
    let configuration =
        make_runtime_configuration(ParsedConfiguration::initial(), ProcessEnvironment)?;
    tracing::info!(configuration = ?configuration, "configuration resolved");

    // no schema, no listener
    let state = state::create_state(&configuration, prometheus::Registry::new()).await?;
    let router = routes::create_router(ActionRouter::new(state));

    let address = SocketAddr::new(options.host, options.port);
    tracing::info!(%address, "starting server");
    axum::Server::bind(&address)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}
