mod cli;
mod collector;
mod error;
mod index;
mod server;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use unifi_sdn_core::Controller;

use crate::cli::Cli;
use crate::error::ExporterError;
use crate::server::AppState;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(err) = run(&cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: &Cli) -> Result<(), ExporterError> {
    let configs = unifi_sdn_config::load_controllers(&cli.config)?;
    if configs.is_empty() {
        return Err(ExporterError::NoControllers);
    }

    let controllers = configs
        .into_iter()
        .map(|cfg| {
            let target = cfg.target_name().to_owned();
            Controller::new(cfg).map_err(|source| ExporterError::Controller { target, source })
        })
        .collect::<Result<Vec<_>, _>>()?;
    for controller in &controllers {
        info!(target = controller.target_name(), url = %controller.config().url, "controller configured");
    }

    let addr = cli.listen_address;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ExporterError::Bind { addr, source })?;
    info!("Starting exporter on http://{addr}/");

    server::serve(listener, AppState::new(controllers))
        .await
        .map_err(ExporterError::Serve)
}
