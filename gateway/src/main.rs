//! Gateway process entry point

use clap::Parser;
use shared::{logging, Workflow};
use tokio::signal;

use gateway::{Args, Gateway, GatewayConfig, GatewayResult};
use orchestrator::RealTransport;

#[tokio::main]
async fn main() -> GatewayResult<()> {
    // A missing .env file is fine
    dotenv::dotenv().ok();
    let args = Args::parse();

    logging::init_tracing_with_level(Some(&args.log_level));
    let flow = Workflow::Gateway;

    let config = match GatewayConfig::resolve(&args) {
        Ok(config) => config,
        Err(e) => {
            logging::log_error(&flow, "Loading configuration", &e);
            return Err(e);
        }
    };
    logging::log_startup(&flow, &format!("{} on {}:{}", config.title, config.host, config.port));

    let gateway = Gateway::new(RealTransport::new(), config.endpoints.clone(), &config.title);
    if config.startup_healthcheck {
        gateway.probe_dependencies().await;
    }

    let shutdown = async move {
        match signal::ctrl_c().await {
            Ok(()) => logging::log_shutdown(&flow, "Received Ctrl+C signal"),
            Err(err) => {
                logging::log_error(&flow, "Signal handling", &err);
                std::future::pending::<()>().await;
            }
        }
    };

    gateway.run(&config.host, config.port, shutdown).await?;

    logging::log_success(&flow, "Gateway stopped gracefully");
    Ok(())
}
