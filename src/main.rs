//! muxgate binary: startup orchestration.
//!
//! Startup order matters: logging first so everything after it is
//! observable, then signal suppression and the fd-limit raise before any
//! socket exists, then config validation, then the listener. A bind
//! failure is the only steady-state-adjacent error that terminates the
//! process.

use clap::Parser;
use tokio::net::TcpListener;

use muxgate::config::validation::validate_config;
use muxgate::config::ProxyConfig;
use muxgate::error::ProxyError;
use muxgate::http::HttpServer;
use muxgate::{lifecycle, observability};

#[derive(Parser, Debug)]
#[command(name = "muxgate")]
#[command(about = "Local HTTP/1.1 to HTTP/2 connection-condensing forwarding proxy", long_about = None)]
struct Cli {
    /// Port to listen on for local client connections.
    #[arg(long, default_value_t = 19080)]
    listen_port: u16,

    /// Upstream host to forward all requests to.
    #[arg(long, default_value = "upstream.example.com")]
    server_host: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    observability::logging::init();

    let cli = Cli::parse();

    lifecycle::signals::suppress_interrupt();
    lifecycle::rlimit::raise_fd_limit();

    let mut config = ProxyConfig::default();
    config.listener.listen_port = cli.listen_port;
    config.upstream.server_host = cli.server_host;

    if let Err(errors) = validate_config(&config) {
        let joined = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        tracing::error!(errors = %joined, "configuration rejected");
        return Err(ProxyError::Config(joined).into());
    }

    tracing::info!(
        listen_port = config.listener.listen_port,
        upstream = %config.upstream.server_host,
        max_in_flight = config.upstream.max_in_flight,
        "muxgate v0.1.0 starting"
    );

    let bind_address = config.listener.bind_address();
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(address = %bind_address, error = %err, "failed to bind listener");
            return Err(ProxyError::Bind(err).into());
        }
    };

    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    Ok(())
}
