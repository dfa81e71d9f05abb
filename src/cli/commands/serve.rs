//! Run the HTTP server

use assetcheck::api::AppState;
use assetcheck::config::AppConfig;
use assetcheck::server::tiny_http as http_server;

/// Start the server with CLI overrides applied on top of the config
pub fn serve(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let state = AppState::from_config(&config)?;

    println!("Starting assetcheck server...");
    println!("Listening on http://{}:{}", config.server.host, config.server.port);
    println!();
    println!("Press Ctrl+C to stop");

    http_server::serve(state, &config.server)
}
