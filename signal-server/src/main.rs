use signal_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. .env first so Config sees its values
    dotenv::dotenv().ok();

    // 2. Configuration and logging
    let config = Config::from_env();
    setup_environment(&config);

    print_banner();
    tracing::info!(environment = %config.environment, "Table Signal server starting...");

    // 3. Storage and services
    let state = ServerState::initialize(&config)?;

    // 4. HTTP server (starts the background sweep)
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
