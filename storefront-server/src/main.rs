use storefront_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    setup_environment();

    tracing::info!("Storefront server starting...");

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize server state (working directory, database, services)
    let state = ServerState::initialize(&config).await.map_err(|e| {
        tracing::error!("Initialization failed: {}", e);
        anyhow::anyhow!(e.to_string())
    })?;

    // 4. Run the HTTP server until shutdown
    let server = Server::new(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
