use price_server::{Config, Server, ServerState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (.env is optional)
    dotenv::dotenv().ok();

    // 2. Configuration, then logging (file logging only with LOG_DIR set)
    let config = Config::from_env();
    price_server::init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    tracing::info!("Price server starting...");

    // 3. State and HTTP server
    let state = ServerState::new(config.clone());
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
