use crm_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading any configuration
    dotenv::dotenv().ok();

    let config = Config::from_env();

    init_logger_with_file(
        Some(&config.log_level),
        config.log_dir.as_deref(),
    );

    print_banner();
    tracing::info!("CoachDesk CRM server starting...");

    let state = ServerState::initialize(&config);

    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
