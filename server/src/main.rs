use loja_server::{Config, Server, ServerState};

#[tokio::main]
async fn main() {
    loja_server::setup_environment();

    let config = Config::from_env();
    tracing::info!(
        port = config.http_port,
        database = %config.database_path,
        environment = %config.environment,
        "Starting loja server"
    );

    let state = ServerState::initialize(&config).await;

    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!(error = %e, "Server exited with error");
        std::process::exit(1);
    }
}
