//! Health-check endpoint for the Solify deployment.

use log::info;
use solify::{clients::config, health};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    config::load_dotenv();

    let addr = config::http_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Health check listening on {addr}");
    axum::serve(listener, health::build_router()).await?;
    Ok(())
}
