//! HTTP API server command

use kudos_core::{
    api::{ApiServer, ApiServerConfig},
    error::Result,
    pipeline_from_config, KudosConfig,
};
use std::net::SocketAddr;
use tracing::debug;

pub async fn handle(config: &KudosConfig, addr: Option<String>) -> Result<()> {
    debug!("Starting HTTP API server...");

    let addr = addr.unwrap_or_else(|| config.api.addr.clone());
    let socket_addr: SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address '{}': {}", addr, e))?;

    let pipeline = pipeline_from_config(config)?;

    println!();
    println!("Kudos API Server");
    println!();
    println!("   Address: http://{}", socket_addr);
    println!("   Payouts: {}", pipeline.recorder().name());
    println!();
    println!("   Endpoints:");
    println!("   - POST /api/feedback  - Score, price and record a review");
    println!("   - POST /api/score     - Helpfulness breakdown");
    println!("   - POST /api/incentive - Incentive for a score");
    println!("   - GET  /health        - Health check");
    println!();

    ApiServer::new(ApiServerConfig { addr: socket_addr }, pipeline)
        .serve()
        .await?;

    Ok(())
}
