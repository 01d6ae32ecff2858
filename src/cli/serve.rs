//! Stdio tool server command

use kudos_core::{error::Result, pipeline_from_config, KudosConfig, McpServer, ToolHandler};
use tracing::{debug, info};

pub async fn handle(config: &KudosConfig) -> Result<()> {
    debug!("Starting tool server...");

    let pipeline = pipeline_from_config(config)?;
    let server = McpServer::new(ToolHandler::new(pipeline));

    tokio::select! {
        result = server.run() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal, stopping tool server...");
        }
    }

    Ok(())
}
