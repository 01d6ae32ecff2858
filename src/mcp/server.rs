//! Tool server over stdio
//!
//! Reads JSON-RPC requests line by line and answers `initialize`,
//! `tools/list` and `tools/call`. Logging goes to stderr; stdout carries
//! protocol traffic only.

use super::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
use super::tools::ToolHandler;
use crate::error::{KudosError, Result};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Serves the Kudos tools to an agent
pub struct McpServer {
    tool_handler: ToolHandler,
}

impl McpServer {
    pub fn new(tool_handler: ToolHandler) -> Self {
        Self { tool_handler }
    }

    /// Serve stdin/stdout until EOF
    pub async fn run(&self) -> Result<()> {
        info!("Tool server started, listening on stdin...");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await?;
        info!("Tool server shutting down");
        Ok(())
    }

    /// Serve any line-oriented reader/writer pair until EOF
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                debug!("Received EOF");
                return Ok(());
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    debug!("Received request: {}", trimmed);
                    self.handle_line(trimmed).await
                }
                Err(e) => {
                    warn!("Dropping request line that is not UTF-8: {}", e);
                    Some(JsonRpcResponse::error(
                        None,
                        JsonRpcError::parse_error(format!("Invalid UTF-8: {}", e)),
                    ))
                }
            };
            let Some(response) = response else {
                continue;
            };

            let response_json = serde_json::to_string(&response)?;
            debug!("Sending response: {}", response_json);

            writer.write_all(response_json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    /// Handle one request line; `None` for notifications
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    None,
                    JsonRpcError::parse_error(format!("Invalid JSON: {}", e)),
                ));
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                request.id,
                JsonRpcError::invalid_request("jsonrpc must be '2.0'"),
            ));
        }

        if request.is_notification() {
            debug!("Notification: {}", request.method);
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request).await,
            "ping" => JsonRpcResponse::success(request.id, serde_json::json!({})),
            _ => JsonRpcResponse::error(request.id, JsonRpcError::method_not_found(&request.method)),
        };
        Some(response)
    }

    fn handle_initialize(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(
            request.id,
            serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "serverInfo": {
                    "name": "kudos",
                    "version": env!("CARGO_PKG_VERSION")
                },
                "capabilities": {
                    "tools": {}
                }
            }),
        )
    }

    fn handle_tools_list(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(
            request.id,
            serde_json::json!({ "tools": self.tool_handler.list_tools() }),
        )
    }

    async fn handle_tools_call(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let Some(params) = request.params.as_object() else {
            return JsonRpcResponse::error(
                request.id,
                JsonRpcError::invalid_params("params must be an object"),
            );
        };

        let Some(tool_name) = params.get("name").and_then(Value::as_str) else {
            return JsonRpcResponse::error(
                request.id,
                JsonRpcError::invalid_params("missing 'name' field"),
            );
        };

        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

        match self.tool_handler.execute(tool_name, arguments).await {
            Ok(result) => {
                // Tools answer in prose; structured values are pretty-printed
                let text = match result {
                    Value::String(text) => text,
                    other => match serde_json::to_string_pretty(&other) {
                        Ok(text) => text,
                        Err(e) => {
                            error!("Tool {} returned an unprintable result: {}", tool_name, e);
                            return JsonRpcResponse::error(
                                request.id,
                                JsonRpcError::internal_error(e.to_string()),
                            );
                        }
                    },
                };
                JsonRpcResponse::success(
                    request.id,
                    serde_json::json!({
                        "content": [{ "type": "text", "text": text }]
                    }),
                )
            }
            Err(e) => {
                let rpc_error = match &e {
                    KudosError::McpProtocol(msg) => JsonRpcError::invalid_params(msg.clone()),
                    e if e.is_client_error() => JsonRpcError::invalid_params(e.to_string()),
                    _ => {
                        error!("Tool {} failed: {}", tool_name, e);
                        JsonRpcError::tool_failed(e.to_string())
                    }
                };
                JsonRpcResponse::error(request.id, rpc_error)
            }
        }
    }
}
