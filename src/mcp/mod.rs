//! Agent-facing tool server
//!
//! JSON-RPC 2.0 over stdio exposing the scoring, incentive and payout stages
//! as individually callable tools.

pub mod protocol;
pub mod server;
pub mod tools;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use server::McpServer;
pub use tools::{Tool, ToolHandler};
