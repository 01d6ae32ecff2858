//! Integration tests for the stdio tool server

mod common;

use common::{file_pipeline, REFERENCE_REVIEW};
use kudos_core::mcp::protocol::codes;
use kudos_core::{McpServer, ToolHandler};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

fn create_test_server() -> (McpServer, std::path::PathBuf, tempfile::TempDir) {
    let (pipeline, path, dir) = file_pipeline();
    (McpServer::new(ToolHandler::new(pipeline)), path, dir)
}

async fn call(server: &McpServer, id: u64, tool: &str, arguments: Value) -> Value {
    let request = json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": tool, "arguments": arguments}
    });
    let response = server
        .handle_line(&request.to_string())
        .await
        .expect("request with id must be answered");
    serde_json::to_value(response).unwrap()
}

fn text_of(response: &Value) -> &str {
    response["result"]["content"][0]["text"]
        .as_str()
        .expect("tool result should be text")
}

#[tokio::test]
async fn test_tools_list() {
    let (server, _path, _dir) = create_test_server();

    let response = server
        .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#)
        .await
        .unwrap();
    let response = serde_json::to_value(response).unwrap();

    let tools = response["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 5);
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
}

#[tokio::test]
async fn test_agent_flow_score_incentive_save() {
    let (server, path, _dir) = create_test_server();

    let scored = call(
        &server,
        1,
        "check_review_helpfulness",
        json!({"reviewText": REFERENCE_REVIEW}),
    )
    .await;
    let text = text_of(&scored);
    assert!(text.contains("Review Helpfulness Score: 76.25"));
    assert!(text.contains("- Descriptiveness: 12.50"));
    assert!(text.contains("- Length Adequacy: 50.00"));

    let priced = call(&server, 2, "calculate_incentive", json!({"score": 76.25})).await;
    assert_eq!(text_of(&priced), "0.00007625");

    let saved = call(
        &server,
        3,
        "save_payout_data",
        json!({"incentive": "0.00007625", "recipientAddress": "0xabc", "serviceId": "42"}),
    )
    .await;
    assert!(text_of(&saved).starts_with("Payout successfully saved to"));

    let records: Vec<Value> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(records[0]["incentive"], "0.00007625");
    assert_eq!(records[0]["recipientAddress"], "0xabc");
}

#[tokio::test]
async fn test_invalid_score_is_invalid_params() {
    let (server, _path, _dir) = create_test_server();

    for score in [json!(0), json!(100.5), json!("fifty")] {
        let response = call(&server, 9, "calculate_incentive", json!({ "score": score })).await;
        assert_eq!(response["error"]["code"], codes::INVALID_PARAMS);
        assert!(response.get("result").is_none());
    }
}

#[tokio::test]
async fn test_process_review_tool() {
    let (server, path, _dir) = create_test_server();

    let response = call(
        &server,
        4,
        "process_review",
        json!({"reviewText": REFERENCE_REVIEW, "recipientAddress": "0xabc", "serviceId": "42"}),
    )
    .await;

    let text = text_of(&response);
    assert!(text.contains("Incentive: 0.00007625"));
    assert!(path.exists());
}

#[tokio::test]
async fn test_persistence_failure_is_tool_error() {
    let (server, path, _dir) = create_test_server();
    std::fs::write(&path, "not a json array").unwrap();

    let response = call(
        &server,
        5,
        "save_payout_data",
        json!({"incentive": "0.00005", "recipientAddress": "0xabc", "serviceId": "1"}),
    )
    .await;

    assert_eq!(response["error"]["code"], codes::TOOL_FAILED);
    let message = response["error"]["message"].as_str().unwrap();
    assert!(message.starts_with("Tool execution failed: Persistence failure"));
}

#[tokio::test]
async fn test_protocol_errors() {
    let (server, _path, _dir) = create_test_server();

    let parse = serde_json::to_value(server.handle_line("{oops").await.unwrap()).unwrap();
    assert_eq!(parse["error"]["code"], codes::PARSE_ERROR);

    let unknown = serde_json::to_value(
        server
            .handle_line(r#"{"jsonrpc":"2.0","id":2,"method":"resources/list"}"#)
            .await
            .unwrap(),
    )
    .unwrap();
    assert_eq!(unknown["error"]["code"], codes::METHOD_NOT_FOUND);

    let notification = server
        .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
        .await;
    assert!(notification.is_none());
}

#[tokio::test]
async fn test_serve_over_duplex_stream() {
    let (server, _path, _dir) = create_test_server();
    let (client, server_side) = tokio::io::duplex(64 * 1024);
    let (server_read, server_write) = tokio::io::split(server_side);

    let serving = tokio::spawn(async move {
        server
            .serve(BufReader::new(server_read), server_write)
            .await
    });

    let (client_read, mut client_write) = tokio::io::split(client);
    client_write
        .write_all(
            b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"initialize\",\"params\":{}}\n\
              {\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n\
              {\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n",
        )
        .await
        .unwrap();
    client_write.shutdown().await.unwrap();

    let mut lines = BufReader::new(client_read).lines();
    let first: Value = serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();
    let second: Value = serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();

    assert_eq!(first["id"], 1);
    assert_eq!(first["result"]["serverInfo"]["name"], "kudos");
    assert_eq!(second["id"], 2);

    serving.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_invalid_utf8_line_gets_parse_error_and_serving_continues() {
    let (server, _path, _dir) = create_test_server();
    let (client, server_side) = tokio::io::duplex(64 * 1024);
    let (server_read, server_write) = tokio::io::split(server_side);

    let serving = tokio::spawn(async move {
        server
            .serve(BufReader::new(server_read), server_write)
            .await
    });

    let (client_read, mut client_write) = tokio::io::split(client);
    client_write.write_all(b"{\"jsonrpc\":\"2.0\",\"id\":1,\xff\xfe}\n").await.unwrap();
    client_write
        .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n")
        .await
        .unwrap();
    client_write.shutdown().await.unwrap();

    let mut lines = BufReader::new(client_read).lines();
    let first: Value = serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();
    let second: Value = serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();

    assert_eq!(first["error"]["code"], codes::PARSE_ERROR);
    assert_eq!(first["id"], Value::Null);
    assert_eq!(second["id"], 2);
    assert_eq!(second["result"], json!({}));

    serving.await.unwrap().unwrap();
}
