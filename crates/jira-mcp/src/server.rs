//! MCP server over newline-delimited JSON-RPC.

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::dispatcher::Dispatcher;
use crate::registry::tool_definitions;

/// Name reported during `initialize`.
pub const SERVER_NAME: &str = "jira-mcp";

const PROTOCOL_VERSION: &str = "2024-11-05";

// ============================================================
// JSON-RPC TYPES
// ============================================================

#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<serde_json::Value>,
    method: String,
    params: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcError {
    fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: -32602,
            message: message.into(),
        }
    }
}

// ============================================================
// SERVER LOOP
// ============================================================

/// Run the MCP server over stdio.
pub async fn run_stdio(dispatcher: Dispatcher) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    serve(&dispatcher, stdin, &mut stdout).await
}

/// Serve requests from `reader` until EOF, one response line per request.
///
/// Requests are handled strictly one at a time.
pub async fn serve<R, W>(dispatcher: &Dispatcher, reader: R, writer: &mut W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!(
        configured = dispatcher.config().is_complete(),
        "Jira MCP server started"
    );
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let request: JsonRpcRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                let response = JsonRpcResponse {
                    jsonrpc: "2.0".to_string(),
                    id: None,
                    result: None,
                    error: Some(JsonRpcError {
                        code: -32700,
                        message: format!("Parse error: {}", e),
                    }),
                };
                write_response(writer, &response).await?;
                continue;
            }
        };

        // JSON-RPC 2.0: notifications (no id) must not receive responses
        if request.id.is_none() {
            debug!(method = %request.method, "Notification received");
            continue;
        }

        let response = handle_request(dispatcher, request).await;
        write_response(writer, &response).await?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}

async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &JsonRpcResponse,
) -> anyhow::Result<()> {
    let json = serde_json::to_string(response)?;
    writer.write_all(format!("{}\n", json).as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

// ============================================================
// REQUEST ROUTING
// ============================================================

async fn handle_request(dispatcher: &Dispatcher, request: JsonRpcRequest) -> JsonRpcResponse {
    debug!(method = %request.method, "Request received");
    let result = match request.method.as_str() {
        "initialize" => handle_initialize(),
        "ping" => Ok(serde_json::json!({})),
        "tools/list" => handle_tools_list(),
        "tools/call" => handle_tool_call(dispatcher, request.params).await,
        _ => Err(JsonRpcError {
            code: -32601,
            message: format!("Method not found: {}", request.method),
        }),
    };

    match result {
        Ok(value) => JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id,
            result: Some(value),
            error: None,
        },
        Err(error) => JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id,
            result: None,
            error: Some(error),
        },
    }
}

fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    Ok(serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        },
        "capabilities": {
            "tools": {}
        }
    }))
}

fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    Ok(serde_json::json!({ "tools": tool_definitions() }))
}

async fn handle_tool_call(
    dispatcher: &Dispatcher,
    params: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    let params = params.ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;

    let name = params["name"]
        .as_str()
        .ok_or_else(|| JsonRpcError::invalid_params("Missing tool name"))?;

    let response = dispatcher.dispatch(name, params.get("arguments").cloned()).await;

    Ok(serde_json::json!({
        "content": [{
            "type": "text",
            "text": response.to_text()
        }],
        "isError": response.is_error()
    }))
}
