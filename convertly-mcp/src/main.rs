//! Convertly MCP Server
//!
//! Line-delimited JSON-RPC 2.0 over stdio. Logs go to stderr.
//!
//! Tools:
//! - convert: Convert a value between two units
//! - list_categories: List converters and their defaults
//! - list_units: List units of a category
//! - get_rates: Current currency or crypto rate table
//! - swap: Exchange source and target units
//! - process_document: Summarize or reformat text

mod config;
mod tools;

use std::sync::Arc;
use convertly::Convertly;
use convertly_docs::GeminiService;
use convertly_rates::MockRateProvider;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use config::{ServerConfig, DEFAULT_LOG_FILTER};

const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "convertly";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

// MCP Protocol types
#[derive(Debug, Deserialize)]
struct McpRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
struct McpResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, Serialize)]
struct McpError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl McpError {
    fn invalid_params(message: impl Into<String>) -> Self {
        McpError { code: -32602, message: message.into(), data: None }
    }
}

impl McpResponse {
    fn parse_error(err: &serde_json::Error) -> Self {
        McpResponse {
            jsonrpc: "2.0".to_string(),
            id: None,
            result: None,
            error: Some(McpError {
                code: -32700,
                message: format!("Parse error: {}", err),
                data: None,
            }),
        }
    }
}

fn create_engine(config: &ServerConfig) -> Convertly {
    let rates = MockRateProvider::new().with_delay(config.rate_delay);
    let engine = Convertly::new(Arc::new(rates));

    match config.gemini().map(GeminiService::new) {
        Some(Ok(service)) => {
            info!(model = service.model(), "document processing enabled");
            engine.with_text_service(Arc::new(service))
        }
        Some(Err(e)) => {
            warn!(error = %e, "document processing disabled");
            engine
        }
        None => {
            info!("GEMINI_API_KEY not set, document processing disabled");
            engine
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ServerConfig::from_env();
    let engine = create_engine(&config);

    info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "Convertly MCP Server started");

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("client disconnected (EOF)");
                break;
            }
            Err(e) => {
                error!(error = %e, "error reading input");
                break;
            }
        };

        let Some(response) = process_line(&engine, &line).await else {
            continue;
        };

        let response_json = match serde_json::to_string(&response) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "error encoding response");
                continue;
            }
        };

        if let Err(e) = write_frame(&mut stdout, &response_json).await {
            error!(error = %e, "error writing response");
            break;
        }
    }

    info!("server shutting down");
}

async fn write_frame(stdout: &mut io::Stdout, frame: &str) -> std::io::Result<()> {
    stdout.write_all(frame.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}

/// Handle one input line. `None` means nothing is written back: blank lines
/// and notifications.
async fn process_line(engine: &Convertly, line: &str) -> Option<McpResponse> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let request: McpRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "error parsing request");
            return Some(McpResponse::parse_error(&e));
        }
    };

    debug!(method = %request.method, "processing");
    let response = handle_request(engine, &request).await;

    // Notifications (no id) should NOT receive a response
    if request.id.is_none() {
        debug!(method = %request.method, "notification processed");
        return None;
    }
    Some(response)
}

async fn handle_request(engine: &Convertly, request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(engine, &request.params),
        "initialized" | "notifications/initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => Ok(tools::tool_list()),
        "tools/call" => handle_tool_call(engine, &request.params).await,

        _ => Err(McpError {
            code: -32601,
            message: format!("Method not found: {}", request.method),
            data: None,
        }),
    };

    match result {
        Ok(r) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: Some(r),
            error: None,
        },
        Err(e) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: None,
            error: Some(e),
        },
    }
}

fn handle_initialize(engine: &Convertly, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    let documents = if engine.has_text_service() {
        "Document processing is available through process_document."
    } else {
        "Document processing is disabled on this server."
    };

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Unit, currency and cryptocurrency converter"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": format!(
            "Convertly converts values between units of length, weight, volume, temperature, speed, area, data storage, currency and crypto. Use list_categories and list_units to discover unit ids, then convert. {}",
            documents
        )
    }))
}

async fn handle_tool_call(engine: &Convertly, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref().ok_or(McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or(McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    match tools::call(engine, name, &args).await {
        Some(Ok(result)) => Ok(result),
        Some(Err(e)) => {
            debug!(tool = name, code = %e.code, "tool error");
            Ok(tools::tool_error(&e))
        }
        None => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use convertly_core::codes;

    async fn call(engine: &Convertly, line: JsonValue) -> JsonValue {
        let response = process_line(engine, &line.to_string()).await.unwrap();
        serde_json::to_value(&response).unwrap()
    }

    async fn tool(engine: &Convertly, name: &str, arguments: JsonValue) -> JsonValue {
        let response = call(
            engine,
            json!({
                "jsonrpc": "2.0", "id": 1, "method": "tools/call",
                "params": { "name": name, "arguments": arguments }
            }),
        )
        .await;
        response["result"].clone()
    }

    #[tokio::test]
    async fn test_initialize() {
        let engine = Convertly::default();
        let response = call(
            &engine,
            json!({
                "jsonrpc": "2.0", "id": 1, "method": "initialize",
                "params": { "protocolVersion": "2025-06-18", "clientInfo": { "name": "test" } }
            }),
        )
        .await;
        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], "2025-06-18");
        assert_eq!(response["result"]["serverInfo"]["name"], "convertly");
    }

    #[tokio::test]
    async fn test_parse_error() {
        let engine = Convertly::default();
        let response = process_line(&engine, "{not json").await.unwrap();
        assert_eq!(response.error.unwrap().code, -32700);
    }

    #[tokio::test]
    async fn test_blank_line_and_notification_get_no_response() {
        let engine = Convertly::default();
        assert!(process_line(&engine, "   ").await.is_none());
        let note = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" });
        assert!(process_line(&engine, &note.to_string()).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let engine = Convertly::default();
        let response = call(&engine, json!({ "jsonrpc": "2.0", "id": 7, "method": "resources/list" })).await;
        assert_eq!(response["error"]["code"], -32601);
        assert_eq!(response["id"], 7);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_invalid_params() {
        let engine = Convertly::default();
        let response = call(
            &engine,
            json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/call", "params": { "name": "eval" } }),
        )
        .await;
        assert_eq!(response["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn test_tools_list_names() {
        let engine = Convertly::default();
        let response = call(&engine, json!({ "jsonrpc": "2.0", "id": 3, "method": "tools/list" })).await;
        let names: Vec<&str> = response["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            ["convert", "list_categories", "list_units", "get_rates", "swap", "process_document"]
        );
    }

    #[tokio::test]
    async fn test_convert_tool() {
        let engine = Convertly::default();
        let result = tool(
            &engine,
            "convert",
            json!({ "value": "100", "from": "celsius", "to": "fahrenheit", "category": "temperature" }),
        )
        .await;
        assert_eq!(result["value"], 212.0);
        assert_eq!(result["display"]["text"], "212");
        assert_eq!(result["content"][0]["text"], "100 °C = 212 °F");
    }

    #[tokio::test]
    async fn test_convert_tool_crypto() {
        let engine = Convertly::default();
        let result = tool(
            &engine,
            "convert",
            json!({ "value": 2, "from": "BTC", "to": "USD", "category": "crypto" }),
        )
        .await;
        assert_eq!(result["value"], 136000.0);
    }

    #[tokio::test]
    async fn test_convert_tool_errors_are_results() {
        let engine = Convertly::default();
        let result = tool(
            &engine,
            "convert",
            json!({ "value": 1, "from": "meter", "to": "cubit", "category": "length" }),
        )
        .await;
        assert_eq!(result["isError"], true);
        assert_eq!(result["error"]["code"], codes::UNKNOWN_UNIT);

        let result = tool(&engine, "convert", json!({ "from": "meter", "to": "foot", "category": "length" })).await;
        assert_eq!(result["error"]["code"], codes::ARG_MISSING);

        let result = tool(
            &engine,
            "convert",
            json!({ "value": "abc", "from": "meter", "to": "foot", "category": "length" }),
        )
        .await;
        assert_eq!(result["error"]["code"], codes::ARG_TYPE);

        let result = tool(
            &engine,
            "convert",
            json!({ "value": 1, "from": "a", "to": "b", "category": "colors" }),
        )
        .await;
        assert_eq!(result["error"]["code"], codes::UNKNOWN_CATEGORY);
    }

    #[tokio::test]
    async fn test_list_categories_order() {
        let engine = Convertly::default();
        let result = tool(&engine, "list_categories", json!({})).await;
        let ids: Vec<&str> = result["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids.first(), Some(&"currency"));
        assert_eq!(ids.len(), 10);
        assert_eq!(result["document_processing_enabled"], false);
    }

    #[tokio::test]
    async fn test_list_units() {
        let engine = Convertly::default();
        let result = tool(&engine, "list_units", json!({ "category": "temperature" })).await;
        assert_eq!(result["units"].as_array().unwrap().len(), 5);

        let result = tool(&engine, "list_units", json!({ "category": "document_processing" })).await;
        assert_eq!(result["actions"][0]["id"], "to-markdown");
        assert_eq!(result["source_types"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_rates() {
        let engine = Convertly::default();
        let result = tool(&engine, "get_rates", json!({ "category": "currency" })).await;
        assert_eq!(result["data"]["base"], "USD");
        assert_eq!(result["data"]["rates"]["USD"], 1.0);

        let result = tool(&engine, "get_rates", json!({ "category": "length" })).await;
        assert_eq!(result["isError"], true);
    }

    #[tokio::test]
    async fn test_swap_tool() {
        let engine = Convertly::default();
        let result = tool(
            &engine,
            "swap",
            json!({ "category": "length", "from": "meter", "to": "foot", "output": "3.28" }),
        )
        .await;
        assert_eq!(result["data"]["from"], "foot");
        assert_eq!(result["data"]["input"], "3.28");

        let result = tool(
            &engine,
            "swap",
            json!({ "category": "document_processing", "from": "txt", "to": "summarize" }),
        )
        .await;
        assert_eq!(result["error"]["code"], codes::NOT_APPLICABLE);
    }

    #[tokio::test]
    async fn test_process_document_disabled() {
        let engine = Convertly::default();
        let result = tool(&engine, "process_document", json!({ "text": "hello" })).await;
        assert_eq!(result["error"]["code"], codes::NOT_CONFIGURED);

        let result = tool(
            &engine,
            "process_document",
            json!({ "text": "hello", "file_name": "report.pdf", "mime_type": "application/pdf" }),
        )
        .await;
        assert_eq!(result["error"]["code"], codes::DOCUMENT_ERROR);

        let result = tool(&engine, "process_document", json!({ "text": "hello", "action": "translate" })).await;
        assert_eq!(result["error"]["code"], codes::DOCUMENT_ERROR);
    }

    #[test]
    fn test_engine_without_key() {
        let engine = create_engine(&ServerConfig::default());
        assert!(!engine.has_text_service());
    }
}
