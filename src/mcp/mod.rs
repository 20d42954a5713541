//! Line-oriented MCP front end
//!
//! Each input line is one JSON-RPC request and produces at most one
//! response line. Tool calls are forwarded to a [`MemoryScanner`].

pub mod protocol;
pub mod tools;

pub use protocol::{JsonRpcRequest, JsonRpcResponse, RpcError, PROTOCOL_VERSION, SERVER_NAME};
pub use tools::{tool_definitions, ToolCall};

use crate::config::DEFAULT_MAX_COUNT;
use crate::memory::MemoryScanner;
use crate::process::{NativeBackend, ProcessBackend};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Request dispatcher over a shared scanner
pub struct McpServer<B: ProcessBackend = NativeBackend> {
    scanner: Arc<MemoryScanner<B>>,
    default_max_count: usize,
}

impl<B: ProcessBackend> McpServer<B> {
    pub fn new(scanner: Arc<MemoryScanner<B>>) -> Self {
        McpServer {
            scanner,
            default_max_count: DEFAULT_MAX_COUNT,
        }
    }

    /// Count used by `get_addresses` when the call gives none
    pub fn with_default_max_count(mut self, default_max_count: usize) -> Self {
        self.default_max_count = default_max_count;
        self
    }

    pub fn scanner(&self) -> &Arc<MemoryScanner<B>> {
        &self.scanner
    }

    /// Handle one input line, returning the serialized response.
    ///
    /// Blank lines and notifications produce no response.
    pub fn handle_line(&self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let response = match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) if request.is_notification() => {
                debug!("Notification {:?} ignored", request.method);
                return None;
            }
            Ok(request) => self.handle_request(request),
            Err(e) => {
                warn!("Unparseable request line: {}", e);
                JsonRpcResponse::parse_failure(e)
            }
        };

        match serde_json::to_string(&response) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Failed to serialize response: {}", e);
                None
            }
        }
    }

    /// Dispatch a decoded request
    pub fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();
        match self.dispatch(&request) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => {
                debug!("Request {:?} failed: {}", request.method, error);
                JsonRpcResponse::failure(id, error)
            }
        }
    }

    fn dispatch(&self, request: &JsonRpcRequest) -> Result<Value, RpcError> {
        let method = request.method.as_deref().ok_or_else(RpcError::invalid_request)?;

        match method {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {"tools": {"listChanged": false}},
                "serverInfo": {"name": SERVER_NAME, "version": crate::VERSION}
            })),
            "tools/list" => Ok(tool_definitions()),
            "tools/call" => {
                let call = ToolCall::from_params(request.params.as_ref())?;
                Ok(self.call_tool(call))
            }
            other => Err(RpcError::unknown_method(other)),
        }
    }

    fn call_tool(&self, call: ToolCall) -> Value {
        match call {
            ToolCall::Scan(args) => {
                let outcome = self
                    .scanner
                    .scan_memory(&args.process_name, &args.value, args.value_type);
                let text = if outcome.success {
                    format!("Scan completed. Found {} addresses.", outcome.count)
                } else {
                    outcome.message
                };
                tools::text_result(text, !outcome.success)
            }
            ToolCall::Addresses(args) => {
                let max_count = args.max_count.unwrap_or(self.default_max_count);
                let listing = self.scanner.get_addresses(max_count);
                let text = if listing.success {
                    listing
                        .addresses
                        .iter()
                        .fold(String::from("Found addresses:\n"), |mut text, address| {
                            text.push_str(address);
                            text.push('\n');
                            text
                        })
                } else {
                    listing.message
                };
                tools::text_result(text, !listing.success)
            }
            ToolCall::Filter(args) => {
                let outcome = self
                    .scanner
                    .filter_addresses(&args.addresses, &args.new_value, args.value_type);
                let text = if outcome.success {
                    format!("Filtering completed. Remaining: {} addresses.", outcome.count)
                } else {
                    outcome.message
                };
                tools::text_result(text, !outcome.success)
            }
            ToolCall::Reset => {
                let outcome = self.scanner.reset();
                tools::text_result(outcome.message, !outcome.success)
            }
        }
    }
}

impl McpServer<NativeBackend> {
    /// Server over a fresh scanner for this host
    pub fn native() -> Self {
        McpServer::new(Arc::new(MemoryScanner::new()))
    }
}
