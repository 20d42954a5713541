//! Tool catalogue and argument decoding for `tools/call`

use crate::core::types::ValueType;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use super::protocol::RpcError;

pub const SCAN_MEMORY: &str = "scan_memory";
pub const GET_ADDRESSES: &str = "get_addresses";
pub const FILTER_ADDRESSES: &str = "filter_addresses";
pub const RESET_SCANNER: &str = "reset_memory_scanner";

/// Arguments of `scan_memory`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScanArgs {
    pub process_name: String,
    pub value: String,
    pub value_type: ValueType,
}

/// Arguments of `get_addresses`
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AddressesArgs {
    #[serde(default)]
    pub max_count: Option<usize>,
}

/// Arguments of `filter_addresses`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FilterArgs {
    pub addresses: Vec<String>,
    pub new_value: String,
    pub value_type: ValueType,
}

/// A decoded `tools/call` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    Scan(ScanArgs),
    Addresses(AddressesArgs),
    Filter(FilterArgs),
    Reset,
}

impl ToolCall {
    /// Decode `params` of a `tools/call` request
    pub fn from_params(params: Option<&Value>) -> Result<Self, RpcError> {
        let params = params.ok_or_else(|| RpcError::invalid_params("missing params"))?;
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::invalid_params("missing tool name"))?;
        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        match name {
            SCAN_MEMORY => Ok(ToolCall::Scan(decode(arguments)?)),
            GET_ADDRESSES => Ok(ToolCall::Addresses(decode(arguments)?)),
            FILTER_ADDRESSES => Ok(ToolCall::Filter(decode(arguments)?)),
            RESET_SCANNER => Ok(ToolCall::Reset),
            other => Err(RpcError::unknown_tool(other)),
        }
    }
}

fn decode<T: DeserializeOwned>(arguments: Value) -> Result<T, RpcError> {
    serde_json::from_value(arguments).map_err(RpcError::invalid_params)
}

/// `tools/list` result
pub fn tool_definitions() -> Value {
    let value_types: Vec<&str> = ValueType::ALL.iter().map(ValueType::as_str).collect();

    json!({
        "tools": [
            {
                "name": SCAN_MEMORY,
                "description": "Scans process memory for specified value",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "process_name": {"type": "string", "description": "Process name"},
                        "value": {"type": "string", "description": "Search value"},
                        "value_type": {
                            "type": "string",
                            "description": "Data type",
                            "enum": value_types
                        }
                    },
                    "required": ["process_name", "value", "value_type"]
                }
            },
            {
                "name": GET_ADDRESSES,
                "description": "Gets found memory addresses",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "max_count": {"type": "integer", "description": "Maximum number of addresses"}
                    }
                }
            },
            {
                "name": FILTER_ADDRESSES,
                "description": "Filters addresses by new value",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "addresses": {
                            "type": "array",
                            "items": {"type": "string"},
                            "description": "Address list"
                        },
                        "new_value": {"type": "string", "description": "New value"},
                        "value_type": {"type": "string", "description": "Data type"}
                    },
                    "required": ["addresses", "new_value", "value_type"]
                }
            },
            {
                "name": RESET_SCANNER,
                "description": "Resets all search data",
                "inputSchema": {"type": "object", "properties": {}}
            }
        ]
    })
}

/// `tools/call` result wrapping one text block
pub fn text_result(text: impl Into<String>, is_error: bool) -> Value {
    json!({
        "content": [{"type": "text", "text": text.into()}],
        "isError": is_error
    })
}
