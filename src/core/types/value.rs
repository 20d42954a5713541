//! Search value types and located addresses

use super::Address;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Type tag of a search value.
///
/// The tag decides how a value is turned into byte patterns; it does not
/// promise a storage width in the target process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    String,
    Int,
    Int32,
    Int64,
    Float,
    Float32,
    Float64,
}

impl ValueType {
    /// Every recognised type, in token order
    pub const ALL: [ValueType; 7] = [
        ValueType::String,
        ValueType::Int,
        ValueType::Int32,
        ValueType::Int64,
        ValueType::Float,
        ValueType::Float32,
        ValueType::Float64,
    ];

    /// Wire token for this type
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Int => "int",
            ValueType::Int32 => "int32",
            ValueType::Int64 => "int64",
            ValueType::Float => "float",
            ValueType::Float32 => "float32",
            ValueType::Float64 => "float64",
        }
    }

    /// Exact token lookup
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == token)
    }

    /// Token lookup that falls back to `string` for anything unrecognised
    pub fn from_token_lenient(token: &str) -> Self {
        Self::from_token(token).unwrap_or_default()
    }

    /// Whether the type is matched as text in both narrow and wide form
    pub const fn is_string(&self) -> bool {
        matches!(self, ValueType::String)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ValueType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        Ok(ValueType::from_token_lenient(&token))
    }
}

/// One located occurrence of a search value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryAddress {
    pub address: Address,
    pub value: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
}

impl MemoryAddress {
    pub fn new(address: Address, value: impl Into<String>, value_type: ValueType) -> Self {
        MemoryAddress {
            address,
            value: value.into(),
            value_type,
        }
    }

    /// Overwrites the value and type, keeping the address
    pub fn relabel(&mut self, value: &str, value_type: ValueType) {
        self.value = value.to_string();
        self.value_type = value_type;
    }
}
