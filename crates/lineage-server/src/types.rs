//! Wire types for the stdio protocol, deserialized from requests and
//! serialized into responses.

use serde::{Deserialize, Serialize};

/// Request kind asking for the lineages of functions in a file.
pub const GET_LINEAGES: &str = "GET_LINEAGES";

/// One request object read from stdin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    #[serde(rename = "type")]
    pub kind: String,
    /// File to report on; every declared function when absent.
    #[serde(rename = "fileName", default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// Response written to stdout for each request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeAnalysis {
    pub functions: Vec<FunctionAnalysis>,
}

/// Lineages of one declared function or method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionAnalysis {
    #[serde(rename = "funcName")]
    pub func_name: String,
    /// Receiver type name for methods, empty for free functions.
    #[serde(rename = "struct")]
    pub struct_name: String,
    pub lineages: Vec<Lineage>,
}

/// A transitive caller and where it is declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineage {
    pub lineage: String,
    pub link: Link,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "fileName")]
    pub file_name: String,
    /// 1-based.
    pub line: usize,
}
