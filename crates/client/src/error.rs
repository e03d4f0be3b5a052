use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};


/// The requested resource does not exist on the node.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct NotFound;


impl Display for NotFound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "resource not found")
    }
}


impl std::error::Error for NotFound {}


#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiErrorDetail {
    pub message: String,
    pub file: String,
    pub line_number: i64,
    pub method: String
}


#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiErrorInfo {
    pub code: i64,
    pub name: String,
    pub what: String,
    pub details: Vec<ApiErrorDetail>
}


/// Structured error reported by the node.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiError {
    /// HTTP status code as reported in the body
    pub code: i64,
    pub message: String,
    pub error: ApiErrorInfo
}


impl ApiError {
    /// The node reports lookups of missing records as an internal error
    /// with an `unknown key` detail.
    pub fn is_unknown_key_error(&self) -> bool {
        self.code == 500 && self.error.code == 0 && self.error.details.iter().any(|d| {
            d.message.starts_with("unknown key")
        })
    }
}


impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.message, self.error.what)?;
        for detail in self.error.details.iter() {
            write!(f, ": {}", detail.message)?;
        }
        Ok(())
    }
}


impl std::error::Error for ApiError {}


/// The request never produced a complete response.
#[derive(Debug)]
pub struct TransportError {
    pub url: String,
    pub source: reqwest::Error
}


impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.url, self.source)
    }
}


impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}


/// Error status with a body that is not a node API error.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UnexpectedResponse {
    pub url: String,
    pub status: u16,
    pub body: String
}


impl Display for UnexpectedResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: status code={}, body={}", self.url, self.status, self.body)
    }
}


impl std::error::Error for UnexpectedResponse {}


/// Checks whether the call failed because the requested record does not exist.
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.is::<NotFound>()
}
