//! Wire models of the remote fleet API

use serde::{Deserialize, Serialize};

/// Collection envelope of the resource endpoints
///
/// Resource queries answer `{"d": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ODataResponse<T> {
    pub d: Vec<T>,
}

impl<T> ODataResponse<T> {
    /// Wrap a collection
    pub fn new(d: Vec<T>) -> Self {
        Self { d }
    }

    /// Unwrap the collection
    pub fn into_inner(self) -> Vec<T> {
        self.d
    }
}

/// Identity of the authenticated user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WhoAmIResponse {
    /// User id
    pub id: u64,
    /// Login name
    pub username: String,
    /// Contact address, when the token belongs to a user rather than a device
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
