//! Wire DTOs for the admin backend.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's camelCase JSON so serde round-trips stay
//! lossless. Every reply is wrapped in an [`Envelope`] whose `code` decides
//! success before `data` is looked at.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Envelope codes that mean success.
pub const SUCCESS_CODES: [&str; 2] = ["200", "0"];

/// Wrapper around every backend reply.
///
/// `data` stays untyped until the code says success; the pipeline decodes it
/// into the caller's type afterwards.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Envelope {
    /// Business status code, compared as a string.
    #[serde(deserialize_with = "deserialize_code")]
    pub code: String,
    /// Human-readable reason, meaningful on failure.
    #[serde(default)]
    pub msg: Option<String>,
    /// Payload, meaningful on success.
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Envelope {
    #[must_use]
    pub fn is_success(&self) -> bool {
        SUCCESS_CODES.contains(&self.code.as_str())
    }

    /// The failure reason, if the backend sent a non-blank one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.msg.as_deref().filter(|msg| !msg.trim().is_empty())
    }
}

/// A user record as returned by `/users` endpoints; also the session profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SysUser {
    pub user_id: String,
    pub user_name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    /// Soft-delete flag; non-zero means deleted.
    #[serde(rename = "deleted", alias = "deletedFlag", default)]
    pub deleted_flag: i32,
}

/// The signed-in user's profile is a [`SysUser`].
pub type UserProfile = SysUser;

/// One page of records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageData<T> {
    pub records: Vec<T>,
    pub total: u64,
    pub current: u64,
    pub size: u64,
    pub pages: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UpdateUserRequest {
    pub email: String,
}

/// Filters for the paginated user listing. Unset fields are not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub username: Option<String>,
}

impl UserQuery {
    /// Flatten into query-string pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_owned(), page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size".to_owned(), size.to_string()));
        }
        if let Some(username) = &self.username {
            pairs.push(("username".to_owned(), username.clone()));
        }
        pairs
    }
}

fn deserialize_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(code) => Ok(code),
        serde_json::Value::Number(code) => Ok(code.to_string()),
        other => Err(D::Error::custom(format!("expected string or number code, got {other}"))),
    }
}
