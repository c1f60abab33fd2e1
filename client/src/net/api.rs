//! REST API helpers for the admin backend.
//!
//! Each function is a thin typed wrapper over [`HttpClient::send`]: a method,
//! a path and a payload. Token handling and error notification happen in the
//! pipeline, so callers only decide what to do with the `Result`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::IgnoredAny;

use super::error::ApiError;
use super::http::{HttpClient, RequestSpec};
use super::types::{CreateUserRequest, LoginRequest, PageData, SysUser, UpdateUserRequest, UserQuery};

pub const LOGIN_ENDPOINT: &str = "/login";
pub const LOGOUT_ENDPOINT: &str = "/logout";
pub const USERS_ENDPOINT: &str = "/users";

fn user_endpoint(user_id: &str) -> String {
    format!("{USERS_ENDPOINT}/{}", user_id.trim())
}

/// `POST /login`; resolves with the issued token.
///
/// # Errors
///
/// Returns the classified failure from the pipeline.
pub async fn login(http: &HttpClient, request: &LoginRequest) -> Result<String, ApiError> {
    http.send(RequestSpec::post(LOGIN_ENDPOINT).with_json(request)?).await
}

/// `DELETE /logout`.
///
/// # Errors
///
/// Returns the classified failure from the pipeline.
pub async fn logout(http: &HttpClient) -> Result<(), ApiError> {
    http.send::<IgnoredAny>(RequestSpec::delete(LOGOUT_ENDPOINT)).await.map(|_| ())
}

/// `GET /users` with optional paging and username filter.
///
/// # Errors
///
/// Returns the classified failure from the pipeline.
pub async fn get_user_page(http: &HttpClient, query: &UserQuery) -> Result<PageData<SysUser>, ApiError> {
    http.send(RequestSpec::get(USERS_ENDPOINT).with_query(query.to_pairs())).await
}

/// `GET /users/{id}`.
///
/// # Errors
///
/// Returns the classified failure from the pipeline.
pub async fn get_user_by_id(http: &HttpClient, user_id: &str) -> Result<SysUser, ApiError> {
    http.send(RequestSpec::get(user_endpoint(user_id))).await
}

/// `POST /users`.
///
/// # Errors
///
/// Returns the classified failure from the pipeline.
pub async fn create_user(http: &HttpClient, request: &CreateUserRequest) -> Result<(), ApiError> {
    let req = RequestSpec::post(USERS_ENDPOINT).with_json(request)?;
    http.send::<IgnoredAny>(req).await.map(|_| ())
}

/// `PUT /users/{id}`.
///
/// # Errors
///
/// Returns the classified failure from the pipeline.
pub async fn update_user(http: &HttpClient, user_id: &str, request: &UpdateUserRequest) -> Result<(), ApiError> {
    let req = RequestSpec::put(user_endpoint(user_id)).with_json(request)?;
    http.send::<IgnoredAny>(req).await.map(|_| ())
}

/// `DELETE /users/{id}`.
///
/// # Errors
///
/// Returns the classified failure from the pipeline.
pub async fn delete_user(http: &HttpClient, user_id: &str) -> Result<(), ApiError> {
    http.send::<IgnoredAny>(RequestSpec::delete(user_endpoint(user_id))).await.map(|_| ())
}
