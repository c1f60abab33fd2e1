//! Networking modules for the admin REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` is the request pipeline every call goes through, `transport` is the
//! seam to the network, `api` holds the typed endpoint wrappers, `types`
//! defines the wire schema and `error` the failure taxonomy.

pub mod api;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
