//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Environment concerns live here, apart from session and routing logic:
//! durable key-value storage, notification sinks and token header helpers.

pub mod auth;
pub mod notify;
pub mod storage;
