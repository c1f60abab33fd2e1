//! Client-side state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only the session lives here; routing state belongs to [`crate::router`].

pub mod session;
