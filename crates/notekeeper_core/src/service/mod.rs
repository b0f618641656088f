//! Core use-case services.
//!
//! # Responsibility
//! - Own in-memory note state and route every mutation through persistence.
//! - Keep callers decoupled from storage details.

pub mod note_store;
