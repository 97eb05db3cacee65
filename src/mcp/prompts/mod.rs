//! MCP prompts.
//!
//! Reusable workflow templates a client can fetch and seed a conversation
//! with.

pub mod master_controller;

pub use master_controller::*;
