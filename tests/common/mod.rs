#![allow(dead_code)]

pub mod builders;
pub mod harness;

// Re-export commonly used test utilities
pub use harness::{body, is_error, Reply, ScriptedGenerator, TestHarness};
