pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod init;
pub mod mcp;
pub mod models;
pub mod services;

pub use error::PlanMcpError;
