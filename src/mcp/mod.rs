pub mod envelope;
pub mod prompts;
pub mod registry;
pub mod resources;
pub mod server;
pub mod tools;
pub mod types;

pub use envelope::ToolFailure;
pub use registry::{ResourceRegistry, ToolDescriptor, ToolKind, ToolRegistry};
pub use server::{run_mcp_server, PlanServer, ServerIdentity};
pub use types::*;
