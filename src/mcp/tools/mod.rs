//! Tool handlers. Each `handle_*` method is reached from
//! [`PlanServer::dispatch`](crate::mcp::PlanServer::dispatch) with its input
//! already bound.

pub mod analysis;
pub mod plan;
pub mod review;
