pub mod analyzer;
pub mod planner;
pub mod prompts;
pub mod reviewer;
pub mod source_tree;

pub use analyzer::{ErrorReport, ExecutionAnalyzer, ExecutionReport};
pub use planner::{PlanBrief, ProjectPlanner};
pub use reviewer::{CodeReviewer, ReviewRequest};
pub use source_tree::{aggregate_directory, read_path, SourceTree};
