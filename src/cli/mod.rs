//! CLI interface for plan-mcp.

pub mod handlers;
pub mod output;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigArgs;
use output::OutputMode;

/// plan-mcp - AI project planning, code review, and execution analysis
#[derive(Parser)]
#[command(name = "plan-mcp", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    pub json: bool,

    /// Output as Markdown
    #[arg(long, global = true)]
    pub md: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start MCP server (stdio transport)
    #[command(alias = "mcp")]
    Serve,

    /// Create a project plan
    Plan {
        /// Project description
        description: String,
        /// Requirement (repeatable)
        #[arg(long = "requirement", short = 'r')]
        requirements: Vec<String>,
        /// Constraint (repeatable)
        #[arg(long = "constraint", short = 'c')]
        constraints: Vec<String>,
        /// Preferred technology (repeatable)
        #[arg(long = "tech", short = 't')]
        tech_stack: Vec<String>,
    },

    /// Review a source file ("-" reads stdin)
    Review {
        file: PathBuf,
        /// Language (default: guessed from the file extension)
        #[arg(long, short = 'l')]
        language: Option<String>,
        /// Additional context about the code
        #[arg(long)]
        context: Option<String>,
        /// Focus area (repeatable)
        #[arg(long = "focus", short = 'f')]
        focus_areas: Vec<String>,
    },

    /// Review every source file in a directory
    #[command(name = "review-dir")]
    ReviewDir {
        path: PathBuf,
        /// Focus area (repeatable)
        #[arg(long = "focus", short = 'f')]
        focus_areas: Vec<String>,
        /// Include pattern, recorded with the review (repeatable)
        #[arg(long = "include")]
        include_patterns: Vec<String>,
        /// Exclude pattern, recorded with the review (repeatable)
        #[arg(long = "exclude")]
        exclude_patterns: Vec<String>,
    },

    /// Analyze execution output of a program
    Analyze {
        /// Source file that was executed
        code: PathBuf,
        /// File holding the captured output ("-" reads stdin)
        output: PathBuf,
        /// What the code should do
        #[arg(long)]
        expected: Option<String>,
        /// Error message (repeatable)
        #[arg(long = "error", short = 'e')]
        error_messages: Vec<String>,
        #[arg(long, short = 'l')]
        language: Option<String>,
    },

    /// Debug a specific error
    Debug {
        /// Source file that raised the error
        code: PathBuf,
        /// The error message
        #[arg(long = "message", short = 'm')]
        error_message: String,
        /// File holding the stack trace
        #[arg(long)]
        stack_trace: Option<PathBuf>,
        #[arg(long, short = 'l')]
        language: Option<String>,
        /// When the error occurs
        #[arg(long)]
        context: Option<String>,
    },

    /// Compare two implementations
    Compare {
        a: PathBuf,
        b: PathBuf,
        #[arg(long, short = 'l')]
        language: Option<String>,
        /// Comparison criterion (repeatable)
        #[arg(long = "criterion")]
        criteria: Vec<String>,
    },

    /// List registered MCP tools
    Tools,

    /// Print a file:// resource (file content or directory aggregation)
    Read { path: PathBuf },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, elvish, powershell)
        shell: clap_complete::Shell,
    },
}

impl Commands {
    /// Whether the command calls the generation backend.
    pub fn needs_backend(&self) -> bool {
        !matches!(
            self,
            Commands::Tools | Commands::Read { .. } | Commands::Completions { .. }
        )
    }
}

/// Run a command that does not need the generation backend.
pub async fn execute_offline(command: &Commands, mode: OutputMode) -> anyhow::Result<()> {
    match command {
        Commands::Tools => handlers::utility::handle_tools(mode)?,
        Commands::Read { path } => handlers::utility::handle_read(path, mode).await?,
        Commands::Completions { shell } => {
            clap_complete::generate(
                *shell,
                &mut Cli::command(),
                "plan-mcp",
                &mut std::io::stdout(),
            );
        }
        _ => anyhow::bail!("command requires the generation backend"),
    }
    Ok(())
}

/// Run a command against the generation backend.
pub async fn execute(
    command: &Commands,
    ctx: &crate::init::AppContext,
    mode: OutputMode,
) -> anyhow::Result<()> {
    match command {
        Commands::Serve => unreachable!("MCP handled in main"),

        Commands::Plan {
            description,
            requirements,
            constraints,
            tech_stack,
        } => {
            handlers::plan::handle_plan(ctx, description, requirements, constraints, tech_stack, mode)
                .await?
        }

        Commands::Review {
            file,
            language,
            context,
            focus_areas,
        } => {
            handlers::review::handle_review(
                ctx,
                file,
                language.as_deref(),
                context.as_deref(),
                focus_areas,
                mode,
            )
            .await?
        }

        Commands::ReviewDir {
            path,
            focus_areas,
            include_patterns,
            exclude_patterns,
        } => {
            handlers::review::handle_review_dir(
                ctx,
                path,
                focus_areas,
                include_patterns,
                exclude_patterns,
                mode,
            )
            .await?
        }

        Commands::Compare {
            a,
            b,
            language,
            criteria,
        } => handlers::review::handle_compare(ctx, a, b, language.as_deref(), criteria, mode).await?,

        Commands::Analyze {
            code,
            output,
            expected,
            error_messages,
            language,
        } => {
            handlers::analyze::handle_analyze(
                ctx,
                code,
                output,
                expected.as_deref(),
                error_messages,
                language.as_deref(),
                mode,
            )
            .await?
        }

        Commands::Debug {
            code,
            error_message,
            stack_trace,
            language,
            context,
        } => {
            handlers::analyze::handle_debug(
                ctx,
                code,
                error_message,
                stack_trace.as_deref(),
                language.as_deref(),
                context.as_deref(),
                mode,
            )
            .await?
        }

        offline => execute_offline(offline, mode).await?,
    }
    Ok(())
}
