use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "modelroute")]
#[command(version)]
#[command(about = "Model-tier routing and usage analytics for AI coding agents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze recent model usage and print recommendations
    Analyze {
        /// Trailing window in days (defaults to the configured window, normally 7)
        days: Option<u32>,

        /// Emit statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Route one task to a model tier and log the decision
    Select {
        /// Task type identifier, e.g. log_analysis
        task_type: String,

        /// Free-text task description
        description: String,

        /// Context signals as a JSON object
        #[arg(short, long)]
        context: Option<String>,

        /// Override the PREMIUM score threshold
        #[arg(long)]
        threshold: Option<i32>,

        /// Emit the decision as JSON
        #[arg(long)]
        json: bool,
    },

    /// Append a usage record for a completed task
    Record {
        /// Model identifier the task ran on
        #[arg(long)]
        model: String,

        #[arg(long)]
        task_type: String,

        #[arg(long, default_value_t = 0)]
        tokens: u64,

        /// Mark the task as failed
        #[arg(long)]
        failed: bool,

        /// Wall-clock duration in seconds
        #[arg(long, default_value_t = 0.0)]
        duration: f64,
    },

    /// View logged routing decisions
    Decisions {
        /// Show counts by tier and reason
        #[arg(long)]
        stats: bool,

        /// Number of recent decisions to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Write the default settings file
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },

    /// Show resolved paths and log health
    Diagnostic {
        #[arg(long)]
        json: bool,
    },

    /// Print version information
    Version,
}
