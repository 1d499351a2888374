pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_args::{CliConfig, Command};

#[cfg(feature = "cli")]
mod cli_args {
    use crate::config::toml_config::TomlConfig;
    use crate::domain::model::MentorStyle;
    use clap::{Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "agentic-planner")]
    #[command(about = "Turn big goals into an actionable weekly plan")]
    pub struct CliConfig {
        /// Path to TOML configuration file (defaults to ./planner.toml when present)
        #[arg(long, global = true)]
        pub config: Option<String>,

        /// Directory holding the session and exports
        #[arg(long, global = true)]
        pub state_dir: Option<String>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Emit logs as JSON lines")]
        pub log_json: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Generate a new plan and start a fresh session
        Plan {
            /// e.g. "Learn Django and deploy a small app"
            #[arg(long)]
            goal: String,

            /// Timeframe in weeks
            #[arg(long, default_value = "4")]
            weeks: u32,

            #[arg(long, value_enum, default_value = "coach")]
            mentor: MentorStyle,

            /// Skip the model API and use the local template plan
            #[arg(long)]
            offline: bool,
        },
        /// Show the plan with task checkboxes and progress
        Show,
        /// Mark a task as done
        Check { week: usize, task: usize },
        /// Mark a task as not done
        Uncheck { week: usize, task: usize },
        /// Set the current week
        Week { week: usize },
        /// Print flashcards for the current (or given) week
        Flashcards {
            #[arg(long)]
            week: Option<usize>,
        },
        /// Spread all tasks over fewer weeks
        Recompress {
            #[arg(long)]
            remaining_weeks: u32,
        },
        /// Write the plan as PDF and/or JSON
        Export {
            #[arg(long)]
            pdf: Option<String>,

            #[arg(long)]
            json: Option<String>,
        },
    }

    impl CliConfig {
        /// 命令列參數覆蓋配置檔
        pub fn apply_overrides(&self, config: &mut TomlConfig) {
            if let Some(state_dir) = &self.state_dir {
                config.output.state_dir = Some(state_dir.clone());
            }
            if self.log_json {
                config.logging.json = Some(true);
            }
        }
    }

}
