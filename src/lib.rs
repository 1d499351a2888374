pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{planner::Planner, session::SessionStore};
pub use crate::domain::model::{MentorStyle, Plan, PlanRequest, PlanSource, PlannerSession};
pub use crate::utils::error::{PlannerError, Result};
