use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::actions::FlowAction;
use crate::api::{Project, ProjectFields};
use crate::config::Config;

/// Browse and edit energy resiliency projects, with an animated view of
/// each request's path through the system.
#[derive(Parser, Debug)]
#[command(name = "resflow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Projects service URL (overrides api.base_url)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Skip the per-step pause
    #[arg(long)]
    pub no_delay: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List projects
    List,

    /// Create a project
    Add(ProjectArgs),

    /// Replace every field of a project
    Update {
        id: i64,
        #[command(flatten)]
        fields: ProjectArgs,
    },

    /// Delete a project
    Delete { id: i64 },

    /// Print a suggested project from the service
    Generate,

    /// Print the users array
    Users,

    /// Write the effective configuration as TOML
    InitConfig {
        /// Destination (default: ~/.config/resflow/config.toml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub location: String,

    /// 0 to 10
    #[arg(long)]
    pub impact_score: f64,

    #[arg(long)]
    pub description: String,
}

impl From<ProjectArgs> for ProjectFields {
    fn from(args: ProjectArgs) -> Self {
        ProjectFields {
            name: args.name,
            location: args.location,
            impact_score: args.impact_score,
            description: args.description,
        }
    }
}

impl Cli {
    /// Apply command-line flags on top of loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref base_url) = self.base_url {
            config.api.base_url = base_url.clone();
        }
        if self.no_delay {
            config.flow.animate = false;
        }
    }
}

impl Commands {
    /// The flow action behind a project subcommand
    pub fn flow_action(&self) -> Option<FlowAction> {
        match self {
            Commands::List => Some(FlowAction::Load),
            Commands::Add(fields) => Some(FlowAction::Create(fields.clone().into())),
            Commands::Update { id, fields } => {
                Some(FlowAction::Update(*id, fields.clone().into()))
            }
            Commands::Delete { id } => Some(FlowAction::Delete(*id)),
            Commands::Generate => Some(FlowAction::Generate),
            Commands::Users | Commands::InitConfig { .. } => None,
        }
    }
}

/// One line of `list` output
pub fn format_project_row(project: &Project) -> String {
    format!(
        "{:>4}  {:<32}  {:<20}  {:>4.1}  {}",
        project.id,
        project.name,
        project.location,
        project.impact_score,
        project.description.replace('\n', " ")
    )
}
