use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use resiliency_flow::actions::{run_action, FlowAction, FlowOutcome};
use resiliency_flow::api::{
    resolve_base_url, Endpoint, HttpProjectsClient, ProjectFields, ProjectsApi,
};
use resiliency_flow::app::App;
use resiliency_flow::cli::{format_project_row, Cli, Commands};
use resiliency_flow::config::Config;
use resiliency_flow::flow::{FlowPacing, FlowSequencer, Step};
use resiliency_flow::logging;
use resiliency_flow::ui::install_panic_hook;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    // TUI mode (no subcommand) logs to a file, CLI mode to stderr
    let is_tui_mode = cli.command.is_none();
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    let base_url = resolve_base_url(&config.api.base_url);
    tracing::debug!(%base_url, "Resolved projects service");

    match cli.command {
        None => {
            run_tui(&config, &base_url, logging_handle.log_file_path).await?;
        }
        Some(Commands::InitConfig { path, force }) => {
            cmd_init_config(&config, path, force)?;
        }
        Some(Commands::Users) => {
            cmd_users(&config, &base_url).await?;
        }
        Some(command) => {
            if let Some(action) = command.flow_action() {
                cmd_flow(&config, &base_url, action).await?;
            }
        }
    }

    Ok(())
}

fn connect(base_url: &str) -> Result<HttpProjectsClient> {
    HttpProjectsClient::new(base_url).context("Failed to build HTTP client")
}

async fn run_tui(config: &Config, base_url: &str, log_file_path: Option<PathBuf>) -> Result<()> {
    install_panic_hook();

    let client = connect(base_url)?;
    let mut app = App::new(config, Arc::new(client), base_url);
    let result = app.run().await;

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    result
}

async fn cmd_flow(config: &Config, base_url: &str, action: FlowAction) -> Result<()> {
    if let FlowAction::Create(ref fields) | FlowAction::Update(_, ref fields) = action {
        validate_fields(fields)?;
    }

    let client = connect(base_url)?;
    let mut sequencer = FlowSequencer::new(FlowPacing::from(&config.flow));
    let outcome = run_action(&mut sequencer, &client, &action)
        .await
        .with_context(|| format!("{} failed", action.endpoint().label()))?;

    match outcome {
        FlowOutcome::Projects(projects) => {
            if projects.is_empty() {
                println!("No projects found.");
            }
            for project in &projects {
                println!("{}", format_project_row(project));
            }
        }
        FlowOutcome::Generated(fields) => {
            println!("{}", serde_json::to_string_pretty(&fields)?);
        }
    }
    Ok(())
}

fn validate_fields(fields: &ProjectFields) -> Result<()> {
    if let Err(message) = fields.validate() {
        bail!("Invalid project: {}", message);
    }
    Ok(())
}

async fn cmd_users(config: &Config, base_url: &str) -> Result<()> {
    let client = connect(base_url)?;
    let mut sequencer = FlowSequencer::new(FlowPacing::from(&config.flow));
    let users = sequencer
        .run(Step::Db, Some(Endpoint::ListUsers.label()), || {
            client.list_users()
        })
        .await
        .context("Listing users failed")?;

    println!("{}", serde_json::to_string_pretty(&users)?);
    Ok(())
}

fn cmd_init_config(config: &Config, path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path.or_else(Config::user_config_path) {
        Some(path) => path,
        None => bail!("No config directory on this platform; pass a path"),
    };
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    config.save(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
