use std::path::PathBuf;

use canvas::camera::Vec3;
use canvas::doc::{NodeDraft, NodeType, VisualStyle};
use casefile::config::AppConfig;
use casefile::services::project_source::{JsonFileProjectSource, ProjectSource, SourceError};
use casefile::state::auth::owner_filter;
use casefile::state::canvas_view::CanvasViewModel;
use casefile::state::views::timeline;
use casefile::storage::{FileStore, StorageError};
use clap::{Parser, Subcommand};

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("project source error: {0}")]
    Source(#[from] SourceError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown {field} `{value}`")]
    InvalidValue { field: &'static str, value: String },
    #[error("project {project} has no node {id}")]
    UnknownNode { project: String, id: String },
}

#[derive(Parser, Debug)]
#[command(name = "casefile", about = "Inspect and edit investigation node collections")]
struct Cli {
    /// Directory holding the local key/value store.
    #[arg(long, env = "CASEFILE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a project's nodes as JSON.
    Nodes { project: String },
    /// Append a node to a project.
    AddNode {
        project: String,
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long = "type", default_value = "generic")]
        node_type: String,
        #[arg(long, default_value = "default")]
        style: String,
        #[arg(long, default_value_t = 0.0)]
        x: f64,
        #[arg(long, default_value_t = 0.0)]
        z: f64,
    },
    /// Print a project's nodes in timeline order.
    Timeline { project: String },
    /// Remove a node from a project.
    DeleteNode { project: String, id: String },
    /// List projects from `projects.json` in the data directory.
    Projects {
        /// Only projects owned by this user id.
        #[arg(long)]
        owner: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    // Missing .env is fine.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!(error = %e, "failed to load .env");
        }
    }

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Command::Nodes { project } => run_nodes(&config, &project),
        Command::AddNode { project, title, description, node_type, style, x, z } => {
            let draft = NodeDraft {
                title: Some(title),
                description: Some(description),
                position: Some(Vec3::new(x, 0.0, z)),
                node_type: Some(parse_wire::<NodeType>("type", &node_type)?),
                visual_style: Some(parse_wire::<VisualStyle>("style", &style)?),
                ..Default::default()
            };
            run_add_node(&config, &project, draft)
        }
        Command::Timeline { project } => run_timeline(&config, &project),
        Command::DeleteNode { project, id } => run_delete_node(&config, &project, &id),
        Command::Projects { owner } => run_projects(&config, owner.as_deref()).await,
    }
}

/// Parse a node type or style by its stored name.
fn parse_wire<T: serde::de::DeserializeOwned>(field: &'static str, value: &str) -> Result<T, CliError> {
    serde_json::from_value(serde_json::Value::String(value.to_owned()))
        .map_err(|_| CliError::InvalidValue { field, value: value.to_owned() })
}

fn open_project(config: &AppConfig, project: &str) -> Result<CanvasViewModel, CliError> {
    let store = FileStore::open(&config.data_dir)?;
    let mut view = CanvasViewModel::new(Box::new(store));
    view.open_project(project);
    Ok(view)
}

fn run_nodes(config: &AppConfig, project: &str) -> Result<(), CliError> {
    let view = open_project(config, project)?;
    println!("{}", serde_json::to_string_pretty(view.nodes())?);
    Ok(())
}

fn run_add_node(config: &AppConfig, project: &str, draft: NodeDraft) -> Result<(), CliError> {
    let mut view = open_project(config, project)?;
    let node = view.try_add_node(draft)?;
    println!("{}", serde_json::to_string_pretty(&node)?);
    Ok(())
}

fn run_timeline(config: &AppConfig, project: &str) -> Result<(), CliError> {
    let view = open_project(config, project)?;
    for entry in timeline(view.nodes()) {
        println!("{:>3}. {}  {}", entry.number, entry.when, entry.title);
    }
    Ok(())
}

fn run_delete_node(config: &AppConfig, project: &str, id: &str) -> Result<(), CliError> {
    let mut view = open_project(config, project)?;
    if !view.try_delete_node(id)? {
        return Err(CliError::UnknownNode { project: project.to_owned(), id: id.to_owned() });
    }
    eprintln!("deleted node {id}");
    Ok(())
}

async fn run_projects(config: &AppConfig, owner: Option<&str>) -> Result<(), CliError> {
    let source = JsonFileProjectSource::new(config.data_dir.join("projects.json"));
    let filter = owner.map(owner_filter);
    let projects = source.list_projects(filter.as_deref()).await?;
    for p in &projects {
        println!("{}\t{}\t{} reports", p.id, p.title, p.reports.len());
    }
    Ok(())
}
