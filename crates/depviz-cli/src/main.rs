use anyhow::{Context, Result};
use clap::Parser;
use depviz_graph::{GraphView, LayoutConfig};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph payload produced by the dependency analyzer
    #[arg(short, long)]
    input: PathBuf,

    /// JSON file with layout settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the row width at which repositories wrap
    #[arg(long)]
    max_width: Option<f32>,

    /// Project id to select after loading
    #[arg(long, conflicts_with = "select_repository")]
    select_node: Option<String>,

    /// Repository to select after loading
    #[arg(long)]
    select_repository: Option<String>,

    /// JSON array of events (selection, drags) replayed in order
    #[arg(long)]
    events: Option<PathBuf>,

    /// Print the repository list instead of the scene
    #[arg(long)]
    list_repositories: bool,

    /// Where to write the JSON output; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut layout_config = match &args.config {
        Some(path) => config::load_layout_config(path)?,
        None => LayoutConfig::default(),
    };
    if let Some(max_width) = args.max_width {
        layout_config.max_canvas_width = max_width;
    }

    let payload = config::load_payload(&args.input)?;
    if let Some(issues) = &payload.issues {
        let summary = issues.summary();
        tracing::info!(
            "Analyzer reported {} issues: {} circular references, {} unreferenced projects, {} duplicate artifact ids, {} duplicate GAVs",
            summary.total(),
            summary.circular_references,
            summary.unreferenced_projects,
            summary.duplicate_artifact_ids,
            summary.duplicate_gavs
        );
    }

    let mut view = GraphView::from_payload(layout_config, &payload);
    tracing::info!(
        "Laid out {} projects and {} links in {} repositories",
        view.model().node_count(),
        view.model().link_count(),
        view.layout().repositories.len()
    );

    if let Some(id) = args.select_node {
        view.select_node(id);
    }
    if let Some(name) = args.select_repository {
        view.select_repository(name);
    }
    if let Some(path) = &args.events {
        let events = config::load_events(path)?;
        tracing::info!("Replaying {} events", events.len());
        for event in events {
            view.handle(event);
        }
    }

    let json = if args.list_repositories {
        serde_json::to_string_pretty(&view.repositories())?
    } else {
        serde_json::to_string_pretty(&view.scene())?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    Ok(())
}
