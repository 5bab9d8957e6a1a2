use crate::commands::context::{absolute_path, TrackerContext};
use crate::core::{
    error::Result,
    output::{print_info, print_section_header},
    render::{format_contributors, format_metadata, format_row, RowParts},
    snapshot::Snapshot,
    tech::ProjectMetadata,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct StatusOptions {
    pub paths: Vec<PathBuf>,
    pub json: bool,
    pub contributors: bool,
}

/// One project to report on
#[derive(Debug, Clone)]
struct Target {
    name: String,
    path: PathBuf,
    pinned: bool,
    last_accessed: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct StatusReport<'a> {
    name: &'a str,
    path: &'a PathBuf,
    pinned: bool,
    snapshot: Option<&'a Snapshot>,
    metadata: Option<ProjectMetadata>,
}

pub async fn execute_status(ctx: &TrackerContext, options: StatusOptions) -> Result<()> {
    let targets = resolve_targets(ctx, &options.paths)?;
    if targets.is_empty() {
        print_info("No projects tracked yet. Run 'project-tracker track' inside a project folder.");
        return Ok(());
    }

    let paths: Vec<PathBuf> = targets.iter().map(|t| t.path.clone()).collect();
    let snapshots = ctx.aggregator.compute_snapshots(&paths).await;
    log::debug!("Computed {} snapshots", snapshots.len());
    ctx.persist_sync_status();

    if options.json {
        let reports: Vec<StatusReport> = targets
            .iter()
            .zip(&snapshots)
            .map(|(target, snapshot)| StatusReport {
                name: &target.name,
                path: &target.path,
                pinned: target.pinned,
                snapshot: snapshot.as_ref(),
                metadata: snapshot
                    .as_ref()
                    .and_then(|_| ProjectMetadata::scan(&target.path).ok()),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    print_section_header("Projects");
    let now = Utc::now();
    for (target, snapshot) in targets.iter().zip(&snapshots) {
        let parts = RowParts::build(
            &target.name,
            target.pinned,
            snapshot.as_ref(),
            target.last_accessed,
            now,
        );
        println!("  {}", format_row(&parts));

        if snapshot.is_some() {
            if let Some(line) = ProjectMetadata::scan(&target.path)
                .ok()
                .and_then(|metadata| format_metadata(&metadata))
            {
                println!("{line}");
            }
        }

        if options.contributors {
            if let Some(snapshot) = snapshot {
                for line in format_contributors(&snapshot.contributors) {
                    println!("{line}");
                }
            }
        }
    }
    println!();

    Ok(())
}

/// Explicit paths win; otherwise every tracked project, pinned first
fn resolve_targets(ctx: &TrackerContext, paths: &[PathBuf]) -> Result<Vec<Target>> {
    if !paths.is_empty() {
        return paths
            .iter()
            .map(|path| {
                let path = absolute_path(path)?;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                Ok(Target {
                    name,
                    path,
                    pinned: false,
                    last_accessed: None,
                })
            })
            .collect();
    }

    let registry = ctx.registry()?;
    Ok(registry
        .display_order()
        .into_iter()
        .map(|project| Target {
            name: project.name.clone(),
            path: project.path.clone(),
            pinned: project.pinned,
            last_accessed: Some(project.last_accessed),
        })
        .collect())
}
