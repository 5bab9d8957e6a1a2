use crate::commands::context::{absolute_path, TrackerContext};
use crate::core::{actions, error::Result, output::print_success};
use std::path::PathBuf;

pub async fn execute_clone(ctx: &TrackerContext, url: String, into: Option<PathBuf>) -> Result<()> {
    let parent = match into {
        Some(dir) => absolute_path(&dir)?,
        None => std::env::current_dir()?,
    };

    let project = actions::clone(
        ctx.runner.as_ref(),
        &ctx.aggregator,
        &url,
        &parent,
        ctx.config.clone_timeout(),
    )
    .await?;
    ctx.forget_sync_status()?;

    let mut registry = ctx.registry()?;
    let name = registry.track(&project).name.clone();
    registry.save()?;

    print_success(&format!("Cloned {name} into {}", project.display()));
    Ok(())
}
