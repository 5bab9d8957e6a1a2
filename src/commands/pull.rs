use crate::commands::context::{absolute_path, TrackerContext};
use crate::core::{actions, error::Result, output::print_success};
use std::path::PathBuf;

pub async fn execute_pull(ctx: &TrackerContext, path: PathBuf) -> Result<()> {
    let path = absolute_path(&path)?;
    actions::pull(
        ctx.runner.as_ref(),
        &ctx.aggregator,
        &path,
        ctx.config.pull_timeout(),
    )
    .await?;
    ctx.forget_sync_status()?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    print_success(&format!("Successfully pulled updates for {name}"));
    Ok(())
}
