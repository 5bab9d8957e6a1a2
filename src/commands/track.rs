use crate::commands::context::{absolute_path, TrackerContext};
use crate::core::{
    error::{ProjectTrackerError, Result},
    output::{print_info, print_success},
};
use std::path::PathBuf;

pub fn execute_track(ctx: &TrackerContext, path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(path) => absolute_path(&path)?,
        None => std::env::current_dir()?,
    };
    if !path.is_dir() {
        return Err(ProjectTrackerError::not_found(path));
    }

    let mut registry = ctx.registry()?;
    let name = registry.track(&path).name.clone();
    registry.save()?;

    print_success(&format!("Tracking {name} ({})", path.display()));
    Ok(())
}

pub fn execute_untrack(ctx: &TrackerContext, path: PathBuf) -> Result<()> {
    let path = absolute_path(&path)?;
    let mut registry = ctx.registry()?;

    if registry.untrack(&path) {
        registry.save()?;
        print_success(&format!("Stopped tracking {}", path.display()));
    } else {
        print_info(&format!("{} is not tracked", path.display()));
    }
    Ok(())
}
