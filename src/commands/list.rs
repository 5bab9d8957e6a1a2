use crate::commands::context::TrackerContext;
use crate::core::{
    error::Result,
    output::{print_info, print_section_header},
    render::relative_time,
};
use chrono::Utc;
use colored::*;

/// Tracked projects from the registry alone; no git commands run
pub fn execute_list(ctx: &TrackerContext, json: bool) -> Result<()> {
    let registry = ctx.registry()?;
    let projects = registry.display_order();

    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    if projects.is_empty() {
        print_info("No projects tracked yet. Run 'project-tracker track' inside a project folder.");
        return Ok(());
    }

    print_section_header("Tracked projects");
    let now = Utc::now();
    for project in projects {
        let marker = if project.pinned { "📌 " } else { "" };
        println!(
            "  {}{}  {}  {}",
            marker,
            project.name.white().bold(),
            project.path.display().to_string().bright_black(),
            relative_time(project.last_accessed, now).bright_black()
        );
    }
    println!();

    Ok(())
}
