//! Text rendering of project snapshots for the terminal.
//!
//! [`RowParts`] holds the plain-text pieces of one project line so they can be
//! tested without ANSI codes; [`format_row`] applies colors.

use crate::core::snapshot::{ContributorList, Snapshot, SyncStatus};
use crate::core::tech::ProjectMetadata;
use chrono::{DateTime, Utc};
use colored::*;

/// Compact age like `just now`, `42s`, `5m`, `3h`, `2d`
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = MINUTE * 60;
    const DAY: i64 = HOUR * 24;

    let delta = (now - then).num_seconds();
    match delta {
        d if d < 5 => "just now".to_string(),
        d if d < MINUTE => format!("{d}s"),
        d if d < HOUR => format!("{}m", d / MINUTE),
        d if d < DAY => format!("{}h", d / HOUR),
        d => format!("{}d", d / DAY),
    }
}

/// `↓N` when behind, `↓` when behind by an unknown amount
pub fn behind_badge(sync: &SyncStatus) -> Option<String> {
    if !sync.is_behind {
        return None;
    }
    Some(if sync.behind_count > 0 {
        format!("↓{}", sync.behind_count)
    } else {
        "↓".to_string()
    })
}

pub fn behind_tooltip(sync: &SyncStatus) -> Option<String> {
    sync.is_behind
        .then(|| format!("Behind remote by {} commit(s)", sync.behind_count))
}

/// Branch name, or `@<short hash>` for a detached HEAD
pub fn branch_label(snapshot: &Snapshot) -> Option<String> {
    let name = snapshot.branch_name.as_ref()?;
    Some(if snapshot.is_detached {
        format!("@{name}")
    } else {
        name.clone()
    })
}

/// Plain-text pieces of one project line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowParts {
    pub name: String,
    pub pinned: bool,
    pub missing: bool,
    pub branch: Option<String>,
    pub dirty: Option<String>,
    pub behind: Option<String>,
    pub sparkline: Option<String>,
    pub age: Option<String>,
}

impl RowParts {
    pub fn build(
        name: &str,
        pinned: bool,
        snapshot: Option<&Snapshot>,
        last_accessed: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        let age = last_accessed.map(|then| relative_time(then, now));
        let Some(snapshot) = snapshot else {
            return Self {
                name: name.to_string(),
                pinned,
                missing: true,
                age,
                ..Default::default()
            };
        };

        Self {
            name: name.to_string(),
            pinned,
            missing: false,
            branch: branch_label(snapshot),
            dirty: snapshot
                .local
                .is_dirty
                .then(|| format!("±{}", snapshot.local.changed_file_count)),
            behind: behind_badge(&snapshot.sync),
            sparkline: (!snapshot.activity.is_empty()).then(|| snapshot.activity.sparkline()),
            age,
        }
    }

    /// Uncolored line, fields separated by two spaces
    pub fn plain(&self) -> String {
        let mut fields = vec![self.display_name()];
        if self.missing {
            fields.push("missing".to_string());
        }
        fields.extend(
            [
                &self.branch,
                &self.dirty,
                &self.behind,
                &self.sparkline,
                &self.age,
            ]
            .into_iter()
            .flatten()
            .cloned(),
        );
        fields.join("  ")
    }

    fn display_name(&self) -> String {
        if self.pinned {
            format!("📌 {}", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Colored line for terminal output
pub fn format_row(parts: &RowParts) -> String {
    let mut fields = vec![parts.display_name().white().bold().to_string()];
    if parts.missing {
        fields.push("missing".red().to_string());
    }
    if let Some(branch) = &parts.branch {
        fields.push(branch.blue().to_string());
    }
    if let Some(dirty) = &parts.dirty {
        fields.push(dirty.yellow().to_string());
    }
    if let Some(behind) = &parts.behind {
        fields.push(behind.red().to_string());
    }
    if let Some(sparkline) = &parts.sparkline {
        fields.push(sparkline.green().to_string());
    }
    if let Some(age) = &parts.age {
        fields.push(age.bright_black().to_string());
    }
    fields.join("  ")
}

/// Indented contributor lines, `<count>  <name>`
pub fn format_contributors(contributors: &ContributorList) -> Vec<String> {
    contributors
        .entries()
        .iter()
        .map(|entry| match ContributorList::split_entry(entry) {
            Some((count, name)) => format!("    {:>4}  {}", count.to_string().bright_black(), name),
            None => format!("    {entry}"),
        })
        .collect()
}

/// Indented `<stacks> · <key files>` line, or nothing when neither is known
pub fn format_metadata(metadata: &ProjectMetadata) -> Option<String> {
    let tech: Vec<String> = metadata.tech.iter().map(|t| t.to_string()).collect();
    let parts: Vec<String> = [tech.join(", "), metadata.key_files.join(", ")]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(format!("    {}", parts.join(" · ").bright_black()))
}
