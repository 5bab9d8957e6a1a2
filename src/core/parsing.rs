//! Pure parsers for git command output.
//!
//! Each function takes the raw text a command printed and returns a typed result.
//! None of them spawn processes or touch the filesystem, so they are tested with
//! literal strings.

use crate::core::error::{ProjectTrackerError, Result};
use crate::core::snapshot::{ActivityHistogram, ContributorList, LocalStatus, ACTIVITY_DAYS};
use chrono::NaiveDate;

/// Parsed `git status --porcelain --branch` output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSummary {
    pub behind_count: u32,
    pub local: LocalStatus,
}

/// Parses short-form status with a `## ` branch header.
///
/// The header's tracking section (`[ahead 1, behind 3]`) supplies the behind count;
/// every other non-empty line is one changed path.
pub fn parse_status_output(output: &str) -> Result<StatusSummary> {
    let mut lines = output.lines();
    let header = lines
        .next()
        .map(str::trim)
        .filter(|line| line.starts_with("##"))
        .ok_or_else(|| ProjectTrackerError::parse_failure("status", "missing branch header"))?;

    let changed = lines.filter(|line| !line.trim().is_empty()).count();

    Ok(StatusSummary {
        behind_count: parse_behind_count(header),
        local: LocalStatus::from_changed_files(changed as u32),
    })
}

/// Extracts `N` from a `behind N` marker in the header's bracketed tracking section
fn parse_behind_count(header: &str) -> u32 {
    let Some(open) = header.rfind('[') else {
        return 0;
    };
    let tracking = &header[open..];
    let Some(start) = tracking.find("behind ") else {
        return 0;
    };
    let digits: String = tracking[start + "behind ".len()..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

/// Buckets one `YYYY-MM-DD` line per commit into the seven days ending `today`.
///
/// Dates outside the window are ignored. Output with lines but no parseable date
/// at all is a parse failure.
pub fn bucket_activity(output: &str, today: NaiveDate) -> Result<ActivityHistogram> {
    let mut days = [0u32; ACTIVITY_DAYS];
    let mut seen_lines = 0usize;
    let mut parsed_lines = 0usize;

    for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
        seen_lines += 1;
        let Ok(date) = NaiveDate::parse_from_str(line, "%Y-%m-%d") else {
            log::debug!("Skipping unparseable log date '{line}'");
            continue;
        };
        parsed_lines += 1;

        let days_ago = (today - date).num_days();
        if (0..ACTIVITY_DAYS as i64).contains(&days_ago) {
            days[ACTIVITY_DAYS - 1 - days_ago as usize] += 1;
        }
    }

    if seen_lines > 0 && parsed_lines == 0 {
        return Err(ProjectTrackerError::parse_failure(
            "log",
            format!("no dates in {seen_lines} lines"),
        ));
    }

    Ok(ActivityHistogram::from_days(days))
}

/// Parses `git shortlog --summary --numbered` into the top contributors.
///
/// Entries are normalised to `"<count>\t<name>"` and ordered by count, highest first.
pub fn parse_shortlog(output: &str) -> Result<ContributorList> {
    let mut entries: Vec<(u32, String)> = Vec::new();
    let mut seen_lines = 0usize;

    for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
        seen_lines += 1;
        match ContributorList::split_entry(line) {
            Some((count, name)) => entries.push((count, name.to_string())),
            None => log::debug!("Skipping unparseable shortlog line '{line}'"),
        }
    }

    if seen_lines > 0 && entries.is_empty() {
        return Err(ProjectTrackerError::parse_failure(
            "shortlog",
            format!("no author counts in {seen_lines} lines"),
        ));
    }

    // Stable: ties keep git's ordering
    entries.sort_by(|a, b| b.0.cmp(&a.0));

    Ok(ContributorList::new(
        entries
            .into_iter()
            .map(|(count, name)| format!("{count}\t{name}"))
            .collect(),
    ))
}
