//! Predicates for validating project-tracker CLI output

#![allow(dead_code)]

use predicates::prelude::*;

pub fn not_in_git_repo() -> impl Predicate<str> {
    predicates::str::contains("Not a git repository")
}

pub fn path_missing() -> impl Predicate<str> {
    predicates::str::contains("missing")
}

pub fn no_projects_tracked() -> impl Predicate<str> {
    predicates::str::contains("No projects tracked yet")
}

pub fn has_projects_header() -> impl Predicate<str> {
    predicates::str::contains("Projects")
}

pub fn has_branch(name: &str) -> impl Predicate<str> {
    predicates::str::contains(name.to_string())
}

pub fn has_dirty_count(count: u32) -> impl Predicate<str> {
    predicates::str::contains(format!("±{count}"))
}

pub fn has_behind_badge(count: u32) -> impl Predicate<str> {
    predicates::str::contains(format!("↓{count}"))
}
