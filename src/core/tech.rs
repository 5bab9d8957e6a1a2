//! Lightweight project metadata from the top-level directory listing.

use crate::core::error::{ProjectTrackerError, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Files worth surfacing when present at the project root
pub const KEY_FILES: [&str; 7] = [
    "package.json",
    "README.md",
    "requirements.txt",
    "index.html",
    "main.py",
    "Cargo.toml",
    ".gitignore",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TechStack {
    Node,
    Python,
    Web,
    Rust,
    Go,
    Php,
}

impl fmt::Display for TechStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TechStack::Node => "Node.js",
            TechStack::Python => "Python",
            TechStack::Web => "Web",
            TechStack::Rust => "Rust",
            TechStack::Go => "Go",
            TechStack::Php => "PHP",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectMetadata {
    pub tech: Vec<TechStack>,
    pub key_files: Vec<String>,
}

impl ProjectMetadata {
    /// Reads the directory listing of `path`
    pub fn scan(path: &Path) -> Result<Self> {
        let entries = std::fs::read_dir(path).map_err(|e| ProjectTrackerError::read_failed(path, e))?;
        let names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        Ok(Self::from_names(&names))
    }

    pub fn from_names(names: &[String]) -> Self {
        let has = |file: &str| names.iter().any(|n| n == file);

        let mut tech = Vec::new();
        if has("package.json") {
            tech.push(TechStack::Node);
        }
        if has("requirements.txt") || names.iter().any(|n| n.ends_with(".py")) {
            tech.push(TechStack::Python);
        }
        if has("index.html") {
            tech.push(TechStack::Web);
        }
        if has("Cargo.toml") {
            tech.push(TechStack::Rust);
        }
        if has("go.mod") {
            tech.push(TechStack::Go);
        }
        if has("composer.json") {
            tech.push(TechStack::Php);
        }

        let key_files = KEY_FILES
            .iter()
            .filter(|file| has(file))
            .map(|file| file.to_string())
            .collect();

        Self { tech, key_files }
    }
}
