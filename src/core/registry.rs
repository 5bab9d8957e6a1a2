//! Persisted list of tracked projects.
//!
//! The registry is a JSON array of [`ProjectDescriptor`]s in the config directory.
//! It is deliberately forgiving on load: a missing file, an empty file or a
//! document that is not an array all read as "no projects".
//!
//! # Ordering
//! Most recently tracked first. [`ProjectRegistry::display_order`] additionally
//! floats pinned projects to the top.

use crate::core::dirs::get_config_directory;
use crate::core::error::{ProjectTrackerError, Result};
use crate::core::snapshot::{normalize_path, ProjectKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const REGISTRY_FILE: &str = "tracked_projects.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptor {
    pub name: String,
    pub path: PathBuf,
    pub last_accessed: DateTime<Utc>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ProjectDescriptor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = normalize_path(&path.into());
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            name,
            path,
            last_accessed: Utc::now(),
            pinned: false,
            color: None,
            icon: None,
        }
    }

    pub fn key(&self) -> ProjectKey {
        ProjectKey::new(&self.path)
    }
}

#[derive(Debug)]
pub struct ProjectRegistry {
    file: PathBuf,
    max_projects: usize,
    projects: Vec<ProjectDescriptor>,
}

impl ProjectRegistry {
    pub fn registry_path() -> Result<PathBuf> {
        Ok(get_config_directory()?.join(REGISTRY_FILE))
    }

    pub fn load(max_projects: usize) -> Result<Self> {
        Self::load_from(Self::registry_path()?, max_projects)
    }

    pub fn load_from(file: impl Into<PathBuf>, max_projects: usize) -> Result<Self> {
        let file = file.into();
        let projects = read_projects(&file)?;
        log::debug!("Loaded {} tracked projects from {}", projects.len(), file.display());
        Ok(Self {
            file,
            max_projects,
            projects,
        })
    }

    pub fn projects(&self) -> &[ProjectDescriptor] {
        &self.projects
    }

    pub fn find(&self, path: &Path) -> Option<&ProjectDescriptor> {
        let key = ProjectKey::new(path);
        self.projects.iter().find(|p| p.key() == key)
    }

    /// Pinned projects first, otherwise registry order
    pub fn display_order(&self) -> Vec<&ProjectDescriptor> {
        let mut ordered: Vec<&ProjectDescriptor> = self.projects.iter().collect();
        ordered.sort_by_key(|p| !p.pinned);
        ordered
    }

    /// Moves the project to the front (inserting it if new) and stamps access time
    pub fn track(&mut self, path: &Path) -> &ProjectDescriptor {
        let key = ProjectKey::new(path);
        let mut descriptor = match self.projects.iter().position(|p| p.key() == key) {
            Some(index) => self.projects.remove(index),
            None => ProjectDescriptor::new(path),
        };
        descriptor.last_accessed = Utc::now();
        self.projects.insert(0, descriptor);
        // The project just tracked always survives the cap
        self.projects.truncate(self.max_projects.max(1));
        &self.projects[0]
    }

    /// Returns whether the project was tracked
    pub fn untrack(&mut self, path: &Path) -> bool {
        let key = ProjectKey::new(path);
        let before = self.projects.len();
        self.projects.retain(|p| p.key() != key);
        self.projects.len() != before
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.file.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ProjectTrackerError::write_failed(parent, e))?;
        }

        let limit = self.projects.len().min(self.max_projects.max(1));
        let json = serde_json::to_string_pretty(&self.projects[..limit])?;
        std::fs::write(&self.file, json)
            .map_err(|e| ProjectTrackerError::write_failed(&self.file, e))?;

        log::debug!("Saved {limit} tracked projects to {}", self.file.display());
        Ok(())
    }
}

fn read_projects(file: &Path) -> Result<Vec<ProjectDescriptor>> {
    if !file.exists() {
        return Ok(Vec::new());
    }

    let content =
        std::fs::read_to_string(file).map_err(|e| ProjectTrackerError::read_failed(file, e))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Ignoring unreadable registry {}: {e}", file.display());
            return Ok(Vec::new());
        }
    };
    if !value.is_array() {
        log::warn!("Registry {} is not a list, ignoring it", file.display());
        return Ok(Vec::new());
    }

    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn registry_in(temp_dir: &TempDir, max: usize) -> ProjectRegistry {
        ProjectRegistry::load_from(temp_dir.path().join(REGISTRY_FILE), max).unwrap()
    }

    #[test]
    fn test_missing_and_empty_files_load_empty() {
        let temp_dir = TempDir::new().unwrap();
        assert!(registry_in(&temp_dir, 50).projects().is_empty());

        std::fs::write(temp_dir.path().join(REGISTRY_FILE), "  \n").unwrap();
        assert!(registry_in(&temp_dir, 50).projects().is_empty());
    }

    #[test]
    fn test_non_array_document_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(REGISTRY_FILE), r#"{"name":"x"}"#).unwrap();
        assert!(registry_in(&temp_dir, 50).projects().is_empty());
    }

    #[test]
    fn test_track_moves_to_front_without_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = registry_in(&temp_dir, 50);
        registry.track(Path::new("/work/alpha"));
        registry.track(Path::new("/work/beta"));
        registry.track(Path::new("/work/alpha"));

        let names: Vec<_> = registry.projects().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_track_respects_limit() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = registry_in(&temp_dir, 2);
        registry.track(Path::new("/work/a"));
        registry.track(Path::new("/work/b"));
        registry.track(Path::new("/work/c"));
        assert_eq!(registry.projects().len(), 2);
        assert!(registry.find(Path::new("/work/a")).is_none());
    }

    #[test]
    fn test_spellings_of_one_folder_share_an_entry() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = registry_in(&temp_dir, 50);
        registry.track(Path::new("/work/app/"));
        registry.track(Path::new("/work/./app"));
        registry.track(Path::new("/work/app"));

        assert_eq!(registry.projects().len(), 1);
        assert_eq!(registry.projects()[0].path, PathBuf::from("/work/app"));
        assert_eq!(registry.projects()[0].name, "app");
        assert!(registry.find(Path::new("/work/app/.")).is_some());
        assert!(registry.untrack(Path::new("/work/lib/../app/")));
        assert!(registry.projects().is_empty());
    }

    #[test]
    fn test_untrack() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = registry_in(&temp_dir, 50);
        registry.track(Path::new("/work/a"));
        assert!(registry.untrack(Path::new("/work/a")));
        assert!(!registry.untrack(Path::new("/work/a")));
    }

    #[test]
    fn test_save_and_reload_keeps_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = registry_in(&temp_dir, 50);
        registry.track(Path::new("/work/a"));
        registry.projects[0].pinned = true;
        registry.projects[0].color = Some("charts.blue".to_string());
        registry.save().unwrap();

        let reloaded = registry_in(&temp_dir, 50);
        assert_eq!(reloaded.projects(), registry.projects());

        let raw = std::fs::read_to_string(temp_dir.path().join(REGISTRY_FILE)).unwrap();
        assert!(raw.contains("lastAccessed"));
        assert!(!raw.contains("icon"));
    }

    #[test]
    fn test_display_order_pins_first() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = registry_in(&temp_dir, 50);
        registry.track(Path::new("/work/pinned"));
        registry.track(Path::new("/work/recent"));
        registry.projects[1].pinned = true;

        let names: Vec<_> = registry.display_order().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["pinned", "recent"]);
    }
}
