use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Component, ComponentId};
use crate::project::Project;

/// Errors that can occur while saving or loading a project snapshot
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize project: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to write project: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Failed to read project file: {0}")]
    ReadError(String),

    #[error("Invalid project data: {0}")]
    InvalidProject(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// A plain-data snapshot of the whole project tree
/// (components → locations, edges → nails) that the model can be rebuilt
/// from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub components: Vec<Component>,
    pub main_component: Option<ComponentId>,
    pub active_component: Option<ComponentId>,
    /// Version of the application when the snapshot was taken
    pub version: String,
}

impl ProjectSnapshot {
    pub fn new(project: &Project) -> Self {
        Self {
            components: project.snapshot_components(),
            main_component: project.main_component(),
            active_component: project.active_component(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Rebuild a project, validating the structural invariants the editor
    /// relies on.
    pub fn restore(self) -> PersistenceResult<Project> {
        for component in &self.components {
            let initial = component.locations().iter().filter(|l| l.is_initial()).count();
            let final_count = component.locations().iter().filter(|l| l.is_final()).count();
            if initial != 1 || final_count != 1 {
                return Err(PersistenceError::InvalidProject(format!(
                    "component {:?} has {initial} initial and {final_count} final locations",
                    component.name()
                )));
            }
        }

        let known = |id: Option<ComponentId>| {
            id.is_none_or(|id| self.components.iter().any(|component| component.id() == id))
        };
        if !known(self.main_component) || !known(self.active_component) {
            return Err(PersistenceError::InvalidProject(
                "main/active component not part of the project".to_string(),
            ));
        }

        Ok(Project::from_parts(
            self.components,
            self.main_component,
            self.active_component,
        ))
    }
}

pub fn save_project(project: &Project, path: &Path) -> PersistenceResult<()> {
    let snapshot = ProjectSnapshot::new(project);
    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_project(path: &Path) -> PersistenceResult<Project> {
    let json = fs::read_to_string(path)
        .map_err(|error| PersistenceError::ReadError(format!("{}: {error}", path.display())))?;
    let snapshot: ProjectSnapshot = serde_json::from_str(&json)?;
    snapshot.restore()
}
