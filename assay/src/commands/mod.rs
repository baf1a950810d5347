// assay/src/commands/mod.rs

pub mod list;
pub mod render;
pub mod run;

use std::path::Path;

use assay_core::application::{Project, load_project};

/// Collects the project, printing core errors with their diagnostic code.
pub(crate) fn open_project(project_dir: &Path) -> anyhow::Result<Project> {
    load_project(project_dir).map_err(|e| {
        eprintln!("{:?}", miette::Report::new(e));
        anyhow::anyhow!("Failed to load project from {:?}", project_dir)
    })
}
