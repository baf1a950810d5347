// assay-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::domain::batch::BatchMode;
use crate::domain::project::ProjectConfig;
use crate::infrastructure::error::InfrastructureError;

const CONFIG_CANDIDATES: [&str; 2] = ["assay.yaml", "assay.yml"];

#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    // 1. Locate the main file
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading project configuration");

    // 2. Base YAML
    let content = fs::read_to_string(&config_path).map_err(InfrastructureError::Io)?;
    let mut config: ProjectConfig =
        serde_yaml::from_str(&content).map_err(InfrastructureError::YamlError)?;

    // 3. Environment overrides (layering)
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    Ok(config)
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    for filename in CONFIG_CANDIDATES {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "No configuration file found in {:?}. Checked: {:?}",
        root, CONFIG_CANDIDATES
    )))
}

// ASSAY_DATABASE=/tmp/ci.duckdb assay run
fn apply_env_overrides<F>(config: &mut ProjectConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("ASSAY_DATABASE") {
        info!(old = ?config.database, new = ?val, "Overriding database via ENV");
        config.database = val;
    }
    if let Some(val) = lookup("ASSAY_BATCH_MODE") {
        match val.parse::<BatchMode>() {
            Ok(mode) => {
                info!(old = %config.batch_mode, new = %mode, "Overriding batch mode via ENV");
                config.batch_mode = mode;
            }
            Err(e) => warn!("Ignoring ASSAY_BATCH_MODE: {}", e),
        }
    }
}
