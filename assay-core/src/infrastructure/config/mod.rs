pub mod assertions;
pub mod project;
pub mod tasks;
pub mod templates;

pub use crate::domain::project::ProjectConfig;
pub use assertions::{load_all, parse_assertions};
pub use project::load_project_config;
pub use tasks::load_tasks;
pub use templates::{load_templates, parse_templates};

/// True when a YAML document holds nothing but blank lines and comments.
pub(crate) fn is_blank_document(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}
