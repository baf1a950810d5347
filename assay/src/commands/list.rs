// assay/src/commands/list.rs
//
// USE CASE: Show what `assay run` would execute.

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use std::path::PathBuf;

use super::open_project;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let project = open_project(&project_dir)?;

    if project.suite.is_empty() {
        println!("No test cases found.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Test", "Task", "Destination", "Checks"]);

    for case in project.suite.cases() {
        let task = if project.registry.contains(&case.task) {
            case.task.clone()
        } else {
            format!("{} (unregistered)", case.task)
        };
        table.add_row(vec![
            case.id.clone(),
            task,
            case.destination.clone(),
            case.checks.len().to_string(),
        ]);
    }

    println!("{table}");
    println!(
        "{} test cases, {} templates",
        project.suite.len(),
        project.suite.templates().len()
    );
    Ok(())
}
