// assay/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "assay")]
#[command(about = "Declarative data-quality test harness", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🧪 Runs every test case (Task -> Batched checks -> Verdict)
    Run {
        /// Project directory
        #[arg(long, env = "ASSAY_PROJECT_DIR", default_value = ".")]
        project_dir: PathBuf,

        /// Run only one test case (ex: "orders")
        #[arg(long, short)]
        select: Option<String>,

        /// One query per check instead of one combined query per test case
        #[arg(long)]
        individual: bool,
    },

    /// 📋 Lists the collected test cases
    List {
        #[arg(long, env = "ASSAY_PROJECT_DIR", default_value = ".")]
        project_dir: PathBuf,
    },

    /// 🔎 Prints the SQL a test case would send, without running its task
    Render {
        #[arg(long, env = "ASSAY_PROJECT_DIR", default_value = ".")]
        project_dir: PathBuf,

        /// Test case to render
        #[arg(long, short)]
        select: String,

        /// Value used for ${source_row_count}
        #[arg(long, default_value = "0")]
        rows: u64,

        #[arg(long)]
        individual: bool,
    },
}
