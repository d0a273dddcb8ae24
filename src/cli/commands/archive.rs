use anyhow::Context;
use clap::Subcommand;
use serde_json::json;
use std::path::PathBuf;

use crate::archive;
use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ArchiveCommands {
    #[command(about = "Check a ZIP for a shapefile and its companion files")]
    Check {
        #[arg(help = "Path to the ZIP archive")]
        path: PathBuf,
    },
}

pub fn handle(cmd: ArchiveCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ArchiveCommands::Check { path } => {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let names = archive::list_entry_names(&bytes)?;

            if let OutputFormat::Text = output_format {
                for name in &names {
                    println!("  {}", name);
                }
            }

            let check = archive::check_required_companions(&names);
            if !check.is_ok() {
                output_error(output_format, &check.message(), Some("MISSING_COMPANION"))?;
                anyhow::bail!("missing companion files: {}", check.missing.join(", "));
            }

            let shapefile = archive::find_shapefile_name(&names)?;
            output_success(
                output_format,
                &format!("Shapefile bundle OK: {}", shapefile),
                Some(json!({ "shapefile": shapefile, "files": names })),
            )
        }
    }
}
