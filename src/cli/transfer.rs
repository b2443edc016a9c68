//! Export, import and reset commands

use anyhow::{bail, Context, Result};
use std::path::Path;

use edustem::ProgressManager;

use super::print_events;

pub fn export_command(manager: &ProgressManager, output: Option<&Path>) -> Result<()> {
    let snapshot = manager.export_progress()?;
    match output {
        Some(path) => {
            std::fs::write(path, snapshot)
                .with_context(|| format!("Failed to write export: {}", path.display()))?;
            println!("Exported progress to {}", path.display());
        }
        None => println!("{}", snapshot),
    }
    Ok(())
}

pub fn import_command(manager: &ProgressManager, file: &Path) -> Result<()> {
    let data = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read import file: {}", file.display()))?;

    let events = manager
        .import_progress(&data)
        .with_context(|| format!("Failed to import progress from {}", file.display()))?;
    print_events(&events);
    println!("Imported progress from {}", file.display());
    Ok(())
}

pub fn reset_command(manager: &ProgressManager, yes: bool) -> Result<()> {
    if !yes {
        bail!("Refusing to delete all progress without --yes");
    }
    manager.reset_progress();
    println!("Progress reset.");
    Ok(())
}
