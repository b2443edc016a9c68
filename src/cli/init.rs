//! Init command implementation

use anyhow::Result;
use std::path::Path;

use edustem::Config;

/// Write a default config file at `path`
pub fn init_command(path: &Path, force: bool) -> Result<()> {
    if Config::init_file(path, force)? {
        println!("Created {}", path.display());
    } else {
        println!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    Ok(())
}
