//! Config command - prints or writes the default settings

use anyhow::{Context, Result};
use sparkfall_core::SimConfig;
use std::path::Path;

pub fn run(output: Option<&Path>) -> Result<()> {
    let config = SimConfig::default();
    match output {
        Some(path) => {
            config
                .save(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote default config to {}", path.display());
        }
        None => print!("{}", config.to_toml_string()?),
    }
    Ok(())
}
