use std::path::Path;

use anyhow::{Context, Result};
use colored::*;
use pluginxml_core::PluginDescriptor;

pub fn execute(plugin: &Path) -> Result<()> {
    let descriptor = PluginDescriptor::load(plugin)
        .with_context(|| format!("Failed to load descriptor {}", plugin.display()))?;

    println!("{}", "Goals".bold().underline());

    let goals = descriptor.goals();
    if goals.is_empty() {
        println!("  {}", "No mojos found".dimmed());
        return Ok(());
    }

    for goal in goals {
        println!("{}", goal.blue().bold());
    }

    Ok(())
}
