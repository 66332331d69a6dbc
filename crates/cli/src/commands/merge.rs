use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::*;
use pluginxml_core::{bare_goal, merge_mojo, PluginDescriptor};

/// Merge inherited mojo definitions into `plugin`, rewriting it in place.
///
/// Each requested goal is looked up verbatim in the plugin descriptor, and
/// its bare form (qualifier stripped) in the super descriptor. A goal with
/// no inherited counterpart is skipped: "super mojo missing" means "nothing
/// to inherit", not a failure.
pub fn execute(plugin: &Path, super_descriptor: &Path, goals: &[String]) -> Result<()> {
    let mut descriptor = PluginDescriptor::load(plugin)
        .with_context(|| format!("Failed to load descriptor {}", plugin.display()))?;
    let parent = PluginDescriptor::load(super_descriptor).with_context(|| {
        format!("Failed to load super descriptor {}", super_descriptor.display())
    })?;

    let goals: Vec<String> = if goals.is_empty() {
        descriptor.goals().iter().map(|goal| goal.to_string()).collect()
    } else {
        goals.to_vec()
    };

    let mut merged = 0;
    for goal in &goals {
        let Some(super_mojo) = parent.find_mojo(bare_goal(goal)) else {
            println!("{} {}", goal.cyan(), "nothing to inherit".dimmed());
            continue;
        };

        let Some(mojo) = descriptor.find_mojo_mut(goal) else {
            bail!("Goal '{}' not found in {}", goal, plugin.display());
        };

        merge_mojo(mojo, super_mojo);
        merged += 1;
        println!("{} {}", bare_goal(goal).blue().bold(), "merged".green());
    }

    if merged > 0 {
        descriptor
            .save()
            .with_context(|| format!("Failed to write descriptor {}", plugin.display()))?;
    }

    println!(
        "Merged {} of {} goal(s) into {}",
        merged,
        goals.len(),
        plugin.display()
    );

    Ok(())
}
