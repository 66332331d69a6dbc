use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

/// pluginxml - Maven plugin descriptor inheritance tool
#[derive(Parser)]
#[command(name = "pluginxml")]
#[command(about = "Merge inherited mojo definitions into Maven plugin descriptors")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge inherited mojos from a super descriptor into a plugin descriptor
    Merge {
        /// Path to the plugin.xml to merge into (rewritten in place)
        plugin: PathBuf,
        /// Path to the super descriptor to inherit from
        #[arg(short = 's', long = "super")]
        super_descriptor: PathBuf,
        /// Goals to merge; defaults to every goal with an inherited counterpart
        #[arg(short, long)]
        goal: Vec<String>,
    },
    /// List the goals a plugin descriptor exposes
    Goals {
        /// Path to the plugin.xml to inspect
        plugin: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Merge {
            plugin,
            super_descriptor,
            goal,
        } => commands::merge::execute(&plugin, &super_descriptor, &goal),
        Commands::Goals { plugin } => commands::goals::execute(&plugin),
    }
}
