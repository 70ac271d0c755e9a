//! Icons command: lists the icon symbol table.

use clap::Args;
use serde::Serialize;

use crate::cli::common::{print_json, CliResult};
use crate::models::Icon;

/// List every accepted icon key and its glyph
#[derive(Debug, Clone, Args)]
pub struct IconsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Serialize)]
struct IconEntry {
    key: &'static str,
    codepoint: Option<String>,
}

impl IconsArgs {
    /// Execute the icons command
    pub fn execute(&self) -> CliResult<()> {
        let entries: Vec<_> = Icon::ALL.iter().map(|icon| entry(*icon)).collect();

        if self.json {
            return print_json(&entries);
        }

        println!("{} icons:", entries.len());
        for entry in &entries {
            match &entry.codepoint {
                Some(codepoint) => println!("  {:<12} {codepoint}", entry.key),
                None => println!("  {:<12} (no glyph)", entry.key),
            }
        }
        Ok(())
    }
}

fn entry(icon: Icon) -> IconEntry {
    IconEntry {
        key: icon.key(),
        codepoint: icon
            .symbol()
            .chars()
            .next()
            .map(|c| format!("U+{:04X}", u32::from(c))),
    }
}
