//! Rule table listing command.
//!
//! Prints the full ordered patch set so it can be reviewed as data:
//! index, name, group, matcher kind, scope, and guard/disabled markers.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::Config;
use crate::log;
use crate::patch::{DEFAULT_RULES, Group};
use crate::utils::plural_count;

/// Print the ordered rule table.
pub fn list_rules(config: &Config) -> Result<()> {
    let mut enabled = 0usize;

    for (index, rule) in DEFAULT_RULES.iter().enumerate() {
        let active = match rule.group {
            Group::Accessibility => config.rules.accessibility,
            Group::Performance => config.rules.performance,
        };
        if active {
            enabled += 1;
        }

        // Pad before coloring; ansi codes would break the column widths.
        let name = format!("{:<28}", rule.name);
        let mut line = format!(
            "{}{:>2}{} {} {:<13} {:<7} {:<5}",
            "[".dimmed(),
            index + 1,
            "]".dimmed(),
            name.cyan(),
            rule.group.as_str(),
            rule.kind(),
            rule.scope.as_str(),
        );
        if rule.guard.is_some() {
            line.push_str(&format!(" {}", "guarded".yellow()));
        }
        if !active {
            line.push_str(&format!(" {}", "(disabled)".dimmed()));
        }
        println!("{line}");
    }

    log!("rules"; "{}, {} enabled", plural_count(DEFAULT_RULES.len(), "rule"), enabled);
    Ok(())
}
