//! User-facing resolution reports
//!
//! Mirrors what the user needs after a resolution pass: which properties
//! still must be configured (with descriptions), which defaults were just
//! applied and saved, and concrete `config set` invocations to fix the rest.

use crate::config::{Outcome, Resolution};
use crate::types::Result;
use std::io::Write;
use std::path::Path;

const COMMAND_NAME: &str = "vbridge";

/// Print the message blocks for one resolution pass.
///
/// During a `reset` pass only the applied-defaults block is shown; the
/// missing table and help text belong to the follow-up normal pass.
pub(crate) fn print_resolution(
    resolution: &Resolution,
    reset: bool,
    config_path: &Path,
    out: &mut dyn Write,
) -> Result<()> {
    let missing: &[_] = match &resolution.outcome {
        Outcome::Missing(missing) if !reset => missing,
        _ => &[],
    };

    let mut blocks: Vec<String> = Vec::new();

    if !missing.is_empty() {
        let plural = if missing.len() > 1 { "s" } else { "" };
        let rows: Vec<(&str, &str)> =
            missing.iter().map(|m| (m.name, m.description)).collect();
        blocks.push(format!(
            "The following setting{} must be configured before proceeding:\n\n{}",
            plural,
            format_table(&rows, ("PROPERTY", "DESCRIPTION"))
        ));
    }

    if !resolution.defaulted.is_empty() {
        let plural = if resolution.defaulted.len() > 1 {
            "s were"
        } else {
            " was"
        };
        let rows: Vec<(&str, &str)> = resolution
            .defaulted
            .iter()
            .map(|d| (d.name, d.value))
            .collect();
        blocks.push(format!(
            "The following setting default{} applied and saved permanently:\n\n{}",
            plural,
            format_table(&rows, ("PROPERTY", "VALUE"))
        ));
    }

    if !missing.is_empty() {
        let samples: Vec<&str> = missing.iter().map(|m| m.name).collect();
        blocks.push(config_help(&samples, config_path));
    }

    for block in &blocks {
        writeln!(out)?;
        writeln!(out, "{}", block)?;
    }
    if !blocks.is_empty() {
        writeln!(out)?;
    }
    Ok(())
}

/// Two-column table with headings, indented three spaces, columns separated
/// by two spaces.
fn format_table(rows: &[(&str, &str)], headings: (&str, &str)) -> String {
    let width = rows
        .iter()
        .map(|(name, _)| name.len())
        .chain([headings.0.len()])
        .max()
        .unwrap_or(0);
    let mut table = format!("   {:width$}  {}", headings.0, headings.1);
    for (name, value) in rows {
        table.push('\n');
        table.push_str(&format!("   {:width$}  {}", name, value));
    }
    table
}

fn config_help(samples: &[&str], config_path: &Path) -> String {
    let (samples, paren) = if samples.is_empty() {
        (vec!["name"], "")
    } else {
        (samples.to_vec(), " (using actual property name)")
    };

    let mut help = String::new();
    help.push_str("Use the \"config\" verb to modify and view properties as follows.\n\n");
    help.push_str(&format!("To set a property{}:\n", paren));
    for name in &samples {
        help.push_str(&format!(
            "   {} config set {}={}_VALUE\n",
            COMMAND_NAME,
            name,
            name.to_uppercase()
        ));
    }
    help.push_str(&format!(
        "\nTo display one, many, or all properties:\n\
         \t{cmd} config get name\n\
         \t{cmd} config get name1 name2 ...\n\
         \t{cmd} config get\n\n\
         To get \"config\" command help:\n\
         \t{cmd} config --help\n\n\
         You can also edit \"{path}\" directly in a text editor.",
        cmd = COMMAND_NAME,
        path = config_path.display()
    ));
    help
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolver::resolve;
    use crate::config::store::{ConfigStore, FileConfigStore};
    use tempfile::TempDir;

    #[test]
    fn first_resolution_report_shows_missing_defaults_and_help() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("vbridge.cfg");
        let mut store = FileConfigStore::open(&config_path).unwrap();
        let resolution = resolve(&mut store, false).unwrap();

        let mut out = Vec::new();
        print_resolution(&resolution, false, &config_path, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("The following settings must be configured before proceeding:"));
        assert!(text.contains("PROPERTY"));
        assert!(text.contains("connection_string  database connection string"));
        assert!(text.contains("The following setting defaults were applied and saved permanently:"));
        assert!(text.contains("ddl_file         ddl.sql"));
        assert!(text.contains("vbridge config set connection_string=CONNECTION_STRING_VALUE"));
    }

    #[test]
    fn reset_pass_report_omits_missing_table_and_help() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("vbridge.cfg");
        let mut store = FileConfigStore::open(&config_path).unwrap();
        let resolution = resolve(&mut store, true).unwrap();

        let mut out = Vec::new();
        print_resolution(&resolution, true, &config_path, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(!text.contains("must be configured"));
        assert!(text.contains("applied and saved permanently"));
    }

    #[test]
    fn singular_phrasing_for_one_missing_property() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("vbridge.cfg");
        let mut store = FileConfigStore::open(&config_path).unwrap();
        resolve(&mut store, false).unwrap();
        store
            .set_permanent("vbridge.partition_table", "orders")
            .unwrap();
        let resolution = resolve(&mut store, false).unwrap();

        let mut out = Vec::new();
        print_resolution(&resolution, false, &config_path, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("The following setting must be configured before proceeding:"));
        assert!(!text.contains("partition_table  "));
    }
}
