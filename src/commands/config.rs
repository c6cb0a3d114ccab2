//! The `config` verb: get / set / reset persisted properties

use crate::commands::report;
use crate::config::resolver;
use crate::config::schema;
use crate::config::store::ConfigStore;
use crate::types::{BridgeError, Result};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Print persisted properties as `key=value` lines.
///
/// With no names, every pair under the namespace is printed in store order.
/// Each given name is qualified and used as a key-prefix filter; a name
/// matching nothing gets a not-found marker and processing continues.
pub fn get(store: &dyn ConfigStore, names: &[String], out: &mut dyn Write) -> Result<()> {
    if names.is_empty() {
        let prefix = format!("{}.", schema::NAMESPACE);
        for (key, value) in store.query_pairs(Some(&prefix)) {
            writeln!(out, "{}={}", key, value)?;
        }
        return Ok(());
    }

    for name in names {
        let matches = store.query_pairs(Some(&schema::qualify(name)));
        if matches.is_empty() {
            writeln!(out, "{} *not found*", name)?;
        } else {
            for (key, value) in matches {
                writeln!(out, "{}={}", key, value)?;
            }
        }
    }
    Ok(())
}

/// Persist one or more `KEY=VALUE` assignments.
///
/// The whole batch is validated first; any malformed entry fails the
/// command listing every bad argument, and nothing is changed. Bare keys
/// (no `.`) are qualified under the namespace.
pub fn set(store: &mut dyn ConfigStore, assignments: &[String], out: &mut dyn Write) -> Result<()> {
    let malformed: Vec<String> = assignments
        .iter()
        .filter(|a| !a.contains('='))
        .cloned()
        .collect();
    if !malformed.is_empty() {
        return Err(BridgeError::validation(
            "Bad arguments (must be KEY=VALUE format):",
            malformed,
        ));
    }

    for assignment in assignments {
        let Some((key, value)) = assignment.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        let qualified = if key.contains('.') {
            key.to_string()
        } else {
            schema::qualify(key)
        };
        store.set_permanent(&qualified, value)?;
        writeln!(out, "set {}={}", qualified, value)?;
    }
    Ok(())
}

/// Clear every property back to its defaulted/missing state, then display
/// the resulting state and configuration help.
pub fn reset(store: &mut dyn ConfigStore, config_path: &Path, out: &mut dyn Write) -> Result<()> {
    info!("Clearing configuration settings...");
    let cleared = resolver::resolve(store, true)?;
    report::print_resolution(&cleared, true, config_path, out)?;

    let current = resolver::resolve(store, false)?;
    report::print_resolution(&current, false, config_path, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::store::FileConfigStore;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileConfigStore {
        FileConfigStore::open(dir.path().join("vbridge.cfg")).unwrap()
    }

    fn as_text(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn set_qualifies_bare_keys_and_keeps_qualified_keys() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let mut out = Vec::new();

        set(
            &mut store,
            &["package=inventory".to_string(), "other.key=1".to_string()],
            &mut out,
        )
        .unwrap();

        assert_eq!(store.get("vbridge.package"), Some("inventory"));
        assert_eq!(store.get("other.key"), Some("1"));
        let text = as_text(out);
        assert!(text.contains("set vbridge.package=inventory"));
        assert!(text.contains("set other.key=1"));
    }

    #[test]
    fn malformed_assignment_fails_the_whole_batch() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let mut out = Vec::new();

        let err = set(
            &mut store,
            &["ddl_file=custom.sql".to_string(), "bogus".to_string()],
            &mut out,
        )
        .unwrap_err();

        assert_eq!(err.details(), ["bogus"]);
        assert_eq!(store.get("vbridge.ddl_file"), None, "nothing is applied");
        assert!(out.is_empty());
    }

    #[test]
    fn set_trims_whitespace_around_key_and_value() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let mut out = Vec::new();

        set(&mut store, &[" package = my app ".to_string()], &mut out).unwrap();
        assert_eq!(store.get("vbridge.package"), Some("my app"));
    }

    #[test]
    fn get_without_names_lists_namespace_pairs_in_store_order() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set_permanent("vbridge.run_file", "run.sh").unwrap();
        store.set_permanent("vbridge.package", "app").unwrap();
        store.set_permanent("unrelated.key", "x").unwrap();

        let mut out = Vec::new();
        get(&store, &[], &mut out).unwrap();
        assert_eq!(
            as_text(out),
            "vbridge.run_file=run.sh\nvbridge.package=app\n"
        );
    }

    #[test]
    fn get_prints_not_found_marker_and_keeps_going() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set_permanent("vbridge.package", "app").unwrap();

        let mut out = Vec::new();
        get(
            &store,
            &["nope".to_string(), "package".to_string()],
            &mut out,
        )
        .unwrap();
        assert_eq!(as_text(out), "nope *not found*\nvbridge.package=app\n");
    }

    #[test]
    fn get_matches_property_names_by_prefix() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set_permanent("vbridge.ddl_file", "ddl.sql").unwrap();
        store
            .set_permanent("vbridge.deployment_file", "d.xml")
            .unwrap();

        let mut out = Vec::new();
        get(&store, &["d".to_string()], &mut out).unwrap();
        let text = as_text(out);
        assert!(text.contains("vbridge.ddl_file=ddl.sql"));
        assert!(text.contains("vbridge.deployment_file=d.xml"));
    }

    #[test]
    fn reset_reapplies_defaults_and_prints_guidance() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("vbridge.cfg");
        let mut store = FileConfigStore::open(&config_path).unwrap();
        store.set_permanent("vbridge.package", "custom").unwrap();
        store
            .set_permanent("vbridge.connection_string", "mysql://db/x")
            .unwrap();

        let mut out = Vec::new();
        reset(&mut store, &config_path, &mut out).unwrap();

        assert_eq!(store.get("vbridge.package"), Some("voltapp"));
        assert_eq!(store.get("vbridge.connection_string"), Some(""));
        let text = as_text(out);
        assert!(text.contains("applied and saved permanently"));
        assert!(text.contains("must be configured before proceeding"));
    }
}
