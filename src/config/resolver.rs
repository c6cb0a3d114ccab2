//! Property resolution against the persisted store
//!
//! Resolution walks the property registry in lexicographic order, applies
//! and persists defaults for unset properties, and either yields a fully
//! populated [`ResolvedConfig`] or reports which required properties are
//! still missing. Resolution is intentionally not read-only: defaulting is
//! durable, so repeated passes over the same store converge on the same
//! persisted state and the same outcome.

use crate::config::schema;
use crate::config::store::ConfigStore;
use crate::types::Result;
use std::collections::BTreeMap;
use tracing::debug;

/// A required property with no persisted value.
#[derive(Debug, Clone, Copy)]
pub struct MissingProperty {
    pub name: &'static str,
    pub description: &'static str,
}

/// A property whose default was applied and saved during this pass.
#[derive(Debug, Clone, Copy)]
pub struct AppliedDefault {
    pub name: &'static str,
    pub value: &'static str,
}

/// One resolved value per recognized property. Constructed only when every
/// property has a value; there is no partially-valid state.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub connection_string: String,
    pub ddl_file: String,
    pub deployment_file: String,
    pub package: String,
    pub partition_table: String,
    pub run_file: String,
    pub source_type: String,
}

impl ResolvedConfig {
    fn from_values(mut values: BTreeMap<&'static str, String>) -> Self {
        let mut take = |name| values.remove(name).unwrap_or_default();
        Self {
            connection_string: take("connection_string"),
            ddl_file: take("ddl_file"),
            deployment_file: take("deployment_file"),
            package: take("package"),
            partition_table: take("partition_table"),
            run_file: take("run_file"),
            source_type: take("source_type"),
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Resolved(ResolvedConfig),
    Missing(Vec<MissingProperty>),
}

/// Result of one resolution pass: the outcome plus any defaults that were
/// applied and persisted along the way.
#[derive(Debug)]
pub struct Resolution {
    pub defaulted: Vec<AppliedDefault>,
    pub outcome: Outcome,
}

impl Resolution {
    pub fn config(&self) -> Option<&ResolvedConfig> {
        match &self.outcome {
            Outcome::Resolved(config) => Some(config),
            Outcome::Missing(_) => None,
        }
    }
}

/// Resolve every recognized property against the store.
///
/// With `reset`, every property is treated as unset: defaults are re-applied
/// and required properties are cleared, and the outcome is always `Missing`
/// so the user is prompted to re-configure, even when nothing is actually
/// missing afterwards.
pub fn resolve(store: &mut dyn ConfigStore, reset: bool) -> Result<Resolution> {
    let mut values: BTreeMap<&'static str, String> = BTreeMap::new();
    let mut missing: Vec<MissingProperty> = Vec::new();
    let mut defaulted: Vec<AppliedDefault> = Vec::new();

    for def in schema::definitions() {
        let key = schema::qualify(def.name);
        let stored = store.get(&key).map(str::to_string);
        let unset = reset || stored.as_deref().map_or(true, str::is_empty);

        if unset {
            match def.default {
                Some(default) => {
                    debug!("Applying default {}={}", key, default);
                    store.set_permanent(&key, default)?;
                    defaulted.push(AppliedDefault {
                        name: def.name,
                        value: default,
                    });
                    values.insert(def.name, default.to_string());
                }
                None => {
                    // Persist an empty value so the key exists for later
                    // `config get` and hand-editing.
                    store.set_permanent(&key, "")?;
                    missing.push(MissingProperty {
                        name: def.name,
                        description: def.description,
                    });
                }
            }
        } else if let Some(value) = stored {
            values.insert(def.name, value);
        }
    }

    let outcome = if reset || !missing.is_empty() {
        Outcome::Missing(missing)
    } else {
        Outcome::Resolved(ResolvedConfig::from_values(values))
    };

    Ok(Resolution { defaulted, outcome })
}
