//! Static registry of recognized configuration properties
//!
//! Every persisted setting the tool understands is declared here, with a
//! human description and an optional default. Properties without a default
//! must be configured by the user before the port pipeline can run.

/// Namespace prefix qualifying every persisted key owned by this tool.
pub const NAMESPACE: &str = "vbridge";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub default: Option<&'static str>,
}

/// The fixed property registry, sorted lexicographically by name so every
/// resolution pass iterates in the same order and diagnostics are
/// reproducible.
const DEFINITIONS: &[PropertyDefinition] = &[
    PropertyDefinition {
        name: "connection_string",
        description: "database connection string",
        default: None,
    },
    PropertyDefinition {
        name: "ddl_file",
        description: "generated DDL file name",
        default: Some("ddl.sql"),
    },
    PropertyDefinition {
        name: "deployment_file",
        description: "generated deployment file name",
        default: Some("deployment.xml"),
    },
    PropertyDefinition {
        name: "package",
        description: "package/application name",
        default: Some("voltapp"),
    },
    PropertyDefinition {
        name: "partition_table",
        description: "table to use for partitioning analysis",
        default: None,
    },
    PropertyDefinition {
        name: "run_file",
        description: "generated run script",
        default: Some("run.sh"),
    },
    PropertyDefinition {
        name: "source_type",
        description: "source database type, e.g. \"mysql\"",
        default: Some("mysql"),
    },
];

/// All recognized property definitions in lexicographic name order.
pub fn definitions() -> &'static [PropertyDefinition] {
    DEFINITIONS
}

/// Look up a property definition by name.
pub fn lookup(name: &str) -> Option<&'static PropertyDefinition> {
    DEFINITIONS.iter().find(|d| d.name == name)
}

/// Generate a persisted-store key from a property name.
pub fn qualify(name: &str) -> String {
    format!("{}.{}", NAMESPACE, name)
}
