//! The `port` command: generate a starter project from a live database
//!
//! Three artifacts are produced in order: the exported DDL, a copied
//! deployment descriptor, and a rendered run script. Steps are sequential
//! and non-transactional: each writes a complete, independently useful
//! file, and a failure partway through leaves earlier artifacts in place
//! for the user to keep after fixing the cause.

use crate::commands::report;
use crate::config::resolver::{self, Outcome, ResolvedConfig};
use crate::config::store::ConfigStore;
use crate::export::SchemaExporter;
use crate::resources::ResourceLocator;
use crate::types::{BridgeError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

const DEPLOYMENT_TEMPLATE: &str = "template/deployment.xml";
const RUN_TEMPLATE: &str = "template/run.sh";

/// Placeholder in the run-script template replaced by the `package`
/// property.
const APPNAME_PLACEHOLDER: &str = "appname";

pub struct GenerationPipeline<'a> {
    exporter: &'a dyn SchemaExporter,
    locator: &'a dyn ResourceLocator,
}

impl<'a> GenerationPipeline<'a> {
    pub fn new(exporter: &'a dyn SchemaExporter, locator: &'a dyn ResourceLocator) -> Self {
        Self { exporter, locator }
    }

    /// Run the three generation steps against a resolved configuration.
    ///
    /// Returns the paths generated so far; on failure the error names every
    /// offending item and files from completed steps stay on disk.
    pub fn generate(&self, config: &ResolvedConfig, overwrite: bool) -> Result<Vec<PathBuf>> {
        let source_type = config.source_type.to_lowercase();
        if source_type != "mysql" {
            return Err(BridgeError::validation(
                format!("Unsupported source type \"{}\".", source_type),
                vec!["Only \"mysql\" is valid.".to_string()],
            ));
        }

        let targets = [&config.ddl_file, &config.deployment_file, &config.run_file];
        let conflicts: Vec<String> = targets
            .iter()
            .filter(|path| Path::new(path.as_str()).exists())
            .map(|path| path.to_string())
            .collect();
        if !conflicts.is_empty() && !overwrite {
            return Err(BridgeError::validation(
                "Output files exist, delete or use the -O or --overwrite options.",
                conflicts,
            ));
        }

        let mut generated: Vec<PathBuf> = Vec::new();

        // Step 1: schema export.
        info!("Generating \"{}\"...", config.ddl_file);
        let ddl_path = PathBuf::from(&config.ddl_file);
        {
            let mut sink = File::create(&ddl_path).map_err(|e| BridgeError::Write {
                path: ddl_path.clone(),
                source: e,
            })?;
            // The handle closes on every exit path; an export failure leaves
            // whatever was written so far on disk.
            self.exporter.export(
                &config.connection_string,
                Some(&config.partition_table),
                &mut sink,
            )?;
        }
        generated.push(ddl_path);

        // Step 2: deployment descriptor copy.
        info!("Generating \"{}\"...", config.deployment_file);
        let src = self.locator.require(DEPLOYMENT_TEMPLATE)?;
        let dest = PathBuf::from(&config.deployment_file);
        fs::copy(&src, &dest).map_err(|e| BridgeError::Copy {
            src,
            dest: dest.clone(),
            source: e,
        })?;
        generated.push(dest);

        // Step 3: run-script render.
        info!("Generating \"{}\"...", config.run_file);
        let src = self.locator.require(RUN_TEMPLATE)?;
        let template = fs::read_to_string(&src)?;
        let rendered = safe_substitute(&template, APPNAME_PLACEHOLDER, &config.package);
        let run_path = PathBuf::from(&config.run_file);
        fs::write(&run_path, rendered).map_err(|e| BridgeError::Write {
            path: run_path.clone(),
            source: e,
        })?;
        generated.push(run_path);

        Ok(generated)
    }
}

/// Substitute `$name` and `${name}` with `value`, leaving any other
/// placeholder untouched. `$$` collapses to a literal `$`.
fn safe_substitute(template: &str, name: &str, value: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        if let Some(after_escape) = after.strip_prefix('$') {
            out.push('$');
            rest = after_escape;
        } else if let Some(after_brace) = after.strip_prefix('{') {
            match after_brace.find('}') {
                Some(end) if &after_brace[..end] == name => {
                    out.push_str(value);
                    rest = &after_brace[end + 1..];
                }
                _ => {
                    out.push('$');
                    rest = after;
                }
            }
        } else {
            let ident_len = after
                .bytes()
                .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
                .count();
            if ident_len > 0 && &after[..ident_len] == name {
                out.push_str(value);
                rest = &after[ident_len..];
            } else {
                out.push('$');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Entry point for the `port` verb: resolve configuration, report state,
/// and run the pipeline.
pub fn run(
    store: &mut dyn ConfigStore,
    exporter: &dyn SchemaExporter,
    locator: &dyn ResourceLocator,
    overwrite: bool,
    config_path: &Path,
    out: &mut dyn Write,
) -> Result<()> {
    let resolution = resolver::resolve(store, false)?;
    report::print_resolution(&resolution, false, config_path, out)?;

    let config = match &resolution.outcome {
        Outcome::Resolved(config) => config,
        Outcome::Missing(missing) => {
            return Err(BridgeError::validation(
                "Configuration is incomplete.",
                missing
                    .iter()
                    .map(|m| format!("{} ({})", m.name, m.description))
                    .collect(),
            ));
        }
    };

    let pipeline = GenerationPipeline::new(exporter, locator);
    let generated = pipeline.generate(config, overwrite)?;

    writeln!(out, "Project files were successfully generated.")?;
    writeln!(out, "A thorough examination of their contents is recommended.")?;
    for path in &generated {
        writeln!(out, "   {}", path.display())?;
    }
    Ok(())
}
