use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};
use vbridge::commands;
use vbridge::{DiskResourceLocator, FileConfigStore, MysqldumpExporter};

/// Port a live MySQL database to a starter analytics-database project
///
/// Run from a project directory where new files can be generated.
/// Use "config" sub-commands to set and get configuration properties.
#[derive(Parser, Debug)]
#[command(name = "vbridge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file holding persisted properties
    #[arg(long, global = true, default_value = "vbridge.cfg")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// Log to file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Port a live database to a starter project
    Port {
        /// Overwrite existing files
        #[arg(short = 'O', long)]
        overwrite: bool,
    },
    /// Manipulate and view configuration properties
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show one or more configuration properties
    Get {
        /// Property names (prefix match); all properties if omitted
        #[arg(value_name = "KEY")]
        keys: Vec<String>,
    },
    /// Set one or more configuration properties (use KEY=VALUE format)
    Set {
        #[arg(required = true, value_name = "KEY_VALUE")]
        assignments: Vec<String>,
    },
    /// Reset configuration properties to default values
    Reset,
}

fn setup_logging(log_level: &str, log_file: Option<PathBuf>) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time();

    if let Some(log_path) = log_file {
        let file = std::fs::File::create(log_path)?;
        subscriber.with_writer(file).init();
    } else {
        subscriber.with_writer(io::stderr).init();
    }

    Ok(())
}

fn dispatch(cli: Cli) -> vbridge::Result<()> {
    use std::io::Write;

    let mut store = FileConfigStore::open(&cli.config)?;
    let mut out = io::stdout().lock();

    let result = match cli.command {
        Command::Port { overwrite } => {
            let exporter = MysqldumpExporter;
            let locator = DiskResourceLocator::new();
            commands::port::run(
                &mut store,
                &exporter,
                &locator,
                overwrite,
                &cli.config,
                &mut out,
            )
        }
        Command::Config { action } => match action {
            ConfigAction::Get { keys } => commands::config::get(&store, &keys, &mut out),
            ConfigAction::Set { assignments } => {
                commands::config::set(&mut store, &assignments, &mut out)
            }
            ConfigAction::Reset => commands::config::reset(&mut store, &cli.config, &mut out),
        },
    };

    // Flush before main calls process::exit, which skips destructors.
    out.flush()?;
    result
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(&cli.log_level, cli.log_file.clone()) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    // Single exit point: every command error is mapped to a message and an
    // exit code here rather than aborting from inside the handlers.
    if let Err(e) = dispatch(cli) {
        eprintln!("ERROR: {}", e);
        for detail in e.details() {
            eprintln!("   {}", detail);
        }
        process::exit(e.exit_code());
    }
}
