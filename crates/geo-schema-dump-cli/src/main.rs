//! geo-schema-dump CLI - Dump table metadata as schema definitions.

use clap::{Parser, Subcommand};
use geo_schema_dump::{Config, DumpError, SchemaDumper, SnapshotSource};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "geo-schema-dump")]
#[command(about = "Dump table metadata, spatial columns included, as schema definitions")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "warn")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump the schema described by a metadata snapshot
    Dump {
        /// Snapshot file (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Write the dump here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Dump only these tables, without the schema header
        #[arg(long = "table")]
        tables: Vec<String>,
    },

    /// Show how raw SQL types are classified
    Classify {
        /// Raw SQL types, e.g. varchar(255) MULTIPOLYGON
        #[arg(required = true)]
        sql_types: Vec<String>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), DumpError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format);

    let config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => Config::default(),
    };
    let dumper = SchemaDumper::from_config(&config)?;

    match cli.command {
        Commands::Dump {
            snapshot,
            output,
            tables,
        } => {
            let source = SnapshotSource::load(&snapshot)?;
            info!("Loaded snapshot from {:?}", snapshot);

            let mut out: Box<dyn Write> = match output {
                Some(path) => Box::new(BufWriter::new(File::create(path)?)),
                None => Box::new(BufWriter::new(std::io::stdout().lock())),
            };

            if tables.is_empty() {
                dumper.dump(&source, &mut out)?;
            } else {
                for table in &tables {
                    dumper.dump_table(table, &source, &mut out)?;
                }
            }
            out.flush()?;
        }

        Commands::Classify { sql_types } => {
            for sql_type in &sql_types {
                println!("{}\t{}", sql_type, dumper.classifier().classify(sql_type));
            }
        }
    }

    Ok(())
}

/// Logs go to stderr; stdout carries the dump.
fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
