//! GLIDE migration CLI.
//!
//! Command-line interface for analysing an ioredis or node-redis code base
//! against the Valkey GLIDE API surface.
//!
//! # Architecture
//!
//! The CLI is organized around subcommands:
//! - `parse` - Parse declaration files into method signatures
//! - `categorize` - Assign command families to method names
//! - `equivalent` - Look up the GLIDE equivalent of a client symbol
//! - `diff` - Compare a symbol's arity and types against GLIDE
//! - `validate` - Detect mapping drift against the GLIDE sources
//! - `ingest` - Build the command catalog in batches
//! - `catalog` - Show the stored command catalog
//! - `completions` - Generate shell completions
//!
//! # Examples
//!
//! ```bash
//! # What does hmset become?
//! glide-migrate equivalent ioredis hmset
//!
//! # Check every mapping against the published GLIDE sources
//! glide-migrate validate --output-dir ./reports
//!
//! # Ingest the command list 50 at a time
//! glide-migrate ingest --start 0 --count 50
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use glide_migrate_cli::Context;
use glide_migrate_cli::commands::{self, exit_code_for, ingest::IngestOptions};
use glide_migrate_core::cli::{ExitCode, OutputFormat};
use glide_migrate_core::{ClientKind, MigrationConfig};
use glide_migrate_ingest::{DEFAULT_BATCH_SIZE, IngestRequest};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Valkey GLIDE migration analysis.
///
/// Maps ioredis and node-redis calls to their GLIDE equivalents and checks
/// those mappings against the real GLIDE sources.
#[derive(Parser, Debug)]
#[command(name = "glide-migrate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    format: String,

    /// Configuration file (defaults to $GLIDE_MIGRATE_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse method declarations into signatures.
    ///
    /// Reads a `.d.ts` or `.ts` file (or URL) and prints each method with
    /// its arity, return type and command family.
    ///
    /// # Examples
    ///
    /// ```bash
    /// glide-migrate parse ./node_modules/ioredis/built/utils/RedisCommander.d.ts
    /// glide-migrate parse --client glide
    /// ```
    Parse {
        /// Declaration file path or URL
        #[arg(required_unless_present = "client")]
        input: Option<String>,

        /// Fetch the configured declarations of this client instead
        #[arg(long)]
        client: Option<ClientKind>,

        /// Label recorded as the declaring file
        #[arg(long)]
        declaring_file: Option<String>,
    },

    /// Assign a command family to each method name.
    Categorize {
        /// Method names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Look up the GLIDE equivalent of a client symbol.
    ///
    /// Exits with status 1 when the symbol has no known mapping.
    Equivalent {
        /// Client whose dataset is searched (ioredis, node-redis, glide)
        client: ClientKind,

        /// Exact, case-sensitive symbol
        symbol: String,
    },

    /// Compare a source symbol against the GLIDE methods it maps to.
    ///
    /// Exits with status 5 when an arity mismatch is found.
    Diff {
        /// Source client (ioredis or node-redis)
        client: ClientKind,

        /// Symbol to diff
        symbol: String,

        /// Source declarations file or URL (defaults to the configured URL)
        #[arg(long)]
        source: Option<String>,

        /// GLIDE declarations file or URL (defaults to the configured URL)
        #[arg(long)]
        glide: Option<String>,
    },

    /// Validate every mapping against the GLIDE sources.
    ///
    /// Writes `glide-validation.json`, `glide-validation.md` and
    /// `glide-methods.json` to the output directory. Exits with status 5
    /// when any mapping references a method the sources do not contain.
    Validate {
        /// GLIDE source files or URLs (defaults to the configured sources)
        #[arg(long = "source", num_args = 1)]
        sources: Vec<String>,

        /// Artifact directory (defaults to the configured output directory)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Print the report without writing artifacts
        #[arg(long)]
        no_write: bool,
    },

    /// Ingest one batch of documented commands into the catalog.
    ///
    /// # Examples
    ///
    /// ```bash
    /// glide-migrate ingest --start 0 --count 50
    /// glide-migrate ingest --start 50 --count 50
    /// glide-migrate ingest --refresh --doc ./commands.html --source ./BaseClient.ts
    /// ```
    Ingest {
        /// Index of the first command to process
        #[arg(long, default_value_t = 0)]
        start: usize,

        /// Commands to process (1-50)
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        count: usize,

        /// Discard the stored catalog instead of merging into it
        #[arg(long)]
        refresh: bool,

        /// Commands documentation file or URL
        #[arg(long)]
        doc: Option<String>,

        /// GLIDE source files or URLs (defaults to the configured sources)
        #[arg(long = "source", num_args = 1)]
        sources: Vec<String>,

        /// Catalog directory (defaults to the configured output directory)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Show the stored command catalog.
    Catalog {
        /// Only show this family
        #[arg(long)]
        family: Option<String>,

        /// Only show commands with a matched GLIDE method
        #[arg(long)]
        validated_only: bool,

        /// Catalog directory (defaults to the configured output directory)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Generate shell completions.
    ///
    /// # Examples
    ///
    /// ```bash
    /// glide-migrate completions bash > /etc/bash_completion.d/glide-migrate
    /// ```
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let output_format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let exit_code = match run(cli.command, cli.config.as_deref(), output_format).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            exit_code_for(&err)
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Initializes logging.
///
/// Logs go to stderr so stdout carries only command output.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Loads configuration and routes the command to its handler.
async fn run(command: Commands, config: Option<&Path>, format: OutputFormat) -> Result<ExitCode> {
    if let Commands::Completions { shell } = command {
        use clap::CommandFactory;
        let mut cmd = Cli::command();
        return commands::completions::run(shell, &mut cmd);
    }

    let config = MigrationConfig::load(config)?;
    let ctx = Context::new(config, format)?;

    match command {
        Commands::Parse {
            input,
            client,
            declaring_file,
        } => commands::parse::run(&ctx, input.as_deref(), client, declaring_file).await,
        Commands::Categorize { names } => commands::categorize::run(&ctx, &names),
        Commands::Equivalent { client, symbol } => {
            commands::equivalent::run(&ctx, client, &symbol)
        }
        Commands::Diff {
            client,
            symbol,
            source,
            glide,
        } => commands::diff::run(&ctx, client, &symbol, source.as_deref(), glide.as_deref()).await,
        Commands::Validate {
            sources,
            output_dir,
            no_write,
        } => commands::validate::run(&ctx, &sources, output_dir, !no_write).await,
        Commands::Ingest {
            start,
            count,
            refresh,
            doc,
            sources,
            output_dir,
        } => {
            let options = IngestOptions {
                request: IngestRequest {
                    start,
                    count,
                    refresh,
                },
                doc,
                sources,
                output_dir,
            };
            commands::ingest::run(&ctx, options).await
        }
        Commands::Catalog {
            family,
            validated_only,
            output_dir,
        } => commands::catalog::run(&ctx, output_dir, family.as_deref(), validated_only).await,
        // Handled before configuration is loaded.
        Commands::Completions { .. } => Ok(ExitCode::SUCCESS),
    }
}
