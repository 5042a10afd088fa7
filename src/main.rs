//! kometro: document review, selection and export for the Kometro dashboard.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use kometro_docs::{
    api::{AdminClient, DocumentFilter},
    cli::{
        self, parse_date_arg, parse_status_arg, should_use_color, DashboardOptions, ExportOptions,
        ListOptions, OutputFormat,
    },
    config::{self, AppConfig, Validatable},
    model::{DocumentId, DocumentStatus, NewDocument},
    review::{Clock, CriticalAnalysisClassifier, FixedClock, SystemClock},
};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kometro")]
#[command(version)]
#[command(about = "Document review, selection and export for the Kometro dashboard", long_about = None)]
#[command(after_help = "EXAMPLES:
    # First page of available documents
    kometro list --status disponivel

    # Export documents 3 and 7 to a file
    kometro export 3 7 -o documentos.csv

    # Export the whole second page into the configured export directory
    kometro export --all-on-page 2 --dir exports/

    # Critical-analysis stage of a date
    kometro stage 2025-01-15")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to a config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Admin API base URL
    #[arg(long, global = true, env = "KOMETRO_API_URL")]
    api_url: Option<String>,

    /// API token
    #[arg(long, global = true, env = "KOMETRO_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ListArgs {
    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Rows per page (5, 10, 25, 50 or 100)
    #[arg(short, long)]
    rows: Option<usize>,

    /// Filter by document code
    #[arg(long)]
    code: Option<String>,

    /// Filter by title
    #[arg(long)]
    title: Option<String>,

    /// Filter by status code
    #[arg(long, value_parser = parse_status_arg)]
    status: Option<DocumentStatus>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Evaluate critical-analysis stages as of this date
    #[arg(long, value_parser = parse_date_arg)]
    today: Option<NaiveDate>,
}

#[derive(Args)]
struct ExportArgs {
    /// Ids of the documents to export
    #[arg(conflicts_with = "all_on_page")]
    ids: Vec<DocumentId>,

    /// Export every document on this page (starting at 1)
    #[arg(long, value_name = "PAGE")]
    all_on_page: Option<usize>,

    /// Write the export to this file
    #[arg(short, long, conflicts_with = "dir")]
    output: Option<PathBuf>,

    /// Save under a timestamped name in this directory
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Print the export as a table
    #[arg(long, conflicts_with_all = ["output", "dir"])]
    preview: bool,
}

#[derive(Args)]
struct CreateArgs {
    /// Document code
    #[arg(long)]
    code: String,

    /// Document title
    #[arg(long)]
    title: String,

    /// Initial status code
    #[arg(long, value_parser = parse_status_arg)]
    status: Option<DocumentStatus>,

    /// Validity date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    validity: Option<NaiveDate>,
}

#[derive(Args)]
struct DashboardArgs {
    /// JSON file with revisions awaiting approval
    #[arg(long)]
    revisions: Option<PathBuf>,

    /// JSON file with instruments
    #[arg(long)]
    instruments: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Evaluate critical-analysis stages as of this date
    #[arg(long, value_parser = parse_date_arg)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// List documents one page at a time
    List(ListArgs),

    /// Export documents as CSV
    Export(ExportArgs),

    /// Delete documents
    Delete {
        /// Ids of the documents to delete
        #[arg(required = true)]
        ids: Vec<DocumentId>,
    },

    /// Register a new document
    Create(CreateArgs),

    /// Show the critical-analysis stage of a date
    Stage {
        /// Date of the last critical analysis
        #[arg(value_parser = parse_date_arg)]
        last_analysis: NaiveDate,

        /// Reference date instead of today
        #[arg(long, value_parser = parse_date_arg)]
        today: Option<NaiveDate>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Render dashboard cards from exported JSON
    Dashboard(DashboardArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .kometro.yaml in the current directory
    Init,
}

fn clock(today: Option<NaiveDate>) -> Box<dyn Clock> {
    match today {
        Some(date) => Box::new(FixedClock(date)),
        None => Box::new(SystemClock),
    }
}

/// Config file merged with command-line overrides, validated.
fn effective_config(cli: &Cli) -> Result<AppConfig> {
    let mut overrides = AppConfig::builder().token(cli.token.clone());
    if let Some(url) = &cli.api_url {
        overrides = overrides.base_url(url.clone());
    }
    let (config, loaded_from) =
        AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides.build())
            .context("failed to load configuration")?;
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid configuration:\n  {}", messages.join("\n  "));
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let color = should_use_color(cli.no_color) && io::stdout().is_terminal();
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Commands::List(args) => {
            let config = effective_config(&cli)?;
            let client = AdminClient::new(config.api.to_client_config())?;
            let options = ListOptions {
                page: args.page,
                rows_per_page: args.rows,
                filter: DocumentFilter {
                    code: args.code.clone(),
                    title: args.title.clone(),
                    status: args.status,
                },
                format: args.format,
                color,
            };
            cli::run_list(&client, &config, clock(args.today), &options, &mut stdout)
        }

        Commands::Export(args) => {
            let config = effective_config(&cli)?;
            let client = AdminClient::new(config.api.to_client_config())?;
            let options = ExportOptions {
                ids: args.ids.clone(),
                all_on_page: args.all_on_page,
                output: args.output.clone(),
                dir: args.dir.clone(),
                preview: args.preview,
            };
            cli::run_export(&client, &config, SystemClock, &options, &mut stdout)
        }

        Commands::Delete { ids } => {
            let config = effective_config(&cli)?;
            let client = AdminClient::new(config.api.to_client_config())?;
            cli::run_delete(&client, ids, &mut stdout)
        }

        Commands::Create(args) => {
            let config = effective_config(&cli)?;
            let client = AdminClient::new(config.api.to_client_config())?;
            let document = NewDocument {
                status: args.status,
                validity_date: args.validity,
                ..NewDocument::new(args.code.clone(), args.title.clone())
            };
            cli::run_create(&client, &document, &mut stdout)
        }

        Commands::Stage {
            last_analysis,
            today,
            format,
        } => {
            let config = effective_config(&cli)?;
            let classifier =
                CriticalAnalysisClassifier::new(config.review.critical_analysis, clock(*today));
            cli::run_stage(&classifier, *last_analysis, *format, color, &mut stdout)
        }

        Commands::Dashboard(args) => {
            let config = effective_config(&cli)?;
            let classifier =
                CriticalAnalysisClassifier::new(config.review.critical_analysis, clock(args.today));
            let options = DashboardOptions {
                revisions: args.revisions.clone(),
                instruments: args.instruments.clone(),
                format: args.format,
                color,
            };
            cli::run_dashboard(&classifier, &options, &mut stdout)
        }

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "kometro", &mut stdout);
            Ok(())
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema()?;
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = config::load_or_default(cli.config.as_deref())
                    .context("failed to load configuration")?;
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                let search_paths = [
                    std::env::current_dir().ok(),
                    config::user_config_dir(),
                    dirs::home_dir(),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {}", path.display());
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in config::CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".kometro.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}
