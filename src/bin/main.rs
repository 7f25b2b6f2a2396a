//! greg-reports CLI - run change and history reports against the greg schema
//!
//! Usage:
//!   greg-reports list
//!   greg-reports manifest <report>
//!   greg-reports run <report> [--days N | --day D --month M --year Y] [options]
//!
//! Examples:
//!   greg-reports run aendringer --days 30 --out-dir ./rapporter
//!   greg-reports run historik_views --day 1 --month 6 --year 2020
//!   greg-reports run aendringer_specific --days 14 --dry-run

use clap::{Parser, Subcommand, ValueEnum};
use greg_reports::config::{ConnectionConfig, Settings, SettingsError};
use greg_reports::executor::{DataSource, PgExecutor, RecordingExecutor};
use greg_reports::output;
use greg_reports::report::{ReportInput, ReportKind, ReportRunner};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "greg-reports")]
#[command(about = "Change and history reports over the greg PostGIS schema")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to $GREG_CONFIG, ./greg.toml, ~/.config/greg/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log every statement as it executes
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available reports
    List,

    /// Print the parameter manifest of a report
    Manifest {
        /// Report to describe
        report: ReportArg,
    },

    /// Run a report
    Run {
        /// Report to run
        report: ReportArg,

        /// Number of days back (aendringer, aendringer_specific)
        #[arg(long)]
        days: Option<String>,

        /// Day of month (historik, historik_views)
        #[arg(long)]
        day: Option<String>,

        /// Month (historik, historik_views)
        #[arg(long)]
        month: Option<String>,

        /// Year (historik, historik_views)
        #[arg(long)]
        year: Option<String>,

        /// Named connection to run against
        #[arg(short, long)]
        connection: Option<String>,

        /// Directory for output datasets (overrides [output] directory)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Print the statements instead of executing them
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportArg {
    #[value(name = "aendringer")]
    Aendringer,
    #[value(name = "aendringer_specific")]
    AendringerSpecific,
    #[value(name = "historik")]
    Historik,
    #[value(name = "historik_views")]
    HistorikViews,
}

impl From<ReportArg> for ReportKind {
    fn from(arg: ReportArg) -> Self {
        match arg {
            ReportArg::Aendringer => ReportKind::RecentChanges,
            ReportArg::AendringerSpecific => ReportKind::RecentChangeViews,
            ReportArg::Historik => ReportKind::HistoricChanges,
            ReportArg::HistorikViews => ReportKind::HistoricViews,
        }
    }
}

struct RunArgs {
    input: ReportInput,
    out_dir: Option<PathBuf>,
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::List => cmd_list(),
        Commands::Manifest { report } => cmd_manifest(report.into()),
        Commands::Run {
            report,
            days,
            day,
            month,
            year,
            connection,
            out_dir,
            dry_run,
        } => {
            let settings = match load_settings(cli.config.as_deref()) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Configuration error: {}", e);
                    return ExitCode::FAILURE;
                }
            };

            let source = connection
                .or_else(|| settings.default_connection().map(|(n, _)| n.to_string()))
                .unwrap_or_else(|| "default".to_string());

            let mut input = ReportInput::new(DataSource::new(source));
            input.days = days;
            input.day = day;
            input.month = month;
            input.year = year;

            let args = RunArgs {
                input,
                out_dir,
                dry_run,
            };
            cmd_run(report.into(), args, &settings).await
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "greg_reports=debug"
    } else {
        "greg_reports=info"
    };
    let filter = EnvFilter::try_from_env("GREG_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    match path {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    }
}

fn cmd_list() -> ExitCode {
    println!("Reports:");
    for kind in ReportKind::ALL {
        println!("  - {:<20} {}", kind.as_str(), kind.description());
    }
    ExitCode::SUCCESS
}

fn cmd_manifest(kind: ReportKind) -> ExitCode {
    println!("{}", kind.manifest().to_header());
    ExitCode::SUCCESS
}

/// Use the configured connection for `source`, falling back to the
/// `GREG_DB_*` environment variables.
fn build_executor(settings: &Settings, source: &str) -> Result<PgExecutor, String> {
    let executor = PgExecutor::from_settings(settings).map_err(|e| e.to_string())?;
    if executor.has_source(source) {
        return Ok(executor);
    }

    let config = ConnectionConfig::from_env()
        .map_err(|e| format!("connection '{}' is not configured: {}", source, e))?;
    debug!(source, connection = %config.redacted(), "using connection from environment");
    executor
        .with_config(source, &config, settings)
        .map_err(|e| e.to_string())
}

async fn cmd_run(kind: ReportKind, args: RunArgs, settings: &Settings) -> ExitCode {
    let report = match kind.build(&args.input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Invalid parameters for {}: {}", kind, e);
            return ExitCode::FAILURE;
        }
    };

    if args.dry_run {
        let runner = ReportRunner::new(RecordingExecutor::new());
        if let Err(e) = runner.run(&*report).await {
            eprintln!("Dry run failed: {}", e);
            return ExitCode::FAILURE;
        }
        println!("-- {} against '{}'", kind, report.source());
        for call in runner.executor().calls() {
            println!("-- target: {}", call.target);
            println!("{};", call.literal_sql());
        }
        return ExitCode::SUCCESS;
    }

    let executor = match build_executor(settings, report.source().name()) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let runner = ReportRunner::new(executor);
    let result = runner.run(&*report).await;
    runner.executor().close().await;

    let outputs = match result {
        Ok(outputs) => outputs,
        Err(e) => {
            eprintln!("Report failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if kind.creates_views() {
        println!("{}: replaced {} views", kind, outputs.len());
        return ExitCode::SUCCESS;
    }

    let dir = match args.out_dir {
        Some(dir) => dir,
        None => match settings.output.resolved_directory() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    match output::write_all(&dir, &outputs) {
        Ok(paths) => {
            for (path, dataset) in paths.iter().zip(outputs.iter().filter(|o| !o.is_placeholder())) {
                println!("{} ({} features)", path.display(), dataset.len());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Output error: {}", e);
            ExitCode::FAILURE
        }
    }
}
