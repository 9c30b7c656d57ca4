use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use hr_attrition::reader::read_schema;
use hr_attrition::report::{CATALOGUE, ReportSpec, find_report};
use hr_attrition::schema::check_employee_schema;
use hr_attrition::utils::io::{OutputFormat, write_records_parquet, write_table};
use hr_attrition::utils::logging::{
    create_main_progress_bar, create_spinner, finish_progress_bar, init_logging,
    log_operation_complete, log_warning,
};
use hr_attrition::{AnalyticsConfig, Dataset, load_dataset_async};

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

#[derive(Parser)]
#[command(name = "hr-attrition")]
#[command(about = "Compute HR attrition reports from a Parquet or CSV employee table")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available reports
    List,

    /// Run reports over a dataset
    Run {
        /// Employee table (.parquet or .csv)
        dataset: PathBuf,

        /// Report to run; repeat for several (default: all)
        #[arg(short, long = "report", value_name = "NAME")]
        reports: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Directory to write one file per report into (default: print JSON to stdout)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        load: LoadArgs,
    },

    /// Write the validated employee records to a Parquet file
    Export {
        /// Employee table (.parquet or .csv)
        dataset: PathBuf,

        /// Parquet file to write
        output: PathBuf,

        #[command(flatten)]
        load: LoadArgs,
    },

    /// Check whether a file has the employee columns
    Check {
        /// Employee table (.parquet or .csv)
        dataset: PathBuf,
    },
}

#[derive(clap::Args)]
struct LoadArgs {
    /// Skip and count invalid rows instead of failing on the first one
    #[arg(long)]
    skip_invalid: bool,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl LoadArgs {
    fn config(&self) -> Result<AnalyticsConfig> {
        let config = match &self.config {
            Some(path) => AnalyticsConfig::from_json_file(path)
                .with_context(|| format!("Failed to read configuration {}", path.display()))?,
            None => AnalyticsConfig::default(),
        };
        let config = config.with_env_overrides();
        Ok(if self.skip_invalid {
            config.skipping_invalid()
        } else {
            config
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging("info");

    match Cli::parse().command {
        Commands::List => {
            for spec in CATALOGUE {
                println!("{:<40} {}", spec.name, spec.description);
            }
            Ok(())
        }
        Commands::Run {
            dataset,
            reports,
            format,
            output,
            load: load_args,
        } => {
            let config = load_args.config()?;
            let data = load_employees(&dataset, &config).await?;
            run(&data, &config, &reports, format, output.as_deref())
        }
        Commands::Export {
            dataset,
            output,
            load: load_args,
        } => {
            let config = load_args.config()?;
            let data = load_employees(&dataset, &config).await?;
            write_records_parquet(data.records(), &output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!("Wrote {} employees to {}", data.len(), output.display());
            Ok(())
        }
        Commands::Check { dataset } => {
            let schema = read_schema(&dataset)
                .with_context(|| format!("Failed to read schema of {}", dataset.display()))?;
            let report = check_employee_schema(&schema);
            for issue in &report.issues {
                let level = if issue.fatal { "error" } else { "note" };
                println!("{level}: {}: {}", issue.column, issue.description);
            }
            if report.compatible {
                println!("{} has every employee column", dataset.display());
                Ok(())
            } else {
                anyhow::bail!("{} is missing employee columns", dataset.display())
            }
        }
    }
}

async fn load_employees(path: &Path, config: &AnalyticsConfig) -> Result<Dataset> {
    info!("Configuration:\n{config}");
    let spinner = create_spinner(Some("Loading employees"));
    let result = load_dataset_async(path, config).await;
    spinner.finish_and_clear();
    result.with_context(|| format!("Failed to load employees from {}", path.display()))
}

fn run(
    data: &Dataset,
    config: &AnalyticsConfig,
    names: &[String],
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let specs: Vec<&ReportSpec> = if names.is_empty() {
        CATALOGUE.iter().collect()
    } else {
        names
            .iter()
            .map(|name| find_report(name))
            .collect::<hr_attrition::Result<_>>()?
    };

    let start = Instant::now();
    let pb = create_main_progress_bar(specs.len() as u64, Some("Computing reports"));
    let mut tables = Vec::with_capacity(specs.len());
    for spec in specs {
        pb.set_message(spec.name);
        let table = spec
            .run(data, config)
            .with_context(|| format!("Report {} failed", spec.name))?;
        tables.push(table);
        pb.inc(1);
    }
    finish_progress_bar(&pb, Some("Reports complete"));

    match output {
        Some(dir) => {
            for table in &tables {
                write_table(table, dir, format)
                    .with_context(|| format!("Failed to write report {}", table.name))?;
            }
            log_operation_complete("wrote", dir, tables.len(), Some(start.elapsed()));
        }
        None => {
            if format != OutputFormat::Json {
                log_warning("No output directory given, printing JSON to stdout", None);
            }
            println!("{}", serde_json::to_string_pretty(&tables)?);
        }
    }
    Ok(())
}
