// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{ArgAction, Parser, Subcommand};
use riskline::utils::logging::{format_error, format_info, format_success, format_warning};
use riskline::{Config, ControlScaffold, CsvExporter, JsonExporter, PipelineOrchestrator};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "riskline")]
#[command(version = "0.1.0")]
#[command(about = "Recon findings normalization and ISO 27001 risk derivation", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write the three output tables
    Run {
        #[arg(short, long, value_name = "DIR")]
        input: Option<PathBuf>,

        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Run date used for SLA due dates (defaults to today, UTC)
        #[arg(long, value_name = "YYYY-MM-DD")]
        run_date: Option<NaiveDate>,

        #[arg(long, action = ArgAction::SetTrue)]
        pretty: bool,
    },

    /// Load configuration and scaffold, report rule counts
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    riskline::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Riskline recon risk pipeline");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Run {
            input,
            output,
            run_date,
            pretty,
        } => {
            if let Err(e) = cmd_run(config, input, output, run_date, pretty).await {
                eprintln!("{}", format_error(&format!("Pipeline failed: {:#}", e)));
                return Err(e);
            }
        }
        Commands::Check => {
            cmd_check(&config)?;
        }
    }

    Ok(())
}

async fn cmd_run(
    mut config: Config,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    run_date: Option<NaiveDate>,
    pretty: bool,
) -> Result<()> {
    if let Some(input) = input {
        config.reports.input_dir = input;
    }
    if let Some(output) = output {
        config.pipeline.output_dir = output;
    }
    if pretty {
        config.pipeline.pretty_json = true;
    }

    let run_date = run_date.unwrap_or_else(|| Utc::now().date_naive());
    let output_dir = config.pipeline.output_dir.clone();
    let pretty_json = config.pipeline.pretty_json;

    let orchestrator = PipelineOrchestrator::new(config).context("Failed to start pipeline")?;
    let result = orchestrator.run(run_date).await.context("Pipeline failed")?;

    let csv_exporter = CsvExporter::new(&output_dir)?;
    csv_exporter.export_findings(&result.findings)?;
    csv_exporter.export_risk_register(&result.risk_register)?;
    csv_exporter.export_compliance_summary(&result.compliance_summary)?;

    let json_exporter = JsonExporter::new(&output_dir, pretty_json)?;
    json_exporter.export_all(
        &result.findings,
        &result.risk_register,
        &result.compliance_summary,
    )?;

    println!(
        "{}",
        format_success(&format!(
            "{} findings, {} risk entries, {} controls -> {}",
            result.findings.len(),
            result.risk_register.len(),
            result.compliance_summary.len(),
            output_dir.display()
        ))
    );

    Ok(())
}

fn cmd_check(config: &Config) -> Result<()> {
    config.validate().context("Configuration is invalid")?;

    let scaffold =
        ControlScaffold::load(&config.scaffold.path).context("Failed to load scaffold")?;

    println!("{}", format_success("Configuration is valid"));
    println!(
        "{}",
        format_info(&format!(
            "{} port rules, {} banner rules, {} category rules",
            config.classification.port_rules.len(),
            config.classification.banner_rules.len(),
            config.classification.category_rules.len()
        ))
    );
    println!(
        "{}",
        format_info(&format!("{} scaffold controls", scaffold.len()))
    );

    for control in scaffold.controls() {
        if control.keywords.is_empty() && control.categories.is_empty() {
            println!(
                "{}",
                format_warning(&format!(
                    "{} has no keywords or categories and can never match a finding",
                    control.control_id
                ))
            );
        }
    }

    Ok(())
}
