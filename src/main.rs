use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use dognoise::{analyzer, report, utils, AnalyzeError};

#[derive(Parser)]
#[command(name = "dognoise")]
#[command(author = "NL Team")]
#[command(version = "0.1.3")]
#[command(about = "Stress-test log analyzer for Android monitoring runs", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an event log and print a summary
    Analyze {
        /// Path to event.log (searched in default locations if omitted)
        log: Option<PathBuf>,

        /// HTML report path (defaults to the configured one)
        #[arg(long)]
        html: Option<PathBuf>,

        /// Skip the HTML report
        #[arg(long, default_value = "false")]
        no_html: bool,

        /// Save the parsed summary as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Export time series as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Generate a report from a saved JSON summary
    Report {
        /// Path to summary JSON
        summary: PathBuf,

        /// Output format (text, html, json, csv)
        #[arg(short, long, default_value = "html")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    utils::logging::init_logger(cli.verbose, cli.quiet);

    let config = utils::config::Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            log,
            html,
            no_html,
            json,
            csv,
        } => {
            let Some(log_path) = log.or_else(|| config.find_default_log()) else {
                log::warn!("No log found in {:?}", config.default_log_paths);
                println!(
                    "{} No event.log found. Put it next to the working directory or run: dognoise analyze <path_to_log>",
                    "❌".red()
                );
                anyhow::bail!("no log file to analyze");
            };

            println!(
                "{} Analyzing log: {}",
                "▶".green().bold(),
                log_path.display().to_string().cyan()
            );

            let summary = match analyzer::parse_log(&log_path, &config) {
                Ok(summary) => summary,
                Err(e @ AnalyzeError::LogNotFound { .. }) => {
                    println!("{} {}", "❌".red(), e.to_string().red());
                    return Err(e.into());
                }
                Err(e) => return Err(e.into()),
            };

            let stats = report::SummaryStats::from_summary(&summary, config.timeout_sentinel_ms);
            report::text::print_summary(&summary, &stats);

            if !no_html {
                let path = html.unwrap_or_else(|| config.html_output.clone());
                report::html::write_html(&summary, &config, &path)?;
            }
            if let Some(path) = json {
                report::json::write_json(&summary, &path)?;
            }
            if let Some(path) = csv {
                report::series::write_csv(&summary, &path)?;
            }
        }

        Commands::Report {
            summary,
            format,
            output,
        } => {
            println!(
                "{} Generating {} report from: {}",
                "📊".to_string().blue(),
                format.cyan(),
                summary.display()
            );
            report::generate_report(&summary, &format, output.as_deref(), &config)?;
        }
    }

    Ok(())
}
