//! CLI command definitions and handlers

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dashboard_service::{DashboardService, DateWindow, ExamplesQuery, MetricsQuery};
use monitor_core::{CoreError, ErrorReporter, ExportError, MonitorConfig};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Sentiment monitor - synthetic community sentiment dashboards
#[derive(Parser, Debug)]
#[command(name = "sentiment-monitor", version)]
#[command(after_help = "\
Examples:
  sentiment-monitor entities                          List tracked entities
  sentiment-monitor metrics --entity codex --range 7  Last week of codex metrics
  sentiment-monitor examples --date 2024-06-30        Example posts for a day
  sentiment-monitor dashboard --entity all            Summary, insights and keywords
  sentiment-monitor export --out-dir ./exports        Write the default window as CSV")]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, short = 'c', global = true, env = "SENTIMENT_MONITOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); overrides RUST_LOG
    #[arg(long, global = true, value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: Option<String>,

    /// Last day of the generated window (YYYY-MM-DD); defaults to today
    #[arg(long, global = true)]
    pub end_date: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tracked entities, aggregate view first
    Entities,

    /// Daily metrics for a window
    Metrics {
        #[arg(long, short = 'e')]
        entity: Option<String>,

        /// Preset window length: 7, 30 or 90 days
        #[arg(long, short = 'r')]
        range: Option<String>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,
    },

    /// Example posts for one day
    Examples {
        #[arg(long, short = 'e')]
        entity: Option<String>,

        #[arg(long, short = 'd')]
        date: Option<String>,

        /// positive, neutral or negative
        #[arg(long, short = 's')]
        sentiment: Option<String>,

        /// Order by confidence, highest first
        #[arg(long)]
        by_confidence: bool,
    },

    /// Summary statistics, insight cards and top keywords for a window
    Dashboard {
        #[arg(long, short = 'e', default_value = "all")]
        entity: String,

        #[arg(long)]
        start: Option<NaiveDate>,

        #[arg(long)]
        end: Option<NaiveDate>,
    },

    /// Ranked keywords for a window
    Keywords {
        #[arg(long, short = 'e')]
        entity: Option<String>,

        #[arg(long, short = 'r')]
        range: Option<String>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,

        /// Maximum number of terms (default from config)
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Write a window as CSV
    Export {
        #[arg(long, short = 'e', default_value = "all")]
        entity: String,

        #[arg(long)]
        start: Option<NaiveDate>,

        #[arg(long)]
        end: Option<NaiveDate>,

        #[arg(long, short = 'o', default_value = ".")]
        out_dir: PathBuf,
    },

    /// Print the effective configuration as TOML
    Config,
}

pub async fn run(cli: Cli, mut config: MonitorConfig) -> Result<()> {
    if let Some(end_date) = cli.end_date {
        config.generation.end_date = Some(end_date);
    }

    if let Commands::Config = cli.command {
        let rendered = config.to_toml().context("Failed to render configuration")?;
        print!("{}", rendered);
        return Ok(());
    }

    let service = DashboardService::from_config(&config);
    let reporter = ErrorReporter::new();
    let surface = |err: CoreError| {
        reporter.report_error(&err);
        anyhow!(reporter.render(&err))
    };

    match cli.command {
        Commands::Entities => print_json(&service.entities().await).map_err(surface),
        Commands::Metrics {
            entity,
            range,
            start,
            end,
        } => {
            let query = MetricsQuery {
                entity,
                range,
                start,
                end,
            };
            let response = service.metrics(&query).await.map_err(surface)?;
            print_json(&response).map_err(surface)
        }
        Commands::Examples {
            entity,
            date,
            sentiment,
            by_confidence,
        } => {
            let query = ExamplesQuery {
                entity,
                date,
                sentiment,
            };
            let response = if by_confidence {
                service.day_examples(&query).await
            } else {
                service.examples(&query).await
            };
            print_json(&response.map_err(surface)?).map_err(surface)
        }
        Commands::Dashboard { entity, start, end } => {
            let window = custom_window(&service, start, end).await.map_err(surface)?;
            let snapshot = service.snapshot(&entity, window).await.map_err(surface)?;
            print_json(&snapshot).map_err(surface)
        }
        Commands::Keywords {
            entity,
            range,
            start,
            end,
            limit,
        } => {
            let query = MetricsQuery {
                entity,
                range,
                start,
                end,
            };
            let response = service.keywords(&query, limit).await.map_err(surface)?;
            print_json(&response).map_err(surface)
        }
        Commands::Export {
            entity,
            start,
            end,
            out_dir,
        } => {
            let window = custom_window(&service, start, end).await.map_err(surface)?;
            match service
                .export_csv(&entity, window, &out_dir)
                .await
                .map_err(surface)?
            {
                Some(path) => {
                    info!("Export complete");
                    println!("{}", path.display());
                }
                None => reporter.report_warning(&CoreError::Export(ExportError::EmptyWindow)),
            }
            Ok(())
        }
        Commands::Config => Ok(()),
    }
}

/// A window from optional CLI bounds; a missing side takes the default
/// preset's bound. `None` when neither side was given.
async fn custom_window(
    service: &DashboardService,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Option<DateWindow>, CoreError> {
    if start.is_none() && end.is_none() {
        return Ok(None);
    }
    let default = service.default_window().await?;
    Ok(Some(DateWindow::new(
        start.unwrap_or(default.start_date),
        end.unwrap_or(default.end_date),
    )))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CoreError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{}", rendered);
    Ok(())
}

