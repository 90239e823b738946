//! Professionals Command Line Interface
//!
//! Terminal front-end for the professionals registry: add a record through
//! the form controller, browse records by source, or bulk-import a file.
//!
//! # Usage
//!
//! ```bash
//! # Create a professional
//! professional_cli add --full-name "John Doe" --email john.doe@example.com
//!
//! # List professionals from partners
//! professional_cli list --source partner
//!
//! # Create or update many at once
//! professional_cli import profiles.json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use professional_desk::config::BASE_URL_ENV;
use professional_desk::form::CREATED_MESSAGE;
use professional_desk::render::{error_lines, render_errors, render_table};
use professional_desk::{
    load_profiles, BulkOutcome, ClientConfig, FieldUpdate, FormController, FormEvent,
    HttpProfessionalApi, ListView, ProfessionalApi, Source, SourceFilter, SubmitOutcome,
};

#[derive(Parser)]
#[command(name = "professional_cli")]
#[command(version = "0.1.0")]
#[command(about = "Create, list and bulk-import professionals")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the professionals API
    #[arg(long, global = true, env = BASE_URL_ENV)]
    base_url: Option<String>,

    /// Output format: text (default) or json
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    Direct,
    Partner,
    Internal,
}

impl From<SourceArg> for Source {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Direct => Source::Direct,
            SourceArg::Partner => Source::Partner,
            SourceArg::Internal => Source::Internal,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Add a professional
    Add {
        #[arg(long)]
        full_name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        job_title: Option<String>,

        #[arg(long)]
        company_name: Option<String>,

        #[arg(long, value_enum, default_value = "direct")]
        source: SourceArg,
    },

    /// List professionals, optionally filtered by source
    List {
        #[arg(short, long, value_enum)]
        source: Option<SourceArg>,
    },

    /// Create or update professionals from a JSON array file
    Import {
        /// File holding a JSON array of profiles
        file: PathBuf,
    },
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "professional_desk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    let result = match build_api(cli.base_url.as_deref()) {
        Ok(api) => match cli.command {
            Commands::Add {
                full_name,
                email,
                phone,
                job_title,
                company_name,
                source,
            } => {
                let updates = [
                    full_name.map(FieldUpdate::FullName),
                    email.map(FieldUpdate::Email),
                    phone.map(FieldUpdate::Phone),
                    job_title.map(FieldUpdate::JobTitle),
                    company_name.map(FieldUpdate::CompanyName),
                    Some(FieldUpdate::Source(source.into())),
                ];
                cmd_add(api, updates.into_iter().flatten(), format).await
            }
            Commands::List { source } => {
                cmd_list(api, source.map(Source::from).into(), format).await
            }
            Commands::Import { file } => cmd_import(api, file, format).await,
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            if format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "error": format!("{:#}", e) }));
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

fn build_api(base_url: Option<&str>) -> Result<HttpProfessionalApi> {
    let config = match base_url {
        Some(url) => ClientConfig::from_lookup(|key| {
            if key == BASE_URL_ENV {
                Some(url.to_string())
            } else {
                std::env::var(key).ok()
            }
        }),
        None => ClientConfig::from_env(),
    }
    .context("Invalid client configuration")?;

    Ok(HttpProfessionalApi::new(config)?)
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Returns whether the record was created
async fn cmd_add(
    api: impl ProfessionalApi,
    updates: impl Iterator<Item = FieldUpdate>,
    format: OutputFormat,
) -> Result<bool> {
    let mut form = FormController::new(api);
    for update in updates {
        form.set_field(update);
    }

    // Progress runs on the same thread while the request is awaited
    let mut events = form.subscribe();
    let progress = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            if format == OutputFormat::Text && event == FormEvent::SubmitStarted {
                eprintln!("{}", "Submitting...".dimmed());
            }
        }
    });

    let outcome = form.submit().await;
    progress.abort();

    match (&outcome, format) {
        (SubmitOutcome::Created(ack), OutputFormat::Json) => {
            println!(
                "{}",
                serde_json::json!({ "created": true, "record": ack.record })
            );
        }
        (SubmitOutcome::Created(_), OutputFormat::Text) => {
            println!("{}", CREATED_MESSAGE.green());
        }
        (SubmitOutcome::Rejected(rejection), OutputFormat::Json) => {
            println!(
                "{}",
                serde_json::json!({
                    "created": false,
                    "kind": rejection.kind.to_string(),
                    "errors": rejection.errors,
                })
            );
        }
        (SubmitOutcome::Rejected(_), OutputFormat::Text) => {
            for line in error_lines(form.errors()) {
                match line.label {
                    Some(label) => {
                        eprintln!("{} {}", format!("{}:", label).bold(), line.message.red())
                    }
                    None => eprintln!("{}", line.message.red()),
                }
            }
        }
    }

    Ok(outcome.is_created())
}

async fn cmd_list(
    api: impl ProfessionalApi,
    filter: SourceFilter,
    format: OutputFormat,
) -> Result<bool> {
    let mut view = ListView::new(api);
    view.load(filter).await;

    if let Some(e) = view.last_error() {
        anyhow::bail!("There was an error fetching the professionals: {}", e);
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(view.records())?);
        }
        OutputFormat::Text => {
            println!("{} ({})", "Professionals".cyan().bold(), view.filter());
            print!("{}", render_table(view.rows()));
        }
    }

    Ok(true)
}

/// Returns whether every profile was stored
async fn cmd_import(
    api: impl ProfessionalApi,
    file: PathBuf,
    format: OutputFormat,
) -> Result<bool> {
    let profiles = load_profiles(&file)?;
    let report = api
        .bulk_upsert(&profiles)
        .await
        .with_context(|| format!("Bulk upsert of {} failed", file.display()))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!(
                "{} {} stored, {} failed",
                "Import:".cyan().bold(),
                report.success_count,
                report.failure_count
            );
            for (i, errors) in report.errors.iter().enumerate() {
                println!(
                    "  {} {}",
                    format!("[{}]", i + 1).yellow(),
                    render_errors(errors).replace('\n', "; ")
                );
            }
        }
    }

    Ok(report.outcome() == BulkOutcome::Complete)
}
