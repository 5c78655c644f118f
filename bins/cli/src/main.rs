//! YoAnoto command line.
//!
//! Settles a group's expenses from a session file and offers participant
//! names remembered from earlier sessions.

mod session_file;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yoanoto_core::names::NameCacheStore;
use yoanoto_core::split::{SplitSession, whatsapp_url};
use yoanoto_shared::types::format_pesos;
use yoanoto_shared::{AppConfig, AppError};

use session_file::SessionDocument;

/// Split group expenses and work out who pays whom.
#[derive(Debug, Parser)]
#[command(name = "yoanoto", version, about)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true, env = "YOANOTO_JSON_LOGS")]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print balances and the settlement plan for a session file.
    Settle {
        /// JSON session document.
        session: PathBuf,
        /// Also print the shareable summary text.
        #[arg(long)]
        share: bool,
        /// Also print a WhatsApp link carrying the summary.
        #[arg(long)]
        whatsapp: bool,
        /// Print the summary and plan as JSON instead of text.
        #[arg(long, conflicts_with_all = ["share", "whatsapp"])]
        json: bool,
        /// Add the roster to the name cache.
        #[arg(long)]
        remember: bool,
    },
    /// Suggest remembered names starting with a prefix.
    Suggest {
        /// Start of the name, case-insensitive.
        prefix: String,
        /// Names already in the group.
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,
    },
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "command failed");
            eprintln!("error: {err:#}");
            let code = err.downcast_ref::<AppError>().map_or(1, AppError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "yoanoto=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries the command output, logs go to stderr
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let store = NameCacheStore::new(&config.names.cache_path);

    match cli.command {
        Command::Settle {
            session,
            share,
            whatsapp,
            json,
            remember,
        } => {
            let raw = std::fs::read_to_string(&session)
                .map_err(|e| AppError::NotFound(format!("{}: {e}", session.display())))?;
            let split = SessionDocument::from_json(&raw)?.into_session(&config)?;
            info!(
                participants = split.participants().len(),
                expenses = split.expenses().len(),
                "session loaded"
            );

            if json {
                print_json(&split)?;
            } else {
                print_report(&split);
                if share || whatsapp {
                    let text = split.share_text();
                    if share {
                        println!("\n{text}");
                    }
                    if whatsapp {
                        println!("\n{}", whatsapp_url(&text));
                    }
                }
            }

            if remember {
                let cache = store.remember(split.participants()).map_err(AppError::from)?;
                info!(cached = cache.len(), path = %store.path().display(), "names remembered");
            }
        }
        Command::Suggest { prefix, exclude } => {
            let cache = store.load().map_err(AppError::from)?;
            for name in cache.suggest(&prefix, exclude.as_slice(), config.names.max_suggestions) {
                println!("{name}");
            }
        }
    }

    Ok(())
}

fn print_report(split: &SplitSession) {
    let summary = split.summary();

    println!("Total: ${}", format_pesos(summary.total));
    println!();
    for person in &summary.people {
        println!(
            "{:<15}  pagó ${:>10}  le toca ${:>10}  {}",
            person.participant.as_str(),
            format_pesos(person.paid),
            format_pesos(person.owes),
            person.status_label()
        );
    }

    println!();
    let plan = split.settlement();
    if plan.is_empty() {
        println!("¡Están todos al día!");
        return;
    }
    for tx in &plan {
        let alias = split
            .alias(tx.to.as_str())
            .map(|alias| format!("  (alias: {alias})"))
            .unwrap_or_default();
        println!("{} → {}: ${}{alias}", tx.from, tx.to, format_pesos(tx.amount));
    }
}

fn print_json(split: &SplitSession) -> anyhow::Result<()> {
    let report = serde_json::json!({
        "summary": split.summary(),
        "settlement": split.settlement(),
    });
    let rendered = serde_json::to_string_pretty(&report).context("failed to render report")?;
    println!("{rendered}");
    Ok(())
}
