use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::commands::export::ExportOptions;
use crate::commands::history::HistoryAction;
use crate::commands::settings::SettingsAction;
use crate::commands::summarize::SummarizeOptions;
use crate::commands::{self, CommandReport};
use crate::logging;
use crate::summarizer::export::ExportFormat;
use crate::summarizer::share::SharePlatform;

#[derive(Debug, Parser)]
#[command(
    name = "vidsum",
    version,
    about = "Summarize YouTube videos with Gemini and keep a local history of results"
)]
struct Cli {
    /// Print the command report as JSON.
    #[arg(long, global = true)]
    json: bool,
    /// Enable debug diagnostics on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Summarize a video, reusing the cached result when one exists.
    Summarize {
        /// Video id or YouTube URL.
        video: String,
        /// Title stored alongside the summary.
        #[arg(long)]
        title: Option<String>,
    },
    /// Inspect or edit the summary history.
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },
    /// Write a cached summary to a Markdown or text file.
    Export {
        video: String,
        #[arg(long, value_enum, default_value_t = FormatArg::Markdown)]
        format: FormatArg,
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the export instead of writing a file.
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },
    /// Print a social share link for a cached summary.
    Share {
        video: String,
        #[arg(long, value_enum)]
        platform: PlatformArg,
    },
    /// Manage the API key and summary language.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
    /// Handle one JSON request message (argument or stdin) and print the JSON response.
    Message { request: Option<String> },
    /// Show paths, configuration state and history size.
    Status,
}

#[derive(Debug, Subcommand)]
enum HistoryCommand {
    List,
    Show { video: String },
    Delete { video: String },
    Clear,
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    Show,
    SetKey {
        api_key: String,
        /// Save without probing the key against the remote service.
        #[arg(long)]
        skip_test: bool,
    },
    SetLanguage {
        language: String,
    },
    TestKey {
        api_key: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Markdown,
    Text,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Markdown => ExportFormat::Markdown,
            FormatArg::Text => ExportFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlatformArg {
    Twitter,
    Linkedin,
}

impl From<PlatformArg> for SharePlatform {
    fn from(value: PlatformArg) -> Self {
        match value {
            PlatformArg::Twitter => SharePlatform::Twitter,
            PlatformArg::Linkedin => SharePlatform::LinkedIn,
        }
    }
}

fn print_report(report: &CommandReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let state = if report.ok { "ok" } else { "failed" };
    println!("{}: {state}", report.command);
    for detail in &report.details {
        println!("  - {detail}");
    }
    for issue in &report.issues {
        println!("  ! {issue}");
    }
    if let Some(body) = &report.body {
        println!();
        println!("{}", body.trim_end());
    }
    Ok(())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let report = match cli.command {
        Command::Summarize { video, title } => {
            commands::summarize::run(&SummarizeOptions { video, title })?
        }
        Command::History { action } => {
            let action = match action {
                HistoryCommand::List => HistoryAction::List,
                HistoryCommand::Show { video } => HistoryAction::Show { video },
                HistoryCommand::Delete { video } => HistoryAction::Delete { video },
                HistoryCommand::Clear => HistoryAction::Clear,
            };
            commands::history::run(&action)?
        }
        Command::Export {
            video,
            format,
            out,
            stdout,
        } => commands::export::run(&ExportOptions {
            video,
            format: format.into(),
            out,
            stdout,
        })?,
        Command::Share { video, platform } => commands::share::run(&video, platform.into())?,
        Command::Config { action } => {
            let action = match action {
                ConfigCommand::Show => SettingsAction::Show,
                ConfigCommand::SetKey { api_key, skip_test } => {
                    SettingsAction::SetKey { api_key, skip_test }
                }
                ConfigCommand::SetLanguage { language } => SettingsAction::SetLanguage { language },
                ConfigCommand::TestKey { api_key } => SettingsAction::TestKey { api_key },
            };
            commands::settings::run(&action)?
        }
        Command::Message { request } => {
            let response = commands::message::run(request.as_deref())?;
            println!("{response}");
            return Ok(());
        }
        Command::Status => commands::status::run()?,
    };

    print_report(&report, cli.json)?;
    if !report.ok {
        anyhow::bail!("{} reported {} issue(s)", report.command, report.issues.len());
    }
    Ok(())
}
