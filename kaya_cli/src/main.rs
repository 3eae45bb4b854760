use anyhow::{Context, Result};
/// Kaya AI - Intelligent Career Navigator
///
/// Interactive TUI plus non-interactive `report` and `check` commands.
use clap::{Parser, Subcommand};
use kaya_cli::screens::report::report_text;
use kaya_cli::ui;
use kaya_core::config::KayaConfig;
use kaya_core::types::{Industry, Role};
use kaya_core::{AnalysisReport, IntakeError, IntakeForm, IntakePayload, ScriptedPipeline};
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "kaya")]
#[command(about = "Kaya AI - Intelligent Career Navigator", long_about = None)]
struct Cli {
    /// Write logs to this file (the TUI owns the terminal)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive flow (default)
    Tui {
        /// Path to a config YAML file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Run the scripted analysis this many times faster
        #[arg(long, default_value_t = 1)]
        speed: u32,
    },
    /// Print the analysis report (non-interactive)
    Report {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Validate intake fields without the UI
    Check {
        #[arg(long)]
        company: String,
        /// Industry id, e.g. technology
        #[arg(long)]
        industry: Industry,
        /// Role id, up to three times, e.g. software-engineer
        #[arg(long = "role")]
        roles: Vec<Role>,
        /// Resume file (PDF or DOCX)
        #[arg(long)]
        resume: PathBuf,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct CheckVerdict<'a> {
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<&'a IntakePayload>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui {
        config: None,
        speed: 1,
    });
    let interactive = matches!(command, Commands::Tui { .. });
    init_logging(cli.log_file.as_deref(), interactive)?;

    match command {
        Commands::Tui { config, speed } => {
            let config =
                KayaConfig::resolve(config.as_deref()).context("Failed to load config")?;
            ui::run_tui(&config, Box::new(ScriptedPipeline::accelerated(speed)))?;
        }
        Commands::Report { json } => {
            run_report_cli(json)?;
        }
        Commands::Check {
            company,
            industry,
            roles,
            resume,
            json,
        } => {
            if !run_check_cli(&company, industry, &roles, &resume, json)? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// stdout belongs to the TUI, so interactive runs stay quiet unless a log
/// file or RUST_LOG is given.
fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let default_filter = match (log_file, interactive) {
        (Some(_), _) => "info",
        (None, true) => "off",
        (None, false) => "warn",
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

fn run_report_cli(json: bool) -> Result<()> {
    let report = AnalysisReport::sample();
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report_text(&report));
    }
    Ok(())
}

/// Returns whether the intake was accepted
fn run_check_cli(
    company: &str,
    industry: Industry,
    roles: &[Role],
    resume: &Path,
    json: bool,
) -> Result<bool> {
    let mut form = IntakeForm::new();
    form.set_company(company);
    form.select_industry(Some(industry));
    for (slot, role) in roles.iter().enumerate() {
        form.select_role(slot, Some(*role))?;
    }

    // An attach rejection explains a missing resume better than submit can
    let attach_error = form.attach_resume_path(resume).err();
    let verdict = match form.submit() {
        Err(IntakeError::MissingResume) => {
            Err(attach_error.unwrap_or(IntakeError::MissingResume))
        }
        other => other,
    };

    let accepted = verdict.is_ok();
    if json {
        let body = match &verdict {
            Ok(payload) => CheckVerdict {
                accepted,
                message: None,
                payload: Some(payload),
            },
            Err(e) => CheckVerdict {
                accepted,
                message: Some(e.to_string()),
                payload: None,
            },
        };
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        match &verdict {
            Ok(payload) => {
                let roles: Vec<&str> = payload.roles().iter().map(|r| r.label()).collect();
                let file = payload.resume_file();
                println!("✓ Accepted");
                println!("  Company:  {}", payload.target_company());
                println!("  Industry: {}", payload.industry());
                println!("  Roles:    {}", roles.join(", "));
                println!("  Resume:   {} ({:.2} MB)", file.name, file.size_mb());
            }
            Err(e) => println!("✗ Rejected: {}", e),
        }
    }

    Ok(accepted)
}
