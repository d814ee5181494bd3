use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::modules::leave_applications::adapters::outbound::http_leave_backend::HttpLeaveBackend;
use crate::modules::leave_applications::adapters::outbound::in_memory_leave_backend::InMemoryLeaveBackend;
use crate::modules::leave_applications::core::attachment::Attachment;
use crate::modules::leave_applications::core::leave_type::LeaveType;
use crate::modules::leave_applications::core::outcome::{SubmissionError, SubmissionOutcome};
use crate::modules::leave_applications::core::ports::LeaveBackend;
use crate::modules::leave_applications::use_cases::fill_leave_form::controller::FormController;
use crate::modules::leave_applications::use_cases::submit_leave_application::handler::SubmissionCoordinator;
use crate::shell::config::Config;

#[derive(Parser)]
#[command(
    name = "leave_applications",
    about = "Submit leave applications to the leave service",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply for leave, optionally attaching a medical certificate
    Apply(ApplyArgs),
    /// List the accepted leave type codes
    LeaveTypes,
}

#[derive(Args)]
pub struct ApplyArgs {
    #[arg(long, default_value = "")]
    pub worker_name: String,

    #[arg(long, default_value = "")]
    pub worker_id: String,

    /// Leave type code (AL, MC, HL, EL, other)
    #[arg(long)]
    pub leave_type: Option<String>,

    /// YYYY-MM-DD or an RFC 3339 timestamp
    #[arg(long)]
    pub start_date: Option<String>,

    #[arg(long)]
    pub end_date: Option<String>,

    #[arg(long, default_value = "")]
    pub reason: String,

    /// Medical certificate (PDF, JPG or PNG); only sent for MC leave
    #[arg(long)]
    pub attachment: Option<PathBuf>,

    /// Overrides LEAVE_API_BASE_URL
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Submit to an in-process backend instead of the leave service
    #[arg(long)]
    pub dry_run: bool,
}

/// Runs the command. `Ok(false)` means the command ran but the application was not accepted.
pub async fn run(cli: Cli, config: Config) -> anyhow::Result<bool> {
    match cli.command {
        Commands::LeaveTypes => {
            for leave_type in LeaveType::ALL {
                println!("{:<6} {}", leave_type.code(), leave_type.label());
            }
            Ok(true)
        }
        Commands::Apply(args) => apply(args, config).await,
    }
}

async fn apply(args: ApplyArgs, config: Config) -> anyhow::Result<bool> {
    if args.dry_run {
        return submit_form(Arc::new(InMemoryLeaveBackend::new()), args, &config).await;
    }

    let base_url = args
        .api_base_url
        .clone()
        .unwrap_or_else(|| config.api_base_url.clone());
    let backend = HttpLeaveBackend::new(&base_url, config.http_timeout)
        .with_context(|| format!("invalid leave service url {base_url}"))?;
    submit_form(Arc::new(backend), args, &config).await
}

async fn submit_form<TBackend>(
    backend: Arc<TBackend>,
    args: ApplyArgs,
    config: &Config,
) -> anyhow::Result<bool>
where
    TBackend: LeaveBackend + 'static,
{
    let coordinator = Arc::new(SubmissionCoordinator::new(backend));
    let mut form = FormController::with_policy(coordinator, config.validation_policy());

    form.set_worker_name(args.worker_name);
    form.set_worker_id(args.worker_id);
    form.set_leave_type(args.leave_type);
    form.set_start_date(args.start_date);
    form.set_end_date(args.end_date);
    form.set_reason(args.reason);
    if let Some(path) = args.attachment {
        let attachment = Attachment::from_path(&path)
            .await
            .with_context(|| format!("cannot read attachment {}", path.display()))?;
        form.choose_attachment(attachment);
    }

    match form.submit().await {
        Err(errors) => {
            for error in &errors {
                eprintln!("{}: {}", error.field(), error);
            }
            Ok(false)
        }
        Ok(SubmissionOutcome::Success) => {
            println!("Your leave application has been successfully submitted.");
            Ok(true)
        }
        Ok(SubmissionOutcome::Error { reason }) => {
            eprintln!("Error: {reason}");
            if reason == SubmissionError::Attachment {
                eprintln!(
                    "The leave application was recorded, but the certificate was not uploaded."
                );
            }
            Ok(false)
        }
        Ok(SubmissionOutcome::Idle) => Ok(false),
    }
}
