use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gitup::cli::orchestration::{self, WorkflowArgs};
use gitup::{ui, GitupError, UpdateOutcome};

#[derive(clap::Parser)]
#[command(
    name = "gitup",
    version,
    about = "Keep a git checkout on its upstream's latest tag"
)]
struct Args {
    #[arg(default_value = ".", help = "Path of the repository to check")]
    path: String,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        short,
        long = "policy",
        value_name = "CLASS=ACTION",
        help = "Override a policy slot, e.g. minor=automatic (repeatable)"
    )]
    policies: Vec<String>,

    #[arg(long, help = "Only report whether an update is due")]
    check: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "gitup=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let workflow_args = WorkflowArgs {
        path: args.path,
        config_path: args.config,
        policy_overrides: args.policies,
        check_only: args.check,
    };

    let result = match orchestration::run(&workflow_args) {
        Ok(result) => result,
        Err(e) => {
            report_failure(&e);
            std::process::exit(1);
        }
    };

    if let Some(warning) = &result.warning {
        ui::display_warning(warning);
    }

    if workflow_args.check_only {
        ui::display_check_result(
            &result.local_tag,
            &result.remote_tag,
            result.due,
            &result.policy,
        );
        return Ok(());
    }

    match result.outcome {
        Some(UpdateOutcome::Updated { from, to }) => {
            ui::display_success(&format!("Moved from {} to {}", from, to));
        }
        Some(UpdateOutcome::Declined) => {
            ui::display_status(&format!("Staying on {}", result.local_tag));
        }
        None if result.warning.is_none() => {
            ui::display_status(&format!(
                "Already on the latest tag allowed by the policy ({})",
                result.local_tag
            ));
        }
        None => {}
    }

    Ok(())
}

fn report_failure(error: &GitupError) {
    match error {
        GitupError::CannotDowngradePolicy { .. }
        | GitupError::UnknownAction(_)
        | GitupError::UnknownChangeClass(_) => {
            ui::display_error(&format!("Invalid update policy: {}", error));
        }
        _ => ui::display_error(&error.to_string()),
    }
}
