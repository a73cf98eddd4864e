//! `roster` -- list, add, and delete students against the grade API.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use roster_core::{FlowOutcome, Reconciler, StudentForm, StudentKey};
use roster_client::{init_tracing, ClientArgs, ClientConfig, ConsoleView, HttpGateway, LogFormat};
use tracing::debug;

#[derive(Parser)]
#[command(name = "roster", about = "Student grade roster", version)]
struct Cli {
    #[command(flatten)]
    client: ClientArgs,

    /// Log line format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every student and the grade average.
    List,
    /// Add a student.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        course: String,
        #[arg(long)]
        grade: String,
    },
    /// Delete a student by id.
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = ClientConfig::from(cli.client);
    let timeout = config.request_timeout;
    let gateway = HttpGateway::new(config).context("invalid client configuration")?;
    let view = Arc::new(ConsoleView::stdout());
    let reconciler =
        Reconciler::new(Arc::new(gateway), view).with_request_timeout(timeout);

    let loaded = reconciler.initialize().await;
    if !matches!(loaded, FlowOutcome::Loaded(_)) {
        return Ok(exit_code(&loaded));
    }

    let outcome = match cli.command {
        Command::List => loaded,
        Command::Add {
            name,
            course,
            grade,
        } => reconciler.add(&StudentForm::new(name, course, grade)).await,
        Command::Delete { id, yes } => {
            let confirmation = reconciler.request_delete(StudentKey::from(id));
            if yes || confirm()? {
                reconciler.confirm_delete(confirmation).await
            } else {
                reconciler.cancel_delete(confirmation)
            }
        }
    };

    debug!(?outcome, "done");
    Ok(exit_code(&outcome))
}

/// Reads a y/N answer from stdin. Anything but `y`/`yes` declines.
fn confirm() -> anyhow::Result<bool> {
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn exit_code(outcome: &FlowOutcome) -> ExitCode {
    match outcome {
        FlowOutcome::Added(_)
        | FlowOutcome::Loaded(_)
        | FlowOutcome::Deleted(_)
        | FlowOutcome::Cancelled => ExitCode::SUCCESS,
        FlowOutcome::Invalid(_) | FlowOutcome::Rejected(_) | FlowOutcome::Busy => {
            ExitCode::from(1)
        }
        FlowOutcome::Unreachable(_) => ExitCode::from(2),
    }
}
