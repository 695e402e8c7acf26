//! Restore mode - download the container back to the local directory
//!
//! Additive-only: objects missing or outdated locally are downloaded,
//! and nothing is ever deleted, so a restore cannot destroy local data.

use std::time::Instant;

use cs_core::{list_container, plan_restore, scan};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

use super::{run_and_report, RunContext};

/// Execute a restore run
pub async fn execute(
    ctx: &RunContext,
    formatter: &Formatter,
    output_config: &OutputConfig,
) -> ExitCode {
    let started = Instant::now();

    // A restore may target a directory that doesn't exist yet
    if !ctx.directory.exists() {
        if let Err(e) = std::fs::create_dir_all(&ctx.directory) {
            formatter.error(&format!(
                "Failed to create {}: {e}",
                ctx.directory.display()
            ));
            return ExitCode::GeneralError;
        }
    }

    let local_task = tokio::task::spawn_blocking({
        let root = ctx.directory.clone();
        let exclude = ctx.exclude.clone();
        move || scan(&root, &exclude)
    });
    let remote_fut = list_container(ctx.store.as_ref(), &ctx.container, &ctx.exclude);

    let (local, remote) = tokio::join!(local_task, remote_fut);

    let local = match local {
        Ok(Ok(entries)) => entries,
        Ok(Err(e)) => {
            formatter.error(&format!("Local scan failed: {e}"));
            return ExitCode::from_error(&e);
        }
        Err(e) => {
            formatter.error(&format!("Local scan failed: {e}"));
            return ExitCode::GeneralError;
        }
    };

    let remote = match remote {
        Ok(entries) => entries,
        Err(e) => {
            formatter.error(&format!("Remote listing failed: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    tracing::info!(
        local = local.len(),
        remote = remote.len(),
        container = %ctx.container,
        "listings complete"
    );

    let actions = plan_restore(&remote, &local);

    if actions.is_empty() {
        if formatter.is_json() {
            formatter.json(&cs_core::RunSummary::default());
        } else {
            formatter.success("Local copy is up to date, nothing to restore.");
        }
        return ExitCode::Success;
    }

    tracing::info!(actions = actions.len(), "restore plan ready");

    run_and_report(ctx, actions, formatter, output_config, started).await
}
