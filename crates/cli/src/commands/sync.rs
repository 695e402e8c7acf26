//! Sync mode - mirror the local directory to the container
//!
//! Scans the local tree and lists the container concurrently, plans
//! uploads (and deletes, when enabled) from the difference, then runs
//! the plan on the bounded executor.

use std::time::Instant;

use cs_core::{list_container, plan_sync, scan};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

use super::{run_and_report, RunContext};

/// Execute a sync run
pub async fn execute(
    ctx: &RunContext,
    delete: bool,
    formatter: &Formatter,
    output_config: &OutputConfig,
) -> ExitCode {
    let started = Instant::now();

    // The scan is blocking filesystem work; run it off the async runtime
    // while the remote listing paginates.
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

    let actions = plan_sync(&local, &remote, delete);

    if actions.is_empty() {
        if formatter.is_json() {
            formatter.json(&cs_core::RunSummary::default());
        } else {
            formatter.success("Already in sync, nothing to do.");
        }
        return ExitCode::Success;
    }

    tracing::info!(actions = actions.len(), "sync plan ready");

    run_and_report(ctx, actions, formatter, output_config, started).await
}
