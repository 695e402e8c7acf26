//! CLI definition and run orchestration
//!
//! The flag surface selects the run mode (sync or restore), identifies
//! the provider, container and local directory, and carries the exclude
//! patterns. Fatal setup errors (bad patterns, unknown provider, missing
//! directory or container) abort before any action executes.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;

use cs_core::executor::ProgressFn;
use cs_core::{Action, ExcludeSet, Executor, ObjectStore, RunSummary};
use cs_s3::{Provider, S3Client};

use crate::exit_code::ExitCode;
use crate::output::{render_summary, ActionProgress, Formatter, OutputConfig};

mod restore;
mod sync;

/// csync - mirror a local directory against an object-storage container
///
/// Sync mode (the default) uploads new and changed local files to the
/// container; restore mode downloads the container's contents back to
/// the local directory and never deletes anything.
#[derive(Parser, Debug)]
#[command(name = "csync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API username / access key id
    #[arg(long, env = "CSYNC_USERNAME")]
    pub username: String,

    /// API key / secret access key
    #[arg(long, env = "CSYNC_KEY", hide_env_values = true)]
    pub key: String,

    /// Storage provider: aws, wasabi, digitalocean, or an http(s)://
    /// endpoint URL for any other S3-compatible service
    #[arg(long, default_value = "aws")]
    pub provider: String,

    /// Region hint for providers that support multiple regions
    #[arg(long)]
    pub region: Option<String>,

    /// Name of the container storing the mirrored objects
    #[arg(long = "container-name")]
    pub container_name: String,

    /// Local directory to sync
    #[arg(long)]
    pub directory: PathBuf,

    /// Restore the container to the local directory instead of syncing
    #[arg(long)]
    pub restore: bool,

    /// Delete remote objects with no local counterpart (sync mode only)
    #[arg(long)]
    pub delete: bool,

    /// Glob pattern excluded in both directions (repeatable)
    #[arg(long = "exclude")]
    pub exclude: Vec<String>,

    /// Maximum number of concurrent transfers
    #[arg(long, default_value_t = cs_core::executor::DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress bar
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,
}

/// Everything a run needs, built once at startup and passed explicitly
pub struct RunContext {
    pub store: Arc<dyn ObjectStore>,
    pub container: String,
    pub directory: PathBuf,
    pub exclude: ExcludeSet,
    pub concurrency: usize,
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    };
    let formatter = Formatter::new(output_config.clone());

    let exclude = match ExcludeSet::new(&cli.exclude) {
        Ok(set) => set,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };

    let provider = match Provider::parse(&cli.provider) {
        Ok(p) => p,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };

    let client = match S3Client::new(&provider, cli.region.as_deref(), &cli.username, &cli.key).await
    {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to create storage client: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    let ctx = RunContext {
        store: Arc::new(client),
        container: cli.container_name,
        directory: cli.directory,
        exclude,
        concurrency: cli.concurrency,
    };

    if cli.restore {
        if cli.delete {
            formatter.warning("--delete has no effect in restore mode");
        }
        restore::execute(&ctx, &formatter, &output_config).await
    } else {
        sync::execute(&ctx, cli.delete, &formatter, &output_config).await
    }
}

/// Run a fixed action list and report the outcome.
///
/// Shared by both modes: drives the bounded executor with a progress
/// callback, tallies the results, prints the summary, and maps the tally
/// to the process exit code.
pub(crate) async fn run_and_report(
    ctx: &RunContext,
    actions: Vec<Action>,
    formatter: &Formatter,
    output_config: &OutputConfig,
    started: Instant,
) -> ExitCode {
    let progress = ActionProgress::new(output_config, actions.len() as u64);
    let bar = progress.clone();
    let on_result: ProgressFn = Arc::new(move |result| {
        bar.inc(&result.action.to_string());
    });

    let executor = Executor::new(
        Arc::clone(&ctx.store),
        ctx.container.as_str(),
        ctx.directory.as_path(),
        ctx.concurrency,
    );
    let results = executor.run_with_progress(actions, Some(on_result)).await;
    progress.finish();

    let summary = RunSummary::from_results(&results);

    for failure in &summary.failures {
        formatter.error(&format!("Failed to {failure}"));
    }

    if formatter.is_json() {
        formatter.json(&summary);
    } else {
        formatter.println(&render_summary(&summary));
    }

    tracing::info!(
        took_secs = started.elapsed().as_secs_f64(),
        total = summary.total(),
        failed = summary.failed,
        "run complete"
    );

    if summary.is_success() {
        formatter.success(&format!("{} action(s) completed.", summary.total()));
        ExitCode::Success
    } else {
        ExitCode::GeneralError
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Vec<&'static str> {
        vec![
            "csync",
            "--username",
            "user",
            "--key",
            "secret",
            "--container-name",
            "backups",
            "--directory",
            "/data",
        ]
    }

    #[test]
    fn test_minimal_args_parse() {
        let cli = Cli::try_parse_from(base_args()).unwrap();
        assert_eq!(cli.provider, "aws");
        assert_eq!(cli.container_name, "backups");
        assert_eq!(cli.concurrency, cs_core::executor::DEFAULT_CONCURRENCY);
        assert!(!cli.restore);
        assert!(!cli.delete);
        assert!(cli.exclude.is_empty());
    }

    #[test]
    fn test_missing_required_args_fail() {
        let result = Cli::try_parse_from(["csync", "--username", "user"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_exclude_is_repeatable() {
        let mut args = base_args();
        args.extend(["--exclude", "*.tmp", "--exclude", "logs/*"]);
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.exclude, ["*.tmp", "logs/*"]);
    }

    #[test]
    fn test_mode_and_tuning_flags() {
        let mut args = base_args();
        args.extend(["--restore", "--concurrency", "4", "--json"]);
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.restore);
        assert_eq!(cli.concurrency, 4);
        assert!(cli.json);
    }
}
