//! Parallel executor
//!
//! Runs a fixed action list against the storage backend on a bounded
//! worker pool. Every action is attempted exactly once; failures are
//! converted to `ActionResult` data at the worker boundary and never
//! cancel or block sibling actions.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::plan::Action;
use crate::report::ActionResult;
use crate::store::ObjectStore;

/// Default worker pool size
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Callback invoked as each action completes, in completion order
pub type ProgressFn = Arc<dyn Fn(&ActionResult) + Send + Sync>;

/// Bounded-concurrency action executor
pub struct Executor {
    store: Arc<dyn ObjectStore>,
    container: String,
    root: PathBuf,
    concurrency: usize,
}

impl Executor {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        container: impl Into<String>,
        root: impl Into<PathBuf>,
        concurrency: usize,
    ) -> Self {
        Self {
            store,
            container: container.into(),
            root: root.into(),
            concurrency: concurrency.max(1),
        }
    }

    /// Execute all actions, returning one result per action.
    pub async fn run(&self, actions: Vec<Action>) -> Vec<ActionResult> {
        self.run_with_progress(actions, None).await
    }

    /// Execute all actions, invoking `progress` as each one completes.
    ///
    /// At most `concurrency` actions are in flight at a time; workers
    /// block only on storage I/O, never on each other. Results arrive in
    /// completion order, which is unspecified.
    pub async fn run_with_progress(
        &self,
        actions: Vec<Action>,
        progress: Option<ProgressFn>,
    ) -> Vec<ActionResult> {
        let total = actions.len();
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut join_set = JoinSet::new();

        for action in actions {
            let store = Arc::clone(&self.store);
            let semaphore = Arc::clone(&semaphore);
            let container = self.container.clone();
            let root = self.root.clone();

            join_set.spawn(async move {
                // Semaphore is never closed, so acquire cannot fail
                let _permit = semaphore.acquire_owned().await.expect("semaphore open");
                execute_one(store.as_ref(), &container, &root, action).await
            });
        }

        let mut results = Vec::with_capacity(total);
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(result) => {
                    if let Some(progress) = &progress {
                        progress(&result);
                    }
                    results.push(result);
                }
                Err(e) => tracing::error!(error = %e, "worker task failed to complete"),
            }
        }

        results
    }
}

/// Execute a single action, converting any storage error into a failure
/// record for that action alone.
async fn execute_one(
    store: &dyn ObjectStore,
    container: &str,
    root: &Path,
    action: Action,
) -> ActionResult {
    tracing::debug!(%action, "executing");

    let outcome = match &action {
        Action::Upload(entry) => {
            let source = root.join(&entry.rel_path);
            store.put_object(container, &entry.rel_path, &source).await
        }
        Action::Download(entry) => {
            let dest = root.join(&entry.rel_path);
            match ensure_parent(&dest).await {
                Ok(()) => store.get_object(container, &entry.rel_path, &dest).await,
                Err(e) => Err(e),
            }
        }
        Action::Delete { rel_path } => store.delete_object(container, rel_path).await,
    };

    match outcome {
        Ok(()) => ActionResult::success(action),
        Err(e) => {
            tracing::warn!(%action, error = %e, "action failed");
            ActionResult::failure(action, e.to_string())
        }
    }
}

async fn ensure_parent(path: &Path) -> crate::error::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    Ok(())
}
